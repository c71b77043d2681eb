//! Canned narrative texts shown when the suggestion service cannot be used.

use assist_domain::{FieldName, Locale};
use rand::seq::IndexedRandom;

const FINANCIAL_SITUATION_EN: [&str; 3] = [
    "I am currently experiencing financial difficulties due to unexpected medical expenses and reduced working hours. Despite maintaining a steady job, my monthly expenses exceed my income, making it challenging to meet basic needs and maintain financial stability.",
    "My financial situation has become challenging due to a combination of increased living costs and reduced income opportunities. I am working hard to manage my expenses but require temporary assistance to meet essential needs while working toward financial recovery.",
    "I find myself in a difficult financial position following recent unexpected expenses and changes in my employment situation. While I remain committed to improving my circumstances, I currently need support to cover basic living expenses and maintain stability.",
];

const EMPLOYMENT_CIRCUMSTANCES_EN: [&str; 3] = [
    "I am currently employed part-time in the retail sector. My employment has been stable for the past two years, though I am seeking additional income opportunities to improve my financial situation. I have relevant skills and experience that could support full-time employment.",
    "I work in a seasonal position which provides steady income during peak periods but leaves gaps during slower months. I am actively pursuing additional training and job opportunities to create more consistent employment and income stability.",
    "My current employment provides valuable experience and steady part-time income, but I am seeking to expand my working hours or find additional employment opportunities. I have strong work ethic and relevant skills that make me a reliable employee.",
];

const REASON_FOR_APPLYING_EN: [&str; 3] = [
    "I am applying for this assistance program to help bridge the gap between my current financial obligations and income. This support would enable me to stabilize my situation while I work towards increasing my earning capacity and achieving long-term financial independence.",
    "This assistance program would provide crucial support during a challenging period in my life. I am committed to using this help responsibly to maintain stability while I work on improving my long-term financial situation and career prospects.",
    "I believe this assistance program aligns with my goals of achieving financial stability and independence. The support would help me manage immediate needs while I focus on building skills and opportunities for sustainable long-term success.",
];

const FINANCIAL_SITUATION_AR: [&str; 3] = [
    "أواجه حاليًا صعوبات مالية بسبب النفقات الطبية غير المتوقعة وتقليل ساعات العمل. على الرغم من الحفاظ على وظيفة ثابتة، تتجاوز نفقاتي الشهرية دخلي، مما يجعل من الصعب تلبية الاحتياجات الأساسية والحفاظ على الاستقرار المالي.",
    "أصبح وضعي المالي صعباً بسبب مزيج من ارتفاع تكاليف المعيشة وتقليل فرص الدخل. أعمل بجد لإدارة نفقاتي ولكنني أحتاج إلى مساعدة مؤقتة لتلبية الاحتياجات الأساسية أثناء العمل على التعافي المالي.",
    "أجد نفسي في وضع مالي صعب بعد النفقات غير المتوقعة الأخيرة والتغييرات في وضعي الوظيفي. بينما أبقى ملتزماً بتحسين ظروفي، أحتاج حالياً إلى الدعم لتغطية نفقات المعيشة الأساسية والحفاظ على الاستقرار.",
];

const EMPLOYMENT_CIRCUMSTANCES_AR: [&str; 3] = [
    "أعمل حالياً بدوام جزئي في قطاع التجزئة. كانت وظيفتي مستقرة خلال العامين الماضيين، رغم أنني أسعى للحصول على فرص دخل إضافية لتحسين وضعي المالي. لدي مهارات وخبرة ذات صلة يمكن أن تدعم العمل بدوام كامل.",
    "أعمل في منصب موسمي يوفر دخلاً ثابتاً خلال فترات الذروة لكنه يترك فجوات خلال الأشهر الأبطأ. أسعى بنشاط للحصول على تدريب إضافي وفرص عمل لخلق استقرار أكثر ثباتاً في التوظيف والدخل.",
    "توفر وظيفتي الحالية خبرة قيمة ودخلاً ثابتاً بدوام جزئي، لكنني أسعى لتوسيع ساعات عملي أو العثور على فرص عمل إضافية. لدي أخلاقيات عمل قوية ومهارات ذات صلة تجعلني موظفاً موثوقاً.",
];

const REASON_FOR_APPLYING_AR: [&str; 3] = [
    "أتقدم بطلب للحصول على برنامج المساعدة هذا للمساعدة في سد الفجوة بين التزاماتي المالية الحالية ودخلي. هذا الدعم سيمكنني من استقرار وضعي أثناء عملي نحو زيادة قدرتي على الكسب وتحقيق الاستقلال المالي طويل المدى.",
    "سيوفر برنامج المساعدة هذا دعماً حاسماً خلال فترة صعبة في حياتي. أنا ملتزم باستخدام هذه المساعدة بمسؤولية للحفاظ على الاستقرار أثناء عملي على تحسين وضعي المالي طويل المدى وآفاق مهنتي.",
    "أعتقد أن برنامج المساعدة هذا يتماشى مع أهدافي في تحقيق الاستقرار والاستقلال المالي. سيساعدني الدعم في إدارة الاحتياجات الفورية أثناء تركيزي على بناء المهارات والفرص للنجاح المستدام طويل المدى.",
];

/// All canned texts for `field` in `locale`; empty for non-narrative fields.
pub fn canned_suggestions(field: FieldName, locale: Locale) -> &'static [&'static str] {
    match (field, locale) {
        (FieldName::FinancialSituation, Locale::En) => &FINANCIAL_SITUATION_EN,
        (FieldName::EmploymentCircumstances, Locale::En) => &EMPLOYMENT_CIRCUMSTANCES_EN,
        (FieldName::ReasonForApplying, Locale::En) => &REASON_FOR_APPLYING_EN,
        (FieldName::FinancialSituation, Locale::Ar) => &FINANCIAL_SITUATION_AR,
        (FieldName::EmploymentCircumstances, Locale::Ar) => &EMPLOYMENT_CIRCUMSTANCES_AR,
        (FieldName::ReasonForApplying, Locale::Ar) => &REASON_FOR_APPLYING_AR,
        _ => &[],
    }
}

/// One canned text picked at random.
pub fn pick_canned(field: FieldName, locale: Locale) -> Option<&'static str> {
    canned_suggestions(field, locale)
        .choose(&mut rand::rng())
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_narrative_field_has_texts_in_both_languages() {
        for field in FieldName::ALL {
            for locale in [Locale::En, Locale::Ar] {
                let texts = canned_suggestions(field, locale);
                assert_eq!(texts.len(), if field.supports_suggestion() { 3 } else { 0 });
            }
        }
    }

    #[test]
    fn pick_returns_a_text_of_the_requested_language() {
        let english = pick_canned(FieldName::ReasonForApplying, Locale::En).expect("english");
        assert!(REASON_FOR_APPLYING_EN.contains(&english));

        let arabic = pick_canned(FieldName::ReasonForApplying, Locale::Ar).expect("arabic");
        assert!(REASON_FOR_APPLYING_AR.contains(&arabic));

        assert!(pick_canned(FieldName::City, Locale::En).is_none());
    }
}
