//! English and Arabic message tables.

use std::{collections::HashMap, sync::Arc};

use assist_core::Localizer;
use assist_domain::Locale;
use once_cell::sync::Lazy;

type Table = HashMap<&'static str, &'static str>;

static ENGLISH: Lazy<Table> = Lazy::new(|| {
    HashMap::from([
        ("validation.required", "This field is required"),
        ("validation.nameInvalid", "Name may only contain letters and spaces"),
        ("validation.nationalIdTooShort", "National ID is too short (8 characters)"),
        ("validation.nationalIdTooLong", "National ID is too long (8 characters)"),
        ("validation.nationalIdInvalid", "National ID may contain letters and digits only"),
        ("validation.email", "Enter a valid email address"),
        ("validation.phoneOnlyNumbers", "Phone number may contain numbers only"),
        ("validation.phoneTooShort", "Phone number is too short (at least 10 digits)"),
        ("validation.phoneTooLong", "Phone number is too long (at most 15 digits)"),
        ("steps.step1", "Personal Information"),
        ("steps.step2", "Family & Financial Information"),
        ("steps.step3", "Situation Descriptions"),
        ("fields.name", "Full Name"),
        ("fields.nationalId", "National ID"),
        ("fields.dateOfBirth", "Date of Birth"),
        ("fields.gender", "Gender"),
        ("fields.address", "Address"),
        ("fields.city", "City"),
        ("fields.state", "State / Province"),
        ("fields.country", "Country"),
        ("fields.phone", "Phone Number"),
        ("fields.email", "Email Address"),
        ("fields.maritalStatus", "Marital Status"),
        ("fields.dependents", "Number of Dependents"),
        ("fields.employmentStatus", "Employment Status"),
        ("fields.monthlyIncome", "Monthly Income"),
        ("fields.housingStatus", "Housing Status"),
        ("fields.financialSituation", "Current Financial Situation"),
        ("fields.employmentCircumstances", "Employment Circumstances"),
        ("fields.reasonForApplying", "Reason for Applying"),
        ("ai.errors.missingKey", "Suggestion service is not configured."),
        ("ai.errors.invalidKey", "Invalid API key for the suggestion service."),
        ("ai.errors.rateLimited", "Rate limit exceeded. Please try again in a moment."),
        ("ai.errors.unavailable", "Suggestion service is temporarily unavailable. Please try again later."),
        ("ai.errors.timeout", "Request timed out. Please check your connection and try again."),
        ("ai.errors.noSuggestion", "No suggestion received. Please try again."),
        ("ai.errors.general", "Failed to generate suggestion. Please try again."),
        ("ai.errors.unsupported", "Suggestions are only available for the description fields."),
        ("shell.stepHeader", "Step {current} of {total}: {title}"),
        ("shell.stepComplete", "This step is complete."),
        ("shell.stepIncomplete", "This step still has empty or invalid fields."),
        ("shell.blocked", "Please complete step {step} before continuing."),
        ("shell.atFirst", "Already on the first step."),
        ("shell.atLast", "Already on the last step. Use `submit` to send the application."),
        ("shell.restoreOffered", "Found a saved application from {savedAt} (step {step})."),
        ("shell.restoreQuestion", "Restore it?"),
        ("shell.restoreHint", "Type `restore` to continue it or `discard` to start over."),
        ("shell.restored", "Saved application restored at step {step}."),
        ("shell.discarded", "Saved application discarded. Starting fresh."),
        ("shell.submitting", "Submitting application..."),
        ("shell.submitted", "Application submitted. Reference: {reference}"),
        ("shell.processingTime", "Estimated processing time: {time}"),
        ("shell.anotherStarted", "Started a new application."),
        ("shell.suggestionReady", "Suggestion for {field}:"),
        ("shell.suggestionAccepted", "Suggestion applied to {field}."),
        ("shell.suggestionDiscarded", "Suggestion discarded."),
        ("shell.saved", "Progress saved."),
        ("shell.localeChanged", "Language set to English."),
    ])
});

static ARABIC: Lazy<Table> = Lazy::new(|| {
    HashMap::from([
        ("validation.required", "هذا الحقل مطلوب"),
        ("validation.nameInvalid", "يجب أن يحتوي الاسم على أحرف ومسافات فقط"),
        ("validation.nationalIdTooShort", "رقم الهوية قصير جداً (8 أحرف)"),
        ("validation.nationalIdTooLong", "رقم الهوية طويل جداً (8 أحرف)"),
        ("validation.nationalIdInvalid", "رقم الهوية يجب أن يحتوي على أحرف وأرقام فقط"),
        ("validation.email", "أدخل بريداً إلكترونياً صالحاً"),
        ("validation.phoneOnlyNumbers", "رقم الهاتف يجب أن يحتوي على أرقام فقط"),
        ("validation.phoneTooShort", "رقم الهاتف قصير جداً (10 أرقام على الأقل)"),
        ("validation.phoneTooLong", "رقم الهاتف طويل جداً (15 رقماً كحد أقصى)"),
        ("steps.step1", "المعلومات الشخصية"),
        ("steps.step2", "المعلومات العائلية والمالية"),
        ("steps.step3", "وصف الحالة"),
        ("fields.name", "الاسم الكامل"),
        ("fields.nationalId", "رقم الهوية الوطنية"),
        ("fields.dateOfBirth", "تاريخ الميلاد"),
        ("fields.gender", "الجنس"),
        ("fields.address", "العنوان"),
        ("fields.city", "المدينة"),
        ("fields.state", "الولاية / المقاطعة"),
        ("fields.country", "الدولة"),
        ("fields.phone", "رقم الهاتف"),
        ("fields.email", "البريد الإلكتروني"),
        ("fields.maritalStatus", "الحالة الاجتماعية"),
        ("fields.dependents", "عدد المعالين"),
        ("fields.employmentStatus", "الحالة الوظيفية"),
        ("fields.monthlyIncome", "الدخل الشهري"),
        ("fields.housingStatus", "حالة السكن"),
        ("fields.financialSituation", "الوضع المالي الحالي"),
        ("fields.employmentCircumstances", "ظروف العمل"),
        ("fields.reasonForApplying", "سبب التقديم"),
        ("ai.errors.missingKey", "خدمة الاقتراحات غير مهيأة."),
        ("ai.errors.invalidKey", "مفتاح خدمة الاقتراحات غير صالح."),
        ("ai.errors.rateLimited", "تم تجاوز حد الطلبات. يرجى المحاولة بعد قليل."),
        ("ai.errors.unavailable", "خدمة الاقتراحات غير متاحة مؤقتاً. يرجى المحاولة لاحقاً."),
        ("ai.errors.timeout", "انتهت مهلة الطلب. يرجى التحقق من الاتصال والمحاولة مرة أخرى."),
        ("ai.errors.noSuggestion", "لم يتم استلام أي اقتراح. يرجى المحاولة مرة أخرى."),
        ("ai.errors.general", "تعذر إنشاء الاقتراح. يرجى المحاولة مرة أخرى."),
        ("ai.errors.unsupported", "الاقتراحات متاحة لحقول الوصف فقط."),
        ("shell.stepHeader", "الخطوة {current} من {total}: {title}"),
        ("shell.stepComplete", "اكتملت هذه الخطوة."),
        ("shell.stepIncomplete", "لا تزال هذه الخطوة تحتوي على حقول فارغة أو غير صالحة."),
        ("shell.blocked", "يرجى إكمال الخطوة {step} قبل المتابعة."),
        ("shell.atFirst", "أنت بالفعل في الخطوة الأولى."),
        ("shell.atLast", "أنت بالفعل في الخطوة الأخيرة. استخدم `submit` لإرسال الطلب."),
        ("shell.restoreOffered", "تم العثور على طلب محفوظ بتاريخ {savedAt} (الخطوة {step})."),
        ("shell.restoreQuestion", "هل تريد استعادته؟"),
        ("shell.restoreHint", "اكتب `restore` للمتابعة أو `discard` للبدء من جديد."),
        ("shell.restored", "تمت استعادة الطلب المحفوظ عند الخطوة {step}."),
        ("shell.discarded", "تم تجاهل الطلب المحفوظ. بدء طلب جديد."),
        ("shell.submitting", "جارٍ إرسال الطلب..."),
        ("shell.submitted", "تم إرسال الطلب. الرقم المرجعي: {reference}"),
        ("shell.processingTime", "مدة المعالجة المتوقعة: {time}"),
        ("shell.anotherStarted", "تم بدء طلب جديد."),
        ("shell.suggestionReady", "اقتراح لحقل {field}:"),
        ("shell.suggestionAccepted", "تم تطبيق الاقتراح على {field}."),
        ("shell.suggestionDiscarded", "تم تجاهل الاقتراح."),
        ("shell.saved", "تم حفظ التقدم."),
        ("shell.localeChanged", "تم تعيين اللغة إلى العربية."),
    ])
});

/// Message catalog for one locale. Arabic lookups fall back to English for
/// keys without a translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Catalog {
    locale: Locale,
}

impl Catalog {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn shared(locale: Locale) -> Arc<dyn Localizer> {
        Arc::new(Self::new(locale))
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Translation of `key`, or the key itself when nothing matches.
    pub fn get(&self, key: &str) -> String {
        self.text(key).unwrap_or_else(|| key.to_string())
    }

    fn table(&self) -> &'static Table {
        match self.locale {
            Locale::En => &ENGLISH,
            Locale::Ar => &ARABIC,
        }
    }
}

impl Localizer for Catalog {
    fn text(&self, key: &str) -> Option<String> {
        self.table()
            .get(key)
            .or_else(|| ENGLISH.get(key))
            .map(|text| text.to_string())
    }
}
