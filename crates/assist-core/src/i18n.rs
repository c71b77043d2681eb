/// Key → display string lookup used for validation and notice messages.
pub trait Localizer: Send + Sync {
    /// Raw template for `key`, if the catalog knows it.
    fn text(&self, key: &str) -> Option<String>;

    /// Template for `key` with every `{name}` placeholder replaced.
    /// Unknown keys render as the key itself.
    fn format(&self, key: &str, params: &[(&str, &str)]) -> String {
        let template = self.text(key).unwrap_or_else(|| key.to_string());
        substitute(&template, params)
    }
}

/// Localizer with an empty catalog; callers fall back to built-in English.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTranslations;

impl Localizer for NoTranslations {
    fn text(&self, _key: &str) -> Option<String> {
        None
    }
}

pub fn substitute(template: &str, params: &[(&str, &str)]) -> String {
    params
        .iter()
        .fold(template.to_string(), |text, (name, value)| {
            text.replace(&format!("{{{name}}}"), value)
        })
}
