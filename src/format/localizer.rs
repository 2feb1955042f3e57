//! Localization hook.
//!
//! Translation tables live outside this crate. The formatter only needs one capability:
//! "give me the display text for this source string".

use std::collections::HashMap;

/// Translates source strings (lookup titles, `True`/`False`) for display.
pub trait Localizer: Send + Sync {
    fn translate(&self, text: &str) -> String;
}

/// Returns every string unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTranslation;

impl Localizer for NoTranslation {
    fn translate(&self, text: &str) -> String {
        text.to_string()
    }
}

/// A fixed translation table. Unknown strings fall back to the source text.
#[derive(Debug, Default, Clone)]
pub struct Translations {
    entries: HashMap<String, String>,
}

impl Translations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, source: impl Into<String>, translated: impl Into<String>) -> Self {
        self.entries.insert(source.into(), translated.into());
        self
    }
}

impl Localizer for Translations {
    fn translate(&self, text: &str) -> String {
        self.entries
            .get(text)
            .cloned()
            .unwrap_or_else(|| text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translations_fall_back_to_source() {
        let fr = Translations::new().with("True", "Vrai");
        assert_eq!(fr.translate("True"), "Vrai");
        assert_eq!(fr.translate("False"), "False");
        assert_eq!(NoTranslation.translate("Draft"), "Draft");
    }
}
