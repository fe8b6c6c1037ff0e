use crate::LanguageCode;

/// Pseudo-code asking the endpoint to detect the source language
pub const AUTO: &str = "auto";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
}

pub const LANGUAGES: &[Language] = &[
    Language {
        code: "en",
        name: "English",
    },
    Language {
        code: "si",
        name: "Sinhala (සිංහල)",
    },
    Language {
        code: "ta",
        name: "Tamil (தமிழ்)",
    },
    Language {
        code: "hi",
        name: "Hindi (हिन्दी)",
    },
    Language {
        code: "es",
        name: "Spanish (Español)",
    },
    Language {
        code: "fr",
        name: "French (Français)",
    },
    Language {
        code: "de",
        name: "German (Deutsch)",
    },
    Language {
        code: "it",
        name: "Italian (Italiano)",
    },
    Language {
        code: "pt",
        name: "Portuguese",
    },
    Language {
        code: "ru",
        name: "Russian (Русский)",
    },
    Language {
        code: "ja",
        name: "Japanese (日本語)",
    },
    Language {
        code: "ko",
        name: "Korean (한국어)",
    },
    Language {
        code: "zh-CN",
        name: "Chinese Simplified (简体中文)",
    },
    Language {
        code: "ar",
        name: "Arabic (العربية)",
    },
    Language {
        code: "nl",
        name: "Dutch (Nederlands)",
    },
    Language {
        code: "sv",
        name: "Swedish (Svenska)",
    },
    Language {
        code: "pl",
        name: "Polish (Polski)",
    },
    Language {
        code: "tr",
        name: "Turkish (Türkçe)",
    },
    Language {
        code: "id",
        name: "Indonesian",
    },
    Language {
        code: "th",
        name: "Thai (ไทย)",
    },
];

pub fn language_name(code: &str) -> Option<&'static str> {
    if code == AUTO {
        return Some("Detect language");
    }
    LANGUAGES
        .iter()
        .find(|l| l.code.eq_ignore_ascii_case(code))
        .map(|l| l.name)
}

/// Look up by code, or by the start of the display name ("german", "Japanese")
pub fn find_language(query: &str) -> Option<&'static Language> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }

    LANGUAGES
        .iter()
        .find(|l| l.code.eq_ignore_ascii_case(query))
        .or_else(|| {
            let lower = query.to_lowercase();
            LANGUAGES
                .iter()
                .find(|l| l.name.to_lowercase().starts_with(&lower))
        })
}

/// Source and target currently selected for one input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguagePair {
    pub source: LanguageCode,
    pub target: LanguageCode,
}

impl LanguagePair {
    pub fn new(source: impl Into<LanguageCode>, target: impl Into<LanguageCode>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Swap direction. Returns false and leaves the pair alone when the source is `auto`.
    pub fn swap(&mut self) -> bool {
        if self.source == AUTO {
            return false;
        }
        std::mem::swap(&mut self.source, &mut self.target);
        true
    }

    pub fn describe(&self) -> String {
        let name = |code: &str| language_name(code).unwrap_or("unknown").to_string();
        format!(
            "{} ({}) -> {} ({})",
            name(&self.source),
            self.source,
            name(&self.target),
            self.target
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_by_code_and_name() {
        assert_eq!(find_language("zh-cn").map(|l| l.code), Some("zh-CN"));
        assert_eq!(find_language("german").map(|l| l.code), Some("de"));
        assert_eq!(find_language(" Japanese ").map(|l| l.code), Some("ja"));
        assert!(find_language("klingon").is_none());
        assert!(find_language("").is_none());
    }

    #[test]
    fn swap_refuses_auto_source() {
        let mut pair = LanguagePair::new(AUTO, "en");
        assert!(!pair.swap());
        assert_eq!(pair, LanguagePair::new(AUTO, "en"));

        let mut pair = LanguagePair::new("en", "si");
        assert!(pair.swap());
        assert_eq!(pair, LanguagePair::new("si", "en"));
    }

    #[test]
    fn describe_uses_display_names() {
        let pair = LanguagePair::new("en", "fr");
        assert_eq!(pair.describe(), "English (en) -> French (Français) (fr)");
        assert_eq!(language_name("xx"), None);
    }
}
