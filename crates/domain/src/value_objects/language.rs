//! Response language value object

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

macro_rules! languages {
    ($( $(#[$meta:meta])* $variant:ident => ($name:literal, $display:literal, $iso:literal) ),+ $(,)?) => {
        /// A language the coach can answer in
        ///
        /// Used both as a transcription hint (ISO-639-1 code) and as the
        /// instruction for the coach model's reply language.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum Language {
            $(
                #[doc = $display]
                $(#[$meta])*
                $variant,
            )+
        }

        impl Language {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Lowercase language name, e.g. `english`
            #[must_use]
            pub const fn code(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }

            /// Human-readable name with the native spelling
            #[must_use]
            pub const fn display_name(&self) -> &'static str {
                match self {
                    $(Self::$variant => $display,)+
                }
            }

            /// ISO-639-1 code understood by speech-to-text APIs
            #[must_use]
            pub const fn iso_code(&self) -> &'static str {
                match self {
                    $(Self::$variant => $iso,)+
                }
            }
        }
    };
}

languages! {
    #[default]
    English => ("english", "English", "en"),
    Persian => ("persian", "Persian (فارسی)", "fa"),
    Spanish => ("spanish", "Spanish (Español)", "es"),
    French => ("french", "French (Français)", "fr"),
    German => ("german", "German (Deutsch)", "de"),
    Italian => ("italian", "Italian (Italiano)", "it"),
    Portuguese => ("portuguese", "Portuguese (Português)", "pt"),
    Russian => ("russian", "Russian (Русский)", "ru"),
    Japanese => ("japanese", "Japanese (日本語)", "ja"),
    Korean => ("korean", "Korean (한국어)", "ko"),
    Chinese => ("chinese", "Chinese (中文)", "zh"),
    Arabic => ("arabic", "Arabic (العربية)", "ar"),
    Turkish => ("turkish", "Turkish (Türkçe)", "tr"),
    Polish => ("polish", "Polish (Polski)", "pl"),
    Dutch => ("dutch", "Dutch (Nederlands)", "nl"),
    Swedish => ("swedish", "Swedish (Svenska)", "sv"),
    Danish => ("danish", "Danish (Dansk)", "da"),
    Norwegian => ("norwegian", "Norwegian (Norsk)", "no"),
    Finnish => ("finnish", "Finnish (Suomi)", "fi"),
    Czech => ("czech", "Czech (Čeština)", "cs"),
    Greek => ("greek", "Greek (Ελληνικά)", "el"),
    Hebrew => ("hebrew", "Hebrew (עברית)", "he"),
    Hindi => ("hindi", "Hindi (हिन्दी)", "hi"),
    Thai => ("thai", "Thai (ไทย)", "th"),
    Vietnamese => ("vietnamese", "Vietnamese (Tiếng Việt)", "vi"),
    Indonesian => ("indonesian", "Indonesian (Bahasa Indonesia)", "id"),
    Malay => ("malay", "Malay (Bahasa Melayu)", "ms"),
    Filipino => ("filipino", "Filipino", "fil"),
}

impl Language {
    /// All supported languages in declaration order
    #[must_use]
    pub const fn all() -> &'static [Self] {
        Self::ALL
    }

    /// English name with a leading capital, e.g. `Spanish`
    ///
    /// Used in the `[Respond in ...]` instruction sent to the coach model.
    #[must_use]
    pub fn english_name(&self) -> String {
        let code = self.code();
        let mut chars = code.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        })
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = DomainError;

    /// Parse from a language name or an ISO-639-1 code, ignoring case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|lang| lang.code() == needle || lang.iso_code() == needle)
            .ok_or_else(|| DomainError::UnsupportedLanguage(s.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supports_twenty_eight_languages() {
        assert_eq!(Language::all().len(), 28);
    }

    #[test]
    fn default_is_english() {
        assert_eq!(Language::default(), Language::English);
    }

    #[test]
    fn parses_name_case_insensitively() {
        assert_eq!("Spanish".parse::<Language>().unwrap(), Language::Spanish);
        assert_eq!("  PERSIAN ".parse::<Language>().unwrap(), Language::Persian);
    }

    #[test]
    fn parses_iso_code() {
        assert_eq!("ko".parse::<Language>().unwrap(), Language::Korean);
        assert_eq!("FIL".parse::<Language>().unwrap(), Language::Filipino);
    }

    #[test]
    fn rejects_unknown_language() {
        let err = "klingon".parse::<Language>().unwrap_err();
        assert!(matches!(err, DomainError::UnsupportedLanguage(ref l) if l == "klingon"));
    }

    #[test]
    fn iso_codes_match() {
        assert_eq!(Language::English.iso_code(), "en");
        assert_eq!(Language::Persian.iso_code(), "fa");
        assert_eq!(Language::Chinese.iso_code(), "zh");
        assert_eq!(Language::Norwegian.iso_code(), "no");
    }

    #[test]
    fn display_names_include_native_spelling() {
        assert_eq!(Language::German.display_name(), "German (Deutsch)");
        assert_eq!(Language::English.display_name(), "English");
    }

    #[test]
    fn english_name_is_capitalized() {
        assert_eq!(Language::Vietnamese.english_name(), "Vietnamese");
    }

    #[test]
    fn codes_are_unique() {
        let all = Language::all();
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.code(), b.code());
                assert_ne!(a.iso_code(), b.iso_code());
            }
        }
    }

    #[test]
    fn serde_uses_lowercase_name() {
        let json = serde_json::to_string(&Language::French).unwrap();
        assert_eq!(json, "\"french\"");
    }
}
