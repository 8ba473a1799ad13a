//! Language negotiation for localized error messages

use serde::{Deserialize, Serialize};

/// Language preference for internationalization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "zh")]
    Chinese,
}

impl Language {
    /// Pick the highest-quality supported language from an Accept-Language header
    ///
    /// Example header: `zh-CN,zh;q=0.9,en-US;q=0.8,en;q=0.7`
    pub fn from_accept_language(header: &str) -> Self {
        let mut preferred = Language::English;
        let mut max_quality = 0.0_f32;

        for entry in header.split(',') {
            let mut parts = entry.trim().split(';');
            let tag = parts.next().unwrap_or_default().to_lowercase();
            let quality = parts
                .next()
                .and_then(|q| q.trim().strip_prefix("q="))
                .and_then(|q| q.parse::<f32>().ok())
                .unwrap_or(1.0);

            let candidate = if tag.starts_with("zh") {
                Language::Chinese
            } else if tag.starts_with("en") {
                Language::English
            } else {
                continue;
            };

            if quality > max_quality {
                preferred = candidate;
                max_quality = quality;
            }
        }

        preferred
    }

    /// Get language code (ISO 639-1)
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Chinese => "zh",
        }
    }

    /// Choose between an English and a Chinese message
    pub fn pick<'a>(&self, en: &'a str, zh: &'a str) -> &'a str {
        match self {
            Language::English => en,
            Language::Chinese => zh,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_accept_language_quality_ordering() {
        assert_eq!(
            Language::from_accept_language("zh-CN,zh;q=0.9,en-US;q=0.8"),
            Language::Chinese
        );
        assert_eq!(
            Language::from_accept_language("en-US,en;q=0.9,zh;q=0.5"),
            Language::English
        );
        assert_eq!(Language::from_accept_language("fr-FR"), Language::English);
    }

    #[test]
    fn test_pick() {
        assert_eq!(Language::Chinese.pick("hello", "你好"), "你好");
        assert_eq!(Language::English.pick("hello", "你好"), "hello");
    }
}
