//! Language type: Flexible, validated language representation.
//!
//! A `Language` can only be built from an entry of the registry that is
//! enabled, whether the caller names it by code, by locale tag or by numeric id.

use crate::i18n::{LanguageConfig, LanguageRegistry};
use regex::Regex;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::sync::OnceLock;
use tracing::debug;

/// A validated language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    /// ISO 639-1 language code (e.g., "en", "zh")
    code: &'static str,
}

/// Why an identifier does not name a usable language
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LanguageError {
    #[error("Unknown language: '{0}'")]
    Unknown(String),
    #[error("Language '{0}' is not enabled")]
    Disabled(String),
    #[error("Malformed language identifier: '{0}'")]
    Malformed(String),
    #[error("Region-tagged language '{0}' is not allowed in content, use '{1}'")]
    Regional(String, String),
}

/// The language a request asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestedLanguage {
    Supported(Language),
    /// Well-formed, but names no enabled language. Nothing is served in it.
    Unsupported(String),
}

impl RequestedLanguage {
    pub fn language(&self) -> Option<Language> {
        match self {
            RequestedLanguage::Supported(language) => Some(*language),
            RequestedLanguage::Unsupported(_) => None,
        }
    }

    /// The identifier echoed back to the caller.
    pub fn code(&self) -> &str {
        match self {
            RequestedLanguage::Supported(language) => language.code(),
            RequestedLanguage::Unsupported(tag) => tag,
        }
    }
}

// Primary subtag plus optional region/script subtags, '-' or '_' separated
static LOCALE_TAG_REGEX: OnceLock<Regex> = OnceLock::new();

fn locale_tag_regex() -> &'static Regex {
    LOCALE_TAG_REGEX.get_or_init(|| {
        Regex::new(r"^([A-Za-z]{2,3})(?:[-_][A-Za-z0-9]{1,8})*$").expect("valid locale regex")
    })
}

impl Language {
    pub const ENGLISH: Language = Language { code: "en" };

    pub const CHINESE: Language = Language { code: "zh" };

    pub const SPANISH: Language = Language { code: "es" };

    /// Create a Language from a language code string.
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is valid and the language is enabled
    /// * `Err` if the code is not found or the language is disabled
    pub fn from_code(code: &str) -> Result<Language, LanguageError> {
        Self::from_config(LanguageRegistry::get().get_by_code(code), code)
    }

    /// Create a Language from its numeric identifier.
    pub fn from_numeric_id(id: u16) -> Result<Language, LanguageError> {
        Self::from_config(
            LanguageRegistry::get().get_by_numeric_id(id),
            &id.to_string(),
        )
    }

    fn from_config(
        config: Option<&'static LanguageConfig>,
        requested: &str,
    ) -> Result<Language, LanguageError> {
        match config {
            Some(config) if config.enabled => Ok(Language { code: config.code }),
            Some(_) => Err(LanguageError::Disabled(requested.to_string())),
            None => Err(LanguageError::Unknown(requested.to_string())),
        }
    }

    /// Parse a caller-supplied language identifier.
    ///
    /// Accepts a bare code (`zh`), a locale tag (`zh-CN`, `en_US`) whose primary
    /// subtag is used, or a numeric id (`2`).
    pub fn parse(input: &str) -> Result<Language, LanguageError> {
        let input = input.trim();

        if let Ok(id) = input.parse::<u16>() {
            return Self::from_numeric_id(id);
        }

        match locale_tag_regex().captures(input) {
            Some(caps) => Self::from_code(&caps[1]),
            None => Err(LanguageError::Malformed(input.to_string())),
        }
    }

    /// Parse the language of a content variant.
    ///
    /// Only a bare code or a numeric id is accepted. A locale tag such as
    /// `zh-TW` is refused instead of being reduced to `zh`, so two variants
    /// for different regions can never end up as the same language.
    pub fn parse_exact(input: &str) -> Result<Language, LanguageError> {
        let input = input.trim();

        if let Ok(id) = input.parse::<u16>() {
            return Self::from_numeric_id(id);
        }

        match locale_tag_regex().captures(input) {
            Some(caps) if caps[1].len() == input.len() => Self::from_code(input),
            Some(caps) => Err(LanguageError::Regional(
                input.to_string(),
                caps[1].to_ascii_lowercase(),
            )),
            None => Err(LanguageError::Malformed(input.to_string())),
        }
    }

    /// Pick the language for a request.
    ///
    /// An explicit identifier wins: an enabled language is served as is, and
    /// a well-formed identifier naming anything else is kept as
    /// [`RequestedLanguage::Unsupported`] so the caller gets no content rather
    /// than some other language's. Without one, the `Accept-Language` header
    /// is consulted (see [`Language::from_accept_language`]).
    ///
    /// # Errors
    /// Returns [`LanguageError::Malformed`] when the explicit identifier is not
    /// a language identifier at all.
    pub fn negotiate(
        explicit: Option<&str>,
        accept_language: Option<&str>,
    ) -> Result<RequestedLanguage, LanguageError> {
        let Some(explicit) = explicit.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(RequestedLanguage::Supported(Self::from_accept_language(
                accept_language,
            )));
        };

        match Self::parse(explicit) {
            Ok(language) => Ok(RequestedLanguage::Supported(language)),
            Err(e @ LanguageError::Malformed(_)) => Err(e),
            Err(e) => {
                debug!("Requested language has no content: {}", e);
                Ok(RequestedLanguage::Unsupported(explicit.to_ascii_lowercase()))
            }
        }
    }

    /// First enabled language of an `Accept-Language` header in q-weight
    /// order, or the canonical language when nothing matches.
    pub fn from_accept_language(accept_language: Option<&str>) -> Language {
        if let Some(header) = accept_language {
            for tag in parse_accept_language(header) {
                if let Ok(language) = Self::parse(&tag) {
                    return language;
                }
            }
        }

        Self::canonical()
    }

    /// Get the canonical language.
    pub fn canonical() -> Language {
        let config = LanguageRegistry::get().canonical();
        Language { code: config.code }
    }

    /// Get the ISO 639-1 language code.
    pub fn code(&self) -> &'static str {
        self.code
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::canonical()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

/// Split an `Accept-Language` header into tags ordered by descending q-weight.
///
/// Entries with `q=0` and the `*` wildcard are dropped. Ties keep header order.
fn parse_accept_language(header: &str) -> Vec<String> {
    let mut weighted: Vec<(String, f32)> = header
        .split(',')
        .filter_map(|entry| {
            let mut parts = entry.split(';');
            let tag = parts.next()?.trim();
            if tag.is_empty() || tag == "*" {
                return None;
            }

            let q = parts
                .filter_map(|p| p.trim().strip_prefix("q="))
                .find_map(|v| v.trim().parse::<f32>().ok())
                .unwrap_or(1.0);

            (q > 0.0).then(|| (tag.to_string(), q))
        })
        .collect();

    // sort_by is stable
    weighted.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    weighted.into_iter().map(|(tag, _)| tag).collect()
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code)
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct LanguageVisitor;

        impl<'de> Visitor<'de> for LanguageVisitor {
            type Value = Language;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a language code or numeric language id")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<Language, E> {
                Language::parse_exact(value).map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> std::result::Result<Language, E> {
                let id = u16::try_from(value).map_err(|_| E::custom("language id out of range"))?;
                Language::from_numeric_id(id).map_err(E::custom)
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> std::result::Result<Language, E> {
                let id = u16::try_from(value).map_err(|_| E::custom("language id out of range"))?;
                Language::from_numeric_id(id).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(LanguageVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Constant Tests ====================

    #[test]
    fn test_constants_match_registry() {
        let registry = LanguageRegistry::get();
        assert_eq!(registry.get_by_code(Language::ENGLISH.code()).unwrap().name, "English");
        assert_eq!(
            registry.get_by_code(Language::CHINESE.code()).unwrap().native_name,
            "中文"
        );
        assert_eq!(
            registry.get_by_code(Language::SPANISH.code()).unwrap().numeric_id,
            3
        );
    }

    // ==================== Construction Tests ====================

    #[test]
    fn test_from_code() {
        assert_eq!(Language::from_code("zh").unwrap(), Language::CHINESE);
        assert_eq!(Language::from_code("EN").unwrap(), Language::ENGLISH);
    }

    #[test]
    fn test_from_code_unknown() {
        let err = Language::from_code("de").unwrap_err();
        assert_eq!(err, LanguageError::Unknown("de".to_string()));
        assert!(err.to_string().contains("Unknown"));
    }

    #[test]
    fn test_from_code_disabled() {
        let err = Language::from_code("fr").unwrap_err();
        assert!(err.to_string().contains("not enabled"));
    }

    #[test]
    fn test_from_numeric_id() {
        assert_eq!(Language::from_numeric_id(1).unwrap(), Language::ENGLISH);
        assert_eq!(Language::from_numeric_id(2).unwrap(), Language::CHINESE);
        assert!(Language::from_numeric_id(4).is_err());
        assert!(Language::from_numeric_id(42).is_err());
    }

    #[test]
    fn test_parse_locale_tags() {
        assert_eq!(Language::parse("zh-CN").unwrap(), Language::CHINESE);
        assert_eq!(Language::parse("en_US").unwrap(), Language::ENGLISH);
        assert_eq!(Language::parse(" es-419 ").unwrap(), Language::SPANISH);
        assert_eq!(Language::parse("2").unwrap(), Language::CHINESE);
    }

    #[test]
    fn test_parse_malformed() {
        let err = Language::parse("not a language").unwrap_err();
        assert!(err.to_string().contains("Malformed"));
        assert!(Language::parse("").is_err());
    }

    #[test]
    fn test_parse_exact_accepts_codes_and_ids() {
        assert_eq!(Language::parse_exact("zh").unwrap(), Language::CHINESE);
        assert_eq!(Language::parse_exact(" ES ").unwrap(), Language::SPANISH);
        assert_eq!(Language::parse_exact("1").unwrap(), Language::ENGLISH);
    }

    #[test]
    fn test_parse_exact_refuses_region_tags() {
        assert_eq!(
            Language::parse_exact("zh-TW").unwrap_err(),
            LanguageError::Regional("zh-TW".to_string(), "zh".to_string())
        );
        assert!(matches!(
            Language::parse_exact("en_US"),
            Err(LanguageError::Regional(_, _))
        ));
        assert!(matches!(
            Language::parse_exact("??"),
            Err(LanguageError::Malformed(_))
        ));
    }

    #[test]
    fn test_canonical_and_default() {
        assert_eq!(Language::canonical(), Language::ENGLISH);
        assert_eq!(Language::default(), Language::ENGLISH);
    }

    // ==================== Negotiation Tests ====================

    fn supported(language: Language) -> RequestedLanguage {
        RequestedLanguage::Supported(language)
    }

    #[test]
    fn test_negotiate_explicit_wins() {
        let requested = Language::negotiate(Some("zh"), Some("es,en;q=0.5")).unwrap();
        assert_eq!(requested, supported(Language::CHINESE));
    }

    #[test]
    fn test_negotiate_unsupported_explicit_is_kept() {
        let requested = Language::negotiate(Some("fr"), None).unwrap();
        assert_eq!(requested, RequestedLanguage::Unsupported("fr".to_string()));
        assert_eq!(requested.language(), None);
        assert_eq!(requested.code(), "fr");

        // The header never substitutes for an explicit choice
        let requested = Language::negotiate(Some("DE"), Some("es")).unwrap();
        assert_eq!(requested, RequestedLanguage::Unsupported("de".to_string()));
    }

    #[test]
    fn test_negotiate_malformed_explicit_is_error() {
        let err = Language::negotiate(Some("klingon!"), Some("es")).unwrap_err();
        assert!(matches!(err, LanguageError::Malformed(_)));
    }

    #[test]
    fn test_negotiate_header_respects_q_weights() {
        let requested = Language::negotiate(None, Some("en;q=0.3, zh-TW;q=0.9, es;q=0.5"));
        assert_eq!(requested.unwrap(), supported(Language::CHINESE));
    }

    #[test]
    fn test_negotiate_skips_unsupported_header_entries() {
        let requested = Language::negotiate(None, Some("fr-FR, de;q=0.9, es;q=0.1"));
        assert_eq!(requested.unwrap(), supported(Language::SPANISH));
    }

    #[test]
    fn test_negotiate_defaults_to_canonical() {
        let english = supported(Language::ENGLISH);
        assert_eq!(Language::negotiate(None, None).unwrap(), english);
        assert_eq!(Language::negotiate(Some("  "), Some("*")).unwrap(), english);
        assert_eq!(Language::negotiate(None, Some("zh;q=0")).unwrap(), english);
    }

    #[test]
    fn test_parse_accept_language_ordering() {
        let tags = parse_accept_language("da, en-GB;q=0.8, en;q=0.7, *;q=0.1");
        assert_eq!(tags, vec!["da", "en-GB", "en"]);
    }

    // ==================== Serde Tests ====================

    #[test]
    fn test_serializes_as_code() {
        let json = serde_json::to_string(&Language::CHINESE).unwrap();
        assert_eq!(json, "\"zh\"");
    }

    #[test]
    fn test_deserializes_from_code_or_number() {
        let from_code: Language = serde_json::from_str("\"es\"").unwrap();
        let from_number: Language = serde_json::from_str("2").unwrap();
        assert_eq!(from_code, Language::SPANISH);
        assert_eq!(from_number, Language::CHINESE);
    }

    #[test]
    fn test_region_tag_is_not_collapsed_on_deserialize() {
        let err = serde_json::from_str::<Language>("\"zh-TW\"").unwrap_err();
        assert!(err.to_string().contains("Region-tagged language 'zh-TW'"));
        assert!(serde_json::from_str::<Language>("\"zh-CN\"").is_err());
    }

    #[test]
    fn test_deserialize_rejects_unknown() {
        assert!(serde_json::from_str::<Language>("\"de\"").is_err());
        assert!(serde_json::from_str::<Language>("70000").is_err());
        assert!(serde_json::from_str::<Language>("true").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Language::SPANISH.to_string(), "es");
    }
}
