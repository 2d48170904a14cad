//! Language registry: Single source of truth for all supported languages.
//!
//! This module provides a centralized registry of all languages the catalog can
//! hold content for. It uses a singleton pattern with `OnceLock` to ensure
//! thread-safe initialization and access.

use serde::Serialize;
use std::sync::OnceLock;

/// Configuration for a supported language.
///
/// Contains all metadata for a specific language, including its code, the
/// numeric identifier used by clients that address languages by number, its
/// names, enabled status, and whether it's the canonical language.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageConfig {
    /// ISO 639-1 language code (e.g., "en", "zh")
    pub code: &'static str,

    /// Numeric identifier accepted in place of the code (e.g., `lang=2`)
    pub numeric_id: u16,

    /// English name of the language (e.g., "English", "Chinese")
    pub name: &'static str,

    /// Native name of the language (e.g., "English", "中文")
    pub native_name: &'static str,

    /// Whether this is the canonical language (only one should be true)
    pub is_canonical: bool,

    /// Whether this language is enabled for use
    #[serde(skip)]
    pub enabled: bool,
}

/// Global language registry singleton.
///
/// Initialized once on first access and immutable thereafter.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its code (case-insensitive).
    ///
    /// # Returns
    /// * `Some(&LanguageConfig)` if the language exists
    /// * `None` if the language is not found
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages
            .iter()
            .find(|lang| lang.code.eq_ignore_ascii_case(code))
    }

    /// Get a language configuration by its numeric identifier.
    pub fn get_by_numeric_id(&self, id: u16) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.numeric_id == id)
    }

    /// Get all enabled languages.
    pub fn list_enabled(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().filter(|lang| lang.enabled).collect()
    }

    /// Get the canonical language configuration.
    ///
    /// The canonical language is the default when a request names no usable
    /// language, and the secondary preference when canonical fallback is on.
    ///
    /// # Panics
    /// Panics if no canonical language is found or if multiple canonical
    /// languages are defined (this indicates a configuration error).
    pub fn canonical(&self) -> &LanguageConfig {
        let canonical_langs: Vec<_> = self
            .languages
            .iter()
            .filter(|lang| lang.is_canonical)
            .collect();

        match canonical_langs.len() {
            0 => panic!("No canonical language found in registry"),
            1 => canonical_langs[0],
            _ => panic!("Multiple canonical languages found in registry"),
        }
    }
}

/// Default language configurations.
///
/// English is canonical. French is registered but disabled until its content
/// is ready.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "en",
            numeric_id: 1,
            name: "English",
            native_name: "English",
            is_canonical: true,
            enabled: true,
        },
        LanguageConfig {
            code: "zh",
            numeric_id: 2,
            name: "Chinese",
            native_name: "中文",
            is_canonical: false,
            enabled: true,
        },
        LanguageConfig {
            code: "es",
            numeric_id: 3,
            name: "Spanish",
            native_name: "Español",
            is_canonical: false,
            enabled: true,
        },
        LanguageConfig {
            code: "fr",
            numeric_id: 4,
            name: "French",
            native_name: "Français",
            is_canonical: false,
            enabled: false,
        },
    ]
}
