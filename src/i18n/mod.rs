//! Internationalization (i18n) module for multi-language support.
//!
//! All language-related logic lives here: which languages exist, how a
//! request's language is chosen, the localized API messages, and counters for
//! how well content coverage matches what callers ask for.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for all supported languages and their metadata
//! - `language`: Validated `Language` type plus request language negotiation
//! - `strings`: Localized API messages
//! - `metrics`: Resolution hit/fallback/miss counters
//!
//! # Example
//!
//! ```rust,ignore
//! use localized_catalog::i18n::{Language, LanguageRegistry};
//!
//! let chinese = Language::parse("zh-CN")?;
//! let from_request = Language::negotiate(Some("es"), Some("zh;q=0.9, en;q=0.5"))?;
//! let languages = LanguageRegistry::get().list_enabled();
//! ```

mod language;
mod metrics;
mod registry;
mod strings;

pub use language::{Language, LanguageError, RequestedLanguage};
pub use metrics::{MetricsReport, ResolutionMetrics};
pub use registry::{LanguageConfig, LanguageRegistry};
pub use strings::LanguageStrings;
