//! Localized product catalog service.
//!
//! Products are stored as per-language detail variants; every request is
//! answered with the variant matching the caller's language, or with no
//! detail when the product has none in that language.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod i18n;
pub mod loading;
pub mod resolver;
pub mod retry;
pub mod scheduler;
pub mod security;
pub mod server;
