use crate::api::PageLimits;
use crate::catalog::CatalogSource;
use anyhow::{bail, Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Catalog
    pub catalog_source: CatalogSource,
    pub catalog_refresh_cron: Option<String>,

    // Server
    pub port: u16,
    pub api_key: Option<String>,

    // Responses
    pub default_page_size: u32,
    pub max_page_size: u32,
    pub fallback_to_canonical: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let config = Self {
            // Catalog - file path or http(s) URL
            catalog_source: CatalogSource::parse(
                &std::env::var("CATALOG_SOURCE").unwrap_or_else(|_| "catalog.json".to_string()),
            ),
            catalog_refresh_cron: non_empty_var("CATALOG_REFRESH_CRON"),

            // Server
            port: match std::env::var("PORT") {
                Ok(v) => v.parse().context("PORT must be a valid port number")?,
                Err(_) => 8080,
            },
            api_key: non_empty_var("API_KEY"),

            // Responses
            default_page_size: std::env::var("DEFAULT_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(20),
            max_page_size: std::env::var("MAX_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100),
            fallback_to_canonical: std::env::var("FALLBACK_TO_CANONICAL")
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.max_page_size == 0 {
            bail!("MAX_PAGE_SIZE must be at least 1");
        }
        if self.default_page_size == 0 || self.default_page_size > self.max_page_size {
            bail!(
                "DEFAULT_PAGE_SIZE must be between 1 and MAX_PAGE_SIZE ({})",
                self.max_page_size
            );
        }
        Ok(())
    }

    pub fn page_limits(&self) -> PageLimits {
        PageLimits {
            default_page_size: self.default_page_size,
            max_page_size: self.max_page_size,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
