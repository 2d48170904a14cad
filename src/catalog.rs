//! Product catalog: products stored as per-language detail variants.
//!
//! The catalog is read from a JSON array, either a local file or an HTTP URL,
//! and kept in memory. Each product's details are resolved per request with
//! [`crate::resolver`].

use crate::i18n::{Language, RequestedLanguage};
use crate::resolver::{resolve, resolve_preferred, Localized};
use crate::retry::{with_retry_if, RetryConfig};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

/// One language's description of a product.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub language: Language,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Localized for ProductDetail {
    type Language = Language;

    fn language(&self) -> &Language {
        &self.language
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    pub sku: String,
    /// Absent when the source has no detail records at all
    #[serde(default)]
    pub details: Option<Vec<ProductDetail>>,
}

/// How a lookup was satisfied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Found in the requested language
    Hit,
    /// Found in a later preference (the canonical language)
    Fallback,
    /// No content in any preferred language
    Miss,
}

/// A product as served for one language.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedProduct {
    pub id: u64,
    pub sku: String,
    /// Language the caller asked for, as a code
    pub language: String,
    pub detail: Option<ProductDetail>,
    /// Languages this product has content in, in source order
    pub available_languages: Vec<Language>,
}

impl Product {
    /// Resolve this product's detail in the requested language, then in
    /// `fallback` when one is given.
    ///
    /// An unsupported request only ever sees the fallback.
    pub fn localize(
        &self,
        requested: &RequestedLanguage,
        fallback: Option<Language>,
    ) -> (LocalizedProduct, Resolution) {
        let wanted = requested.language();
        let details = self.details.as_deref();

        let preferences: Vec<Language> = wanted
            .into_iter()
            .chain(fallback.filter(|f| Some(*f) != wanted))
            .collect();

        let detail = resolve_preferred(details, &preferences);
        let resolution = match detail {
            Some(d) if Some(d.language) == wanted => Resolution::Hit,
            Some(_) => Resolution::Fallback,
            None => Resolution::Miss,
        };

        let mut available_languages: Vec<Language> = Vec::new();
        for d in details.unwrap_or_default() {
            if !available_languages.contains(&d.language) {
                available_languages.push(d.language);
            }
        }

        let localized = LocalizedProduct {
            id: self.id,
            sku: self.sku.clone(),
            language: requested.code().to_string(),
            detail: detail.cloned(),
            available_languages,
        };
        (localized, resolution)
    }

    /// The detail in exactly `language`, if any.
    pub fn detail(&self, language: Language) -> Option<&ProductDetail> {
        resolve(self.details.as_deref(), &language)
    }
}

/// In-memory product catalog, in source order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate product ids.
    ///
    /// Duplicate languages inside one product are kept (the first one is what
    /// callers will see) and logged.
    pub fn from_products(products: Vec<Product>) -> Result<Self> {
        let mut ids = HashSet::new();
        for product in &products {
            if !ids.insert(product.id) {
                bail!("Duplicate product id {} in catalog", product.id);
            }

            let mut seen = HashSet::new();
            for detail in product.details.as_deref().unwrap_or_default() {
                if !seen.insert(detail.language) {
                    warn!(
                        "Product {} has more than one '{}' detail; the first one is served",
                        product.id, detail.language
                    );
                }
            }
        }

        Ok(Self { products })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let products: Vec<Product> =
            serde_json::from_str(json).context("Failed to parse catalog JSON")?;
        Self::from_products(products)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: u64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Where the catalog is loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Url(String),
}

/// Failure fetching a remote catalog
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("catalog server returned {0}")]
    Status(reqwest::StatusCode),
    #[error("catalog request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl FetchError {
    /// Server errors and network failures are transient; client errors are not.
    fn is_retryable(&self) -> bool {
        match self {
            FetchError::Status(status) => status.is_server_error(),
            FetchError::Transport(_) => true,
        }
    }
}

impl CatalogSource {
    /// `http://` and `https://` values are URLs, anything else is a file path.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.starts_with("http://") || value.starts_with("https://") {
            CatalogSource::Url(value.to_string())
        } else {
            CatalogSource::File(PathBuf::from(value))
        }
    }

    pub async fn load(&self) -> Result<Catalog> {
        self.load_with_retry(&RetryConfig::catalog_fetch()).await
    }

    pub async fn load_with_retry(&self, retry: &RetryConfig) -> Result<Catalog> {
        let json = match self {
            CatalogSource::File(path) => tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read catalog file {}", path.display()))?,
            CatalogSource::Url(url) => fetch_catalog(url, retry)
                .await
                .with_context(|| format!("Failed to fetch catalog from {}", url))?,
        };

        let catalog = Catalog::from_json(&json)?;
        info!("Loaded {} products from {}", catalog.len(), self);
        Ok(catalog)
    }
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogSource::File(path) => write!(f, "{}", path.display()),
            CatalogSource::Url(url) => f.write_str(url),
        }
    }
}

async fn fetch_catalog(url: &str, retry: &RetryConfig) -> std::result::Result<String, FetchError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()?;
    let client = &client;

    with_retry_if(
        retry,
        "Catalog fetch",
        || async move {
            let response = client.get(url).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status(status));
            }
            Ok(response.text().await?)
        },
        FetchError::is_retryable,
    )
    .await
}
