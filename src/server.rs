//! HTTP surface: serves the catalog with each product resolved to the
//! caller's language.

use crate::api::{paginate, ApiResponse, Page, PageRequest, TraceId};
use crate::catalog::{Catalog, LocalizedProduct, Product, Resolution};
use crate::config::Config;
use crate::error::AppError;
use crate::i18n::{
    Language, LanguageRegistry, LanguageStrings, MetricsReport, RequestedLanguage,
    ResolutionMetrics,
};
use crate::loading::LoadingFlag;
use crate::security::api_key_matches;
use anyhow::{Context, Result};
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

pub const TRACE_ID_HEADER: &str = "x-trace-id";
pub const API_KEY_HEADER: &str = "x-api-key";

/// State shared by all handlers.
pub struct AppState {
    config: Config,
    catalog: RwLock<Arc<Catalog>>,
    loading: LoadingFlag,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: Config, catalog: Catalog) -> Self {
        Self {
            config,
            catalog: RwLock::new(Arc::new(catalog)),
            loading: LoadingFlag::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn loading(&self) -> &LoadingFlag {
        &self.loading
    }

    /// Snapshot of the catalog currently in service.
    pub async fn catalog(&self) -> Arc<Catalog> {
        self.catalog.read().await.clone()
    }

    /// Load the catalog again from its source and swap it in.
    ///
    /// The loading flag is raised for the duration while the previous catalog
    /// keeps serving requests. On failure it stays in service.
    pub async fn reload(&self) -> std::result::Result<usize, AppError> {
        let _guard = self.loading.begin().ok_or(AppError::Loading)?;

        let catalog = self.config.catalog_source.load().await?;
        let count = catalog.len();
        *self.catalog.write().await = Arc::new(catalog);

        info!("✓ Catalog reloaded ({} products)", count);
        Ok(count)
    }

    /// Language to serve when the requested one has no content.
    fn fallback(&self, requested: &RequestedLanguage) -> Option<Language> {
        let canonical = Language::canonical();
        (self.config.fallback_to_canonical && requested.language() != Some(canonical))
            .then_some(canonical)
    }
}

/// Build the application router.
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/languages", get(list_languages))
        .route("/products", get(list_products))
        .route("/products/:id", get(get_product))
        .route("/admin/reload", post(reload_catalog))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the configured port and serve until Ctrl+C.
pub async fn serve(state: SharedState) -> Result<()> {
    let port = state.config.port;
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;

    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}

// ==================== Request Context ====================

/// Language and trace id of one request.
struct RequestContext {
    /// What content is looked up in
    requested: RequestedLanguage,
    /// What messages are written in
    language: Language,
    trace_id: TraceId,
}

fn accept_language(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok())
}

impl RequestContext {
    /// Context for a request without an explicit language.
    fn from_headers(headers: &HeaderMap) -> Self {
        let language = Language::from_accept_language(accept_language(headers));
        Self {
            requested: RequestedLanguage::Supported(language),
            language,
            trace_id: TraceId::generate(),
        }
    }

    /// Context for a request naming `explicit`, or the 400 response when it
    /// is not a language identifier.
    fn new(explicit: Option<&str>, headers: &HeaderMap) -> std::result::Result<Self, Response> {
        let ctx = Self::from_headers(headers);
        match Language::negotiate(explicit, accept_language(headers)) {
            Ok(requested) => Ok(Self {
                language: requested.language().unwrap_or(ctx.language),
                requested,
                ..ctx
            }),
            Err(e) => Err(ctx.failure(AppError::BadRequest(e.to_string()))),
        }
    }

    fn strings(&self) -> &'static LanguageStrings {
        LanguageStrings::for_language(self.language)
    }

    fn respond<T: Serialize>(&self, status: StatusCode, body: ApiResponse<T>) -> Response {
        let mut response = (status, Json(body)).into_response();
        if let Ok(value) = HeaderValue::from_str(self.trace_id.as_str()) {
            response
                .headers_mut()
                .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
        }
        response
    }

    fn success<T: Serialize>(&self, data: Option<T>, message: impl Into<String>) -> Response {
        self.respond(
            StatusCode::OK,
            ApiResponse::success(data, message, &self.trace_id),
        )
    }

    fn failure(&self, err: AppError) -> Response {
        let status = err.status();
        match &err {
            AppError::Internal(e) => error!("[{}] Request failed: {:#}", self.trace_id, e),
            _ => debug!("[{}] Request rejected: {}", self.trace_id, err),
        }

        let body: ApiResponse<()> = ApiResponse::failure(
            status.as_u16() as i32,
            err.localized_message(self.strings()),
            &self.trace_id,
        );
        self.respond(status, body)
    }
}

#[derive(Debug, Default, Deserialize)]
struct LanguageQuery {
    lang: Option<String>,
}

fn localize(
    product: &Product,
    requested: &RequestedLanguage,
    fallback: Option<Language>,
) -> LocalizedProduct {
    let (localized, resolution) = product.localize(requested, fallback);
    let metrics = ResolutionMetrics::global();
    match resolution {
        Resolution::Hit => metrics.record_hit(),
        Resolution::Fallback => metrics.record_fallback(),
        Resolution::Miss => {
            debug!(
                "Product {} has no content for '{}'",
                product.id,
                requested.code()
            );
            metrics.record_miss();
        }
    }
    localized
}

// ==================== Handlers ====================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthStatus {
    status: &'static str,
    loading: bool,
    products: usize,
    metrics: MetricsReport,
}

async fn health(State(state): State<SharedState>) -> Json<HealthStatus> {
    let loading = state.loading.is_loading();
    Json(HealthStatus {
        status: if loading { "loading" } else { "ok" },
        loading,
        products: state.catalog().await.len(),
        metrics: ResolutionMetrics::global().report(),
    })
}

async fn list_languages(
    headers: HeaderMap,
    query: std::result::Result<Query<LanguageQuery>, QueryRejection>,
) -> Response {
    let query = query.map(|Query(query)| query).unwrap_or_default();
    let ctx = match RequestContext::new(query.lang.as_deref(), &headers) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };

    let languages = LanguageRegistry::get().list_enabled();
    ctx.success(Some(languages), ctx.strings().ok)
}

async fn list_products(
    State(state): State<SharedState>,
    headers: HeaderMap,
    query: std::result::Result<Query<PageRequest>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            return RequestContext::from_headers(&headers)
                .failure(AppError::BadRequest(rejection.body_text()))
        }
    };
    let ctx = match RequestContext::new(query.lang.as_deref(), &headers) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };

    let (page, page_size) = query.normalize(state.config.page_limits());
    let catalog = state.catalog().await;
    let products = paginate(catalog.products(), page, page_size);
    let fallback = state.fallback(&ctx.requested);

    let localized = Page {
        items: products
            .items
            .iter()
            .map(|product| localize(product, &ctx.requested, fallback))
            .collect(),
        total: products.total,
        page: products.page,
        page_size: products.page_size,
        total_pages: products.total_pages,
    };

    ctx.success(Some(localized), ctx.strings().ok)
}

async fn get_product(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    query: std::result::Result<Query<LanguageQuery>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            return RequestContext::from_headers(&headers)
                .failure(AppError::BadRequest(rejection.body_text()))
        }
    };
    let ctx = match RequestContext::new(query.lang.as_deref(), &headers) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };

    let id: u64 = match id.parse() {
        Ok(id) => id,
        Err(_) => {
            return ctx.failure(AppError::BadRequest(format!("'{}' is not a product id", id)))
        }
    };

    let catalog = state.catalog().await;
    let Some(product) = catalog.get(id) else {
        return ctx.failure(AppError::NotFound(id));
    };

    let localized = localize(product, &ctx.requested, state.fallback(&ctx.requested));
    let message = if localized.detail.is_some() {
        ctx.strings().ok
    } else {
        ctx.strings().no_content
    };

    ctx.success(Some(localized), message)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReloadSummary {
    products: usize,
}

async fn reload_catalog(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let ctx = RequestContext::from_headers(&headers);

    let configured = state.config.api_key.as_deref();
    if configured.is_none() {
        return ctx.failure(AppError::AdminDisabled);
    }

    let presented = headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok());
    if !api_key_matches(configured, presented) {
        warn!("[{}] Rejected catalog reload: bad API key", ctx.trace_id);
        return ctx.failure(AppError::Unauthorized);
    }

    match state.reload().await {
        Ok(count) => {
            let message = ctx.strings().reloaded.replace("{count}", &count.to_string());
            ctx.success(Some(ReloadSummary { products: count }), message)
        }
        Err(e) => ctx.failure(e),
    }
}
