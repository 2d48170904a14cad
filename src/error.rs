use crate::i18n::LanguageStrings;
use axum::http::StatusCode;

/// Failures surfaced to API callers.
///
/// A product without content in the requested language is not an error; it
/// is a successful response with no detail.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("product {0} not found")]
    NotFound(u64),

    #[error("invalid request: {0}")]
    BadRequest(String),

    #[error("missing or invalid API key")]
    Unauthorized,

    #[error("admin endpoints are disabled")]
    AdminDisabled,

    #[error("catalog is loading")]
    Loading,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) | AppError::AdminDisabled => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Loading => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Caller-facing message in the request's language.
    ///
    /// Internal details are never exposed.
    pub fn localized_message(&self, strings: &LanguageStrings) -> String {
        match self {
            AppError::NotFound(id) => strings.not_found.replace("{id}", &id.to_string()),
            AppError::BadRequest(error) => strings.bad_request.replace("{error}", error),
            AppError::Unauthorized => strings.unauthorized.to_string(),
            AppError::AdminDisabled => strings.endpoint_disabled.to_string(),
            AppError::Loading => strings.loading.to_string(),
            AppError::Internal(_) => strings.internal_error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::NotFound(1).status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::AdminDisabled.status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Loading.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            AppError::Internal(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_localized_messages_fill_placeholders() {
        let strings = LanguageStrings::for_language(Language::CHINESE);

        assert_eq!(AppError::NotFound(42).localized_message(strings), "未找到商品 42");
        assert_eq!(
            AppError::BadRequest("page".into()).localized_message(strings),
            "请求无效：page"
        );
    }

    #[test]
    fn test_internal_message_hides_details() {
        let strings = LanguageStrings::for_language(Language::ENGLISH);
        let message = AppError::Internal(anyhow::anyhow!("db password leaked")).localized_message(strings);

        assert_eq!(message, "Internal server error");
    }
}
