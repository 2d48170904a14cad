use crate::i18n::Language;

/// All localized API messages for a language
///
/// These fill the `message` field of the response envelope.
#[derive(Debug, Clone)]
pub struct LanguageStrings {
    /// Message for a successful request
    pub ok: &'static str,

    /// Message when the product exists but has no content in the language
    pub no_content: &'static str,

    /// Message when the requested product does not exist
    /// Placeholders: {id}
    pub not_found: &'static str,

    /// Message for malformed query parameters
    /// Placeholders: {error}
    pub bad_request: &'static str,

    /// Message for a missing or wrong API key
    pub unauthorized: &'static str,

    /// Message for admin endpoints when no API key is configured
    pub endpoint_disabled: &'static str,

    /// Message while the catalog is being (re)loaded
    pub loading: &'static str,

    /// Message for unexpected server failures
    pub internal_error: &'static str,

    /// Message after a successful catalog reload
    /// Placeholders: {count}
    pub reloaded: &'static str,
}

impl LanguageStrings {
    /// Get the message table for a language.
    ///
    /// Every enabled language has a table; anything else gets English.
    pub fn for_language(language: Language) -> &'static LanguageStrings {
        match language.code() {
            "zh" => &CHINESE_STRINGS,
            "es" => &SPANISH_STRINGS,
            _ => &ENGLISH_STRINGS,
        }
    }
}

// ==================== English Strings ====================

pub const ENGLISH_STRINGS: LanguageStrings = LanguageStrings {
    ok: "OK",
    no_content: "No content is available in the requested language",
    not_found: "Product {id} not found",
    bad_request: "Invalid request: {error}",
    unauthorized: "Missing or invalid API key",
    endpoint_disabled: "This endpoint is not enabled",
    loading: "The catalog is loading, please retry shortly",
    internal_error: "Internal server error",
    reloaded: "Catalog reloaded with {count} products",
};

// ==================== Chinese Strings ====================

pub const CHINESE_STRINGS: LanguageStrings = LanguageStrings {
    ok: "成功",
    no_content: "该语言暂无内容",
    not_found: "未找到商品 {id}",
    bad_request: "请求无效：{error}",
    unauthorized: "API 密钥缺失或无效",
    endpoint_disabled: "该接口未启用",
    loading: "目录加载中，请稍后重试",
    internal_error: "服务器内部错误",
    reloaded: "目录已重新加载，共 {count} 个商品",
};

// ==================== Spanish Strings ====================

pub const SPANISH_STRINGS: LanguageStrings = LanguageStrings {
    ok: "Correcto",
    no_content: "No hay contenido disponible en el idioma solicitado",
    not_found: "Producto {id} no encontrado",
    bad_request: "Solicitud inválida: {error}",
    unauthorized: "Clave de API ausente o inválida",
    endpoint_disabled: "Este endpoint no está habilitado",
    loading: "El catálogo se está cargando, inténtalo de nuevo en breve",
    internal_error: "Error interno del servidor",
    reloaded: "Catálogo recargado con {count} productos",
};
