use subtle::ConstantTimeEq;

/// Constant-time string comparison for API keys
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Check a presented `X-API-Key` against the configured key.
///
/// Always false when no key is configured or none was presented.
pub fn api_key_matches(configured: Option<&str>, presented: Option<&str>) -> bool {
    match (configured, presented) {
        (Some(expected), Some(given)) => constant_time_compare(expected, given),
        _ => false,
    }
}
