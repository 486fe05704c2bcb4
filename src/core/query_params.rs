use std::collections::HashMap;

/// Parse `key=value` pairs from a query string or an urlencoded form body.
///
/// Handles URL decoding (including `+` as space) and returns a HashMap of
/// parameter key-value pairs. Multiple values for the same key are not
/// supported (only the last is kept).
///
/// # Example
/// ```
/// use diary::core::query_params::parse_query_params;
///
/// let params = parse_query_params("userID=12&title=hello+world");
/// assert_eq!(params.get("userID"), Some(&"12".to_string()));
/// assert_eq!(params.get("title"), Some(&"hello world".to_string()));
/// ```
pub fn parse_query_params(query: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    let query = query.strip_prefix('?').unwrap_or(query);

    for param in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = match param.find('=') {
            Some(eq_idx) => (&param[..eq_idx], &param[eq_idx + 1..]),
            // Flag parameter without value
            None => (param, ""),
        };
        params.insert(decode_component(key), decode_component(value));
    }

    params
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .unwrap_or(spaced)
}

/// Get a parameter, treating an empty value the same as an absent one.
pub fn get_string(params: &HashMap<String, String>, key: &str) -> Option<String> {
    params.get(key).filter(|v| !v.is_empty()).cloned()
}
