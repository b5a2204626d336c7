/// Reduce user input or a stored URL to a bare host.
///
/// Strips an `http://` or `https://` scheme and anything from the first
/// `/` onwards. A port, if present, is kept.
pub fn extract_domain(input: &str) -> String {
    let trimmed = input.trim();
    let without_scheme = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);

    without_scheme
        .split('/')
        .next()
        .unwrap_or_default()
        .to_string()
}
