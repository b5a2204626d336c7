//! Markdown code-fence removal for stored scanner output.
//!
//! The upstream generator sometimes wraps its JSON in a fenced block
//! (three backticks, optionally tagged `json`). Stripping is idempotent
//! on unfenced text.

const FENCE: &str = "```";

/// Remove a surrounding triple-backtick fence, optionally tagged `json`.
///
/// The opening fence line (including any info string) and a trailing
/// fence are dropped. Text without a leading fence is only trimmed.
pub fn strip_code_fence(input: &str) -> &str {
    let trimmed = input.trim();
    let Some(rest) = trimmed.strip_prefix(FENCE) else {
        return trimmed;
    };

    let body = match rest.find('\n') {
        Some(end_of_line) => &rest[end_of_line + 1..],
        // Single-line block: only a `json` tag can precede the content.
        None => rest.strip_prefix("json").unwrap_or(rest),
    };

    let body = body.trim_end();
    body.strip_suffix(FENCE).unwrap_or(body).trim()
}
