//! Input validation utilities
//!
//! Provides input validation and sanitization functions.

/// Sanitize a client-supplied display name.
///
/// Control characters are removed, surrounding whitespace trimmed and the
/// result truncated to `max_chars` characters. Returns `None` when nothing
/// usable remains.
pub fn sanitize_display_name(raw: &str, max_chars: usize) -> Option<String> {
    let cleaned: String = raw.chars().filter(|c| !c.is_control()).collect();
    let truncated: String = cleaned.trim().chars().take(max_chars).collect();
    let name = truncated.trim_end();

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
