//! Pinned note policy.

/// Longest pinned snippet, in characters.
pub const PIN_MAX_CHARS: usize = 140;
/// Most pins kept.
pub const PIN_CAPACITY: usize = 5;

/// Cut `text` to [`PIN_MAX_CHARS`] characters (not bytes).
pub fn truncate_snippet(text: &str) -> String {
    match text.char_indices().nth(PIN_MAX_CHARS) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// Pins with `text` moved or inserted at the front, capped at
/// [`PIN_CAPACITY`]. An identical pin already present moves instead of
/// duplicating.
pub fn pin(pins: &[String], text: &str) -> Vec<String> {
    let snippet = truncate_snippet(text);
    let mut next = Vec::with_capacity(PIN_CAPACITY);
    next.push(snippet);
    for existing in pins {
        if next.len() == PIN_CAPACITY {
            break;
        }
        if !next.contains(existing) {
            next.push(existing.clone());
        }
    }
    next
}

pub fn unpin(pins: &[String], text: &str) -> Vec<String> {
    pins.iter().filter(|p| p.as_str() != text).cloned().collect()
}
