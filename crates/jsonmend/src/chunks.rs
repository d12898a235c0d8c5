//! Chunking helpers for driving expansion the way a token stream would.
//!
//! These exist for tests, benches, and examples: real producers deliver
//! their own chunks. Both helpers cut only at UTF-8 boundaries, so every
//! chunk is a valid `&str`.

/// Split `payload` into approximately equal-sized chunks without breaking
/// UTF-8 code points.
///
/// # Panics
///
/// Panics if `parts` is zero.
#[must_use]
pub fn produce_chunks(payload: &str, parts: usize) -> Vec<&str> {
    assert!(parts > 0);
    let chunk_size = payload.len().div_ceil(parts);
    let mut chunks = Vec::new();
    let mut start = 0;
    while start < payload.len() {
        let mut end = usize::min(start + chunk_size, payload.len());
        while end < payload.len() && !payload.is_char_boundary(end) {
            end += 1;
        }
        chunks.push(&payload[start..end]);
        start = end;
    }
    chunks
}

/// Return the sequence of growing prefixes induced by
/// [`produce_chunks`], converging to `payload`.
///
/// # Panics
///
/// Panics if `parts` is zero.
#[must_use]
pub fn produce_prefixes(payload: &str, parts: usize) -> Vec<&str> {
    let mut prefixes = Vec::new();
    let mut end = 0;
    for chunk in produce_chunks(payload, parts) {
        end += chunk.len();
        prefixes.push(&payload[..end]);
    }
    prefixes
}
