/// Split `payload` into `parts` approximately equal-sized chunks.
///
/// Chunk boundaries fall anywhere, including inside a value's header, which
/// is what chunked delivery over a socket looks like.
///
/// # Panics
///
/// Panics if `parts` is zero.
#[must_use]
pub fn produce_chunks(payload: &[u8], parts: usize) -> Vec<&[u8]> {
    assert!(parts > 0);
    if payload.is_empty() {
        return Vec::new();
    }
    let chunk_size = payload.len().div_ceil(parts);
    payload.chunks(chunk_size).collect()
}
