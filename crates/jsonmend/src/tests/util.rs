use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Split `payload` into pseudo-randomly sized chunks, deterministic for a
/// given `seed`. Sizes are drawn uniformly from `1..=max_len` and snapped
/// forward to UTF-8 boundaries, mimicking the irregular deliveries of a
/// token stream.
pub(crate) fn seeded_chunks(payload: &str, seed: u64, max_len: usize) -> Vec<&str> {
    assert!(max_len > 0);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut chunks = Vec::new();
    let mut start = 0;
    while start < payload.len() {
        let mut end = usize::min(start + rng.gen_range(1..=max_len), payload.len());
        while end < payload.len() && !payload.is_char_boundary(end) {
            end += 1;
        }
        chunks.push(&payload[start..end]);
        start = end;
    }
    chunks
}

/// Iteration count for quickcheck properties, scaled the way CI expects.
pub(crate) fn quickcheck_iterations() -> u64 {
    if is_ci::cached() { 10_000 } else { 1_000 }
}

#[test]
fn seeded_chunks_are_deterministic_and_lossless() {
    let payload = r#"{"emoji":"😀🚀","nested":[1,2,{"k":null}]}"#;
    let a = seeded_chunks(payload, 7, 5);
    let b = seeded_chunks(payload, 7, 5);
    assert_eq!(a, b);
    assert_eq!(a.concat(), payload);

    let c = seeded_chunks(payload, 8, 5);
    assert_eq!(c.concat(), payload);
}
