use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Trailing path segment of slash-shaped ids (DOIs, URLs); the id itself
/// otherwise.
pub fn short_id(id: &str) -> &str {
    id.rsplit_once('/').map(|(_, rest)| rest).unwrap_or(id)
}

pub fn stable_pair(id: &str) -> (f32, f32) {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    let hash = hasher.finish();

    let x = ((hash & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    let y = (((hash >> 32) & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    ((x * 2.0) - 1.0, (y * 2.0) - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_id_strips_doi_prefix() {
        assert_eq!(short_id("10.1000/xyz123"), "xyz123");
        assert_eq!(short_id("plain-id"), "plain-id");
    }

    #[test]
    fn stable_pair_is_deterministic_and_bounded() {
        let (x1, y1) = stable_pair("some-node");
        let (x2, y2) = stable_pair("some-node");
        assert_eq!((x1, y1), (x2, y2));
        assert!((-1.0..=1.0).contains(&x1));
        assert!((-1.0..=1.0).contains(&y1));
    }
}
