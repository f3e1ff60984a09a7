use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::Word;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 32-bit rolling hash over UTF-16 code units, base 31.
///
/// Stable across platforms. The seed contract for every per-property
/// generator is `hashed_string(schema_name + property_name)`, so renaming
/// either part changes the synthesized value and reverting the name
/// reverts the value.
pub fn hashed_string(s: &str) -> i32 {
    let mut hash: i32 = 0;
    for unit in s.encode_utf16() {
        hash = hash.wrapping_mul(31).wrapping_add(i32::from(unit));
    }
    hash
}

/// A deterministic value generator, reseeded once per property.
///
/// Constructed fresh for each property synthesis call and passed by
/// parameter; no generator state is shared across properties, so runs are
/// reproducible regardless of call order across unrelated properties.
#[derive(Debug)]
pub struct MockRng(StdRng);

impl MockRng {
    pub fn for_property(schema_name: &str, property_name: &str) -> Self {
        let seed = hashed_string(&format!("{schema_name}{property_name}"));
        Self(StdRng::seed_from_u64(i64::from(seed) as u64))
    }

    /// An integer in `[minimum, maximum]`, defaulting to `[0, 30]`.
    pub fn integer(&mut self, minimum: Option<f64>, maximum: Option<f64>) -> i64 {
        let low = minimum.unwrap_or(0.0) as i64;
        let high = (maximum.unwrap_or(30.0) as i64).max(low);
        self.0.gen_range(low..=high)
    }

    /// A fractional number in `[minimum, maximum]`, defaulting to `[0, 30]`.
    pub fn double(&mut self, minimum: Option<f64>, maximum: Option<f64>) -> f64 {
        let low = minimum.unwrap_or(0.0);
        let high = maximum.unwrap_or(30.0).max(low);
        self.0.gen_range(low..=high)
    }

    /// An unconstrained integer, for numeric array elements.
    pub fn wide_integer(&mut self) -> i64 {
        self.0.gen_range(-1000..=1000)
    }

    /// An unconstrained fractional number, for numeric array elements.
    pub fn wide_double(&mut self) -> f64 {
        self.0.gen_range(0.0..=1000.0)
    }

    /// A random UUID-formatted string drawn from this generator, not from
    /// the system entropy pool.
    pub fn uuid(&mut self) -> String {
        let mut bytes = [0u8; 16];
        self.0.fill(&mut bytes[..]);
        uuid::Builder::from_random_bytes(bytes).into_uuid().to_string()
    }

    /// A single lowercase lorem word.
    pub fn word(&mut self) -> String {
        Word().fake_with_rng(&mut self.0)
    }

    /// An email-shaped string.
    pub fn email(&mut self) -> String {
        SafeEmail().fake_with_rng(&mut self.0)
    }

    /// A URL-shaped string.
    pub fn url(&mut self) -> String {
        let host: String = Word().fake_with_rng(&mut self.0);
        format!("http://www.{host}.com/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_hashed_string_matches_reference_value() {
        // Locks the hash to the canonical 32-bit rolling string hash.
        assert_eq!(hashed_string("Some string"), -1231765347);
        assert_eq!(hashed_string(""), 0);
    }

    #[test]
    fn test_same_seed_same_values() {
        let mut a = MockRng::for_property("AssetDto", "id");
        let mut b = MockRng::for_property("AssetDto", "id");
        assert_eq!(a.uuid(), b.uuid());
        assert_eq!(a.integer(None, None), b.integer(None, None));
        assert_eq!(a.word(), b.word());
    }

    #[test]
    fn test_property_name_changes_the_seed() {
        let mut a = MockRng::for_property("AssetDto", "id");
        let mut b = MockRng::for_property("AssetDto", "ownerId");
        assert_ne!(a.uuid(), b.uuid());

        // Reverting the name reverts the value.
        let mut c = MockRng::for_property("AssetDto", "id");
        let mut d = MockRng::for_property("AssetDto", "id");
        assert_eq!(c.uuid(), d.uuid());
    }

    #[test]
    fn test_integer_respects_bounds() {
        let mut rng = MockRng::for_property("ServiceTypeDto", "price");
        for _ in 0..64 {
            let value = rng.integer(Some(0.0), Some(100.0));
            assert!((0..=100).contains(&value));
        }
        let mut rng = MockRng::for_property("ServiceTypeDto", "count");
        for _ in 0..64 {
            let value = rng.integer(None, None);
            assert!((0..=30).contains(&value));
        }
    }

    #[test]
    fn test_double_respects_bounds() {
        let mut rng = MockRng::for_property("ServiceTypeDto", "price");
        for _ in 0..64 {
            let value = rng.double(Some(0.0), Some(100.0));
            assert!((0.0..=100.0).contains(&value));
        }
    }

    #[test]
    fn test_uuid_shape() {
        let mut rng = MockRng::for_property("AssetDto", "id");
        let value = rng.uuid();
        let segments: Vec<_> = value.split('-').collect();
        assert_eq!(
            segments.iter().map(|s| s.len()).collect::<Vec<_>>(),
            [8, 4, 4, 4, 12],
        );
    }

    #[test]
    fn test_email_and_url_shapes() {
        let mut rng = MockRng::for_property("MemberEmailDto", "email");
        assert!(rng.email().contains('@'));

        let mut rng = MockRng::for_property("DownloadDto", "url");
        let url = rng.url();
        assert!(url.starts_with("http://www."));
        assert!(url.ends_with(".com/"));
    }
}
