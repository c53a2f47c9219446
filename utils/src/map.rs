//! Hashing used by the hash-based containers.

#[allow(clippy::disallowed_types)]
pub type Hasher = ahash::AHasher;

/// Fixed keys: the same key always lands in the same bucket, run to run.
pub type BuildHasher = std::hash::BuildHasherDefault<Hasher>;

#[cfg(test)]
mod test {
    use super::BuildHasher;
    use std::hash::BuildHasher as _;

    #[test]
    fn borrowed_and_owned_keys_agree() {
        let hasher = BuildHasher::default();
        assert_eq!(hasher.hash_one("Apple"), hasher.hash_one(String::from("Apple")));
        assert_eq!(hasher.hash_one("Apple"), BuildHasher::default().hash_one("Apple"));
        assert_ne!(hasher.hash_one("Apple"), hasher.hash_one("Banana"));
    }
}
