use collection_traits::{CollectionError, Result};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

static NEXT_OWNER: AtomicU64 = AtomicU64::new(1);

/// Identity and modification count of a container, captured by a cursor
/// when it is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Stamp {
    owner: u64,
    generation: u64,
}

/// Counts structural modifications of a single container instance.
///
/// Every instance gets a unique owner id, including clones, so a cursor
/// issued by one container is rejected by every other.
#[derive(Debug)]
pub(crate) struct ModCount {
    owner: u64,
    generation: u64,
}

impl ModCount {
    pub fn new() -> Self {
        Self {
            owner: NEXT_OWNER.fetch_add(1, Ordering::Relaxed),
            generation: 0,
        }
    }

    pub fn bump(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn stamp(&self) -> Stamp {
        Stamp {
            owner: self.owner,
            generation: self.generation,
        }
    }

    pub fn verify(&self, stamp: Stamp) -> Result<()> {
        if stamp == self.stamp() {
            return Ok(());
        }

        debug!(
            cursor_owner = stamp.owner,
            owner = self.owner,
            expected = stamp.generation,
            found = self.generation,
            "rejecting stale cursor"
        );

        Err(CollectionError::ConcurrentStructuralChange {
            expected: stamp.generation,
            found: self.generation,
        })
    }
}

impl Default for ModCount {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ModCount {
    fn clone(&self) -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::ModCount;
    use collection_traits::CollectionError;

    #[test]
    fn bump_invalidates_old_stamps() {
        let mut mods = ModCount::new();
        let stamp = mods.stamp();
        assert!(mods.verify(stamp).is_ok());

        mods.bump();
        assert_eq!(
            mods.verify(stamp),
            Err(CollectionError::ConcurrentStructuralChange {
                expected: 0,
                found: 1
            })
        );
        assert!(mods.verify(mods.stamp()).is_ok());
    }

    #[test]
    fn clones_have_their_own_identity() {
        let mods = ModCount::new();
        let cloned = mods.clone();
        assert!(cloned.verify(mods.stamp()).is_err());
    }
}
