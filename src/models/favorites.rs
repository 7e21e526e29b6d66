use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier of a pet listing.
pub type PetId = i64;

/// A set of pet ids that keeps insertion order.
///
/// Serializes as a plain JSON array. Deserializing drops repeated ids, keeping
/// the first occurrence, so a stored `[3,7,7,3]` loads as `{3, 7}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoriteSet {
    ids: Vec<PetId>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, pet_id: PetId) -> bool {
        self.ids.contains(&pet_id)
    }

    /// Adds `pet_id`; returns false if it was already present.
    pub fn insert(&mut self, pet_id: PetId) -> bool {
        if self.contains(pet_id) {
            return false;
        }
        self.ids.push(pet_id);
        true
    }

    /// Removes `pet_id`; returns false if it was not present.
    pub fn remove(&mut self, pet_id: PetId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|id| *id != pet_id);
        self.ids.len() != before
    }

    /// Flips membership of `pet_id` and returns whether it is now a favorite.
    pub fn toggle(&mut self, pet_id: PetId) -> bool {
        if self.remove(pet_id) {
            false
        } else {
            self.ids.push(pet_id);
            true
        }
    }

    pub fn ids(&self) -> &[PetId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<PetId> for FavoriteSet {
    fn from_iter<I: IntoIterator<Item = PetId>>(iter: I) -> Self {
        let mut set = FavoriteSet::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

impl Serialize for FavoriteSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.ids.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FavoriteSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let ids = Vec::<PetId>::deserialize(deserializer)?;
        Ok(ids.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice_restores_membership() {
        let mut set = FavoriteSet::new();
        assert!(set.toggle(5));
        assert_eq!(set.ids(), &[5]);
        assert!(!set.toggle(5));
        assert!(set.is_empty());
    }

    #[test]
    fn test_toggle_parity() {
        for initial in [false, true] {
            for toggles in 0..6 {
                let mut set = FavoriteSet::new();
                if initial {
                    set.insert(42);
                }
                for _ in 0..toggles {
                    set.toggle(42);
                }
                assert_eq!(set.contains(42), initial ^ (toggles % 2 == 1));
            }
        }
    }

    #[test]
    fn test_insertion_order_kept() {
        let mut set = FavoriteSet::new();
        set.toggle(9);
        set.toggle(2);
        set.toggle(4);
        set.toggle(2);
        set.toggle(2);
        assert_eq!(set.ids(), &[9, 4, 2]);
    }

    #[test]
    fn test_deserialize_drops_duplicates() {
        let set: FavoriteSet = serde_json::from_str("[3,7,7,3]").unwrap();
        assert_eq!(set.ids(), &[3, 7]);
        assert_eq!(serde_json::to_string(&set).unwrap(), "[3,7]");
    }
}
