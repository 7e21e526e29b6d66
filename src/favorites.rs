//! The favorites controller: toggle and read over the persisted favorite set.

use serde::Serialize;
use tracing::{debug, warn};

use crate::models::{FavoriteSet, PetId};
use crate::preferences::PreferenceStore;

/// Outcome of a toggle. `persisted` is false when the write-through failed; the
/// in-memory state still reflects the toggle.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Toggled {
    pub pet_id: PetId,
    pub favorited: bool,
    pub persisted: bool,
}

pub struct FavoritesController {
    favorites: FavoriteSet,
    store: PreferenceStore,
}

impl FavoritesController {
    /// Loads the persisted set. Called once per mount.
    pub fn mount(store: PreferenceStore) -> Self {
        let favorites = store.read_favorites();
        debug!("Loaded {} favorites", favorites.len());
        Self { favorites, store }
    }

    pub fn toggle(&mut self, pet_id: PetId) -> Toggled {
        let favorited = self.favorites.toggle(pet_id);
        let persisted = match self.store.write_favorites(&self.favorites) {
            Ok(()) => true,
            Err(e) => {
                warn!("Favorites not persisted after toggling pet {}: {}", pet_id, e);
                false
            }
        };
        Toggled {
            pet_id,
            favorited,
            persisted,
        }
    }

    pub fn contains(&self, pet_id: PetId) -> bool {
        self.favorites.contains(pet_id)
    }

    pub fn list(&self) -> Vec<PetId> {
        self.favorites.ids().to_vec()
    }
}
