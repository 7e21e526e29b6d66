pub mod account;
pub mod favorites;
pub mod pet;
pub mod user;

pub use favorites::{FavoriteSet, PetId};
pub use pet::{Pet, PetStatus, PetType};
pub use user::User;
