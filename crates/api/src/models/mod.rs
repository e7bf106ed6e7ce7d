//! Domain types for the API.
//!
//! These types represent validated domain objects separate from database row
//! types. Wire representations (JSON) use camelCase field names for
//! compatibility with existing clients.

pub mod order;
pub mod product;
pub mod settings;
pub mod user;

pub use order::{LineItem, Order};
pub use product::{Category, Product};
pub use settings::Settings;
pub use user::{Identity, PublicUser, User};
