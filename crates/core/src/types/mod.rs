//! Domain types shared across FreshCart crates.

pub mod email;
pub mod id;
pub mod role;
pub mod status;

pub use email::{Email, EmailError};
pub use id::{CategoryId, OrderId, ProductId, UserId};
pub use role::Role;
pub use status::OrderStatus;
