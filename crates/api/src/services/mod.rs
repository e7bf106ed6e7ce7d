//! Business-logic services.

pub mod auth;
pub mod pricing;
pub mod token;
