//! Custom middleware definitions

mod admin;
mod auth;

pub use admin::AdminLayer;
pub use auth::AuthLayer;
