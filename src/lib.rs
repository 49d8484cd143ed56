//! # Roombook backend library

#[macro_use]
extern crate tracing;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use common::DbPool;

mod config;
mod seeder;
mod session;

pub mod controllers;
pub mod middleware;
pub mod routes;
pub mod schemas;

pub use config::*;
pub use seeder::*;
pub use session::*;

/// Common state of the app
#[derive(Clone)]
pub struct AppState {
	pub config:         Config,
	pub database_pool:  DbPool,
	pub cookie_jar_key: Key,
}

impl FromRef<AppState> for Config {
	fn from_ref(input: &AppState) -> Self { input.config.clone() }
}

impl FromRef<AppState> for DbPool {
	fn from_ref(input: &AppState) -> Self { input.database_pool.clone() }
}

impl FromRef<AppState> for Key {
	fn from_ref(input: &AppState) -> Self { input.cookie_jar_key.clone() }
}
