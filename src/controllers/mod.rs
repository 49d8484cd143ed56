//! Defines controller functions that correspond to individual routes

use axum::extract::State;
use axum::response::NoContent;
use common::{DbPool, Error};
use diesel::{RunQueryDsl, sql_query};

pub mod auth;
pub mod booking;
pub mod building;
pub mod calendar;
pub mod dashboard;
pub mod document;
pub mod facility;
pub mod faculty;
pub mod maintenance;
pub mod room;
pub mod room_category;
pub mod usage;
pub mod user;

/// Check if the database connection and webserver are functional
pub(crate) async fn healthcheck(
	State(pool): State<DbPool>,
) -> Result<NoContent, Error> {
	let conn = pool.get().await?;

	conn.interact(|conn| sql_query("SELECT 1").execute(conn)).await??;

	Ok(NoContent)
}
