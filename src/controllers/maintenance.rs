//! Controllers for the maintenance history of rooms

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{DbPool, Error};
use models::{MaintenanceLog, NewMaintenanceLog, Room, Trashed};
use validator::Validate;

use crate::schemas::maintenance::{
	MaintenanceLogResponse,
	ScheduleMaintenanceRequest,
};

#[instrument(skip(pool))]
pub(crate) async fn get_room_maintenance(
	State(pool): State<DbPool>,
	Path(r_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	Room::get(r_id, Trashed::Without, &conn).await?;

	let logs: Vec<MaintenanceLogResponse> = MaintenanceLog::for_room(r_id, &conn)
		.await?
		.into_iter()
		.map(Into::into)
		.collect();

	Ok((StatusCode::OK, Json(logs)))
}

/// Schedule new maintenance for a room
///
/// The room keeps its status, admins switch it to `maintenance` separately
#[instrument(skip(pool))]
pub(crate) async fn schedule_maintenance(
	State(pool): State<DbPool>,
	Path(r_id): Path<i32>,
	Json(request): Json<ScheduleMaintenanceRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	Room::get(r_id, Trashed::Without, &conn).await?;

	let log = NewMaintenanceLog {
		room_id:      r_id,
		description:  request.description.trim().to_string(),
		date:         request.date,
		performed_by: request.performed_by,
	}
	.insert(&conn)
	.await?;

	Ok((StatusCode::CREATED, Json(MaintenanceLogResponse::from(log))))
}

#[instrument(skip(pool))]
pub(crate) async fn complete_maintenance(
	State(pool): State<DbPool>,
	Path((r_id, log_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let log = MaintenanceLog::complete(r_id, log_id, &conn).await?;

	Ok((StatusCode::OK, Json(MaintenanceLogResponse::from(log))))
}
