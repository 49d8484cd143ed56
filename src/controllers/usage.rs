//! Controllers for booking usage logs

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{DbPool, Error};
use models::UsageLog;
use validator::Validate;

use crate::Session;
use crate::controllers::booking::{
	get_accessible_booking,
	get_modifiable_booking,
};
use crate::schemas::usage::{ReportIssueRequest, UsageLogResponse};

#[instrument(skip(pool))]
pub(crate) async fn get_usage(
	State(pool): State<DbPool>,
	session: Session,
	Path(b_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	get_accessible_booking(b_id, session, &conn).await?;

	let log = UsageLog::for_booking(b_id, &conn).await?.ok_or_else(|| {
		Error::NotFound(format!("usage log of booking {b_id}"))
	})?;

	Ok((StatusCode::OK, Json(UsageLogResponse::from(log))))
}

#[instrument(skip(pool))]
pub(crate) async fn check_in(
	State(pool): State<DbPool>,
	session: Session,
	Path(b_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let booking = get_modifiable_booking(b_id, session, &conn).await?;

	let log = UsageLog::check_in(&booking, &conn).await?;

	Ok((StatusCode::CREATED, Json(UsageLogResponse::from(log))))
}

#[instrument(skip(pool))]
pub(crate) async fn check_out(
	State(pool): State<DbPool>,
	session: Session,
	Path(b_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let booking = get_modifiable_booking(b_id, session, &conn).await?;

	let log = UsageLog::check_out(&booking, &conn).await?;

	Ok((StatusCode::OK, Json(UsageLogResponse::from(log))))
}

#[instrument(skip(pool))]
pub(crate) async fn report_issue(
	State(pool): State<DbPool>,
	session: Session,
	Path(b_id): Path<i32>,
	Json(request): Json<ReportIssueRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	get_modifiable_booking(b_id, session, &conn).await?;

	let description = request
		.description
		.map(|d| d.trim().to_string())
		.filter(|d| !d.is_empty());

	let log = UsageLog::report_issue(b_id, description, &conn).await?;

	Ok((StatusCode::OK, Json(UsageLogResponse::from(log))))
}
