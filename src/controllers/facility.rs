//! Controllers for [`Facility`]s

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, NoContent};
use common::{DbPool, Error};
use models::{Facility, NewFacility, UpdateFacility};
use validator::Validate;

use crate::schemas::facility::{
	CreateFacilityRequest,
	FacilityResponse,
	UpdateFacilityRequest,
};

#[instrument(skip(pool))]
pub(crate) async fn get_facilities(
	State(pool): State<DbPool>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let facilities: Vec<FacilityResponse> =
		Facility::get_all(&conn).await?.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(facilities)))
}

#[instrument(skip(pool))]
pub(crate) async fn get_facility(
	State(pool): State<DbPool>,
	Path(f_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let facility = Facility::get(f_id, &conn).await?;

	Ok((StatusCode::OK, Json(FacilityResponse::from(facility))))
}

#[instrument(skip(pool))]
pub(crate) async fn create_facility(
	State(pool): State<DbPool>,
	Json(request): Json<CreateFacilityRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let facility = NewFacility::from(request).insert(&conn).await?;

	Ok((StatusCode::CREATED, Json(FacilityResponse::from(facility))))
}

#[instrument(skip(pool))]
pub(crate) async fn update_facility(
	State(pool): State<DbPool>,
	Path(f_id): Path<i32>,
	Json(request): Json<UpdateFacilityRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let facility = UpdateFacility::from(request).apply_to(f_id, &conn).await?;

	Ok((StatusCode::OK, Json(FacilityResponse::from(facility))))
}

#[instrument(skip(pool))]
pub(crate) async fn delete_facility(
	State(pool): State<DbPool>,
	Path(f_id): Path<i32>,
) -> Result<NoContent, Error> {
	let conn = pool.get().await?;

	Facility::delete_by_id(f_id, &conn).await?;

	Ok(NoContent)
}
