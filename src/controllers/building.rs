//! Controllers for [`Building`]s

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, NoContent};
use common::{DbPool, Error};
use models::{Building, NewBuilding, UpdateBuilding};
use validator::Validate;

use crate::schemas::building::{
	CreateBuildingRequest,
	BuildingResponse,
	UpdateBuildingRequest,
};

#[instrument(skip(pool))]
pub(crate) async fn get_buildings(
	State(pool): State<DbPool>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let buildings: Vec<BuildingResponse> =
		Building::get_all(&conn).await?.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(buildings)))
}

#[instrument(skip(pool))]
pub(crate) async fn get_building(
	State(pool): State<DbPool>,
	Path(b_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let building = Building::get(b_id, &conn).await?;

	Ok((StatusCode::OK, Json(BuildingResponse::from(building))))
}

#[instrument(skip(pool))]
pub(crate) async fn create_building(
	State(pool): State<DbPool>,
	Json(request): Json<CreateBuildingRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let building = NewBuilding::from(request).insert(&conn).await?;

	Ok((StatusCode::CREATED, Json(BuildingResponse::from(building))))
}

#[instrument(skip(pool))]
pub(crate) async fn update_building(
	State(pool): State<DbPool>,
	Path(b_id): Path<i32>,
	Json(request): Json<UpdateBuildingRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let building = UpdateBuilding::from(request).apply_to(b_id, &conn).await?;

	Ok((StatusCode::OK, Json(BuildingResponse::from(building))))
}

#[instrument(skip(pool))]
pub(crate) async fn delete_building(
	State(pool): State<DbPool>,
	Path(b_id): Path<i32>,
) -> Result<NoContent, Error> {
	let conn = pool.get().await?;

	Building::delete_by_id(b_id, &conn).await?;

	Ok(NoContent)
}
