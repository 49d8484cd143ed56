//! Controllers for [`RoomCategory`]s

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, NoContent};
use common::{DbPool, Error};
use models::{RoomCategory, NewRoomCategory, UpdateRoomCategory};
use validator::Validate;

use crate::schemas::room_category::{
	CreateRoomCategoryRequest,
	RoomCategoryResponse,
	UpdateRoomCategoryRequest,
};

#[instrument(skip(pool))]
pub(crate) async fn get_room_categories(
	State(pool): State<DbPool>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let room_categories: Vec<RoomCategoryResponse> =
		RoomCategory::get_all(&conn).await?.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(room_categories)))
}

#[instrument(skip(pool))]
pub(crate) async fn get_room_category(
	State(pool): State<DbPool>,
	Path(c_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let room_category = RoomCategory::get(c_id, &conn).await?;

	Ok((StatusCode::OK, Json(RoomCategoryResponse::from(room_category))))
}

#[instrument(skip(pool))]
pub(crate) async fn create_room_category(
	State(pool): State<DbPool>,
	Json(request): Json<CreateRoomCategoryRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let room_category = NewRoomCategory::from(request).insert(&conn).await?;

	Ok((StatusCode::CREATED, Json(RoomCategoryResponse::from(room_category))))
}

#[instrument(skip(pool))]
pub(crate) async fn update_room_category(
	State(pool): State<DbPool>,
	Path(c_id): Path<i32>,
	Json(request): Json<UpdateRoomCategoryRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let room_category = UpdateRoomCategory::from(request).apply_to(c_id, &conn).await?;

	Ok((StatusCode::OK, Json(RoomCategoryResponse::from(room_category))))
}

#[instrument(skip(pool))]
pub(crate) async fn delete_room_category(
	State(pool): State<DbPool>,
	Path(c_id): Path<i32>,
) -> Result<NoContent, Error> {
	let conn = pool.get().await?;

	RoomCategory::delete_by_id(c_id, &conn).await?;

	Ok(NoContent)
}
