//! Controllers for [`Faculty`]s

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, NoContent};
use common::{DbPool, Error};
use models::{Faculty, NewFaculty, UpdateFaculty};
use validator::Validate;

use crate::schemas::faculty::{
	CreateFacultyRequest,
	FacultyResponse,
	UpdateFacultyRequest,
};
use crate::schemas::user::UserResponse;

#[instrument(skip(pool))]
pub(crate) async fn get_faculties(
	State(pool): State<DbPool>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let faculties: Vec<FacultyResponse> = Faculty::get_all(&conn)
		.await?
		.into_iter()
		.map(Into::into)
		.collect();

	Ok((StatusCode::OK, Json(faculties)))
}

#[instrument(skip(pool))]
pub(crate) async fn get_faculty(
	State(pool): State<DbPool>,
	Path(f_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let faculty = Faculty::get(f_id, &conn).await?;

	Ok((StatusCode::OK, Json(FacultyResponse::from(faculty))))
}

#[instrument(skip(pool))]
pub(crate) async fn create_faculty(
	State(pool): State<DbPool>,
	Json(request): Json<CreateFacultyRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let faculty = NewFaculty::from(request).insert(&conn).await?;

	Ok((StatusCode::CREATED, Json(FacultyResponse::from(faculty))))
}

#[instrument(skip(pool))]
pub(crate) async fn update_faculty(
	State(pool): State<DbPool>,
	Path(f_id): Path<i32>,
	Json(request): Json<UpdateFacultyRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let faculty = UpdateFaculty::from(request).apply_to(f_id, &conn).await?;

	Ok((StatusCode::OK, Json(FacultyResponse::from(faculty))))
}

#[instrument(skip(pool))]
pub(crate) async fn delete_faculty(
	State(pool): State<DbPool>,
	Path(f_id): Path<i32>,
) -> Result<NoContent, Error> {
	let conn = pool.get().await?;

	Faculty::delete_by_id(f_id, &conn).await?;

	Ok(NoContent)
}

/// Get all members of a [`Faculty`]
#[instrument(skip(pool))]
pub(crate) async fn get_faculty_members(
	State(pool): State<DbPool>,
	Path(f_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	Faculty::get(f_id, &conn).await?;

	let members: Vec<UserResponse> = Faculty::members(f_id, &conn)
		.await?
		.into_iter()
		.map(Into::into)
		.collect();

	Ok((StatusCode::OK, Json(members)))
}
