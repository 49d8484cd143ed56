//! Controllers for [`User`]s

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, NoContent};
use common::{DbPool, Error};
use models::{Faculty, NewUserFaculty, User, UserFaculty, UserFilter};
use validator::Validate;

use crate::schemas::faculty::FacultyResponse;
use crate::schemas::pagination::{PaginatedResponse, PaginationOptions};
use crate::schemas::user::{
	CurrentUserResponse,
	UpdateUserRequest,
	UserResponse,
};
use crate::{AdminSession, Session};

/// Get the logged in [`User`] together with their faculties
#[instrument(skip(pool))]
pub(crate) async fn get_current_user(
	State(pool): State<DbPool>,
	session: Session,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let user = User::get(session.user_id, &conn).await?;
	let faculties = Faculty::for_user(session.user_id, &conn).await?;

	let response = CurrentUserResponse {
		user:      user.into(),
		faculties: faculties.into_iter().map(Into::into).collect(),
	};

	Ok((StatusCode::OK, Json(response)))
}

/// Get all [`User`]s
#[instrument(skip(pool))]
pub(crate) async fn get_users(
	State(pool): State<DbPool>,
	Query(p_opts): Query<PaginationOptions>,
	Query(filter): Query<UserFilter>,
) -> Result<Json<PaginatedResponse<Vec<UserResponse>>>, Error> {
	let conn = pool.get().await?;

	let (total, users) = User::get_all(filter, p_opts.into(), &conn).await?;

	let users = users.into_iter().map(Into::into).collect();

	Ok(Json(p_opts.paginate(total, users)))
}

#[instrument(skip(pool))]
pub(crate) async fn get_user(
	State(pool): State<DbPool>,
	Path(u_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let user = User::get(u_id, &conn).await?;

	Ok((StatusCode::OK, Json(UserResponse::from(user))))
}

#[instrument(skip(pool))]
pub(crate) async fn update_user(
	State(pool): State<DbPool>,
	Path(u_id): Path<i32>,
	Json(request): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let mut update = models::UpdateUser::from(request);
	update.email = update.email.map(|e| e.to_lowercase());

	let user = update.apply_to(u_id, &conn).await?;

	Ok((StatusCode::OK, Json(UserResponse::from(user))))
}

#[instrument(skip(pool))]
pub(crate) async fn delete_user(
	State(pool): State<DbPool>,
	session: AdminSession,
	Path(u_id): Path<i32>,
) -> Result<NoContent, Error> {
	if u_id == session.user_id {
		warn!("admin {u_id} tried to delete their own account");

		return Err(Error::Forbidden);
	}

	let conn = pool.get().await?;

	User::delete_by_id(u_id, &conn).await?;

	Ok(NoContent)
}

/// Add a [`User`] to a [`Faculty`]
#[instrument(skip(pool))]
pub(crate) async fn add_user_to_faculty(
	State(pool): State<DbPool>,
	Path((u_id, f_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	User::get(u_id, &conn).await?;
	let faculty = Faculty::get(f_id, &conn).await?;

	NewUserFaculty { user_id: u_id, faculty_id: f_id }.insert(&conn).await?;

	Ok((StatusCode::CREATED, Json(FacultyResponse::from(faculty))))
}

/// Remove a [`User`] from a [`Faculty`]
#[instrument(skip(pool))]
pub(crate) async fn remove_user_from_faculty(
	State(pool): State<DbPool>,
	Path((u_id, f_id)): Path<(i32, i32)>,
) -> Result<NoContent, Error> {
	let conn = pool.get().await?;

	UserFaculty::delete(u_id, f_id, &conn).await?;

	Ok(NoContent)
}
