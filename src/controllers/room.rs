//! Controllers for [`Room`]s and the facilities attached to them

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, NoContent};
use common::{DbPool, Error};
use models::{
	Facility,
	NewRoom,
	NewRoomFacility,
	Room,
	RoomFacility,
	RoomFilter,
	RoomIncludes,
	Trashed,
	UpdateRoom,
	UpdateRoomFacility,
};
use validator::Validate;

use crate::Session;
use crate::schemas::facility::{
	AttachFacilityRequest,
	RoomFacilityResponse,
	UpdateRoomFacilityRequest,
};
use crate::schemas::pagination::{PaginatedResponse, PaginationOptions};
use crate::schemas::room::{
	CreateRoomRequest,
	RoomResponse,
	SetRoomStatusRequest,
	UpdateRoomRequest,
};

/// Get all [`Room`]s matching the given filter
///
/// Only admins may look at soft deleted rooms
#[instrument(skip(pool))]
pub(crate) async fn get_rooms(
	State(pool): State<DbPool>,
	session: Session,
	Query(p_opts): Query<PaginationOptions>,
	Query(filter): Query<RoomFilter>,
	Query(includes): Query<RoomIncludes>,
) -> Result<Json<PaginatedResponse<Vec<RoomResponse>>>, Error> {
	if filter.trashed != Trashed::Without && !session.is_admin {
		return Err(Error::Forbidden);
	}

	let conn = pool.get().await?;

	let (total, rooms) =
		Room::get_all(filter, includes, p_opts.into(), &conn).await?;

	let rooms = rooms.into_iter().map(Into::into).collect();

	Ok(Json(p_opts.paginate(total, rooms)))
}

/// Get a single [`Room`] with its building, category and facilities
#[instrument(skip(pool))]
pub(crate) async fn get_room(
	State(pool): State<DbPool>,
	session: Session,
	Path(r_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let trashed = if session.is_admin { Trashed::With } else { Trashed::Without };
	let includes =
		RoomIncludes { building: true, category: true, facilities: true };

	let conn = pool.get().await?;

	let room = Room::get_full(r_id, trashed, includes, &conn).await?;

	Ok((StatusCode::OK, Json(RoomResponse::from(room))))
}

#[instrument(skip(pool))]
pub(crate) async fn create_room(
	State(pool): State<DbPool>,
	Json(request): Json<CreateRoomRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let room = NewRoom::from(request).insert(&conn).await?;

	Ok((StatusCode::CREATED, Json(RoomResponse::from(room))))
}

#[instrument(skip(pool))]
pub(crate) async fn update_room(
	State(pool): State<DbPool>,
	Path(r_id): Path<i32>,
	Json(request): Json<UpdateRoomRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let room = UpdateRoom::from(request).apply_to(r_id, &conn).await?;

	Ok((StatusCode::OK, Json(RoomResponse::from(room))))
}

#[instrument(skip(pool))]
pub(crate) async fn set_room_status(
	State(pool): State<DbPool>,
	Path(r_id): Path<i32>,
	Json(request): Json<SetRoomStatusRequest>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let room = Room::set_status(r_id, request.status, &conn).await?;

	Ok((StatusCode::OK, Json(RoomResponse::from(room))))
}

#[instrument(skip(pool))]
pub(crate) async fn delete_room(
	State(pool): State<DbPool>,
	Path(r_id): Path<i32>,
) -> Result<NoContent, Error> {
	let conn = pool.get().await?;

	Room::soft_delete(r_id, &conn).await?;

	Ok(NoContent)
}

#[instrument(skip(pool))]
pub(crate) async fn restore_room(
	State(pool): State<DbPool>,
	Path(r_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let room = Room::restore(r_id, &conn).await?;

	Ok((StatusCode::OK, Json(RoomResponse::from(room))))
}

#[instrument(skip(pool))]
pub(crate) async fn get_room_facilities(
	State(pool): State<DbPool>,
	Path(r_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	Room::get(r_id, Trashed::Without, &conn).await?;

	let facilities: Vec<RoomFacilityResponse> =
		RoomFacility::for_room(r_id, &conn)
			.await?
			.into_iter()
			.map(Into::into)
			.collect();

	Ok((StatusCode::OK, Json(facilities)))
}

/// Attach a [`Facility`] to a [`Room`]
#[instrument(skip(pool))]
pub(crate) async fn attach_facility(
	State(pool): State<DbPool>,
	Path(r_id): Path<i32>,
	Json(request): Json<AttachFacilityRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	Room::get(r_id, Trashed::Without, &conn).await?;
	let facility = Facility::get(request.facility_id, &conn).await?;

	let attached = NewRoomFacility {
		room_id:     r_id,
		facility_id: facility.id,
		quantity:    request.quantity,
		notes:       request.notes,
	}
	.insert(&conn)
	.await?;

	let response = RoomFacilityResponse::from((attached, facility));

	Ok((StatusCode::CREATED, Json(response)))
}

#[instrument(skip(pool))]
pub(crate) async fn update_room_facility(
	State(pool): State<DbPool>,
	Path((r_id, f_id)): Path<(i32, i32)>,
	Json(request): Json<UpdateRoomFacilityRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let facility = Facility::get(f_id, &conn).await?;
	let updated =
		UpdateRoomFacility::from(request).apply_to(r_id, f_id, &conn).await?;

	let response = RoomFacilityResponse::from((updated, facility));

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub(crate) async fn detach_facility(
	State(pool): State<DbPool>,
	Path((r_id, f_id)): Path<(i32, i32)>,
) -> Result<NoContent, Error> {
	let conn = pool.get().await?;

	RoomFacility::delete(r_id, f_id, &conn).await?;

	Ok(NoContent)
}
