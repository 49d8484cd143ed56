//! Controllers for [`Booking`]s and their approval workflow

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, NoContent};
use chrono::Utc;
use common::{BookingError, DbConn, DbPool, Error};
use models::{
	Booking,
	BookingFilter,
	BookingIncludes,
	NewBooking,
	Room,
	RoomStatus,
	Trashed,
};
use validator::Validate;

use crate::schemas::booking::{
	BookingResponse,
	CreateBookingRequest,
	RejectBookingRequest,
};
use crate::schemas::pagination::{PaginatedResponse, PaginationOptions};
use crate::{AdminSession, Session};

async fn load_booking(
	b_id: i32,
	trashed: Trashed,
	session: Session,
	conn: &DbConn,
) -> Result<Booking, Error> {
	let booking = Booking::get(b_id, trashed, conn).await?;

	session.ensure_access(booking.user_id)?;

	Ok(booking)
}

/// Load a [`Booking`] the session owns, admins can load any booking including
/// deleted ones
pub(crate) async fn get_accessible_booking(
	b_id: i32,
	session: Session,
	conn: &DbConn,
) -> Result<Booking, Error> {
	let trashed = if session.is_admin { Trashed::With } else { Trashed::Without };

	load_booking(b_id, trashed, session, conn).await
}

/// Load a non deleted [`Booking`] the session may change
pub(crate) async fn get_modifiable_booking(
	b_id: i32,
	session: Session,
	conn: &DbConn,
) -> Result<Booking, Error> {
	load_booking(b_id, Trashed::Without, session, conn).await
}

/// Get all [`Booking`]s matching a filter
///
/// Users other than admins only ever see their own, non deleted, bookings
#[instrument(skip(pool))]
pub(crate) async fn get_bookings(
	State(pool): State<DbPool>,
	session: Session,
	Query(p_opts): Query<PaginationOptions>,
	Query(mut filter): Query<BookingFilter>,
	Query(includes): Query<BookingIncludes>,
) -> Result<Json<PaginatedResponse<Vec<BookingResponse>>>, Error> {
	if !session.is_admin {
		if filter.trashed != Trashed::Without {
			return Err(Error::Forbidden);
		}

		filter.user_id = Some(session.user_id);
	}

	let conn = pool.get().await?;

	let (total, bookings) =
		Booking::get_all(filter, includes, p_opts.into(), &conn).await?;

	let bookings = bookings.into_iter().map(Into::into).collect();

	Ok(Json(p_opts.paginate(total, bookings)))
}

#[instrument(skip(pool))]
pub(crate) async fn get_booking(
	State(pool): State<DbPool>,
	session: Session,
	Path(b_id): Path<i32>,
	Query(includes): Query<BookingIncludes>,
) -> Result<impl IntoResponse, Error> {
	let trashed = if session.is_admin { Trashed::With } else { Trashed::Without };

	let conn = pool.get().await?;

	let booking = Booking::get_full(b_id, trashed, includes, &conn).await?;

	session.ensure_access(booking.booking.user_id)?;

	Ok((StatusCode::OK, Json(BookingResponse::from(booking))))
}

/// Request a new [`Booking`] for the logged in user
#[instrument(skip(pool))]
pub(crate) async fn create_booking(
	State(pool): State<DbPool>,
	session: Session,
	Json(request): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let room = Room::get(request.room_id, Trashed::Without, &conn).await?;

	if room.status == RoomStatus::Maintenance {
		return Err(BookingError::RoomUnavailable(room.status.as_str()).into());
	}

	let new_booking = NewBooking {
		user_id:      session.user_id,
		room_id:      room.id,
		booking_code: NewBooking::generate_code(request.date),
		date:         request.date,
		start_time:   request.start_time,
		duration:     request.duration,
		purpose:      request.purpose.trim().to_string(),
	};

	new_booking.check_schedule(Utc::now().date_naive())?;

	let booking = new_booking.insert(&conn).await?;

	Ok((StatusCode::CREATED, Json(BookingResponse::from(booking))))
}

#[instrument(skip(pool))]
pub(crate) async fn approve_booking(
	State(pool): State<DbPool>,
	session: AdminSession,
	Path(b_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let booking = Booking::approve_by(b_id, session.user_id, &conn).await?;

	Ok((StatusCode::OK, Json(BookingResponse::from(booking))))
}

#[instrument(skip(pool))]
pub(crate) async fn reject_booking(
	State(pool): State<DbPool>,
	session: AdminSession,
	Path(b_id): Path<i32>,
	Json(request): Json<RejectBookingRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let booking =
		Booking::reject_by(b_id, session.user_id, request.reason, &conn).await?;

	Ok((StatusCode::OK, Json(BookingResponse::from(booking))))
}

/// Cancel a [`Booking`], owners can cancel their own bookings
#[instrument(skip(pool))]
pub(crate) async fn cancel_booking(
	State(pool): State<DbPool>,
	session: Session,
	Path(b_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let booking = Booking::get(b_id, Trashed::Without, &conn).await?;
	session.ensure_access(booking.user_id)?;

	let booking = Booking::cancel(booking.id, &conn).await?;

	Ok((StatusCode::OK, Json(BookingResponse::from(booking))))
}

#[instrument(skip(pool))]
pub(crate) async fn delete_booking(
	State(pool): State<DbPool>,
	Path(b_id): Path<i32>,
) -> Result<NoContent, Error> {
	let conn = pool.get().await?;

	Booking::soft_delete(b_id, &conn).await?;

	Ok(NoContent)
}
