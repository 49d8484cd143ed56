use std::collections::HashMap;

use chrono::{
	NaiveDate,
	NaiveDateTime,
	NaiveTime,
	TimeDelta,
	Timelike,
	Utc,
};
use common::{BookingError, DbConn, Error};
use db::{BookingStatus, bookings};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_types::Bool;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
	BoxedCondition,
	PaginatedData,
	PaginationConfig,
	Room,
	ToFilter,
	Trashed,
	User,
};

const SECONDS_PER_DAY: u32 = 24 * 60 * 60;

/// The statuses a booking may move to `target` from
///
/// A booking is only ever reviewed once (`pending` to `approved` or
/// `rejected`) and can be cancelled from any status except `cancelled`.
#[must_use]
pub fn transition_sources(target: BookingStatus) -> &'static [BookingStatus] {
	match target {
		BookingStatus::Pending => &[],
		BookingStatus::Approved | BookingStatus::Rejected => {
			&[BookingStatus::Pending]
		},
		BookingStatus::Cancelled => {
			&[
				BookingStatus::Pending,
				BookingStatus::Approved,
				BookingStatus::Rejected,
			]
		},
	}
}

/// Check whether a booking in status `from` may move to status `to`
///
/// # Errors
/// Errors with [`BookingError::InvalidTransition`] if the move is not allowed
pub fn check_transition(
	from: BookingStatus,
	to: BookingStatus,
) -> Result<(), Error> {
	if transition_sources(to).contains(&from) {
		return Ok(());
	}

	Err(BookingError::InvalidTransition {
		from: from.as_str(),
		to:   to.as_str(),
	}
	.into())
}

#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = bookings)]
#[diesel(check_for_backend(Pg))]
pub struct Booking {
	pub id:               i32,
	pub user_id:          i32,
	pub room_id:          i32,
	pub booking_code:     String,
	pub date:             NaiveDate,
	pub start_time:       NaiveTime,
	pub duration:         i32,
	pub purpose:          String,
	pub status:           BookingStatus,
	pub is_approved:      bool,
	pub approved_by:      Option<i32>,
	pub approved_at:      Option<NaiveDateTime>,
	pub rejection_reason: Option<String>,
	pub cancelled_at:     Option<NaiveDateTime>,
	pub created_at:       NaiveDateTime,
	pub updated_at:       NaiveDateTime,
	pub deleted_at:       Option<NaiveDateTime>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingFilter {
	pub status:  Option<BookingStatus>,
	pub room_id: Option<i32>,
	pub user_id: Option<i32>,
	pub date:    Option<NaiveDate>,
	#[serde(default)]
	pub trashed: Trashed,
}

/// Build the soft delete condition for the `bookings` table
fn trashed_condition(trashed: Trashed) -> BoxedCondition<bookings::table> {
	match trashed {
		Trashed::Without => Box::new(bookings::deleted_at.is_null()),
		Trashed::With => Box::new(true.into_sql::<Bool>()),
		Trashed::Only => Box::new(bookings::deleted_at.is_not_null()),
	}
}

impl ToFilter<bookings::table> for BookingFilter {
	type SqlType = Bool;

	fn to_filter(&self) -> BoxedCondition<bookings::table, Self::SqlType> {
		let mut filter = trashed_condition(self.trashed);

		if let Some(status) = self.status {
			filter = Box::new(filter.and(bookings::status.eq(status)));
		}

		if let Some(r_id) = self.room_id {
			filter = Box::new(filter.and(bookings::room_id.eq(r_id)));
		}

		if let Some(u_id) = self.user_id {
			filter = Box::new(filter.and(bookings::user_id.eq(u_id)));
		}

		if let Some(date) = self.date {
			filter = Box::new(filter.and(bookings::date.eq(date)));
		}

		filter
	}
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
#[allow(clippy::struct_excessive_bools)]
#[serde(rename_all = "camelCase")]
pub struct BookingIncludes {
	#[serde(default)]
	pub room:     bool,
	#[serde(default)]
	pub user:     bool,
	#[serde(default)]
	pub approver: bool,
}

/// A [`Booking`] together with the relations requested through
/// [`BookingIncludes`]
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct FullBooking {
	pub booking:  Booking,
	pub room:     Option<Room>,
	pub user:     Option<User>,
	pub approver: Option<Option<User>>,
}

impl Booking {
	/// The moment this booking starts
	#[must_use]
	pub fn starts_at(&self) -> NaiveDateTime {
		self.date.and_time(self.start_time)
	}

	/// The moment this booking ends
	#[must_use]
	pub fn ends_at(&self) -> NaiveDateTime {
		self.starts_at() + TimeDelta::minutes(self.duration.into())
	}

	/// Get a [`Booking`] given its id
	#[instrument(skip(conn))]
	pub async fn get(
		b_id: i32,
		trashed: Trashed,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let booking = conn
			.interact(move |conn| {
				bookings::table
					.find(b_id)
					.filter(trashed_condition(trashed))
					.select(Self::as_select())
					.get_result(conn)
			})
			.await??;

		Ok(booking)
	}

	/// Get a [`Booking`] and its requested relations given its id
	#[instrument(skip(conn))]
	pub async fn get_full(
		b_id: i32,
		trashed: Trashed,
		includes: BookingIncludes,
		conn: &DbConn,
	) -> Result<FullBooking, Error> {
		let booking = Self::get(b_id, trashed, conn).await?;

		let mut full =
			Self::with_includes(vec![booking], includes, conn).await?;

		full.pop().ok_or_else(|| {
			Error::Infallible("booking vanished while loading includes".into())
		})
	}

	/// Get a page of [`Booking`]s matching a filter, most recent date first
	#[instrument(skip(conn))]
	pub async fn get_all(
		filter: BookingFilter,
		includes: BookingIncludes,
		p_cfg: PaginationConfig,
		conn: &DbConn,
	) -> Result<PaginatedData<Vec<FullBooking>>, Error> {
		let (total, bookings) = conn
			.interact(move |conn| {
				let total = bookings::table
					.filter(filter.to_filter())
					.count()
					.get_result::<i64>(conn)?;

				let bookings = bookings::table
					.filter(filter.to_filter())
					.order((
						bookings::date.desc(),
						bookings::start_time.desc(),
						bookings::id.desc(),
					))
					.limit(p_cfg.limit)
					.offset(p_cfg.offset)
					.select(Self::as_select())
					.load(conn)?;

				Ok::<_, diesel::result::Error>((total, bookings))
			})
			.await??;

		p_cfg.check(total)?;

		let bookings = Self::with_includes(bookings, includes, conn).await?;

		Ok((total, bookings))
	}

	/// Attach the requested relations to a list of bookings
	async fn with_includes(
		bookings: Vec<Self>,
		includes: BookingIncludes,
		conn: &DbConn,
	) -> Result<Vec<FullBooking>, Error> {
		let mut rooms = HashMap::new();
		let mut users = HashMap::new();

		if includes.room {
			let ids = bookings.iter().map(|b| b.room_id).collect();

			rooms = Room::get_many(ids, conn)
				.await?
				.into_iter()
				.map(|r| (r.id, r))
				.collect();
		}

		if includes.user || includes.approver {
			let mut ids = vec![];

			for booking in &bookings {
				if includes.user {
					ids.push(booking.user_id);
				}

				if includes.approver
					&& let Some(approver) = booking.approved_by
				{
					ids.push(approver);
				}
			}

			users = User::get_many(ids, conn)
				.await?
				.into_iter()
				.map(|u| (u.id, u))
				.collect();
		}

		let full = bookings
			.into_iter()
			.map(|booking| {
				let user = if includes.user {
					users.get(&booking.user_id).cloned()
				} else {
					None
				};

				let approver = if includes.approver {
					let approver = booking.approved_by;

					Some(approver.and_then(|a| users.get(&a).cloned()))
				} else {
					None
				};

				FullBooking {
					room: rooms.get(&booking.room_id).cloned(),
					user,
					approver,
					booking,
				}
			})
			.collect();

		Ok(full)
	}

	/// Load a live booking and make sure it may move to `target`
	async fn load_for_transition(
		b_id: i32,
		target: BookingStatus,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let current = Self::get(b_id, Trashed::Without, conn).await?;

		check_transition(current.status, target)?;

		Ok(current)
	}

	/// Build the error for a guarded update that matched no rows because the
	/// booking changed status in the meantime
	async fn lost_transition(
		b_id: i32,
		target: BookingStatus,
		conn: &DbConn,
	) -> Error {
		match Self::get(b_id, Trashed::Without, conn).await {
			Ok(latest) => {
				warn!(
					"booking {b_id} moved to {} before it could become {}",
					latest.status.as_str(),
					target.as_str(),
				);

				BookingError::InvalidTransition {
					from: latest.status.as_str(),
					to:   target.as_str(),
				}
				.into()
			},
			Err(e) => e,
		}
	}

	/// Approve a pending [`Booking`], recording who approved it
	#[instrument(skip(conn))]
	pub async fn approve_by(
		b_id: i32,
		approver_id: i32,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let target = BookingStatus::Approved;

		Self::load_for_transition(b_id, target, conn).await?;

		let sources = transition_sources(target).to_vec();
		let now = Utc::now().naive_utc();

		let updated = conn
			.interact(move |conn| {
				use self::bookings::dsl::*;

				diesel::update(
					bookings
						.find(b_id)
						.filter(deleted_at.is_null())
						.filter(status.eq_any(sources)),
				)
				.set((
					status.eq(target),
					is_approved.eq(true),
					approved_by.eq(Some(approver_id)),
					approved_at.eq(Some(now)),
					rejection_reason.eq(None::<String>),
					updated_at.eq(now),
				))
				.returning(Self::as_returning())
				.get_result(conn)
				.optional()
			})
			.await??;

		let Some(booking) = updated else {
			return Err(Self::lost_transition(b_id, target, conn).await);
		};

		info!("booking {} approved by user {approver_id}", booking.booking_code);

		Ok(booking)
	}

	/// Reject a pending [`Booking`] with a reason
	///
	/// The reviewing admin is stored as the approver reference, the approval
	/// flag and timestamp stay unset.
	#[instrument(skip(conn))]
	pub async fn reject_by(
		b_id: i32,
		reviewer_id: i32,
		reason: String,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let target = BookingStatus::Rejected;

		let reason = reason.trim().to_string();

		if reason.is_empty() {
			return Err(Error::ValidationError(
				"a rejection reason is required".to_string(),
			));
		}

		Self::load_for_transition(b_id, target, conn).await?;

		let sources = transition_sources(target).to_vec();
		let now = Utc::now().naive_utc();

		let updated = conn
			.interact(move |conn| {
				use self::bookings::dsl::*;

				diesel::update(
					bookings
						.find(b_id)
						.filter(deleted_at.is_null())
						.filter(status.eq_any(sources)),
				)
				.set((
					status.eq(target),
					is_approved.eq(false),
					approved_by.eq(Some(reviewer_id)),
					approved_at.eq(None::<NaiveDateTime>),
					rejection_reason.eq(Some(reason)),
					updated_at.eq(now),
				))
				.returning(Self::as_returning())
				.get_result(conn)
				.optional()
			})
			.await??;

		let Some(booking) = updated else {
			return Err(Self::lost_transition(b_id, target, conn).await);
		};

		info!("booking {} rejected by user {reviewer_id}", booking.booking_code);

		Ok(booking)
	}

	/// Cancel a [`Booking`] that has not been cancelled yet
	#[instrument(skip(conn))]
	pub async fn cancel(b_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let target = BookingStatus::Cancelled;

		Self::load_for_transition(b_id, target, conn).await?;

		let sources = transition_sources(target).to_vec();
		let now = Utc::now().naive_utc();

		let updated = conn
			.interact(move |conn| {
				use self::bookings::dsl::*;

				diesel::update(
					bookings
						.find(b_id)
						.filter(deleted_at.is_null())
						.filter(status.eq_any(sources)),
				)
				.set((
					status.eq(target),
					is_approved.eq(false),
					cancelled_at.eq(Some(now)),
					updated_at.eq(now),
				))
				.returning(Self::as_returning())
				.get_result(conn)
				.optional()
			})
			.await??;

		let Some(booking) = updated else {
			return Err(Self::lost_transition(b_id, target, conn).await);
		};

		info!("booking {} cancelled", booking.booking_code);

		Ok(booking)
	}

	/// Soft delete a [`Booking`], it stays available for auditing
	#[instrument(skip(conn))]
	pub async fn soft_delete(b_id: i32, conn: &DbConn) -> Result<(), Error> {
		let now = Utc::now().naive_utc();

		let count = conn
			.interact(move |conn| {
				use self::bookings::dsl::*;

				diesel::update(bookings.find(b_id).filter(deleted_at.is_null()))
					.set((deleted_at.eq(Some(now)), updated_at.eq(now)))
					.execute(conn)
			})
			.await??;

		if count == 0 {
			return Err(Error::NotFound(format!("booking with id {b_id}")));
		}

		info!("soft deleted booking with id {b_id}");

		Ok(())
	}

	/// Count live bookings per status
	#[instrument(skip(conn))]
	pub async fn count_by_status(
		conn: &DbConn,
	) -> Result<Vec<(BookingStatus, i64)>, Error> {
		let counts = conn
			.interact(|conn| {
				use self::bookings::dsl::*;

				bookings
					.filter(deleted_at.is_null())
					.group_by(status)
					.select((status, diesel::dsl::count_star()))
					.load(conn)
			})
			.await??;

		Ok(counts)
	}

	/// Count live pending or approved bookings taking place on `day`
	#[instrument(skip(conn))]
	pub async fn count_on(day: NaiveDate, conn: &DbConn) -> Result<i64, Error> {
		let count = conn
			.interact(move |conn| {
				use self::bookings::dsl::*;

				bookings
					.filter(deleted_at.is_null())
					.filter(date.eq(day))
					.filter(
						status.eq_any([
							BookingStatus::Pending,
							BookingStatus::Approved,
						]),
					)
					.count()
					.get_result(conn)
			})
			.await??;

		Ok(count)
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = bookings)]
#[diesel(check_for_backend(Pg))]
pub struct NewBooking {
	pub user_id:      i32,
	pub room_id:      i32,
	pub booking_code: String,
	pub date:         NaiveDate,
	pub start_time:   NaiveTime,
	pub duration:     i32,
	pub purpose:      String,
}

impl NewBooking {
	/// Generate a booking code such as `BK-20250301-3F9A0C1D`
	#[must_use]
	pub fn generate_code(date: NaiveDate) -> String {
		let suffix = Uuid::new_v4().simple().to_string();

		format!("BK-{}-{}", date.format("%Y%m%d"), suffix[..8].to_uppercase())
	}

	/// Check that this booking lies in the future (relative to `today`) and
	/// ends on the day it starts
	///
	/// # Errors
	/// Errors if the date is before `today` or the booking runs past midnight
	pub fn check_schedule(&self, today: NaiveDate) -> Result<(), Error> {
		if self.date < today {
			return Err(BookingError::DateInPast(self.date).into());
		}

		let start = self.start_time.num_seconds_from_midnight();
		let duration = u32::try_from(self.duration)
			.map_or(u32::MAX, |minutes| minutes.saturating_mul(60));

		if start.saturating_add(duration) > SECONDS_PER_DAY {
			return Err(BookingError::CrossesMidnight.into());
		}

		Ok(())
	}

	/// Insert this [`NewBooking`] as a pending booking
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<Booking, Error> {
		let booking = conn
			.interact(|conn| {
				diesel::insert_into(bookings::table)
					.values(self)
					.returning(Booking::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("created booking {booking:?}");

		Ok(booking)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn new_booking(date: NaiveDate, start: NaiveTime, duration: i32) -> NewBooking {
		NewBooking {
			user_id: 1,
			room_id: 1,
			booking_code: NewBooking::generate_code(date),
			date,
			start_time: start,
			duration,
			purpose: "Thesis defence".to_string(),
		}
	}

	fn day(y: i32, m: u32, d: u32) -> NaiveDate {
		NaiveDate::from_ymd_opt(y, m, d).unwrap()
	}

	fn time(h: u32, m: u32) -> NaiveTime { NaiveTime::from_hms_opt(h, m, 0).unwrap() }

	#[test]
	fn pending_can_be_reviewed() {
		assert!(check_transition(BookingStatus::Pending, BookingStatus::Approved).is_ok());
		assert!(check_transition(BookingStatus::Pending, BookingStatus::Rejected).is_ok());
	}

	#[test]
	fn reviews_are_final() {
		for (from, to) in [
			(BookingStatus::Approved, BookingStatus::Rejected),
			(BookingStatus::Rejected, BookingStatus::Approved),
			(BookingStatus::Approved, BookingStatus::Approved),
			(BookingStatus::Cancelled, BookingStatus::Approved),
			(BookingStatus::Approved, BookingStatus::Pending),
		] {
			let err = check_transition(from, to).unwrap_err();

			assert!(
				matches!(
					err,
					Error::BookingError(BookingError::InvalidTransition { .. })
				),
				"{from:?} -> {to:?} should be refused"
			);
		}
	}

	#[test]
	fn anything_but_cancelled_can_be_cancelled() {
		for from in [
			BookingStatus::Pending,
			BookingStatus::Approved,
			BookingStatus::Rejected,
		] {
			assert!(check_transition(from, BookingStatus::Cancelled).is_ok());
		}

		assert!(
			check_transition(BookingStatus::Cancelled, BookingStatus::Cancelled)
				.is_err()
		);
	}

	#[test]
	fn booking_code_format() {
		let code = NewBooking::generate_code(day(2025, 3, 1));

		assert!(code.starts_with("BK-20250301-"));
		assert_eq!(code.len(), "BK-20250301-".len() + 8);
		assert!(code[12..].chars().all(|c| c.is_ascii_hexdigit()));
		assert_eq!(code[12..].to_uppercase(), code[12..]);
	}

	#[test]
	fn booking_codes_differ() {
		let date = day(2025, 3, 1);

		assert_ne!(NewBooking::generate_code(date), NewBooking::generate_code(date));
	}

	#[test]
	fn schedule_in_the_past_is_refused() {
		let booking = new_booking(day(2025, 2, 28), time(9, 0), 60);

		assert!(matches!(
			booking.check_schedule(day(2025, 3, 1)),
			Err(Error::BookingError(BookingError::DateInPast(_)))
		));
	}

	#[test]
	fn schedule_today_is_allowed() {
		let booking = new_booking(day(2025, 3, 1), time(9, 0), 60);

		assert!(booking.check_schedule(day(2025, 3, 1)).is_ok());
	}

	#[test]
	fn schedule_past_midnight_is_refused() {
		let booking = new_booking(day(2025, 3, 1), time(23, 0), 90);

		assert!(matches!(
			booking.check_schedule(day(2025, 3, 1)),
			Err(Error::BookingError(BookingError::CrossesMidnight))
		));

		let until_midnight = new_booking(day(2025, 3, 1), time(23, 0), 60);

		assert!(until_midnight.check_schedule(day(2025, 3, 1)).is_ok());
	}

	#[test]
	fn seconds_count_towards_midnight() {
		let start = NaiveTime::from_hms_opt(23, 45, 30).unwrap();
		let booking = new_booking(day(2025, 3, 1), start, 15);

		assert!(matches!(
			booking.check_schedule(day(2025, 3, 1)),
			Err(Error::BookingError(BookingError::CrossesMidnight))
		));

		let start = NaiveTime::from_hms_opt(23, 44, 59).unwrap();
		let booking = new_booking(day(2025, 3, 1), start, 15);

		assert!(booking.check_schedule(day(2025, 3, 1)).is_ok());
	}

	#[test]
	fn booking_end_follows_duration() {
		let now = Utc::now().naive_utc();
		let booking = Booking {
			id:               1,
			user_id:          1,
			room_id:          1,
			booking_code:     "BK-20250301-00000000".to_string(),
			date:             day(2025, 3, 1),
			start_time:       time(10, 30),
			duration:         150,
			purpose:          "Lecture".to_string(),
			status:           BookingStatus::Approved,
			is_approved:      true,
			approved_by:      Some(2),
			approved_at:      Some(now),
			rejection_reason: None,
			cancelled_at:     None,
			created_at:       now,
			updated_at:       now,
			deleted_at:       None,
		};

		assert_eq!(booking.starts_at(), day(2025, 3, 1).and_time(time(10, 30)));
		assert_eq!(booking.ends_at(), day(2025, 3, 1).and_time(time(13, 0)));
	}
}
