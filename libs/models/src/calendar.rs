use chrono::{NaiveDate, NaiveDateTime, TimeDelta, Weekday};
use common::{CalendarError, DbConn, Error};
use db::{BookingStatus, bookings, rooms};
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::Booking;

/// Longest range a single calendar query may span, in days
pub const CALENDAR_MAX_DAYS: i64 = 62;

/// Statuses shown on the calendar when no status filter is given
pub const CALENDAR_DEFAULT_STATUSES: [BookingStatus; 2] =
	[BookingStatus::Pending, BookingStatus::Approved];

/// An inclusive range of days shown on the calendar
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct CalendarRange {
	pub from: NaiveDate,
	pub to:   NaiveDate,
}

impl CalendarRange {
	/// Resolve the requested bounds into a range
	///
	/// Without bounds the Monday to Sunday week containing `today` is used, a
	/// single bound is extended to a full week on the missing side.
	///
	/// # Errors
	/// Errors if `from` is after `to` or the range spans more than
	/// [`CALENDAR_MAX_DAYS`] days
	pub fn resolve(
		from: Option<NaiveDate>,
		to: Option<NaiveDate>,
		today: NaiveDate,
	) -> Result<Self, Error> {
		let week = today.week(Weekday::Mon);

		let (from, to) = match (from, to) {
			(None, None) => (week.first_day(), week.last_day()),
			(Some(from), None) => (from, from + TimeDelta::days(6)),
			(None, Some(to)) => (to - TimeDelta::days(6), to),
			(Some(from), Some(to)) => (from, to),
		};

		if from > to {
			return Err(CalendarError::InvertedRange.into());
		}

		if (to - from).num_days() + 1 > CALENDAR_MAX_DAYS {
			return Err(CalendarError::RangeTooLarge(CALENDAR_MAX_DAYS).into());
		}

		Ok(Self { from, to })
	}
}

/// A booking as displayed on the calendar
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
	pub booking_id:   i32,
	pub booking_code: String,
	pub room_id:      i32,
	pub room_code:    String,
	pub room_name:    String,
	pub user_id:      i32,
	pub purpose:      String,
	pub status:       BookingStatus,
	pub start:        NaiveDateTime,
	pub end:          NaiveDateTime,
}

impl CalendarEvent {
	fn from_parts(
		booking: Booking,
		room_code: String,
		room_name: String,
	) -> Self {
		Self {
			start: booking.starts_at(),
			end: booking.ends_at(),
			booking_id: booking.id,
			booking_code: booking.booking_code,
			room_id: booking.room_id,
			room_code,
			room_name,
			user_id: booking.user_id,
			purpose: booking.purpose,
			status: booking.status,
		}
	}

	/// Get the events in a range, optionally limited to a single room
	///
	/// Deleted bookings and bookings of deleted rooms are never shown
	#[instrument(skip(conn))]
	pub async fn for_range(
		range: CalendarRange,
		room_id: Option<i32>,
		statuses: Vec<BookingStatus>,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let rows = conn
			.interact(move |conn| {
				let mut query = bookings::table
					.inner_join(rooms::table)
					.filter(bookings::deleted_at.is_null())
					.filter(rooms::deleted_at.is_null())
					.filter(bookings::date.between(range.from, range.to))
					.filter(bookings::status.eq_any(statuses))
					.into_boxed::<Pg>();

				if let Some(r_id) = room_id {
					query = query.filter(bookings::room_id.eq(r_id));
				}

				query
					.order((bookings::date, bookings::start_time, rooms::code))
					.select((Booking::as_select(), rooms::code, rooms::name))
					.load::<(Booking, String, String)>(conn)
			})
			.await??;

		let events = rows
			.into_iter()
			.map(|(booking, code, name)| Self::from_parts(booking, code, name))
			.collect();

		Ok(events)
	}
}
