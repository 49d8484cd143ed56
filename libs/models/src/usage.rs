use chrono::{NaiveDateTime, Utc};
use common::{BookingError, DbConn, Error};
use db::{BookingStatus, usage_logs};
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::Booking;

/// Whether a check out at `checked_out_at` is past the end of the booking
#[must_use]
pub fn is_late_checkout(
	booking_end: NaiveDateTime,
	checked_out_at: NaiveDateTime,
) -> bool {
	checked_out_at > booking_end
}

/// Record of how an approved booking was actually used
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = usage_logs)]
#[diesel(check_for_backend(Pg))]
pub struct UsageLog {
	pub id:                i32,
	pub booking_id:        i32,
	pub check_in_at:       NaiveDateTime,
	pub check_out_at:      Option<NaiveDateTime>,
	pub late_checkout:     bool,
	pub issue_reported:    bool,
	pub issue_description: Option<String>,
	pub created_at:        NaiveDateTime,
	pub updated_at:        NaiveDateTime,
}

impl UsageLog {
	/// Get the usage log of a booking, `None` if nobody checked in yet
	#[instrument(skip(conn))]
	pub async fn for_booking(
		b_id: i32,
		conn: &DbConn,
	) -> Result<Option<Self>, Error> {
		let log = conn
			.interact(move |conn| {
				use self::usage_logs::dsl::*;

				usage_logs
					.filter(booking_id.eq(b_id))
					.select(Self::as_select())
					.get_result(conn)
					.optional()
			})
			.await??;

		Ok(log)
	}

	/// Check in to an approved booking
	///
	/// # Errors
	/// Errors if the booking is not approved or was already checked in to
	#[instrument(skip(booking, conn), fields(booking = booking.id))]
	pub async fn check_in(
		booking: &Booking,
		conn: &DbConn,
	) -> Result<Self, Error> {
		if booking.status != BookingStatus::Approved {
			return Err(BookingError::NotApproved.into());
		}

		let b_id = booking.id;
		let now = Utc::now().naive_utc();

		let log = conn
			.interact(move |conn| {
				use self::usage_logs::dsl::*;

				diesel::insert_into(usage_logs)
					.values((booking_id.eq(b_id), check_in_at.eq(now)))
					.on_conflict(booking_id)
					.do_nothing()
					.returning(Self::as_returning())
					.get_result(conn)
					.optional()
			})
			.await??
			.ok_or(BookingError::AlreadyCheckedIn)?;

		info!("checked in to booking {}", booking.booking_code);

		Ok(log)
	}

	/// Check out of a booking, flagging the log when it happens after the
	/// booking has ended
	///
	/// # Errors
	/// Errors if nobody checked in yet or the booking was already checked out
	#[instrument(skip(booking, conn), fields(booking = booking.id))]
	pub async fn check_out(
		booking: &Booking,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let b_id = booking.id;
		let now = Utc::now().naive_utc();
		let late = is_late_checkout(booking.ends_at(), now);

		let updated = conn
			.interact(move |conn| {
				use self::usage_logs::dsl::*;

				diesel::update(
					usage_logs
						.filter(booking_id.eq(b_id))
						.filter(check_out_at.is_null()),
				)
				.set((
					check_out_at.eq(Some(now)),
					late_checkout.eq(late),
					updated_at.eq(now),
				))
				.returning(Self::as_returning())
				.get_result(conn)
				.optional()
			})
			.await??;

		let Some(log) = updated else {
			return match Self::for_booking(b_id, conn).await? {
				Some(_) => Err(BookingError::AlreadyCheckedOut.into()),
				None => Err(BookingError::NotCheckedIn.into()),
			};
		};

		if late {
			warn!("late check out of booking {}", booking.booking_code);
		} else {
			info!("checked out of booking {}", booking.booking_code);
		}

		Ok(log)
	}

	/// Report an issue with the room during a booking
	///
	/// # Errors
	/// Errors if nobody checked in to the booking
	#[instrument(skip(conn))]
	pub async fn report_issue(
		b_id: i32,
		description: Option<String>,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let now = Utc::now().naive_utc();

		let log = conn
			.interact(move |conn| {
				use self::usage_logs::dsl::*;

				diesel::update(usage_logs.filter(booking_id.eq(b_id)))
					.set((
						issue_reported.eq(true),
						issue_description.eq(description),
						updated_at.eq(now),
					))
					.returning(Self::as_returning())
					.get_result(conn)
					.optional()
			})
			.await??
			.ok_or(BookingError::NotCheckedIn)?;

		warn!("issue reported for booking {b_id}");

		Ok(log)
	}
}

#[cfg(test)]
mod tests {
	use chrono::{NaiveDate, TimeDelta};

	use super::*;

	fn at(h: u32, m: u32) -> NaiveDateTime {
		NaiveDate::from_ymd_opt(2025, 3, 1)
			.unwrap()
			.and_hms_opt(h, m, 0)
			.unwrap()
	}

	#[test]
	fn checkout_before_end_is_on_time() {
		assert!(!is_late_checkout(at(12, 0), at(11, 45)));
	}

	#[test]
	fn checkout_at_end_is_on_time() {
		assert!(!is_late_checkout(at(12, 0), at(12, 0)));
	}

	#[test]
	fn checkout_after_end_is_late() {
		assert!(is_late_checkout(at(12, 0), at(12, 0) + TimeDelta::seconds(1)));
		assert!(is_late_checkout(at(12, 0), at(14, 30)));
	}
}
