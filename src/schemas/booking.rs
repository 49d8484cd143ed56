use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use models::{BookingStatus, FullBooking};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use validator_derive::Validate;

use crate::schemas::room::RoomResponse;
use crate::schemas::user::UserResponse;
use crate::schemas::{NOT_BLANK_REGEX, ser_includes};

#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
	pub id:               i32,
	pub booking_code:     String,
	pub user_id:          i32,
	pub room_id:          i32,
	pub date:             NaiveDate,
	pub start_time:       NaiveTime,
	pub duration:         i32,
	pub end_time:         NaiveDateTime,
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
	pub room:             Option<RoomResponse>,
	pub user:             Option<UserResponse>,
	#[serde(serialize_with = "ser_includes")]
	pub approver:         Option<Option<UserResponse>>,
}

impl From<FullBooking> for BookingResponse {
	fn from(full: FullBooking) -> Self {
		let booking = full.booking;

		Self {
			end_time:         booking.ends_at(),
			id:               booking.id,
			booking_code:     booking.booking_code,
			user_id:          booking.user_id,
			room_id:          booking.room_id,
			date:             booking.date,
			start_time:       booking.start_time,
			duration:         booking.duration,
			purpose:          booking.purpose,
			status:           booking.status,
			is_approved:      booking.is_approved,
			approved_by:      booking.approved_by,
			approved_at:      booking.approved_at,
			rejection_reason: booking.rejection_reason,
			cancelled_at:     booking.cancelled_at,
			created_at:       booking.created_at,
			updated_at:       booking.updated_at,
			deleted_at:       booking.deleted_at,
			room:             full.room.map(Into::into),
			user:             full.user.map(Into::into),
			approver:         full.approver.map(|a| a.map(Into::into)),
		}
	}
}

impl From<models::Booking> for BookingResponse {
	fn from(booking: models::Booking) -> Self {
		FullBooking { booking, room: None, user: None, approver: None }.into()
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
	pub room_id:    i32,
	pub date:       NaiveDate,
	pub start_time: NaiveTime,
	/// Length of the booking in minutes
	#[validate(range(
		min = 15,
		max = 720,
		message = "duration must be between 15 and 720 minutes",
		code = "duration-range"
	))]
	pub duration:   i32,
	#[validate(regex(
		path = *NOT_BLANK_REGEX,
		message = "purpose must not be blank",
		code = "purpose-blank"
	))]
	#[validate(length(
		min = 1,
		max = 1000,
		message = "purpose must be between 1 and 1000 characters long",
		code = "purpose-length"
	))]
	pub purpose:    String,
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RejectBookingRequest {
	#[validate(regex(
		path = *NOT_BLANK_REGEX,
		message = "a rejection reason is required",
		code = "reason-blank"
	))]
	#[validate(length(
		max = 1000,
		message = "reason must be at most 1000 characters long",
		code = "reason-length"
	))]
	#[serde(default)]
	pub reason: String,
}

#[cfg(test)]
mod tests {
	use validator::Validate;

	use super::*;

	fn create_request(duration: i32, purpose: &str) -> CreateBookingRequest {
		CreateBookingRequest {
			room_id: 1,
			date: NaiveDate::from_ymd_opt(2030, 1, 7).unwrap(),
			start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
			duration,
			purpose: purpose.to_string(),
		}
	}

	#[test]
	fn duration_is_bounded() {
		assert!(create_request(14, "Seminar").validate().is_err());
		assert!(create_request(15, "Seminar").validate().is_ok());
		assert!(create_request(720, "Seminar").validate().is_ok());
		assert!(create_request(721, "Seminar").validate().is_err());
	}

	#[test]
	fn purpose_must_not_be_blank() {
		assert!(create_request(60, "").validate().is_err());
		assert!(create_request(60, " \t ").validate().is_err());
	}

	#[test]
	fn rejection_needs_a_reason() {
		let missing: RejectBookingRequest = serde_json::from_str("{}").unwrap();
		let blank = RejectBookingRequest { reason: "   ".to_string() };
		let given = RejectBookingRequest { reason: "Room closed".to_string() };

		assert!(missing.validate().is_err());
		assert!(blank.validate().is_err());
		assert!(given.validate().is_ok());
	}

	#[test]
	fn start_time_accepts_minutes_only() {
		let request: CreateBookingRequest = serde_json::from_str(
			r#"{"roomId": 3, "date": "2030-01-07", "startTime": "13:30",
			"duration": 90, "purpose": "Exam"}"#,
		)
		.unwrap();

		assert_eq!(request.start_time, NaiveTime::from_hms_opt(13, 30, 0).unwrap());
	}
}
