//! Library-wide error types and [`From`] impls

use std::collections::HashMap;
use std::sync::LazyLock;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::NaiveDate;
use diesel::result::DatabaseErrorKind;
use thiserror::Error;

/// Top level application error, can be converted into a [`Response`]
#[derive(Debug, Error)]
pub enum Error {
	/// Duplicate resource created
	#[error("{0}")]
	Duplicate(String),
	/// Request/operation forbidden
	#[error("forbidden")]
	Forbidden,
	/// An error that should never happen
	#[error("{0}")]
	Infallible(String),
	/// Opaque internal server error
	#[error("internal server error")]
	InternalServerError,
	/// Resource not found
	#[error("not found - {0}")]
	NotFound(String),
	/// Any error related to logging in
	#[error(transparent)]
	LoginError(#[from] LoginError),
	/// Invalid pagination options
	#[error(transparent)]
	PaginationError(#[from] PaginationError),
	/// Invalid or missing token
	#[error(transparent)]
	TokenError(#[from] TokenError),
	/// Any error related to the booking workflow
	#[error(transparent)]
	BookingError(#[from] BookingError),
	/// Any error related to maintenance logs
	#[error(transparent)]
	MaintenanceError(#[from] MaintenanceError),
	/// Any error related to calendar queries
	#[error(transparent)]
	CalendarError(#[from] CalendarError),
	/// Resource could not be validated
	#[error("{0}")]
	ValidationError(String),
}

impl Error {
	/// Return a unique identifying code for this error
	///
	/// When modifying this function the error code should only ever increase,
	/// an error code should never be reused once its assigned to avoid
	/// unexpectedly breaking the frontend
	#[must_use]
	pub fn code(&self) -> i32 {
		match self {
			Self::Duplicate(_) => 1,
			Self::Forbidden => 2,
			Self::Infallible(_) => 3,
			Self::InternalServerError => 4,
			Self::NotFound(_) => 5,
			Self::LoginError(e) => {
				match e {
					LoginError::UnknownEmail(_) => 6,
					LoginError::InvalidPassword => 7,
				}
			},
			Self::TokenError(e) => {
				match e {
					TokenError::MissingAccessToken => 8,
					TokenError::UnknownUser => 9,
					TokenError::ExpiredAccessToken => 23,
					TokenError::RevokedAccessToken => 24,
				}
			},
			Self::ValidationError(_) => 10,
			Self::PaginationError(e) => {
				match e {
					PaginationError::OffsetTooLarge => 11,
				}
			},
			Self::BookingError(e) => {
				match e {
					BookingError::InvalidTransition { .. } => 12,
					BookingError::RoomUnavailable(_) => 13,
					BookingError::DateInPast(_) => 14,
					BookingError::CrossesMidnight => 15,
					BookingError::NotApproved => 16,
					BookingError::AlreadyCheckedIn => 17,
					BookingError::NotCheckedIn => 18,
					BookingError::AlreadyCheckedOut => 19,
				}
			},
			Self::MaintenanceError(e) => {
				match e {
					MaintenanceError::AlreadyCompleted => 20,
				}
			},
			Self::CalendarError(e) => {
				match e {
					CalendarError::InvertedRange => 21,
					CalendarError::RangeTooLarge(_) => 22,
				}
			},
		}
	}

	/// Return additional information about the error
	#[must_use]
	pub fn info(&self) -> Option<String> {
		match self {
			Self::Duplicate(m)
			| Self::NotFound(m)
			| Self::LoginError(LoginError::UnknownEmail(m))
			| Self::ValidationError(m) => Some(m.to_owned()),
			Self::BookingError(e) => {
				match e {
					BookingError::InvalidTransition { from, to } => {
						Some(
							serde_json::json!({"from": from, "to": to})
								.to_string(),
						)
					},
					BookingError::RoomUnavailable(status) => {
						Some(serde_json::json!({"status": status}).to_string())
					},
					BookingError::DateInPast(date) => {
						Some(serde_json::json!({"date": date}).to_string())
					},
					_ => None,
				}
			},
			Self::CalendarError(CalendarError::RangeTooLarge(max)) => {
				Some(serde_json::json!({"maxDays": max}).to_string())
			},
			_ => None,
		}
	}

	/// The HTTP status this error is reported with
	#[must_use]
	pub fn status(&self) -> StatusCode {
		match self {
			Self::Duplicate(_)
			| Self::BookingError(
				BookingError::InvalidTransition { .. }
				| BookingError::AlreadyCheckedIn
				| BookingError::AlreadyCheckedOut,
			)
			| Self::MaintenanceError(_) => StatusCode::CONFLICT,
			Self::InternalServerError | Self::Infallible(_) => {
				StatusCode::INTERNAL_SERVER_ERROR
			},
			Self::TokenError(_) => StatusCode::UNAUTHORIZED,
			Self::Forbidden | Self::LoginError(_) => StatusCode::FORBIDDEN,
			Self::BookingError(_) | Self::PaginationError(_) => {
				StatusCode::BAD_REQUEST
			},
			Self::NotFound(_) => StatusCode::NOT_FOUND,
			Self::ValidationError(_) | Self::CalendarError(_) => {
				StatusCode::UNPROCESSABLE_ENTITY
			},
		}
	}
}

/// Convert an error into a [`Response`]
impl IntoResponse for Error {
	fn into_response(self) -> Response {
		error!("{self:?}");

		let data = serde_json::json!({
			"message": self.to_string(),
			"code": self.code(),
			"info": self.info(),
		});

		(self.status(), axum::Json(data)).into_response()
	}
}

/// Any error related to logging in
#[derive(Debug, Error)]
pub enum LoginError {
	#[error("no user with email '{0}' was found")]
	UnknownEmail(String),
	#[error("invalid password")]
	InvalidPassword,
}

/// Any error related to a token
#[derive(Debug, Error)]
pub enum TokenError {
	#[error("missing or invalid access token")]
	MissingAccessToken,
	#[error("access token refers to an unknown user")]
	UnknownUser,
	#[error("access token has expired")]
	ExpiredAccessToken,
	#[error("access token has been revoked")]
	RevokedAccessToken,
}

/// Any error related to the booking workflow
#[derive(Debug, Error)]
pub enum BookingError {
	/// The requested status change is not allowed from the current status
	#[error("cannot move a booking from {from} to {to}")]
	InvalidTransition { from: &'static str, to: &'static str },
	/// The room cannot currently be booked
	#[error("this room is not available for booking")]
	RoomUnavailable(&'static str),
	/// The booking date lies before today
	#[error("bookings cannot be made in the past")]
	DateInPast(NaiveDate),
	/// The booking would run past the end of its day
	#[error("a booking must end on the day it starts")]
	CrossesMidnight,
	/// Usage can only be logged for approved bookings
	#[error("this booking has not been approved")]
	NotApproved,
	#[error("this booking has already been checked in")]
	AlreadyCheckedIn,
	#[error("this booking has not been checked in")]
	NotCheckedIn,
	#[error("this booking has already been checked out")]
	AlreadyCheckedOut,
}

/// Any error related to maintenance logs
#[derive(Debug, Error)]
pub enum MaintenanceError {
	#[error("this maintenance has already been completed")]
	AlreadyCompleted,
}

/// Any error related to calendar queries
#[derive(Debug, Error)]
pub enum CalendarError {
	#[error("the calendar range ends before it starts")]
	InvertedRange,
	#[error("the calendar range is too large")]
	RangeTooLarge(i64),
}

#[derive(Debug, Error)]
pub enum PaginationError {
	#[error("the offset is too large for the amount of data")]
	OffsetTooLarge,
}

/// A list of possible internal errors
///
/// API end users should never see these details
#[derive(Debug, Error)]
pub enum InternalServerError {
	/// Unknown database constraint violation
	#[error("constraint error -- {0:?}")]
	ConstraintError(String),
	/// Error executing some database operation
	#[error("database error -- {0:?}")]
	DatabaseError(diesel::result::Error),
	/// Error interacting with a database connection
	#[error("database interaction error -- {0:?}")]
	DatabaseInteractionError(deadpool_diesel::InteractError),
	/// Error hashing some value
	#[error("hash error -- {0:?}")]
	HashError(argon2::password_hash::Error),
	/// Error acquiring database pool connection
	#[error("database pool error -- {0:?}")]
	PoolError(deadpool_diesel::PoolError),
	/// Attempted to extract a session from a request that has not been
	/// authorized
	#[error("attempted to extract session without checking authorization")]
	SessionWithoutAuthError,
}

// Map internal server errors to application errors
impl From<InternalServerError> for Error {
	fn from(value: InternalServerError) -> Self {
		error!("internal server error -- {value}");

		Self::InternalServerError
	}
}

/// Map validation errors to application errors
impl From<validator::ValidationErrors> for Error {
	fn from(err: validator::ValidationErrors) -> Self {
		let errs = err.field_errors();

		let mut fields: Vec<_> = errs.into_iter().collect();
		fields.sort_by(|a, b| a.0.cmp(&b.0));

		let repr = fields
			.into_iter()
			.map(|(_, v)| {
				v.iter()
					.map(ToString::to_string)
					.collect::<Vec<String>>()
					.join("\n")
			})
			.collect::<Vec<String>>()
			.join("\n");

		Self::ValidationError(repr)
	}
}

/// Map password hashing errors to application errors
impl From<argon2::password_hash::Error> for Error {
	fn from(err: argon2::password_hash::Error) -> Self {
		match err {
			argon2::password_hash::Error::Password => {
				LoginError::InvalidPassword.into()
			},
			_ => InternalServerError::HashError(err).into(),
		}
	}
}

/// Map database interaction errors to application errors
impl From<deadpool_diesel::InteractError> for Error {
	fn from(value: deadpool_diesel::InteractError) -> Self {
		InternalServerError::DatabaseInteractionError(value).into()
	}
}

/// Map of unique constraint names to user facing messages
static CONSTRAINT_MESSAGES: LazyLock<HashMap<&str, &str>> =
	LazyLock::new(|| {
		HashMap::from([
			("users_email_key", "email is already in use"),
			("faculties_code_key", "faculty code is already in use"),
			("buildings_code_key", "building code is already in use"),
			("room_categories_name_key", "category name is already in use"),
			("rooms_code_key", "room code is already in use"),
			("room_facilities_name_key", "facility name is already in use"),
			(
				"room_facility_room_id_facility_id_key",
				"this facility is already attached to the room",
			),
			(
				"user_faculty_user_id_faculty_id_key",
				"this user is already a member of the faculty",
			),
			("bookings_booking_code_key", "booking code is already in use"),
			("document_types_name_key", "document type already exists"),
			(
				"usage_logs_booking_id_key",
				"this booking has already been checked in",
			),
		])
	});

/// Map database result errors to application errors.
impl From<diesel::result::Error> for Error {
	fn from(err: diesel::result::Error) -> Self {
		match &err {
			// No rows returned by query that expected at least one
			diesel::result::Error::NotFound => {
				Self::NotFound("no context provided".to_string())
			},
			// Unique constraint violation
			diesel::result::Error::DatabaseError(
				DatabaseErrorKind::UniqueViolation,
				info,
			) => {
				let Some(constraint_name) = info.constraint_name() else {
					return InternalServerError::DatabaseError(err).into();
				};

				match CONSTRAINT_MESSAGES.get(constraint_name) {
					Some(message) => Self::Duplicate((*message).to_string()),
					None => {
						InternalServerError::ConstraintError(
							constraint_name.to_string(),
						)
						.into()
					},
				}
			},
			// Foreign key constraint violation
			diesel::result::Error::DatabaseError(
				DatabaseErrorKind::ForeignKeyViolation,
				info,
			) => Self::ValidationError(info.message().to_string()),
			// Check constraint violation
			diesel::result::Error::DatabaseError(
				DatabaseErrorKind::CheckViolation,
				info,
			) => Self::ValidationError(info.message().to_string()),
			_ => InternalServerError::DatabaseError(err).into(),
		}
	}
}

impl From<deadpool_diesel::PoolError> for Error {
	fn from(value: deadpool_diesel::PoolError) -> Self {
		InternalServerError::PoolError(value).into()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn transition_errors_are_conflicts() {
		let err: Error = BookingError::InvalidTransition {
			from: "approved",
			to:   "rejected",
		}
		.into();

		assert_eq!(err.status(), StatusCode::CONFLICT);
		assert_eq!(err.code(), 12);
		assert_eq!(
			err.to_string(),
			"cannot move a booking from approved to rejected"
		);
		assert_eq!(
			err.info(),
			Some(r#"{"from":"approved","to":"rejected"}"#.to_string())
		);
	}

	#[test]
	fn not_found_maps_from_diesel() {
		let err = Error::from(diesel::result::Error::NotFound);

		assert!(matches!(err, Error::NotFound(_)));
		assert_eq!(err.status(), StatusCode::NOT_FOUND);
	}

	#[test]
	fn wrong_password_is_a_login_error() {
		let err = Error::from(argon2::password_hash::Error::Password);

		assert!(matches!(err, Error::LoginError(LoginError::InvalidPassword)));
		assert_eq!(err.status(), StatusCode::FORBIDDEN);
	}

	#[test]
	fn validation_errors_are_unprocessable() {
		let mut errors = validator::ValidationErrors::new();
		errors.add(
			"reason",
			validator::ValidationError::new("reason-blank")
				.with_message("a rejection reason is required".into()),
		);

		let err = Error::from(errors);

		assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
		assert_eq!(err.to_string(), "a rejection reason is required");
	}

	#[test]
	fn codes_are_unique() {
		let errors: Vec<Error> = vec![
			Error::Duplicate(String::new()),
			Error::Forbidden,
			Error::Infallible(String::new()),
			Error::InternalServerError,
			Error::NotFound(String::new()),
			LoginError::UnknownEmail(String::new()).into(),
			LoginError::InvalidPassword.into(),
			TokenError::MissingAccessToken.into(),
			TokenError::UnknownUser.into(),
			TokenError::ExpiredAccessToken.into(),
			TokenError::RevokedAccessToken.into(),
			Error::ValidationError(String::new()),
			PaginationError::OffsetTooLarge.into(),
			BookingError::InvalidTransition { from: "a", to: "b" }.into(),
			BookingError::RoomUnavailable("maintenance").into(),
			BookingError::DateInPast(NaiveDate::MIN).into(),
			BookingError::CrossesMidnight.into(),
			BookingError::NotApproved.into(),
			BookingError::AlreadyCheckedIn.into(),
			BookingError::NotCheckedIn.into(),
			BookingError::AlreadyCheckedOut.into(),
			MaintenanceError::AlreadyCompleted.into(),
			CalendarError::InvertedRange.into(),
			CalendarError::RangeTooLarge(62).into(),
		];

		let mut codes: Vec<i32> = errors.iter().map(Error::code).collect();
		codes.sort_unstable();
		codes.dedup();

		assert_eq!(codes.len(), errors.len());
	}
}
