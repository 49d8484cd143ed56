//! Database models and queries for the room booking service

#[macro_use]
extern crate tracing;

use common::{Error, PaginationError};
use diesel::BoxableExpression;
use diesel::pg::Pg;
use diesel::sql_types::Bool;
use serde::{Deserialize, Serialize};

mod booking;
mod building;
mod calendar;
mod dashboard;
mod document;
mod facility;
mod faculty;
mod maintenance;
mod room;
mod room_category;
mod usage;
mod user;

pub use booking::*;
pub use building::*;
pub use calendar::*;
pub use dashboard::*;
pub use db::{BookingStatus, MaintenanceStatus, RoomStatus};
pub use document::*;
pub use facility::*;
pub use faculty::*;
pub use maintenance::*;
pub use room::*;
pub use room_category::*;
pub use usage::*;
pub use user::*;

pub type BoxedCondition<S, T = Bool> =
	Box<dyn BoxableExpression<S, Pg, SqlType = T>>;

/// Total amount of matching rows together with one page of them
pub type PaginatedData<T> = (i64, T);

pub trait ToFilter<S> {
	type SqlType;

	fn to_filter(&self) -> BoxedCondition<S, Self::SqlType>;
}

#[derive(Clone, Copy, Debug)]
pub struct PaginationConfig {
	pub limit:  i64,
	pub offset: i64,
}

impl PaginationConfig {
	/// Check that this page actually starts inside the `total` available rows
	///
	/// # Errors
	/// Errors if the offset is past the last row of a non-empty result
	pub fn check(&self, total: i64) -> Result<(), Error> {
		if total > 0 && self.offset >= total {
			return Err(PaginationError::OffsetTooLarge.into());
		}

		Ok(())
	}
}

/// Visibility of soft deleted rows in a query
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trashed {
	/// Only rows that have not been deleted
	#[default]
	Without,
	/// Both deleted and non deleted rows
	With,
	/// Only deleted rows
	Only,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pagination_offset_inside_results() {
		let cfg = PaginationConfig { limit: 10, offset: 10 };

		assert!(cfg.check(11).is_ok());
		assert!(cfg.check(0).is_ok());
		assert!(matches!(
			cfg.check(10),
			Err(Error::PaginationError(PaginationError::OffsetTooLarge))
		));
	}
}
