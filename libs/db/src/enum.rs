use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};

#[derive(
	Clone, Copy, DbEnum, Debug, Default, Deserialize, PartialEq, Eq, Serialize,
)]
#[ExistingTypePath = "crate::sql_types::RoomStatus"]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
	#[default]
	Available,
	Maintenance,
	Booked,
}

impl RoomStatus {
	#[must_use]
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Available => "available",
			Self::Maintenance => "maintenance",
			Self::Booked => "booked",
		}
	}
}

#[derive(
	Clone,
	Copy,
	DbEnum,
	Debug,
	Default,
	Deserialize,
	Hash,
	PartialEq,
	Eq,
	Serialize,
)]
#[ExistingTypePath = "crate::sql_types::BookingStatus"]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
	#[default]
	Pending,
	Approved,
	Rejected,
	Cancelled,
}

impl BookingStatus {
	#[must_use]
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Pending => "pending",
			Self::Approved => "approved",
			Self::Rejected => "rejected",
			Self::Cancelled => "cancelled",
		}
	}
}

#[derive(
	Clone, Copy, DbEnum, Debug, Default, Deserialize, PartialEq, Eq, Serialize,
)]
#[ExistingTypePath = "crate::sql_types::MaintenanceStatus"]
#[serde(rename_all = "lowercase")]
pub enum MaintenanceStatus {
	#[default]
	Scheduled,
	Completed,
}
