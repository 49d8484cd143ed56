use chrono::Utc;
use common::{DbConn, Error};
use db::{BookingStatus, RoomStatus};
use serde::{Deserialize, Serialize};

use crate::{Booking, MaintenanceLog, Room, User};

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomCounts {
	pub total:       i64,
	pub available:   i64,
	pub maintenance: i64,
	pub booked:      i64,
}

impl RoomCounts {
	fn from_groups(groups: &[(RoomStatus, i64)]) -> Self {
		let mut counts = Self::default();

		for &(status, count) in groups {
			match status {
				RoomStatus::Available => counts.available += count,
				RoomStatus::Maintenance => counts.maintenance += count,
				RoomStatus::Booked => counts.booked += count,
			}

			counts.total += count;
		}

		counts
	}
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingCounts {
	pub total:     i64,
	pub pending:   i64,
	pub approved:  i64,
	pub rejected:  i64,
	pub cancelled: i64,
	pub today:     i64,
}

impl BookingCounts {
	fn from_groups(groups: &[(BookingStatus, i64)], today: i64) -> Self {
		let mut counts = Self { today, ..Self::default() };

		for &(status, count) in groups {
			match status {
				BookingStatus::Pending => counts.pending += count,
				BookingStatus::Approved => counts.approved += count,
				BookingStatus::Rejected => counts.rejected += count,
				BookingStatus::Cancelled => counts.cancelled += count,
			}

			counts.total += count;
		}

		counts
	}
}

/// Overview numbers shown on the admin dashboard
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
	pub rooms:                 RoomCounts,
	pub bookings:              BookingCounts,
	pub pending_approvals:     i64,
	pub scheduled_maintenance: i64,
	pub users:                 i64,
}

impl DashboardStats {
	/// Gather the dashboard numbers, deleted rooms and bookings are not
	/// counted
	#[instrument(skip(conn))]
	pub async fn collect(conn: &DbConn) -> Result<Self, Error> {
		let today = Utc::now().date_naive();

		let rooms = RoomCounts::from_groups(&Room::count_by_status(conn).await?);
		let bookings = BookingCounts::from_groups(
			&Booking::count_by_status(conn).await?,
			Booking::count_on(today, conn).await?,
		);

		let stats = Self {
			pending_approvals: bookings.pending,
			scheduled_maintenance: MaintenanceLog::count_scheduled(conn).await?,
			users: User::count(conn).await?,
			rooms,
			bookings,
		};

		debug!("collected dashboard stats {stats:?}");

		Ok(stats)
	}
}
