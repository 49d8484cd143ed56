use chrono::{NaiveDate, NaiveDateTime, Utc};
use common::{DbConn, Error, MaintenanceError};
use db::{MaintenanceStatus, maintenance_logs, rooms};
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = maintenance_logs)]
#[diesel(check_for_backend(Pg))]
pub struct MaintenanceLog {
	pub id:           i32,
	pub room_id:      i32,
	pub description:  String,
	pub date:         NaiveDate,
	pub performed_by: String,
	pub status:       MaintenanceStatus,
	pub created_at:   NaiveDateTime,
	pub updated_at:   NaiveDateTime,
}

impl MaintenanceLog {
	/// Get the maintenance history of a room, most recent first
	#[instrument(skip(conn))]
	pub async fn for_room(r_id: i32, conn: &DbConn) -> Result<Vec<Self>, Error> {
		let logs = conn
			.interact(move |conn| {
				use self::maintenance_logs::dsl::*;

				maintenance_logs
					.filter(room_id.eq(r_id))
					.order((date.desc(), id.desc()))
					.select(Self::as_select())
					.load(conn)
			})
			.await??;

		Ok(logs)
	}

	/// Mark a scheduled maintenance of a room as completed
	#[instrument(skip(conn))]
	pub async fn complete(
		r_id: i32,
		log_id: i32,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let now = Utc::now().naive_utc();

		let (updated, current) = conn
			.interact(move |conn| {
				use self::maintenance_logs::dsl::*;

				let updated = diesel::update(
					maintenance_logs
						.find(log_id)
						.filter(room_id.eq(r_id))
						.filter(status.eq(MaintenanceStatus::Scheduled)),
				)
				.set((status.eq(MaintenanceStatus::Completed), updated_at.eq(now)))
				.returning(Self::as_returning())
				.get_result(conn)
				.optional()?;

				if updated.is_some() {
					return Ok((updated, None));
				}

				let current = maintenance_logs
					.find(log_id)
					.filter(room_id.eq(r_id))
					.select(status)
					.get_result::<MaintenanceStatus>(conn)
					.optional()?;

				Ok::<_, diesel::result::Error>((None, current))
			})
			.await??;

		match (updated, current) {
			(Some(log), _) => {
				info!("completed maintenance {log_id} of room {r_id}");

				Ok(log)
			},
			(None, Some(_)) => Err(MaintenanceError::AlreadyCompleted.into()),
			(None, None) => {
				Err(Error::NotFound(format!(
					"maintenance log {log_id} of room {r_id}"
				)))
			},
		}
	}

	/// Count maintenance that has not been completed yet, maintenance of
	/// deleted rooms is left out
	#[instrument(skip(conn))]
	pub async fn count_scheduled(conn: &DbConn) -> Result<i64, Error> {
		let count = conn
			.interact(|conn| {
				maintenance_logs::table
					.inner_join(rooms::table)
					.filter(maintenance_logs::status.eq(MaintenanceStatus::Scheduled))
					.filter(rooms::deleted_at.is_null())
					.count()
					.get_result(conn)
			})
			.await??;

		Ok(count)
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = maintenance_logs)]
#[diesel(check_for_backend(Pg))]
pub struct NewMaintenanceLog {
	pub room_id:      i32,
	pub description:  String,
	pub date:         NaiveDate,
	pub performed_by: String,
}

impl NewMaintenanceLog {
	/// Schedule maintenance for a room
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<MaintenanceLog, Error> {
		let log = conn
			.interact(|conn| {
				diesel::insert_into(maintenance_logs::table)
					.values(self)
					.returning(MaintenanceLog::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("scheduled maintenance {log:?}");

		Ok(log)
	}
}
