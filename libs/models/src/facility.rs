use chrono::{NaiveDateTime, Utc};
use common::{DbConn, Error};
use db::{room_facilities, room_facility};
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// An amenity from the facility catalog (projector, whiteboard, ...)
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = room_facilities)]
#[diesel(check_for_backend(Pg))]
pub struct Facility {
	pub id:          i32,
	pub name:        String,
	pub description: Option<String>,
	pub created_at:  NaiveDateTime,
	pub updated_at:  NaiveDateTime,
}

impl Facility {
	/// Get a [`Facility`] given its id
	#[instrument(skip(conn))]
	pub async fn get(f_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let facility = conn
			.interact(move |conn| {
				use self::room_facilities::dsl::*;

				room_facilities
					.find(f_id)
					.select(Self::as_select())
					.get_result(conn)
			})
			.await??;

		Ok(facility)
	}

	/// Get the whole facility catalog ordered by name
	#[instrument(skip(conn))]
	pub async fn get_all(conn: &DbConn) -> Result<Vec<Self>, Error> {
		let facilities = conn
			.interact(|conn| {
				use self::room_facilities::dsl::*;

				room_facilities
					.order(name)
					.select(Self::as_select())
					.load(conn)
			})
			.await??;

		Ok(facilities)
	}

	/// Delete a [`Facility`] given its id, detaching it from every room
	#[instrument(skip(conn))]
	pub async fn delete_by_id(f_id: i32, conn: &DbConn) -> Result<(), Error> {
		let count = conn
			.interact(move |conn| {
				use self::room_facilities::dsl::*;

				diesel::delete(room_facilities.find(f_id)).execute(conn)
			})
			.await??;

		if count == 0 {
			return Err(Error::NotFound(format!("facility with id {f_id}")));
		}

		info!("deleted facility with id {f_id}");

		Ok(())
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = room_facilities)]
#[diesel(check_for_backend(Pg))]
pub struct NewFacility {
	pub name:        String,
	pub description: Option<String>,
}

impl NewFacility {
	/// Insert this [`NewFacility`]
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<Facility, Error> {
		let facility = conn
			.interact(|conn| {
				use self::room_facilities::dsl::*;

				diesel::insert_into(room_facilities)
					.values(self)
					.returning(Facility::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("created facility {facility:?}");

		Ok(facility)
	}
}

#[derive(AsChangeset, Clone, Debug, Default, Deserialize, Serialize)]
#[diesel(table_name = room_facilities)]
pub struct UpdateFacility {
	pub name:        Option<String>,
	pub description: Option<String>,
}

impl UpdateFacility {
	/// Update a [`Facility`] with the given changes
	#[instrument(skip(conn))]
	pub async fn apply_to(
		self,
		target_id: i32,
		conn: &DbConn,
	) -> Result<Facility, Error> {
		let now = Utc::now().naive_utc();

		let facility = conn
			.interact(move |conn| {
				use self::room_facilities::dsl::*;

				diesel::update(room_facilities.find(target_id))
					.set((self, updated_at.eq(now)))
					.returning(Facility::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("updated facility {}", facility.id);

		Ok(facility)
	}
}

/// A [`Facility`] attached to a room, with a quantity
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = room_facility)]
#[diesel(check_for_backend(Pg))]
pub struct RoomFacility {
	pub id:          i32,
	pub room_id:     i32,
	pub facility_id: i32,
	pub quantity:    i32,
	pub notes:       Option<String>,
	pub created_at:  NaiveDateTime,
	pub updated_at:  NaiveDateTime,
}

impl RoomFacility {
	/// Get every facility attached to a room, together with its catalog entry
	#[instrument(skip(conn))]
	pub async fn for_room(
		r_id: i32,
		conn: &DbConn,
	) -> Result<Vec<(Self, Facility)>, Error> {
		let facilities = conn
			.interact(move |conn| {
				room_facility::table
					.inner_join(room_facilities::table)
					.filter(room_facility::room_id.eq(r_id))
					.order(room_facilities::name)
					.select((Self::as_select(), Facility::as_select()))
					.load(conn)
			})
			.await??;

		Ok(facilities)
	}

	/// Detach a facility from a room
	#[instrument(skip(conn))]
	pub async fn delete(
		r_id: i32,
		f_id: i32,
		conn: &DbConn,
	) -> Result<(), Error> {
		let count = conn
			.interact(move |conn| {
				use self::room_facility::dsl::*;

				diesel::delete(
					room_facility
						.filter(room_id.eq(r_id))
						.filter(facility_id.eq(f_id)),
				)
				.execute(conn)
			})
			.await??;

		if count == 0 {
			return Err(Error::NotFound(format!(
				"facility {f_id} is not attached to room {r_id}"
			)));
		}

		info!("detached facility {f_id} from room {r_id}");

		Ok(())
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = room_facility)]
#[diesel(check_for_backend(Pg))]
pub struct NewRoomFacility {
	pub room_id:     i32,
	pub facility_id: i32,
	pub quantity:    i32,
	pub notes:       Option<String>,
}

impl NewRoomFacility {
	/// Attach a facility to a room
	///
	/// A facility can only be attached to the same room once, attaching it
	/// again is a [`Error::Duplicate`]
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<RoomFacility, Error> {
		let attached = conn
			.interact(|conn| {
				diesel::insert_into(room_facility::table)
					.values(self)
					.returning(RoomFacility::as_returning())
					.get_result(conn)
			})
			.await??;

		info!(
			"attached facility {} to room {} (x{})",
			attached.facility_id, attached.room_id, attached.quantity
		);

		Ok(attached)
	}
}

#[derive(AsChangeset, Clone, Debug, Default, Deserialize, Serialize)]
#[diesel(table_name = room_facility)]
pub struct UpdateRoomFacility {
	pub quantity: Option<i32>,
	pub notes:    Option<String>,
}

impl UpdateRoomFacility {
	/// Update the quantity or notes of a facility attached to a room
	#[instrument(skip(conn))]
	pub async fn apply_to(
		self,
		r_id: i32,
		f_id: i32,
		conn: &DbConn,
	) -> Result<RoomFacility, Error> {
		let now = Utc::now().naive_utc();

		let updated = conn
			.interact(move |conn| {
				use self::room_facility::dsl::*;

				diesel::update(
					room_facility
						.filter(room_id.eq(r_id))
						.filter(facility_id.eq(f_id)),
				)
				.set((self, updated_at.eq(now)))
				.returning(RoomFacility::as_returning())
				.get_result(conn)
			})
			.await??;

		Ok(updated)
	}
}
