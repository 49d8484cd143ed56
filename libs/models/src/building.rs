use chrono::{NaiveDateTime, Utc};
use common::{DbConn, Error};
use db::buildings;
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = buildings)]
#[diesel(check_for_backend(Pg))]
pub struct Building {
	pub id:         i32,
	pub code:       String,
	pub name:       String,
	pub address:    Option<String>,
	pub created_at: NaiveDateTime,
	pub updated_at: NaiveDateTime,
}

impl Building {
	/// Get a [`Building`] given its id
	#[instrument(skip(conn))]
	pub async fn get(b_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let building = conn
			.interact(move |conn| {
				use self::buildings::dsl::*;

				buildings.find(b_id).select(Self::as_select()).get_result(conn)
			})
			.await??;

		Ok(building)
	}

	/// Get all [`Building`]s ordered by code
	#[instrument(skip(conn))]
	pub async fn get_all(conn: &DbConn) -> Result<Vec<Self>, Error> {
		let buildings = conn
			.interact(|conn| {
				use self::buildings::dsl::*;

				buildings.order(code).select(Self::as_select()).load(conn)
			})
			.await??;

		Ok(buildings)
	}

	/// Get all the buildings with an id in `ids`
	#[instrument(skip(conn))]
	pub async fn get_many(
		ids: Vec<i32>,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let buildings = conn
			.interact(move |conn| {
				use self::buildings::dsl::*;

				buildings
					.filter(id.eq_any(ids))
					.select(Self::as_select())
					.load(conn)
			})
			.await??;

		Ok(buildings)
	}

	/// Delete a [`Building`] given its id
	///
	/// All rooms in the building are deleted with it
	#[instrument(skip(conn))]
	pub async fn delete_by_id(b_id: i32, conn: &DbConn) -> Result<(), Error> {
		let count = conn
			.interact(move |conn| {
				use self::buildings::dsl::*;

				diesel::delete(buildings.find(b_id)).execute(conn)
			})
			.await??;

		if count == 0 {
			return Err(Error::NotFound(format!("building with id {b_id}")));
		}

		info!("deleted building with id {b_id}");

		Ok(())
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = buildings)]
#[diesel(check_for_backend(Pg))]
pub struct NewBuilding {
	pub code:    String,
	pub name:    String,
	pub address: Option<String>,
}

impl NewBuilding {
	/// Insert this [`NewBuilding`]
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<Building, Error> {
		let building = conn
			.interact(|conn| {
				use self::buildings::dsl::*;

				diesel::insert_into(buildings)
					.values(self)
					.returning(Building::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("created building {building:?}");

		Ok(building)
	}
}

#[derive(AsChangeset, Clone, Debug, Default, Deserialize, Serialize)]
#[diesel(table_name = buildings)]
pub struct UpdateBuilding {
	pub code:    Option<String>,
	pub name:    Option<String>,
	pub address: Option<String>,
}

impl UpdateBuilding {
	/// Update a [`Building`] with the given changes
	#[instrument(skip(conn))]
	pub async fn apply_to(
		self,
		target_id: i32,
		conn: &DbConn,
	) -> Result<Building, Error> {
		let now = Utc::now().naive_utc();

		let building = conn
			.interact(move |conn| {
				use self::buildings::dsl::*;

				diesel::update(buildings.find(target_id))
					.set((self, updated_at.eq(now)))
					.returning(Building::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("updated building {}", building.id);

		Ok(building)
	}
}
