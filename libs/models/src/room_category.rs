use chrono::{NaiveDateTime, Utc};
use common::{DbConn, Error};
use db::room_categories;
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = room_categories)]
#[diesel(check_for_backend(Pg))]
pub struct RoomCategory {
	pub id:          i32,
	pub name:        String,
	pub description: Option<String>,
	pub created_at:  NaiveDateTime,
	pub updated_at:  NaiveDateTime,
}

impl RoomCategory {
	/// Get a [`RoomCategory`] given its id
	#[instrument(skip(conn))]
	pub async fn get(c_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let category = conn
			.interact(move |conn| {
				use self::room_categories::dsl::*;

				room_categories
					.find(c_id)
					.select(Self::as_select())
					.get_result(conn)
			})
			.await??;

		Ok(category)
	}

	/// Get all [`RoomCategory`]s ordered by name
	#[instrument(skip(conn))]
	pub async fn get_all(conn: &DbConn) -> Result<Vec<Self>, Error> {
		let categories = conn
			.interact(|conn| {
				use self::room_categories::dsl::*;

				room_categories
					.order(name)
					.select(Self::as_select())
					.load(conn)
			})
			.await??;

		Ok(categories)
	}

	/// Get all the categories with an id in `ids`
	#[instrument(skip(conn))]
	pub async fn get_many(
		ids: Vec<i32>,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let categories = conn
			.interact(move |conn| {
				use self::room_categories::dsl::*;

				room_categories
					.filter(id.eq_any(ids))
					.select(Self::as_select())
					.load(conn)
			})
			.await??;

		Ok(categories)
	}

	/// Delete a [`RoomCategory`] given its id
	///
	/// All rooms in the category are deleted with it
	#[instrument(skip(conn))]
	pub async fn delete_by_id(c_id: i32, conn: &DbConn) -> Result<(), Error> {
		let count = conn
			.interact(move |conn| {
				use self::room_categories::dsl::*;

				diesel::delete(room_categories.find(c_id)).execute(conn)
			})
			.await??;

		if count == 0 {
			return Err(Error::NotFound(format!("room category with id {c_id}")));
		}

		info!("deleted room category with id {c_id}");

		Ok(())
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = room_categories)]
#[diesel(check_for_backend(Pg))]
pub struct NewRoomCategory {
	pub name:        String,
	pub description: Option<String>,
}

impl NewRoomCategory {
	/// Insert this [`NewRoomCategory`]
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<RoomCategory, Error> {
		let category = conn
			.interact(|conn| {
				use self::room_categories::dsl::*;

				diesel::insert_into(room_categories)
					.values(self)
					.returning(RoomCategory::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("created room category {category:?}");

		Ok(category)
	}
}

#[derive(AsChangeset, Clone, Debug, Default, Deserialize, Serialize)]
#[diesel(table_name = room_categories)]
pub struct UpdateRoomCategory {
	pub name:        Option<String>,
	pub description: Option<String>,
}

impl UpdateRoomCategory {
	/// Update a [`RoomCategory`] with the given changes
	#[instrument(skip(conn))]
	pub async fn apply_to(
		self,
		target_id: i32,
		conn: &DbConn,
	) -> Result<RoomCategory, Error> {
		let now = Utc::now().naive_utc();

		let category = conn
			.interact(move |conn| {
				use self::room_categories::dsl::*;

				diesel::update(room_categories.find(target_id))
					.set((self, updated_at.eq(now)))
					.returning(RoomCategory::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("updated room category {}", category.id);

		Ok(category)
	}
}
