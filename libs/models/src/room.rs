use std::collections::HashMap;

use chrono::{NaiveDateTime, Utc};
use common::{DbConn, Error};
use db::{RoomStatus, room_facilities, room_facility, rooms};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_types::Bool;
use serde::{Deserialize, Serialize};

use crate::{
	BoxedCondition,
	Building,
	Facility,
	PaginatedData,
	PaginationConfig,
	RoomCategory,
	RoomFacility,
	ToFilter,
	Trashed,
};

#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = rooms)]
#[diesel(check_for_backend(Pg))]
pub struct Room {
	pub id:          i32,
	pub building_id: i32,
	pub category_id: i32,
	pub code:        String,
	pub name:        String,
	pub capacity:    i32,
	pub description: Option<String>,
	pub status:      RoomStatus,
	pub created_at:  NaiveDateTime,
	pub updated_at:  NaiveDateTime,
	pub deleted_at:  Option<NaiveDateTime>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomFilter {
	pub building_id:  Option<i32>,
	pub category_id:  Option<i32>,
	pub status:       Option<RoomStatus>,
	pub min_capacity: Option<i32>,
	pub search:       Option<String>,
	#[serde(default)]
	pub trashed:      Trashed,
}

/// Escape the wildcards of a `LIKE` pattern so user input matches literally
fn escape_like(search: &str) -> String {
	let mut escaped = String::with_capacity(search.len());

	for c in search.chars() {
		if matches!(c, '%' | '_' | '\\') {
			escaped.push('\\');
		}

		escaped.push(c);
	}

	escaped
}

/// Build the soft delete condition for the `rooms` table
fn trashed_condition(trashed: Trashed) -> BoxedCondition<rooms::table> {
	match trashed {
		Trashed::Without => Box::new(rooms::deleted_at.is_null()),
		Trashed::With => Box::new(true.into_sql::<Bool>()),
		Trashed::Only => Box::new(rooms::deleted_at.is_not_null()),
	}
}

impl ToFilter<rooms::table> for RoomFilter {
	type SqlType = Bool;

	fn to_filter(&self) -> BoxedCondition<rooms::table, Self::SqlType> {
		let mut filter = trashed_condition(self.trashed);

		if let Some(b_id) = self.building_id {
			filter = Box::new(filter.and(rooms::building_id.eq(b_id)));
		}

		if let Some(c_id) = self.category_id {
			filter = Box::new(filter.and(rooms::category_id.eq(c_id)));
		}

		if let Some(status) = self.status {
			filter = Box::new(filter.and(rooms::status.eq(status)));
		}

		if let Some(min) = self.min_capacity {
			filter = Box::new(filter.and(rooms::capacity.ge(min)));
		}

		if let Some(search) = self.search.as_ref().map(|s| s.trim())
			&& !search.is_empty()
		{
			let pattern = format!("%{}%", escape_like(search));

			filter = Box::new(
				filter.and(
					rooms::code
						.ilike(pattern.clone())
						.escape('\\')
						.or(rooms::name.ilike(pattern).escape('\\')),
				),
			);
		}

		filter
	}
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
#[allow(clippy::struct_excessive_bools)]
#[serde(rename_all = "camelCase")]
pub struct RoomIncludes {
	#[serde(default)]
	pub building:   bool,
	#[serde(default)]
	pub category:   bool,
	#[serde(default)]
	pub facilities: bool,
}

/// A [`Room`] together with the relations requested through
/// [`RoomIncludes`]
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct FullRoom {
	pub room:       Room,
	pub building:   Option<Building>,
	pub category:   Option<RoomCategory>,
	pub facilities: Option<Vec<(RoomFacility, Facility)>>,
}

impl Room {
	/// Get a [`Room`] given its id
	#[instrument(skip(conn))]
	pub async fn get(
		r_id: i32,
		trashed: Trashed,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let room = conn
			.interact(move |conn| {
				rooms::table
					.find(r_id)
					.filter(trashed_condition(trashed))
					.select(Self::as_select())
					.get_result(conn)
			})
			.await??;

		Ok(room)
	}

	/// Get a [`Room`] and its requested relations given its id
	#[instrument(skip(conn))]
	pub async fn get_full(
		r_id: i32,
		trashed: Trashed,
		includes: RoomIncludes,
		conn: &DbConn,
	) -> Result<FullRoom, Error> {
		let room = Self::get(r_id, trashed, conn).await?;

		let mut full = Self::with_includes(vec![room], includes, conn).await?;

		full.pop().ok_or_else(|| {
			Error::Infallible("room vanished while loading includes".into())
		})
	}

	/// Get a page of [`Room`]s matching a filter
	#[instrument(skip(conn))]
	pub async fn get_all(
		filter: RoomFilter,
		includes: RoomIncludes,
		p_cfg: PaginationConfig,
		conn: &DbConn,
	) -> Result<PaginatedData<Vec<FullRoom>>, Error> {
		let (total, rooms) = conn
			.interact(move |conn| {
				let total = rooms::table
					.filter(filter.to_filter())
					.count()
					.get_result::<i64>(conn)?;

				let rooms = rooms::table
					.filter(filter.to_filter())
					.order(rooms::code)
					.limit(p_cfg.limit)
					.offset(p_cfg.offset)
					.select(Self::as_select())
					.load(conn)?;

				Ok::<_, diesel::result::Error>((total, rooms))
			})
			.await??;

		p_cfg.check(total)?;

		let rooms = Self::with_includes(rooms, includes, conn).await?;

		Ok((total, rooms))
	}

	/// Get all the rooms with an id in `ids`, deleted or not
	#[instrument(skip(conn))]
	pub async fn get_many(
		ids: Vec<i32>,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let rooms = conn
			.interact(move |conn| {
				use self::rooms::dsl::*;

				rooms
					.filter(id.eq_any(ids))
					.select(Self::as_select())
					.load(conn)
			})
			.await??;

		Ok(rooms)
	}

	/// Attach the requested relations to a list of rooms
	async fn with_includes(
		rooms: Vec<Self>,
		includes: RoomIncludes,
		conn: &DbConn,
	) -> Result<Vec<FullRoom>, Error> {
		let mut buildings = HashMap::new();
		let mut categories = HashMap::new();
		let mut facilities: HashMap<i32, Vec<(RoomFacility, Facility)>> =
			HashMap::new();

		if includes.building {
			let ids = rooms.iter().map(|r| r.building_id).collect();

			buildings = Building::get_many(ids, conn)
				.await?
				.into_iter()
				.map(|b| (b.id, b))
				.collect();
		}

		if includes.category {
			let ids = rooms.iter().map(|r| r.category_id).collect();

			categories = RoomCategory::get_many(ids, conn)
				.await?
				.into_iter()
				.map(|c| (c.id, c))
				.collect();
		}

		if includes.facilities {
			let ids: Vec<i32> = rooms.iter().map(|r| r.id).collect();

			let attached = conn
				.interact(move |conn| {
					room_facility::table
						.inner_join(room_facilities::table)
						.filter(room_facility::room_id.eq_any(ids))
						.order(room_facilities::name)
						.select((
							RoomFacility::as_select(),
							Facility::as_select(),
						))
						.load::<(RoomFacility, Facility)>(conn)
				})
				.await??;

			for (pivot, facility) in attached {
				facilities
					.entry(pivot.room_id)
					.or_default()
					.push((pivot, facility));
			}
		}

		let full = rooms
			.into_iter()
			.map(|room| {
				FullRoom {
					building:   buildings.get(&room.building_id).cloned(),
					category:   categories.get(&room.category_id).cloned(),
					facilities: if includes.facilities {
						Some(facilities.remove(&room.id).unwrap_or_default())
					} else {
						None
					},
					room,
				}
			})
			.collect();

		Ok(full)
	}

	/// Change the status of a [`Room`]
	#[instrument(skip(conn))]
	pub async fn set_status(
		r_id: i32,
		new_status: RoomStatus,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let now = Utc::now().naive_utc();

		let room = conn
			.interact(move |conn| {
				use self::rooms::dsl::*;

				diesel::update(rooms.find(r_id).filter(deleted_at.is_null()))
					.set((status.eq(new_status), updated_at.eq(now)))
					.returning(Self::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("set status of room {} to {}", room.id, new_status.as_str());

		Ok(room)
	}

	/// Count live rooms per status
	#[instrument(skip(conn))]
	pub async fn count_by_status(
		conn: &DbConn,
	) -> Result<Vec<(RoomStatus, i64)>, Error> {
		let counts = conn
			.interact(|conn| {
				use self::rooms::dsl::*;

				rooms
					.filter(deleted_at.is_null())
					.group_by(status)
					.select((status, diesel::dsl::count_star()))
					.load(conn)
			})
			.await??;

		Ok(counts)
	}

	/// Soft delete a [`Room`], it stays available for auditing
	#[instrument(skip(conn))]
	pub async fn soft_delete(r_id: i32, conn: &DbConn) -> Result<(), Error> {
		let now = Utc::now().naive_utc();

		let count = conn
			.interact(move |conn| {
				use self::rooms::dsl::*;

				diesel::update(rooms.find(r_id).filter(deleted_at.is_null()))
					.set((deleted_at.eq(Some(now)), updated_at.eq(now)))
					.execute(conn)
			})
			.await??;

		if count == 0 {
			return Err(Error::NotFound(format!("room with id {r_id}")));
		}

		info!("soft deleted room with id {r_id}");

		Ok(())
	}

	/// Restore a soft deleted [`Room`]
	#[instrument(skip(conn))]
	pub async fn restore(r_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let now = Utc::now().naive_utc();

		let room = conn
			.interact(move |conn| {
				use self::rooms::dsl::*;

				diesel::update(
					rooms.find(r_id).filter(deleted_at.is_not_null()),
				)
				.set((deleted_at.eq(None::<NaiveDateTime>), updated_at.eq(now)))
				.returning(Self::as_returning())
				.get_result(conn)
				.optional()
			})
			.await??
			.ok_or_else(|| {
				Error::NotFound(format!("deleted room with id {r_id}"))
			})?;

		info!("restored room with id {r_id}");

		Ok(room)
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = rooms)]
#[diesel(check_for_backend(Pg))]
pub struct NewRoom {
	pub building_id: i32,
	pub category_id: i32,
	pub code:        String,
	pub name:        String,
	pub capacity:    i32,
	pub description: Option<String>,
}

impl NewRoom {
	/// Insert this [`NewRoom`]
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<Room, Error> {
		let room = conn
			.interact(|conn| {
				diesel::insert_into(rooms::table)
					.values(self)
					.returning(Room::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("created room {room:?}");

		Ok(room)
	}
}

#[derive(AsChangeset, Clone, Debug, Default, Deserialize, Serialize)]
#[diesel(table_name = rooms)]
pub struct UpdateRoom {
	pub building_id: Option<i32>,
	pub category_id: Option<i32>,
	pub code:        Option<String>,
	pub name:        Option<String>,
	pub capacity:    Option<i32>,
	pub description: Option<String>,
}

impl UpdateRoom {
	/// Update a non deleted [`Room`] with the given changes
	#[instrument(skip(conn))]
	pub async fn apply_to(
		self,
		target_id: i32,
		conn: &DbConn,
	) -> Result<Room, Error> {
		let now = Utc::now().naive_utc();

		let room = conn
			.interact(move |conn| {
				use self::rooms::dsl::*;

				diesel::update(
					rooms.find(target_id).filter(deleted_at.is_null()),
				)
				.set((self, updated_at.eq(now)))
				.returning(Room::as_returning())
				.get_result(conn)
			})
			.await??;

		info!("updated room {}", room.id);

		Ok(room)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn like_wildcards_are_escaped() {
		assert_eq!(escape_like("A-101"), "A-101");
		assert_eq!(escape_like("_"), "\\_");
		assert_eq!(escape_like("50%"), "50\\%");
		assert_eq!(escape_like("a\\b"), "a\\\\b");
	}
}
