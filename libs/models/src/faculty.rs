use chrono::{NaiveDateTime, Utc};
use common::{DbConn, Error};
use db::{faculties, user_faculty, users};
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::User;

#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = faculties)]
#[diesel(check_for_backend(Pg))]
pub struct Faculty {
	pub id:         i32,
	pub code:       String,
	pub name:       String,
	pub created_at: NaiveDateTime,
	pub updated_at: NaiveDateTime,
}

impl Faculty {
	/// Get a [`Faculty`] given its id
	#[instrument(skip(conn))]
	pub async fn get(f_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let faculty = conn
			.interact(move |conn| {
				use self::faculties::dsl::*;

				faculties.find(f_id).select(Self::as_select()).get_result(conn)
			})
			.await??;

		Ok(faculty)
	}

	/// Get all [`Faculty`]s ordered by name
	#[instrument(skip(conn))]
	pub async fn get_all(conn: &DbConn) -> Result<Vec<Self>, Error> {
		let faculties = conn
			.interact(|conn| {
				use self::faculties::dsl::*;

				faculties.order(name).select(Self::as_select()).load(conn)
			})
			.await??;

		Ok(faculties)
	}

	/// Get all the faculties a user is a member of
	#[instrument(skip(conn))]
	pub async fn for_user(u_id: i32, conn: &DbConn) -> Result<Vec<Self>, Error> {
		let faculties = conn
			.interact(move |conn| {
				user_faculty::table
					.inner_join(faculties::table)
					.filter(user_faculty::user_id.eq(u_id))
					.order(faculties::name)
					.select(Self::as_select())
					.load(conn)
			})
			.await??;

		Ok(faculties)
	}

	/// Get all the members of this faculty
	#[instrument(skip(conn))]
	pub async fn members(f_id: i32, conn: &DbConn) -> Result<Vec<User>, Error> {
		let members = conn
			.interact(move |conn| {
				user_faculty::table
					.inner_join(users::table)
					.filter(user_faculty::faculty_id.eq(f_id))
					.order(users::name)
					.select(User::as_select())
					.load(conn)
			})
			.await??;

		Ok(members)
	}

	/// Delete a [`Faculty`] given its id
	#[instrument(skip(conn))]
	pub async fn delete_by_id(f_id: i32, conn: &DbConn) -> Result<(), Error> {
		let count = conn
			.interact(move |conn| {
				use self::faculties::dsl::*;

				diesel::delete(faculties.find(f_id)).execute(conn)
			})
			.await??;

		if count == 0 {
			return Err(Error::NotFound(format!("faculty with id {f_id}")));
		}

		info!("deleted faculty with id {f_id}");

		Ok(())
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = faculties)]
#[diesel(check_for_backend(Pg))]
pub struct NewFaculty {
	pub code: String,
	pub name: String,
}

impl NewFaculty {
	/// Insert this [`NewFaculty`]
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<Faculty, Error> {
		let faculty = conn
			.interact(|conn| {
				use self::faculties::dsl::*;

				diesel::insert_into(faculties)
					.values(self)
					.returning(Faculty::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("created faculty {faculty:?}");

		Ok(faculty)
	}
}

#[derive(AsChangeset, Clone, Debug, Default, Deserialize, Serialize)]
#[diesel(table_name = faculties)]
pub struct UpdateFaculty {
	pub code: Option<String>,
	pub name: Option<String>,
}

impl UpdateFaculty {
	/// Update a [`Faculty`] with the given changes
	#[instrument(skip(conn))]
	pub async fn apply_to(
		self,
		target_id: i32,
		conn: &DbConn,
	) -> Result<Faculty, Error> {
		let now = Utc::now().naive_utc();

		let faculty = conn
			.interact(move |conn| {
				use self::faculties::dsl::*;

				diesel::update(faculties.find(target_id))
					.set((self, updated_at.eq(now)))
					.returning(Faculty::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("updated faculty {}", faculty.id);

		Ok(faculty)
	}
}

/// Membership of a [`User`] in a [`Faculty`]
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = user_faculty)]
#[diesel(check_for_backend(Pg))]
pub struct UserFaculty {
	pub id:         i32,
	pub user_id:    i32,
	pub faculty_id: i32,
	pub created_at: NaiveDateTime,
}

#[derive(Clone, Copy, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = user_faculty)]
#[diesel(check_for_backend(Pg))]
pub struct NewUserFaculty {
	pub user_id:    i32,
	pub faculty_id: i32,
}

impl NewUserFaculty {
	/// Add a user to a faculty
	///
	/// A pair can only exist once, adding it again is a
	/// [`Error::Duplicate`]
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<UserFaculty, Error> {
		let membership = conn
			.interact(move |conn| {
				diesel::insert_into(user_faculty::table)
					.values(self)
					.returning(UserFaculty::as_returning())
					.get_result(conn)
			})
			.await??;

		info!(
			"added user {} to faculty {}",
			membership.user_id, membership.faculty_id
		);

		Ok(membership)
	}
}

impl UserFaculty {
	/// Remove a user from a faculty
	#[instrument(skip(conn))]
	pub async fn delete(
		u_id: i32,
		f_id: i32,
		conn: &DbConn,
	) -> Result<(), Error> {
		let count = conn
			.interact(move |conn| {
				use self::user_faculty::dsl::*;

				diesel::delete(
					user_faculty
						.filter(user_id.eq(u_id))
						.filter(faculty_id.eq(f_id)),
				)
				.execute(conn)
			})
			.await??;

		if count == 0 {
			return Err(Error::NotFound(format!(
				"user {u_id} is not a member of faculty {f_id}"
			)));
		}

		info!("removed user {u_id} from faculty {f_id}");

		Ok(())
	}
}
