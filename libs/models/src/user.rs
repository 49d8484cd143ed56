use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{NaiveDateTime, Utc};
use common::{DbConn, Error, LoginError};
use db::{user_faculty, users};
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{PaginatedData, PaginationConfig};

/// A single user account
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(Pg))]
pub struct User {
	pub id:              i32,
	pub name:            String,
	pub email:           String,
	#[serde(skip)]
	pub password_hash:   String,
	pub is_admin:        bool,
	pub created_at:      NaiveDateTime,
	pub updated_at:      NaiveDateTime,
	/// Bumped on logout, access tokens carrying an older version are refused
	#[serde(skip)]
	pub session_version: i32,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFilter {
	pub faculty_id: Option<i32>,
}

impl User {
	/// Hash a plaintext password
	///
	/// # Errors
	/// Errors if hashing fails
	pub fn hash_password(password: &str) -> Result<String, Error> {
		let salt = SaltString::generate(&mut OsRng);
		let hash = Argon2::default()
			.hash_password(password.as_bytes(), &salt)?
			.to_string();

		Ok(hash)
	}

	/// Check a plaintext password against the hash of this [`User`]
	///
	/// # Errors
	/// Errors with [`LoginError::InvalidPassword`] if the password is wrong
	pub fn verify_password(&self, password: &str) -> Result<(), Error> {
		let hash = PasswordHash::new(&self.password_hash)?;

		Argon2::default().verify_password(password.as_bytes(), &hash)?;

		Ok(())
	}

	/// Get a [`User`] given its id
	#[instrument(skip(conn))]
	pub async fn get(u_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let user = conn
			.interact(move |conn| {
				use self::users::dsl::*;

				users.find(u_id).select(Self::as_select()).get_result(conn)
			})
			.await??;

		Ok(user)
	}

	/// Get a [`User`] given its id, `None` if it doesn't exist
	#[instrument(skip(conn))]
	pub async fn find(u_id: i32, conn: &DbConn) -> Result<Option<Self>, Error> {
		let user = conn
			.interact(move |conn| {
				use self::users::dsl::*;

				users
					.find(u_id)
					.select(Self::as_select())
					.get_result(conn)
					.optional()
			})
			.await??;

		Ok(user)
	}

	/// Get a [`User`] given its email
	#[instrument(skip(conn))]
	pub async fn get_by_email(
		query_email: String,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let lookup = query_email.clone();

		let user = conn
			.interact(move |conn| {
				use self::users::dsl::*;

				users
					.filter(email.eq(lookup))
					.select(Self::as_select())
					.get_result(conn)
					.optional()
			})
			.await??
			.ok_or(LoginError::UnknownEmail(query_email))?;

		Ok(user)
	}

	/// Get a page of [`User`]s, optionally limited to a faculty
	#[instrument(skip(conn))]
	pub async fn get_all(
		filter: UserFilter,
		p_cfg: PaginationConfig,
		conn: &DbConn,
	) -> Result<PaginatedData<Vec<Self>>, Error> {
		let (total, users) = conn
			.interact(move |conn| {
				let filtered = || {
					let mut query = users::table.into_boxed::<Pg>();

					if let Some(f_id) = filter.faculty_id {
						query = query.filter(
							users::id.eq_any(
								user_faculty::table
									.filter(user_faculty::faculty_id.eq(f_id))
									.select(user_faculty::user_id),
							),
						);
					}

					query
				};

				let total = filtered().count().get_result::<i64>(conn)?;

				let users = filtered()
					.order(users::id)
					.limit(p_cfg.limit)
					.offset(p_cfg.offset)
					.select(Self::as_select())
					.load(conn)?;

				Ok::<_, diesel::result::Error>((total, users))
			})
			.await??;

		p_cfg.check(total)?;

		Ok((total, users))
	}

	/// Count all registered users
	#[instrument(skip(conn))]
	pub async fn count(conn: &DbConn) -> Result<i64, Error> {
		let count = conn
			.interact(|conn| users::table.count().get_result(conn))
			.await??;

		Ok(count)
	}

	/// Get all the users with an id in `ids`
	#[instrument(skip(conn))]
	pub async fn get_many(
		ids: Vec<i32>,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let users = conn
			.interact(move |conn| {
				use self::users::dsl::*;

				users
					.filter(id.eq_any(ids))
					.select(Self::as_select())
					.load(conn)
			})
			.await??;

		Ok(users)
	}

	/// Invalidate every access token issued to a [`User`] so far
	#[instrument(skip(conn))]
	pub async fn bump_session_version(
		u_id: i32,
		conn: &DbConn,
	) -> Result<i32, Error> {
		let version = conn
			.interact(move |conn| {
				use self::users::dsl::*;

				diesel::update(users.find(u_id))
					.set(session_version.eq(session_version + 1))
					.returning(session_version)
					.get_result::<i32>(conn)
			})
			.await??;

		debug!("bumped session version of user {u_id} to {version}");

		Ok(version)
	}

	/// Delete a [`User`] given its id
	#[instrument(skip(conn))]
	pub async fn delete_by_id(u_id: i32, conn: &DbConn) -> Result<(), Error> {
		let count = conn
			.interact(move |conn| {
				use self::users::dsl::*;

				diesel::delete(users.find(u_id)).execute(conn)
			})
			.await??;

		if count == 0 {
			return Err(Error::NotFound(format!("user with id {u_id}")));
		}

		info!("deleted user with id {u_id}");

		Ok(())
	}
}

#[derive(Clone, Debug, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(Pg))]
pub struct NewUser {
	pub name:          String,
	pub email:         String,
	pub password_hash: String,
	pub is_admin:      bool,
}

impl NewUser {
	/// Insert this [`NewUser`]
	#[instrument(skip_all)]
	pub async fn insert(self, conn: &DbConn) -> Result<User, Error> {
		let user = conn
			.interact(|conn| {
				use self::users::dsl::*;

				diesel::insert_into(users)
					.values(self)
					.returning(User::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("registered user {} ({})", user.id, user.email);

		Ok(user)
	}
}

#[derive(AsChangeset, Clone, Debug, Default, Deserialize, Serialize)]
#[diesel(table_name = users)]
pub struct UpdateUser {
	pub name:     Option<String>,
	pub email:    Option<String>,
	pub is_admin: Option<bool>,
}

impl UpdateUser {
	/// Update a [`User`] with the given changes
	#[instrument(skip(conn))]
	pub async fn apply_to(
		self,
		target_id: i32,
		conn: &DbConn,
	) -> Result<User, Error> {
		let now = Utc::now().naive_utc();

		let user = conn
			.interact(move |conn| {
				use self::users::dsl::*;

				diesel::update(users.find(target_id))
					.set((self, updated_at.eq(now)))
					.returning(User::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("updated user {}", user.id);

		Ok(user)
	}
}
