use std::path::PathBuf;

use common::{DbConn, Error};
use models::{NewUser, NewUserFaculty, User};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Fills a database with records read from JSON seed files
pub struct Seeder<'c> {
	connection: &'c DbConn,
}

impl<'c> Seeder<'c> {
	#[must_use]
	pub fn new(connection: &'c DbConn) -> Self { Self { connection } }

	/// Read a file into a series of deserializable items
	///
	/// # Panics
	/// Panics if reading or deserializing the file fails
	fn read_file_records<T, I>(filename: &str) -> I
	where
		T: DeserializeOwned,
		I: IntoIterator<Item = T> + DeserializeOwned,
	{
		let path = std::env::var("CARGO_MANIFEST_DIR")
			.map(PathBuf::from)
			.unwrap_or_default()
			.join(filename);

		let s = std::fs::read_to_string(path)
			.unwrap_or_else(|e| panic!("COULD NOT READ SEED FILE {filename}: {e}"));

		serde_json::from_str(&s)
			.unwrap_or_else(|e| panic!("COULD NOT MAP SEED FILE {filename}: {e}"))
	}

	/// Load a file and populate the database with it
	///
	/// # Panics
	/// Panics if reading the file or interacting with the database fails
	pub async fn populate<T, F>(&self, filename: &str, loader: F) -> &Self
	where
		T: DeserializeOwned + std::fmt::Debug,
		F: AsyncFnOnce(&DbConn, Vec<T>) -> Result<(), Error>,
	{
		let records = Self::read_file_records(filename);

		if let Err(e) = loader(self.connection, records).await {
			panic!("COULD NOT LOAD RECORDS FOR {filename}: {e:?}");
		}

		info!("seeded database from {filename}");

		self
	}
}

/// A user as written in a seed file, with a plaintext password
#[derive(Clone, Debug, Deserialize)]
pub struct SeedUser {
	pub name:      String,
	pub email:     String,
	pub password:  String,
	#[serde(default)]
	pub is_admin:  bool,
	#[serde(default)]
	pub faculties: Vec<i32>,
}

impl SeedUser {
	/// Insert this [`SeedUser`] and its faculty memberships
	///
	/// # Errors
	/// Errors if hashing the password or inserting fails
	pub async fn insert(self, conn: &DbConn) -> Result<User, Error> {
		let password_hash = User::hash_password(&self.password)?;

		let user = NewUser {
			name: self.name,
			email: self.email,
			password_hash,
			is_admin: self.is_admin,
		}
		.insert(conn)
		.await?;

		for faculty_id in self.faculties {
			NewUserFaculty { user_id: user.id, faculty_id }.insert(conn).await?;
		}

		Ok(user)
	}
}
