use axum::http::StatusCode;
use axum_extra::extract::cookie::Key;
use axum_test::TestServer;
use common::{DbConn, DbPool};
use models::{
	NewBuilding,
	NewDocumentType,
	NewFacility,
	NewFaculty,
	NewRoom,
	NewRoomCategory,
};
use roombook::schemas::auth::LoginRequest;
use roombook::{AppState, Config, SeedUser, Seeder, routes};

mod mock_db;

use mock_db::{DATABASE_PROVIDER, DatabaseGuard};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "adminpassword";
pub const ALICE_EMAIL: &str = "alice@example.com";
pub const ALICE_PASSWORD: &str = "alicepassword";
pub const BOB_EMAIL: &str = "bob@example.com";
pub const BOB_PASSWORD: &str = "bobpassword";

#[allow(dead_code)]
pub struct TestEnv {
	pub app:      TestServer,
	pub pool:     DbPool,
	pub db_guard: DatabaseGuard,
}

/// Seed a test database with every file under `seed/`
async fn seed(conn: &DbConn) {
	let seeder = Seeder::new(conn);

	seeder
		.populate("seed/faculties.json", async |conn, faculties| {
			for faculty in faculties {
				NewFaculty::insert(faculty, conn).await?;
			}

			Ok(())
		})
		.await
		.populate("seed/users.json", async |conn, users| {
			for user in users {
				SeedUser::insert(user, conn).await?;
			}

			Ok(())
		})
		.await
		.populate("seed/buildings.json", async |conn, buildings| {
			for building in buildings {
				NewBuilding::insert(building, conn).await?;
			}

			Ok(())
		})
		.await
		.populate("seed/room_categories.json", async |conn, categories| {
			for category in categories {
				NewRoomCategory::insert(category, conn).await?;
			}

			Ok(())
		})
		.await
		.populate("seed/facilities.json", async |conn, facilities| {
			for facility in facilities {
				NewFacility::insert(facility, conn).await?;
			}

			Ok(())
		})
		.await
		.populate("seed/rooms.json", async |conn, rooms| {
			for room in rooms {
				NewRoom::insert(room, conn).await?;
			}

			Ok(())
		})
		.await
		.populate("seed/document_types.json", async |conn, types| {
			for doc_type in types {
				NewDocumentType::insert(doc_type, conn).await?;
			}

			Ok(())
		})
		.await;
}

impl TestEnv {
	/// Get a test environment with a seeded temporary database
	///
	/// # Panics
	/// Panics if building a test server fails
	pub async fn new() -> Self {
		let config = Config::from_env();

		let test_pool_guard = (*DATABASE_PROVIDER).acquire().await;
		let test_pool = test_pool_guard.create_pool();

		{
			let conn = test_pool.get().await.unwrap();

			seed(&conn).await;
		}

		let cookie_jar_key = Key::from(&[0u8; 64]);

		let state = AppState {
			config,
			database_pool: test_pool.clone(),
			cookie_jar_key,
		};
		let app = routes::get_app_router(state);

		let test_server =
			TestServer::builder().save_cookies().build(app).unwrap();

		TestEnv { app: test_server, pool: test_pool, db_guard: test_pool_guard }
	}

	/// Log in, the session cookie is kept for the following requests
	pub async fn login(&self, email: &str, password: &str) {
		let response = self
			.app
			.post("/auth/login")
			.json(&LoginRequest {
				email:    email.to_string(),
				password: password.to_string(),
			})
			.await;

		assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
	}

	pub async fn login_admin(&self) {
		self.login(ADMIN_EMAIL, ADMIN_PASSWORD).await;
	}

	pub async fn login_alice(&self) {
		self.login(ALICE_EMAIL, ALICE_PASSWORD).await;
	}

	pub async fn login_bob(&self) { self.login(BOB_EMAIL, BOB_PASSWORD).await; }

	pub async fn logout(&self) {
		let response = self.app.post("/auth/logout").await;

		assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
	}
}
