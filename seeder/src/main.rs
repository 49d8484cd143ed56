mod util;

use std::env;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use clap::{Error, Parser};
use clap::error::ErrorKind;
use common::DbConn;
use db::{BookingStatus, bookings};
use deadpool_diesel::postgres::{Manager, Pool};
use diesel::prelude::*;
use fake::Fake;
use fake::faker::address::raw::{CityName, StreetName};
use fake::faker::internet::raw::FreeEmail;
use fake::faker::lorem::raw::Sentence;
use fake::faker::name::raw::Name;
use fake::locales::EN;
use models::{NewBooking, NewBuilding, NewRoom, NewRoomCategory, NewUser, User};
use rand::seq::IndexedRandom;
use rand::{Rng, rng};

use crate::util::{batch_insert, generate_unique_set, load_ids};

/// Password shared by every seeded account
const SEED_PASSWORD: &str = "roombook";

const CATEGORIES: [&str; 5] = [
	"Lecture hall",
	"Classroom",
	"Computer lab",
	"Meeting room",
	"Study room",
];

const DURATIONS: [i32; 5] = [30, 60, 90, 120, 180];

#[derive(Parser, Debug)]
struct Opt {
	#[arg(long, short = 'u', default_value_t = 1_000)]
	users:     usize,
	#[arg(long, short = 'b', default_value_t = 10)]
	buildings: usize,
	#[arg(long, short = 'r', default_value_t = 200)]
	rooms:     usize,
	#[arg(long, short = 'k', default_value_t = 10_000)]
	bookings:  usize,
}

#[derive(Insertable)]
#[diesel(table_name = bookings)]
struct SeedBooking {
	user_id:          i32,
	room_id:          i32,
	booking_code:     String,
	date:             NaiveDate,
	start_time:       NaiveTime,
	duration:         i32,
	purpose:          String,
	status:           BookingStatus,
	is_approved:      bool,
	approved_by:      Option<i32>,
	approved_at:      Option<NaiveDateTime>,
	rejection_reason: Option<String>,
	cancelled_at:     Option<NaiveDateTime>,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
	let cli = Opt::parse();
	let conn = get_conn().await?;

	if cli.users > 0 {
		println!("Seeding {} users…", cli.users);
		let inserted = seed_users(&conn, cli.users).await?;
		println!("Inserted {inserted} users");
	}

	if cli.rooms > 0 {
		println!("Seeding {} buildings and {} rooms…", cli.buildings, cli.rooms);
		let inserted = seed_rooms(&conn, cli.buildings.max(1), cli.rooms).await?;
		println!("Inserted {inserted} rooms");
	}

	if cli.bookings > 0 {
		println!("Seeding {} bookings…", cli.bookings);
		let inserted = seed_bookings(&conn, cli.bookings).await?;
		println!("Inserted {inserted} bookings");
	}

	Ok(())
}

/// Get a database connection from the pool
async fn get_conn() -> Result<DbConn, Error> {
	let database_url = env::var("DATABASE_URL")
		.map_err(|_| Error::raw(ErrorKind::Io, "DATABASE_URL missing"))?;

	let manager = Manager::new(database_url, deadpool_diesel::Runtime::Tokio1);
	let pool = Pool::builder(manager)
		.build()
		.map_err(|e| Error::raw(ErrorKind::Io, e))?;

	pool.get().await.map_err(|e| Error::raw(ErrorKind::Io, e))
}

/// Seed one admin and `count` regular users, all sharing [`SEED_PASSWORD`]
async fn seed_users(conn: &DbConn, count: usize) -> Result<usize, Error> {
	let password_hash = User::hash_password(SEED_PASSWORD)
		.map_err(|e| Error::raw(ErrorKind::Io, e))?;

	let emails = generate_unique_set(count, || FreeEmail(EN).fake::<String>());

	let admin = NewUser {
		name:          "Seeded administrator".to_string(),
		email:         "admin@roombook.test".to_string(),
		password_hash: password_hash.clone(),
		is_admin:      true,
	};

	let users: Vec<NewUser> = std::iter::once(admin)
		.chain(emails.into_iter().map(|email| {
			NewUser {
				name: Name(EN).fake(),
				email,
				password_hash: password_hash.clone(),
				is_admin: false,
			}
		}))
		.collect();

	batch_insert(conn, users, 8192, |conn, chunk| {
		use db::users::dsl::*;
		diesel::insert_into(users).values(chunk).execute(conn)
	})
	.await
}

/// Seed the room categories, `building_count` buildings and `count` rooms
/// spread over them
async fn seed_rooms(
	conn: &DbConn,
	building_count: usize,
	count: usize,
) -> Result<usize, Error> {
	let categories: Vec<NewRoomCategory> = CATEGORIES
		.iter()
		.map(|name| {
			NewRoomCategory { name: (*name).to_string(), description: None }
		})
		.collect();

	batch_insert(conn, categories, 64, |conn, chunk| {
		use db::room_categories::dsl::*;
		diesel::insert_into(room_categories)
			.values(chunk)
			.on_conflict(name)
			.do_nothing()
			.execute(conn)
	})
	.await?;

	let buildings: Vec<NewBuilding> = (0..building_count)
		.map(|i| {
			NewBuilding {
				code:    format!("S{i:03}"),
				name:    format!("{} building", CityName(EN).fake::<String>()),
				address: Some(StreetName(EN).fake()),
			}
		})
		.collect();

	batch_insert(conn, buildings, 1024, |conn, chunk| {
		use db::buildings::dsl::*;
		diesel::insert_into(buildings).values(chunk).execute(conn)
	})
	.await?;

	let building_ids = load_ids(conn, |c| {
		use db::buildings::dsl::*;
		buildings.select(id).load::<i32>(c)
	})
	.await?;
	let category_ids = load_ids(conn, |c| {
		use db::room_categories::dsl::*;
		room_categories.select(id).load::<i32>(c)
	})
	.await?;

	let mut rng = rng();

	let rooms: Vec<NewRoom> = (0..count)
		.map(|i| {
			let building_id = building_ids[i % building_ids.len()];
			let category_id = *category_ids.choose(&mut rng).unwrap_or(&1);

			NewRoom {
				building_id,
				category_id,
				code: format!("R{building_id}-{i:04}"),
				name: format!("Room {i}"),
				capacity: rng.random_range(4..=300),
				description: rng
					.random_bool(0.3)
					.then(|| Sentence(EN, 3..8).fake()),
			}
		})
		.collect();

	batch_insert(conn, rooms, 2 << 10, |conn, chunk| {
		use db::rooms::dsl::*;
		diesel::insert_into(rooms).values(chunk).execute(conn)
	})
	.await
}

/// Seed bookings around today in every status
async fn seed_bookings(conn: &DbConn, count: usize) -> Result<usize, Error> {
	let user_ids = load_ids(conn, |c| {
		use db::users::dsl::*;
		users.filter(is_admin.eq(false)).select(id).load::<i32>(c)
	})
	.await?;
	let admin_ids = load_ids(conn, |c| {
		use db::users::dsl::*;
		users.filter(is_admin.eq(true)).select(id).load::<i32>(c)
	})
	.await?;
	let room_ids = load_ids(conn, |c| {
		use db::rooms::dsl::*;
		rooms.filter(deleted_at.is_null()).select(id).load::<i32>(c)
	})
	.await?;

	if user_ids.is_empty() || admin_ids.is_empty() || room_ids.is_empty() {
		return Err(Error::raw(
			ErrorKind::Io,
			"bookings need at least one user, one admin and one room",
		));
	}

	let today = Utc::now().date_naive();
	let now = Utc::now().naive_utc();
	let mut rng = rng();

	let entries: Vec<SeedBooking> = (0..count)
		.map(|_| {
			let date = today + TimeDelta::days(rng.random_range(-60..=60));
			let start_time =
				NaiveTime::from_hms_opt(rng.random_range(8..=18), 0, 0)
					.unwrap_or(NaiveTime::MIN);
			let reviewer = admin_ids.choose(&mut rng).copied();

			let status = match rng.random_range(0..10) {
				0..=3 => BookingStatus::Approved,
				4..=5 => BookingStatus::Rejected,
				6 => BookingStatus::Cancelled,
				_ => BookingStatus::Pending,
			};

			SeedBooking {
				user_id: *user_ids.choose(&mut rng).unwrap_or(&user_ids[0]),
				room_id: *room_ids.choose(&mut rng).unwrap_or(&room_ids[0]),
				booking_code: NewBooking::generate_code(date),
				date,
				start_time,
				duration: *DURATIONS.choose(&mut rng).unwrap_or(&60),
				purpose: Sentence(EN, 2..6).fake(),
				status,
				is_approved: status == BookingStatus::Approved,
				approved_by: matches!(
					status,
					BookingStatus::Approved | BookingStatus::Rejected
				)
				.then_some(reviewer)
				.flatten(),
				approved_at: (status == BookingStatus::Approved).then_some(now),
				rejection_reason: (status == BookingStatus::Rejected)
					.then(|| Sentence(EN, 3..8).fake()),
				cancelled_at: (status == BookingStatus::Cancelled)
					.then_some(now),
			}
		})
		.collect();

	batch_insert(conn, entries, 2 << 10, |conn, chunk| {
		use db::bookings::dsl::*;
		diesel::insert_into(bookings).values(chunk).execute(conn)
	})
	.await
}
