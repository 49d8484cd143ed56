use axum::http::StatusCode;
use chrono::{NaiveTime, TimeDelta, Utc};
use models::{BookingStatus, DashboardStats};
use roombook::schemas::booking::{BookingResponse, CreateBookingRequest};
use roombook::schemas::calendar::CalendarResponse;
use roombook::schemas::maintenance::ScheduleMaintenanceRequest;

mod common;

use common::TestEnv;

async fn book_in_a_week(env: &TestEnv, room_id: i32) -> BookingResponse {
	let response = env
		.app
		.post("/bookings")
		.json(&CreateBookingRequest {
			room_id,
			date: Utc::now().date_naive() + TimeDelta::days(7),
			start_time: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
			duration: 120,
			purpose: "Thesis defense".to_string(),
		})
		.await;

	assert_eq!(response.status_code(), StatusCode::CREATED);

	response.json::<BookingResponse>()
}

#[tokio::test(flavor = "multi_thread")]
async fn calendar_defaults_to_current_week() {
	let env = TestEnv::new().await;

	env.login_alice().await;

	let response = env.app.get("/calendar").await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let calendar = response.json::<CalendarResponse>();
	let today = Utc::now().date_naive();

	assert_eq!((calendar.to - calendar.from).num_days(), 6);
	assert!(calendar.from <= today && today <= calendar.to);
}

#[tokio::test(flavor = "multi_thread")]
async fn calendar_events() {
	let env = TestEnv::new().await;

	env.login_alice().await;

	let booking = book_in_a_week(&env, 1).await;
	book_in_a_week(&env, 2).await;

	let response = env
		.app
		.get("/calendar")
		.add_query_param("from", booking.date)
		.add_query_param("to", booking.date)
		.await;
	let calendar = response.json::<CalendarResponse>();

	assert_eq!(calendar.events.len(), 2);

	let response = env
		.app
		.get("/calendar")
		.add_query_param("from", booking.date)
		.add_query_param("roomId", 1)
		.await;
	let calendar = response.json::<CalendarResponse>();

	assert_eq!(calendar.events.len(), 1);

	let event = &calendar.events[0];

	assert_eq!(event.booking_id, booking.id);
	assert_eq!(event.title, "A-101 - Thesis defense");
	assert_eq!(event.start, booking.date.and_hms_opt(14, 0, 0).unwrap());
	assert_eq!(event.end, booking.date.and_hms_opt(16, 0, 0).unwrap());
}

#[tokio::test(flavor = "multi_thread")]
async fn cancelled_bookings_are_hidden_by_default() {
	let env = TestEnv::new().await;

	env.login_alice().await;

	let booking = book_in_a_week(&env, 1).await;

	let response =
		env.app.post(&format!("/bookings/{}/cancel", booking.id)).await;
	assert_eq!(response.status_code(), StatusCode::OK);

	let response =
		env.app.get("/calendar").add_query_param("from", booking.date).await;
	assert!(response.json::<CalendarResponse>().events.is_empty());

	let response = env
		.app
		.get("/calendar")
		.add_query_param("from", booking.date)
		.add_query_param("status", "cancelled")
		.await;
	let calendar = response.json::<CalendarResponse>();

	assert_eq!(calendar.events.len(), 1);
	assert_eq!(calendar.events[0].status, BookingStatus::Cancelled);
}

#[tokio::test(flavor = "multi_thread")]
async fn invalid_calendar_ranges() {
	let env = TestEnv::new().await;

	env.login_alice().await;

	let response = env
		.app
		.get("/calendar")
		.add_query_param("from", "2025-03-10")
		.add_query_param("to", "2025-03-01")
		.await;
	assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

	let response = env
		.app
		.get("/calendar")
		.add_query_param("from", "2025-01-01")
		.add_query_param("to", "2025-06-01")
		.await;
	assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test(flavor = "multi_thread")]
async fn dashboard_counts() {
	let env = TestEnv::new().await;

	env.login_alice().await;
	book_in_a_week(&env, 1).await;
	book_in_a_week(&env, 2).await;

	let response = env.app.get("/dashboard").await;
	assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

	env.logout().await;
	env.login_admin().await;

	let response = env.app.get("/dashboard").await;
	assert_eq!(response.status_code(), StatusCode::OK);

	let stats = response.json::<DashboardStats>();

	assert_eq!(stats.rooms.total, 3);
	assert_eq!(stats.rooms.available, 3);
	assert_eq!(stats.bookings.total, 2);
	assert_eq!(stats.bookings.today, 0);
	assert_eq!(stats.pending_approvals, 2);
	assert_eq!(stats.scheduled_maintenance, 0);
	assert_eq!(stats.users, 3);
}

#[tokio::test(flavor = "multi_thread")]
async fn dashboard_skips_deleted_rooms() {
	let env = TestEnv::new().await;

	env.login_admin().await;

	for room_id in [2, 3] {
		let response = env
			.app
			.post(&format!("/rooms/{room_id}/maintenance"))
			.json(&ScheduleMaintenanceRequest {
				description:  "Repaint the walls".to_string(),
				date:         Utc::now().date_naive() + TimeDelta::days(2),
				performed_by: "Facility services".to_string(),
			})
			.await;
		assert_eq!(response.status_code(), StatusCode::CREATED);
	}

	let response = env.app.delete("/rooms/3").await;
	assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

	let stats = env.app.get("/dashboard").await.json::<DashboardStats>();

	assert_eq!(stats.rooms.total, 2);
	assert_eq!(stats.scheduled_maintenance, 1);
}
