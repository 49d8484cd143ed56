use axum::http::StatusCode;
use chrono::{TimeDelta, Utc};
use models::{MaintenanceStatus, RoomStatus};
use roombook::schemas::facility::{
	AttachFacilityRequest,
	RoomFacilityResponse,
	UpdateRoomFacilityRequest,
};
use roombook::schemas::maintenance::{
	MaintenanceLogResponse,
	ScheduleMaintenanceRequest,
};
use roombook::schemas::pagination::PaginatedResponse;
use roombook::schemas::room::{
	CreateRoomRequest,
	RoomResponse,
	SetRoomStatusRequest,
};

mod common;

use common::TestEnv;

type RoomPage = PaginatedResponse<Vec<RoomResponse>>;

fn new_room(code: &str) -> CreateRoomRequest {
	CreateRoomRequest {
		building_id: 2,
		category_id: 2,
		code:        code.to_string(),
		name:        "Study room".to_string(),
		capacity:    8,
		description: None,
	}
}

#[tokio::test(flavor = "multi_thread")]
async fn list_rooms() {
	let env = TestEnv::new().await;

	env.login_alice().await;

	let response = env.app.get("/rooms").await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<RoomPage>();

	assert_eq!(body.total, 3);
	assert_eq!(body.page, 1);
	assert!(body.data.iter().all(|r| r.building.is_none()));
}

#[tokio::test(flavor = "multi_thread")]
async fn filter_rooms() {
	let env = TestEnv::new().await;

	env.login_alice().await;

	let response = env.app.get("/rooms").add_query_param("minCapacity", 100).await;
	assert_eq!(response.json::<RoomPage>().total, 2);

	let response = env.app.get("/rooms").add_query_param("search", "board").await;
	let body = response.json::<RoomPage>();
	assert_eq!(body.total, 1);
	assert_eq!(body.data[0].code, "A-204");

	// wildcards in the search are matched literally
	let response = env.app.get("/rooms").add_query_param("search", "_").await;
	assert_eq!(response.json::<RoomPage>().total, 0);

	let response = env.app.get("/rooms").add_query_param("search", "%").await;
	assert_eq!(response.json::<RoomPage>().total, 0);

	let response = env
		.app
		.get("/rooms")
		.add_query_param("buildingId", 1)
		.add_query_param("building", true)
		.await;
	let body = response.json::<RoomPage>();
	assert_eq!(body.total, 2);
	assert!(body.data.iter().all(|r| r.building.is_some()));
}

#[tokio::test(flavor = "multi_thread")]
async fn page_past_the_end() {
	let env = TestEnv::new().await;

	env.login_alice().await;

	let response = env.app.get("/rooms").add_query_param("page", 5).await;

	assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread")]
async fn get_room_with_relations() {
	let env = TestEnv::new().await;

	env.login_alice().await;

	let response = env.app.get("/rooms/1").await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let room = response.json::<RoomResponse>();

	assert_eq!(room.code, "A-101");
	assert_eq!(room.building.unwrap().code, "A");
	assert_eq!(room.category.unwrap().name, "Lecture hall");
	assert_eq!(room.facilities.unwrap().len(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_room() {
	let env = TestEnv::new().await;

	env.login_admin().await;

	let response = env.app.post("/rooms").json(&new_room("B-101")).await;

	assert_eq!(response.status_code(), StatusCode::CREATED);

	let room = response.json::<RoomResponse>();

	assert_eq!(room.status, RoomStatus::Available);
	assert_eq!(room.capacity, 8);

	let response = env.app.post("/rooms").json(&new_room("B-101")).await;

	assert_eq!(response.status_code(), StatusCode::CONFLICT);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_room_unknown_building() {
	let env = TestEnv::new().await;

	env.login_admin().await;

	let request = CreateRoomRequest { building_id: 42, ..new_room("C-001") };
	let response = env.app.post("/rooms").json(&request).await;

	assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test(flavor = "multi_thread")]
async fn users_cannot_change_rooms() {
	let env = TestEnv::new().await;

	env.login_bob().await;

	let response = env.app.post("/rooms").json(&new_room("B-102")).await;
	assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

	let response = env.app.delete("/rooms/1").await;
	assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test(flavor = "multi_thread")]
async fn soft_delete_and_restore_room() {
	let env = TestEnv::new().await;

	env.login_admin().await;

	let response = env.app.delete("/rooms/2").await;
	assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

	let response = env.app.get("/rooms").await;
	assert_eq!(response.json::<RoomPage>().total, 2);

	let response = env.app.get("/rooms").add_query_param("trashed", "only").await;
	let body = response.json::<RoomPage>();
	assert_eq!(body.total, 1);
	assert!(body.data[0].deleted_at.is_some());

	let response = env.app.get("/rooms").add_query_param("trashed", "with").await;
	assert_eq!(response.json::<RoomPage>().total, 3);

	let response = env.app.post("/rooms/2/restore").await;
	assert_eq!(response.status_code(), StatusCode::OK);
	assert!(response.json::<RoomResponse>().deleted_at.is_none());

	let response = env.app.post("/rooms/2/restore").await;
	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn trashed_rooms_are_admin_only() {
	let env = TestEnv::new().await;

	env.login_alice().await;

	let response = env.app.get("/rooms").add_query_param("trashed", "with").await;

	assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test(flavor = "multi_thread")]
async fn set_room_status() {
	let env = TestEnv::new().await;

	env.login_admin().await;

	let response = env
		.app
		.post("/rooms/3/status")
		.json(&SetRoomStatusRequest { status: RoomStatus::Maintenance })
		.await;

	assert_eq!(response.status_code(), StatusCode::OK);
	assert_eq!(response.json::<RoomResponse>().status, RoomStatus::Maintenance);
}

#[tokio::test(flavor = "multi_thread")]
async fn room_facilities() {
	let env = TestEnv::new().await;

	env.login_admin().await;

	let attach = AttachFacilityRequest {
		facility_id: 1,
		quantity:    2,
		notes:       Some("ceiling mounted".to_string()),
	};

	let response = env.app.post("/rooms/1/facilities").json(&attach).await;
	assert_eq!(response.status_code(), StatusCode::CREATED);

	let attached = response.json::<RoomFacilityResponse>();
	assert_eq!(attached.quantity, 2);
	assert_eq!(attached.name, "Projector");

	let response = env.app.post("/rooms/1/facilities").json(&attach).await;
	assert_eq!(response.status_code(), StatusCode::CONFLICT);

	let response = env
		.app
		.patch("/rooms/1/facilities/1")
		.json(&UpdateRoomFacilityRequest { quantity: Some(3), notes: None })
		.await;
	assert_eq!(response.status_code(), StatusCode::OK);
	assert_eq!(response.json::<RoomFacilityResponse>().quantity, 3);

	let response = env.app.get("/rooms/1/facilities").await;
	assert_eq!(response.json::<Vec<RoomFacilityResponse>>().len(), 1);

	let response = env.app.delete("/rooms/1/facilities/1").await;
	assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

	let response = env.app.delete("/rooms/1/facilities/1").await;
	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn attach_zero_quantity() {
	let env = TestEnv::new().await;

	env.login_admin().await;

	let response = env
		.app
		.post("/rooms/1/facilities")
		.json(&AttachFacilityRequest { facility_id: 2, quantity: 0, notes: None })
		.await;

	assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test(flavor = "multi_thread")]
async fn maintenance_lifecycle() {
	let env = TestEnv::new().await;

	env.login_admin().await;

	let response = env
		.app
		.post("/rooms/2/maintenance")
		.json(&ScheduleMaintenanceRequest {
			description:  "Replace the ceiling lights".to_string(),
			date:         Utc::now().date_naive() + TimeDelta::days(3),
			performed_by: "Facility services".to_string(),
		})
		.await;

	assert_eq!(response.status_code(), StatusCode::CREATED);

	let log = response.json::<MaintenanceLogResponse>();
	assert_eq!(log.status, MaintenanceStatus::Scheduled);

	let path = format!("/rooms/2/maintenance/{}/complete", log.id);

	let response = env.app.post(&path).await;
	assert_eq!(response.status_code(), StatusCode::OK);
	assert_eq!(
		response.json::<MaintenanceLogResponse>().status,
		MaintenanceStatus::Completed
	);

	let response = env.app.post(&path).await;
	assert_eq!(response.status_code(), StatusCode::CONFLICT);

	let response = env.app.post("/rooms/1/maintenance/999/complete").await;
	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

	let response = env.app.get("/rooms/2/maintenance").await;
	assert_eq!(response.json::<Vec<MaintenanceLogResponse>>().len(), 1);
}
