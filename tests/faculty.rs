use axum::http::StatusCode;
use roombook::schemas::faculty::{CreateFacultyRequest, FacultyResponse};
use roombook::schemas::pagination::PaginatedResponse;
use roombook::schemas::user::{UpdateUserRequest, UserResponse};

mod common;

use common::TestEnv;

#[tokio::test(flavor = "multi_thread")]
async fn anyone_can_list_faculties() {
	let env = TestEnv::new().await;

	env.login_alice().await;

	let response = env.app.get("/faculties").await;

	assert_eq!(response.status_code(), StatusCode::OK);
	assert_eq!(response.json::<Vec<FacultyResponse>>().len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn only_admins_create_faculties() {
	let env = TestEnv::new().await;

	let request = CreateFacultyRequest {
		code: "FLW".to_string(),
		name: "Faculty of Arts and Philosophy".to_string(),
	};

	env.login_alice().await;

	let response = env.app.post("/faculties").json(&request).await;
	assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

	env.logout().await;
	env.login_admin().await;

	let response = env.app.post("/faculties").json(&request).await;
	assert_eq!(response.status_code(), StatusCode::CREATED);
	assert_eq!(response.json::<FacultyResponse>().code, "FLW");
}

#[tokio::test(flavor = "multi_thread")]
async fn faculty_members() {
	let env = TestEnv::new().await;

	env.login_admin().await;

	let response = env.app.get("/faculties/1/users").await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let members = response.json::<Vec<UserResponse>>();
	let names: Vec<&str> = members.iter().map(|u| u.name.as_str()).collect();

	assert_eq!(names.len(), 2);
	assert!(names.contains(&"Alice"));
	assert!(names.contains(&"Bob"));
}

#[tokio::test(flavor = "multi_thread")]
async fn duplicate_membership_conflicts() {
	let env = TestEnv::new().await;

	env.login_admin().await;

	// alice (user 2) is only seeded as a member of faculty 1
	let response = env.app.post("/users/2/faculties/2").await;
	assert_eq!(response.status_code(), StatusCode::CREATED);

	let response = env.app.post("/users/2/faculties/2").await;
	assert_eq!(response.status_code(), StatusCode::CONFLICT);

	let response = env.app.delete("/users/2/faculties/2").await;
	assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

	let response = env.app.delete("/users/2/faculties/2").await;
	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn list_users_by_faculty() {
	let env = TestEnv::new().await;

	env.login_admin().await;

	let response = env.app.get("/users").await;
	assert_eq!(response.status_code(), StatusCode::OK);
	assert_eq!(response.json::<PaginatedResponse<Vec<UserResponse>>>().total, 3);

	let response = env.app.get("/users").add_query_param("facultyId", 2).await;
	let body = response.json::<PaginatedResponse<Vec<UserResponse>>>();

	assert_eq!(body.total, 1);
	assert_eq!(body.data[0].name, "Bob");
}

#[tokio::test(flavor = "multi_thread")]
async fn users_are_admin_only() {
	let env = TestEnv::new().await;

	env.login_bob().await;

	let response = env.app.get("/users").await;

	assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test(flavor = "multi_thread")]
async fn promote_user_to_admin() {
	let env = TestEnv::new().await;

	env.login_admin().await;

	let response = env
		.app
		.patch("/users/3")
		.json(&UpdateUserRequest { is_admin: Some(true), ..Default::default() })
		.await;

	assert_eq!(response.status_code(), StatusCode::OK);
	assert!(response.json::<UserResponse>().is_admin);
}

#[tokio::test(flavor = "multi_thread")]
async fn admins_cannot_delete_themselves() {
	let env = TestEnv::new().await;

	env.login_admin().await;

	let response = env.app.delete("/users/1").await;
	assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

	let response = env.app.delete("/users/3").await;
	assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
}
