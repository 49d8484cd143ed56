use axum::http::StatusCode;
use roombook::schemas::auth::{LoginRequest, RegisterRequest};
use roombook::schemas::user::{CurrentUserResponse, UserResponse};
use serde_json::Value;

mod common;

use common::{ALICE_EMAIL, ALICE_PASSWORD, BOB_EMAIL, BOB_PASSWORD, TestEnv};

fn access_token_name() -> String {
	std::env::var("ACCESS_TOKEN_NAME").unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn register() {
	let env = TestEnv::new().await;

	let response = env
		.app
		.post("/auth/register")
		.json(&RegisterRequest {
			name:     "Carol".to_string(),
			email:    "Carol@Example.com".to_string(),
			password: "carolpassword".to_string(),
		})
		.await;

	assert_eq!(response.status_code(), StatusCode::CREATED);
	assert!(response.maybe_cookie(&access_token_name()).is_some());

	let body = response.json::<UserResponse>();

	assert_eq!(body.name, "Carol");
	assert_eq!(body.email, "carol@example.com");
	assert!(!body.is_admin);
}

#[tokio::test(flavor = "multi_thread")]
async fn register_duplicate_email() {
	let env = TestEnv::new().await;

	let response = env
		.app
		.post("/auth/register")
		.json(&RegisterRequest {
			name:     "Alice again".to_string(),
			email:    ALICE_EMAIL.to_string(),
			password: "anotherpassword".to_string(),
		})
		.await;

	assert_eq!(response.status_code(), StatusCode::CONFLICT);
}

#[tokio::test(flavor = "multi_thread")]
async fn register_short_password() {
	let env = TestEnv::new().await;

	let response = env
		.app
		.post("/auth/register")
		.json(&RegisterRequest {
			name:     "Dave".to_string(),
			email:    "dave@example.com".to_string(),
			password: "short".to_string(),
		})
		.await;

	assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test(flavor = "multi_thread")]
async fn login_sets_cookie() {
	let env = TestEnv::new().await;

	let response = env
		.app
		.post("/auth/login")
		.json(&LoginRequest {
			email:    ALICE_EMAIL.to_string(),
			password: ALICE_PASSWORD.to_string(),
		})
		.await;

	assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
	assert!(response.maybe_cookie(&access_token_name()).is_some());
}

#[tokio::test(flavor = "multi_thread")]
async fn login_wrong_password() {
	let env = TestEnv::new().await;

	let response = env
		.app
		.post("/auth/login")
		.json(&LoginRequest {
			email:    ALICE_EMAIL.to_string(),
			password: "notalicespassword".to_string(),
		})
		.await;

	assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
	assert!(response.maybe_cookie(&access_token_name()).is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn login_unknown_email() {
	let env = TestEnv::new().await;

	let response = env
		.app
		.post("/auth/login")
		.json(&LoginRequest {
			email:    "nobody@example.com".to_string(),
			password: "whatever123".to_string(),
		})
		.await;

	assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test(flavor = "multi_thread")]
async fn current_user_has_faculties() {
	let env = TestEnv::new().await;

	env.login_bob().await;

	let response = env.app.get("/users/me").await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<CurrentUserResponse>();

	assert_eq!(body.user.name, "Bob");
	assert_eq!(body.faculties.len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn unauthenticated_requests_are_refused() {
	let env = TestEnv::new().await;

	let response = env.app.get("/users/me").await;

	assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test(flavor = "multi_thread")]
async fn logout_clears_session() {
	let env = TestEnv::new().await;

	env.login_alice().await;
	env.logout().await;

	let response = env.app.get("/users/me").await;

	assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test(flavor = "multi_thread")]
async fn logged_out_cookie_is_refused() {
	let env = TestEnv::new().await;

	let response = env
		.app
		.post("/auth/login")
		.json(&LoginRequest {
			email:    ALICE_EMAIL.to_string(),
			password: ALICE_PASSWORD.to_string(),
		})
		.await;

	assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

	let saved = response.cookie(&access_token_name());

	env.logout().await;

	let response =
		env.app.get("/users/me").clear_cookies().add_cookie(saved).await;

	assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
	assert_eq!(response.json::<Value>()["code"], 24);
}

#[tokio::test(flavor = "multi_thread")]
async fn logout_revokes_other_sessions() {
	let env = TestEnv::new().await;

	let login = LoginRequest {
		email:    BOB_EMAIL.to_string(),
		password: BOB_PASSWORD.to_string(),
	};

	let first = env.app.post("/auth/login").json(&login).await;
	let other_device = first.cookie(&access_token_name());

	env.login_bob().await;
	env.logout().await;

	let response =
		env.app.get("/users/me").clear_cookies().add_cookie(other_device).await;

	assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

	env.login_bob().await;

	let response = env.app.get("/users/me").await;

	assert_eq!(response.status_code(), StatusCode::OK);
}
