//! Controllers for authorization

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, NoContent};
use axum_extra::extract::PrivateCookieJar;
use axum_extra::extract::cookie::Cookie;
use chrono::Utc;
use common::{DbPool, Error};
use models::{NewUser, User};
use validator::Validate;

use crate::schemas::auth::{LoginRequest, RegisterRequest};
use crate::schemas::user::UserResponse;
use crate::{AccessToken, Config, Session};

/// Add an access token for `user` to a cookie jar
fn with_access_token(
	jar: PrivateCookieJar,
	user: &User,
	config: &Config,
) -> Result<PrivateCookieJar, Error> {
	let access_token_cookie =
		AccessToken::issue(user, config.access_token_lifetime, Utc::now())
			.to_cookie(
				config.access_token_name.clone(),
				config.access_token_lifetime,
				config.production,
			)?;

	Ok(jar.add(access_token_cookie))
}

#[instrument(skip_all)]
pub(crate) async fn register_user(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	jar: PrivateCookieJar,
	Json(register_data): Json<RegisterRequest>,
) -> Result<impl IntoResponse, Error> {
	register_data.validate()?;

	let password_hash = User::hash_password(&register_data.password)?;

	let insertable_user = NewUser {
		name: register_data.name.trim().to_string(),
		email: register_data.email.to_lowercase(),
		password_hash,
		is_admin: false,
	};

	let conn = pool.get().await?;
	let new_user = insertable_user.insert(&conn).await?;

	let jar = with_access_token(jar, &new_user, &config)?;

	info!("registered new user id: {} email: {}", new_user.id, new_user.email);

	Ok((StatusCode::CREATED, jar, Json(UserResponse::from(new_user))))
}

#[instrument(skip_all)]
pub(crate) async fn login_user(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	jar: PrivateCookieJar,
	Json(login_data): Json<LoginRequest>,
) -> Result<(PrivateCookieJar, NoContent), Error> {
	let conn = pool.get().await?;
	let user =
		User::get_by_email(login_data.email.to_lowercase(), &conn).await?;

	user.verify_password(&login_data.password)?;

	let jar = with_access_token(jar, &user, &config)?;

	info!("logged in user {} with email", user.id);

	Ok((jar, NoContent))
}

#[instrument(skip(pool, config, jar))]
pub(crate) async fn logout_user(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	jar: PrivateCookieJar,
	session: Session,
) -> Result<(PrivateCookieJar, NoContent), Error> {
	let conn = pool.get().await?;
	User::bump_session_version(session.user_id, &conn).await?;

	let access_token = Cookie::build(config.access_token_name).path("/");

	let jar = jar.remove(access_token);

	info!("logged out user {}", session.user_id);

	Ok((jar, NoContent))
}
