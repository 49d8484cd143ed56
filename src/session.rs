//! User sessions and access tokens

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::{DateTime, Utc};
use common::{Error, InternalServerError, TokenError};
use models::User;
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::AppState;

/// A session for any authenticated user
///
/// Sessions are stored on the request by the
/// [`AuthLayer`](crate::middleware::AuthLayer), handlers ask for one in their
/// arguments
///
/// ```rs
/// pub async fn foo_route(session: Session) -> impl IntoResponse {
///     println!("{:?}", session.user_id);
///
///     ()
/// }
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Session {
	pub user_id:  i32,
	pub is_admin: bool,
}

/// A session for any admin user
#[derive(Clone, Copy, Debug)]
pub struct AdminSession {
	pub user_id: i32,
}

impl FromRequestParts<AppState> for Session {
	type Rejection = Error;

	async fn from_request_parts(
		parts: &mut Parts,
		_state: &AppState,
	) -> Result<Self, Self::Rejection> {
		let Some(session) = parts.extensions.get::<Self>() else {
			return Err(InternalServerError::SessionWithoutAuthError.into());
		};

		Ok(*session)
	}
}

impl FromRequestParts<AppState> for AdminSession {
	type Rejection = Error;

	async fn from_request_parts(
		parts: &mut Parts,
		state: &AppState,
	) -> Result<Self, Self::Rejection> {
		let session = Session::from_request_parts(parts, state).await?;

		if !session.is_admin {
			return Err(Error::Forbidden);
		}

		Ok(Self { user_id: session.user_id })
	}
}

impl From<&User> for Session {
	fn from(user: &User) -> Self {
		Self { user_id: user.id, is_admin: user.is_admin }
	}
}

impl Session {
	/// Check whether this session may act on a resource owned by `owner_id`
	///
	/// # Errors
	/// Errors with [`Error::Forbidden`] if the session belongs to neither the
	/// owner nor an admin
	pub fn ensure_access(&self, owner_id: i32) -> Result<(), Error> {
		if self.is_admin || self.user_id == owner_id {
			return Ok(());
		}

		warn!("user {} tried to access a resource of {owner_id}", self.user_id);

		Err(Error::Forbidden)
	}
}

/// Contents of the encrypted access token cookie
///
/// The expiry is checked by the server, the cookie's `max_age` is only a hint
/// for the browser. Logging out bumps the user's session version which
/// invalidates every token issued before.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessToken {
	pub user_id:         i32,
	pub session_version: i32,
	/// Unix timestamp in seconds
	pub expires_at:      i64,
}

impl AccessToken {
	/// Issue a new token for `user` that is valid for `lifetime` from `now`
	#[must_use]
	pub fn issue(user: &User, lifetime: Duration, now: DateTime<Utc>) -> Self {
		Self {
			user_id:         user.id,
			session_version: user.session_version,
			expires_at:      now.timestamp() + lifetime.whole_seconds(),
		}
	}

	/// Read a token from its cookie, `None` if the value is malformed
	#[must_use]
	pub fn from_cookie(cookie: &Cookie<'_>) -> Option<Self> {
		serde_json::from_str(cookie.value()).ok()
	}

	/// Check that this token has not expired at `now` and was issued for the
	/// current session version of `user`
	///
	/// # Errors
	/// Errors with [`TokenError::ExpiredAccessToken`] or
	/// [`TokenError::RevokedAccessToken`]
	pub fn verify(&self, user: &User, now: DateTime<Utc>) -> Result<(), Error> {
		if self.expires_at < now.timestamp() {
			return Err(TokenError::ExpiredAccessToken.into());
		}

		if self.session_version != user.session_version {
			return Err(TokenError::RevokedAccessToken.into());
		}

		Ok(())
	}

	/// Convert this [`AccessToken`] into a cookie
	///
	/// # Errors
	/// Errors if the token can not be serialized
	pub fn to_cookie(
		self,
		name: String,
		lifetime: Duration,
		secure: bool,
	) -> Result<Cookie<'static>, Error> {
		let value = serde_json::to_string(&self)
			.map_err(|e| Error::Infallible(e.to_string()))?;

		let cookie: Cookie<'static> = Cookie::build((name, value))
			.http_only(true)
			.max_age(lifetime)
			.path("/")
			.same_site(SameSite::Lax)
			.secure(secure)
			.into();

		Ok(cookie)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn owners_and_admins_have_access() {
		let owner = Session { user_id: 4, is_admin: false };
		let admin = Session { user_id: 1, is_admin: true };
		let other = Session { user_id: 5, is_admin: false };

		assert!(owner.ensure_access(4).is_ok());
		assert!(admin.ensure_access(4).is_ok());
		assert!(matches!(other.ensure_access(4), Err(Error::Forbidden)));
	}

	fn user(session_version: i32) -> User {
		User {
			id: 42,
			name: "Ada".to_string(),
			email: "ada@example.com".to_string(),
			password_hash: String::new(),
			is_admin: false,
			created_at: Utc::now().naive_utc(),
			updated_at: Utc::now().naive_utc(),
			session_version,
		}
	}

	#[test]
	fn access_token_cookie_round_trips() {
		let now = Utc::now();
		let token = AccessToken::issue(&user(3), Duration::minutes(30), now);

		let cookie = token
			.to_cookie(
				"roombook_access_token".to_string(),
				Duration::minutes(30),
				true,
			)
			.unwrap();

		assert_eq!(cookie.name(), "roombook_access_token");
		assert_eq!(cookie.http_only(), Some(true));
		assert_eq!(cookie.secure(), Some(true));
		assert_eq!(cookie.max_age(), Some(Duration::minutes(30)));
		assert_eq!(AccessToken::from_cookie(&cookie), Some(token));
		assert_eq!(token.expires_at, now.timestamp() + 30 * 60);
	}

	#[test]
	fn bare_user_id_is_not_a_token() {
		let cookie = Cookie::new("roombook_access_token", "42");

		assert_eq!(AccessToken::from_cookie(&cookie), None);
	}

	#[test]
	fn expired_token_is_refused() {
		let issued = Utc::now();
		let token = AccessToken::issue(&user(0), Duration::minutes(30), issued);

		assert!(token.verify(&user(0), issued).is_ok());
		assert!(
			token
				.verify(&user(0), issued + chrono::TimeDelta::minutes(30))
				.is_ok()
		);
		assert!(matches!(
			token.verify(&user(0), issued + chrono::TimeDelta::minutes(31)),
			Err(Error::TokenError(TokenError::ExpiredAccessToken))
		));
	}

	#[test]
	fn token_from_older_session_is_revoked() {
		let now = Utc::now();
		let token = AccessToken::issue(&user(0), Duration::minutes(30), now);

		assert!(matches!(
			token.verify(&user(1), now),
			Err(Error::TokenError(TokenError::RevokedAccessToken))
		));
	}
}
