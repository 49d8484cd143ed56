//! Middleware to authorize users and store their session on the request

use std::pin::Pin;
use std::task::{Context, Poll};

use axum::RequestExt;
use axum::body::Body;
use axum::extract::Request;
use axum::http::Response;
use axum::http::header::SET_COOKIE;
use axum::response::IntoResponse;
use axum_extra::extract::PrivateCookieJar;
use chrono::Utc;
use common::{Error, TokenError};
use models::User;
use tower::{Layer, Service};

use crate::AppState;
use crate::session::{AccessToken, Session};

/// Middleware layer that guarantees a request has a valid access token that
/// belongs to an existing user, has not expired and was not revoked by
/// logging out
///
/// The resulting [`Session`] is stored as an [`Extension`](axum::Extension),
/// controllers that need it should ask for a [`Session`] in their arguments.
///
/// Every authorized response refreshes the access token cookie, unless the
/// handler already set that cookie itself (logging out for example).
#[derive(Clone)]
pub struct AuthLayer {
	state: AppState,
}

impl AuthLayer {
	#[must_use]
	pub fn new(state: AppState) -> Self { Self { state } }
}

impl<S> Layer<S> for AuthLayer {
	type Service = AuthMiddleware<S>;

	fn layer(&self, inner: S) -> Self::Service {
		AuthMiddleware { inner, state: self.state.clone() }
	}
}

#[derive(Clone)]
pub struct AuthMiddleware<S> {
	inner: S,
	state: AppState,
}

impl<S> Service<Request<Body>> for AuthMiddleware<S>
where
	S: Service<Request, Response = Response<Body>> + Clone + Send + 'static,
	S::Future: Send + 'static,
{
	type Error = S::Error;
	type Future = Pin<
		Box<
			dyn Future<Output = Result<Self::Response, Self::Error>>
				+ Send
				+ 'static,
		>,
	>;
	type Response = S::Response;

	fn poll_ready(
		&mut self,
		cx: &mut Context<'_>,
	) -> Poll<Result<(), Self::Error>> {
		self.inner.poll_ready(cx)
	}

	#[instrument(skip_all)]
	fn call(&mut self, mut req: Request<Body>) -> Self::Future {
		let cloned_inner = self.inner.clone();
		let mut inner = std::mem::replace(&mut self.inner, cloned_inner);

		let state = self.state.clone();

		Box::pin(async move {
			let jar = match req
				.extract_parts_with_state::<PrivateCookieJar, _>(&state)
				.await
			{
				Ok(jar) => jar,
				Err(never) => match never {},
			};

			let config = &state.config;

			let Some(access_token) = jar.get(&config.access_token_name) else {
				info!("got request without valid access token");

				return Ok(
					Error::from(TokenError::MissingAccessToken).into_response()
				);
			};

			let Some(token) = AccessToken::from_cookie(&access_token) else {
				warn!("got malformed access token");

				return Ok(
					Error::from(TokenError::MissingAccessToken).into_response()
				);
			};

			let conn = match state.database_pool.get().await {
				Ok(c) => c,
				Err(e) => return Ok(Error::from(e).into_response()),
			};

			let user_id = token.user_id;

			let user = match User::find(user_id, &conn).await {
				Ok(Some(u)) => u,
				Ok(None) => {
					warn!("attempted to authorize unknown user {user_id}");

					return Ok(
						Error::from(TokenError::UnknownUser).into_response()
					);
				},
				Err(e) => return Ok(e.into_response()),
			};

			drop(conn);

			let now = Utc::now();

			if let Err(e) = token.verify(&user, now) {
				info!("refused access token of user {user_id}: {e}");

				return Ok(e.into_response());
			}

			let session = Session::from(&user);

			let refreshed = AccessToken::issue(
				&user,
				config.access_token_lifetime,
				now,
			)
			.to_cookie(
				config.access_token_name.clone(),
				config.access_token_lifetime,
				config.production,
			);

			let jar = match refreshed {
				Ok(cookie) => jar.add(cookie),
				Err(e) => return Ok(e.into_response()),
			};

			req.extensions_mut().insert(session);

			let res = inner.call(req).await;

			let token_prefix = format!("{}=", config.access_token_name);

			res.map(|r| {
				let handler_set_token =
					r.headers().get_all(SET_COOKIE).iter().any(|v| {
						v.to_str().is_ok_and(|v| v.starts_with(&token_prefix))
					});

				if handler_set_token {
					return r;
				}

				let (head, body) = r.into_parts();

				let mut res = (jar, body).into_response();

				*res.status_mut() = head.status;
				*res.version_mut() = head.version;

				res.headers_mut().extend(head.headers);
				res.extensions_mut().extend(head.extensions);

				res
			})
		})
	}
}
