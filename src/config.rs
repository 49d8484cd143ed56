use axum_extra::extract::cookie::Key;
use deadpool_diesel::postgres::{Manager, Pool};
use time::Duration;

#[derive(Clone, Debug)]
pub struct Config {
	pub database_url:   String,
	pub server_address: String,
	pub production:     bool,

	pub access_token_name:     String,
	pub access_token_lifetime: Duration,
}

impl Config {
	fn get_env_var(var: &str) -> String {
		std::env::var(var).unwrap_or_else(|_| panic!("{var} must be set"))
	}

	/// Create a new [`Config`] from environment variables
	///
	/// # Panics
	/// Panics if an environment variable is missing or malformed
	#[must_use]
	pub fn from_env() -> Self {
		let database_url = Self::get_env_var("DATABASE_URL");

		let server_address = std::env::var("SERVER_ADDRESS")
			.unwrap_or_else(|_| "0.0.0.0:80".to_string());

		let production = Self::get_env_var("PRODUCTION")
			.parse::<bool>()
			.unwrap_or_else(|_| panic!("PRODUCTION must be true or false"));

		let access_token_name = Self::get_env_var("ACCESS_TOKEN_NAME");
		let access_token_lifetime = Duration::minutes(
			Self::get_env_var("ACCESS_TOKEN_LIFETIME_MINUTES")
				.parse::<i64>()
				.unwrap_or_else(|_| {
					panic!("ACCESS_TOKEN_LIFETIME_MINUTES must be a number")
				}),
		);

		Self {
			database_url,
			server_address,
			production,
			access_token_name,
			access_token_lifetime,
		}
	}

	/// Create a database pool for the given config
	///
	/// # Panics
	/// Panics if creating the pool fails
	#[must_use]
	pub fn create_database_pool(&self) -> Pool {
		let manager = Manager::new(
			self.database_url.to_string(),
			deadpool_diesel::Runtime::Tokio1,
		);

		Pool::builder(manager)
			.build()
			.unwrap_or_else(|e| panic!("could not build database pool: {e}"))
	}

	/// Create the key used to encrypt private cookies from the
	/// `COOKIE_JAR_SECRET` environment variable
	///
	/// # Panics
	/// Panics if the secret is missing or shorter than 64 bytes
	#[must_use]
	pub fn create_cookie_jar_key(&self) -> Key {
		let secret = Self::get_env_var("COOKIE_JAR_SECRET");

		Key::try_from(secret.as_bytes()).unwrap_or_else(|_| {
			panic!("COOKIE_JAR_SECRET must be at least 64 bytes long")
		})
	}
}
