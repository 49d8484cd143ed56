#[macro_use]
extern crate tracing;

use roombook::{AppState, Config, routes};
use tokio::net::TcpListener;
use tokio::signal;
use tokio::signal::unix::SignalKind;
use tracing::Level;

#[tokio::main]
async fn main() {
	// Set up the tracing subscriber.
	// This will print out all logs to the console.
	tracing_subscriber::fmt()
		.pretty()
		.with_thread_names(true)
		.with_max_level(Level::INFO)
		.init();

	// Load the configuration from the environment,
	// and create a database pool.
	let config = Config::from_env();
	let database_pool = config.create_database_pool();
	let cookie_jar_key = config.create_cookie_jar_key();

	let address = config.server_address.clone();

	// Create the app router and listener.
	let router =
		routes::get_app_router(AppState { config, database_pool, cookie_jar_key });

	let listener = TcpListener::bind(&address)
		.await
		.unwrap_or_else(|e| panic!("COULD NOT BIND TO {address}: {e}"));

	// Start the server.
	if let Ok(local) = listener.local_addr() {
		info!("listening on {local}");
	}

	if let Err(e) = axum::serve(listener, router)
		.with_graceful_shutdown(shutdown_handler())
		.await
	{
		error!("server stopped unexpectedly: {e}");
	}
}

/// Gracefully shutdown the server on SIGINT or SIGTERM.
async fn shutdown_handler() {
	let ctrl_c = async {
		signal::ctrl_c().await.expect("COULD NOT INSTALL CTRL+C HANDLER");
	};

	let terminate = async {
		signal::unix::signal(SignalKind::terminate())
			.expect("COULD NOT INSTALL TERMINATE SIGNAL HANDLER")
			.recv()
			.await;
	};

	tokio::select! {
		() = ctrl_c => {},
		() = terminate => {},
	}

	info!("shutting down");
}
