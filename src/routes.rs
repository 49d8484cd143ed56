use std::time::Duration;

use axum::Router;
use axum::routing::{delete, get, patch, post};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::controllers::auth::{login_user, logout_user, register_user};
use crate::controllers::booking::{
	approve_booking,
	cancel_booking,
	create_booking,
	delete_booking,
	get_booking,
	get_bookings,
	reject_booking,
};
use crate::controllers::building::{
	create_building,
	delete_building,
	get_building,
	get_buildings,
	update_building,
};
use crate::controllers::calendar::get_calendar;
use crate::controllers::dashboard::get_dashboard;
use crate::controllers::document::{
	create_document_type,
	delete_booking_document,
	delete_document_type,
	get_booking_documents,
	get_document_types,
	register_booking_document,
};
use crate::controllers::facility::{
	create_facility,
	delete_facility,
	get_facilities,
	get_facility,
	update_facility,
};
use crate::controllers::faculty::{
	create_faculty,
	delete_faculty,
	get_faculties,
	get_faculty,
	get_faculty_members,
	update_faculty,
};
use crate::controllers::healthcheck;
use crate::controllers::maintenance::{
	complete_maintenance,
	get_room_maintenance,
	schedule_maintenance,
};
use crate::controllers::room::{
	attach_facility,
	create_room,
	delete_room,
	detach_facility,
	get_room,
	get_room_facilities,
	get_rooms,
	restore_room,
	set_room_status,
	update_room,
	update_room_facility,
};
use crate::controllers::room_category::{
	create_room_category,
	delete_room_category,
	get_room_categories,
	get_room_category,
	update_room_category,
};
use crate::controllers::usage::{check_in, check_out, get_usage, report_issue};
use crate::controllers::user::{
	add_user_to_faculty,
	delete_user,
	get_current_user,
	get_user,
	get_users,
	remove_user_from_faculty,
	update_user,
};
use crate::middleware::{AdminLayer, AuthLayer};

/// Get the app router
pub fn get_app_router(state: AppState) -> Router {
	let api_routes = Router::new()
		.route("/healthcheck", get(healthcheck))
		.nest("/auth", auth_routes(&state))
		.nest("/users", user_routes(&state))
		.nest("/faculties", faculty_routes(&state))
		.nest("/buildings", building_routes(&state))
		.nest("/room-categories", room_category_routes(&state))
		.nest("/facilities", facility_routes(&state))
		.nest("/rooms", room_routes(&state))
		.nest("/bookings", booking_routes(&state))
		.nest("/document-types", document_type_routes(&state))
		.nest("/calendar", calendar_routes(&state))
		.nest("/dashboard", dashboard_routes(&state));

	Router::new()
		.merge(api_routes)
		.layer(
			ServiceBuilder::new()
				.layer(TraceLayer::new_for_http())
				.layer(TimeoutLayer::new(Duration::from_secs(10)))
				.layer(CompressionLayer::new()),
		)
		.with_state(state)
}

/// Authentication routes
fn auth_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.route("/register", post(register_user))
		.route("/login", post(login_user))
		.route(
			"/logout",
			post(logout_user).route_layer(AuthLayer::new(state.clone())),
		)
}

/// User routes, everything except the current user is admin only
fn user_routes(state: &AppState) -> Router<AppState> {
	let protected = Router::new()
		.route("/", get(get_users))
		.route("/{id}", get(get_user).patch(update_user).delete(delete_user))
		.route(
			"/{id}/faculties/{faculty_id}",
			post(add_user_to_faculty).delete(remove_user_from_faculty),
		)
		.route_layer(AdminLayer::new());

	Router::new()
		.route("/me", get(get_current_user))
		.merge(protected)
		.route_layer(AuthLayer::new(state.clone()))
}

fn faculty_routes(state: &AppState) -> Router<AppState> {
	let protected = Router::new()
		.route("/", post(create_faculty))
		.route("/{id}", patch(update_faculty).delete(delete_faculty))
		.route("/{id}/users", get(get_faculty_members))
		.route_layer(AdminLayer::new());

	Router::new()
		.route("/", get(get_faculties))
		.route("/{id}", get(get_faculty))
		.merge(protected)
		.route_layer(AuthLayer::new(state.clone()))
}

fn building_routes(state: &AppState) -> Router<AppState> {
	let protected = Router::new()
		.route("/", post(create_building))
		.route("/{id}", patch(update_building).delete(delete_building))
		.route_layer(AdminLayer::new());

	Router::new()
		.route("/", get(get_buildings))
		.route("/{id}", get(get_building))
		.merge(protected)
		.route_layer(AuthLayer::new(state.clone()))
}

fn room_category_routes(state: &AppState) -> Router<AppState> {
	let protected = Router::new()
		.route("/", post(create_room_category))
		.route(
			"/{id}",
			patch(update_room_category).delete(delete_room_category),
		)
		.route_layer(AdminLayer::new());

	Router::new()
		.route("/", get(get_room_categories))
		.route("/{id}", get(get_room_category))
		.merge(protected)
		.route_layer(AuthLayer::new(state.clone()))
}

fn facility_routes(state: &AppState) -> Router<AppState> {
	let protected = Router::new()
		.route("/", post(create_facility))
		.route("/{id}", patch(update_facility).delete(delete_facility))
		.route_layer(AdminLayer::new());

	Router::new()
		.route("/", get(get_facilities))
		.route("/{id}", get(get_facility))
		.merge(protected)
		.route_layer(AuthLayer::new(state.clone()))
}

/// Room routes, reading is open to every user while all changes to rooms,
/// their facilities and their maintenance are admin only
fn room_routes(state: &AppState) -> Router<AppState> {
	let protected = Router::new()
		.route("/", post(create_room))
		.route("/{id}", patch(update_room).delete(delete_room))
		.route("/{id}/status", post(set_room_status))
		.route("/{id}/restore", post(restore_room))
		.route("/{id}/facilities", post(attach_facility))
		.route(
			"/{id}/facilities/{facility_id}",
			patch(update_room_facility).delete(detach_facility),
		)
		.route("/{id}/maintenance", post(schedule_maintenance))
		.route(
			"/{id}/maintenance/{log_id}/complete",
			post(complete_maintenance),
		)
		.route_layer(AdminLayer::new());

	Router::new()
		.route("/", get(get_rooms))
		.route("/{id}", get(get_room))
		.route("/{id}/facilities", get(get_room_facilities))
		.route("/{id}/maintenance", get(get_room_maintenance))
		.merge(protected)
		.route_layer(AuthLayer::new(state.clone()))
}

/// Booking routes, documents and usage are checked per booking owner
fn booking_routes(state: &AppState) -> Router<AppState> {
	let protected = Router::new()
		.route("/{id}", delete(delete_booking))
		.route("/{id}/approve", post(approve_booking))
		.route("/{id}/reject", post(reject_booking))
		.route_layer(AdminLayer::new());

	Router::new()
		.route("/", get(get_bookings).post(create_booking))
		.route("/{id}", get(get_booking))
		.route("/{id}/cancel", post(cancel_booking))
		.route(
			"/{id}/documents",
			get(get_booking_documents).post(register_booking_document),
		)
		.route("/{id}/documents/{document_id}", delete(delete_booking_document))
		.route("/{id}/usage", get(get_usage))
		.route("/{id}/usage/check-in", post(check_in))
		.route("/{id}/usage/check-out", post(check_out))
		.route("/{id}/usage/issue", post(report_issue))
		.merge(protected)
		.route_layer(AuthLayer::new(state.clone()))
}

fn document_type_routes(state: &AppState) -> Router<AppState> {
	let protected = Router::new()
		.route("/", post(create_document_type))
		.route("/{id}", delete(delete_document_type))
		.route_layer(AdminLayer::new());

	Router::new()
		.route("/", get(get_document_types))
		.merge(protected)
		.route_layer(AuthLayer::new(state.clone()))
}

fn calendar_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.route("/", get(get_calendar))
		.route_layer(AuthLayer::new(state.clone()))
}

fn dashboard_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.route("/", get(get_dashboard))
		.route_layer(AdminLayer::new())
		.route_layer(AuthLayer::new(state.clone()))
}
