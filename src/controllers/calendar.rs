use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use common::{DbPool, Error};
use models::{CALENDAR_DEFAULT_STATUSES, CalendarEvent, CalendarRange};

use crate::schemas::calendar::{CalendarQuery, CalendarResponse};

/// Get the booking events in a date range
#[instrument(skip(pool))]
pub(crate) async fn get_calendar(
	State(pool): State<DbPool>,
	Query(query): Query<CalendarQuery>,
) -> Result<impl IntoResponse, Error> {
	let today = Utc::now().date_naive();
	let range = CalendarRange::resolve(query.from, query.to, today)?;

	let statuses = query
		.status
		.map_or_else(|| CALENDAR_DEFAULT_STATUSES.to_vec(), |s| vec![s]);

	let conn = pool.get().await?;

	let events =
		CalendarEvent::for_range(range, query.room_id, statuses, &conn).await?;

	Ok((StatusCode::OK, Json(CalendarResponse::new(range, events))))
}
