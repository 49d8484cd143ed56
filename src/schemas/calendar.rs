use chrono::{NaiveDate, NaiveDateTime};
use models::{BookingStatus, CalendarEvent, CalendarRange};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarQuery {
	pub from:    Option<NaiveDate>,
	pub to:      Option<NaiveDate>,
	pub room_id: Option<i32>,
	pub status:  Option<BookingStatus>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEventResponse {
	pub booking_id:   i32,
	pub booking_code: String,
	pub room_id:      i32,
	pub room_code:    String,
	pub room_name:    String,
	pub user_id:      i32,
	pub title:        String,
	pub status:       BookingStatus,
	pub start:        NaiveDateTime,
	pub end:          NaiveDateTime,
}

impl From<CalendarEvent> for CalendarEventResponse {
	fn from(event: CalendarEvent) -> Self {
		Self {
			title:        format!("{} - {}", event.room_code, event.purpose),
			booking_id:   event.booking_id,
			booking_code: event.booking_code,
			room_id:      event.room_id,
			room_code:    event.room_code,
			room_name:    event.room_name,
			user_id:      event.user_id,
			status:       event.status,
			start:        event.start,
			end:          event.end,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarResponse {
	pub from:   NaiveDate,
	pub to:     NaiveDate,
	pub events: Vec<CalendarEventResponse>,
}

impl CalendarResponse {
	#[must_use]
	pub fn new(range: CalendarRange, events: Vec<CalendarEvent>) -> Self {
		Self {
			from:   range.from,
			to:     range.to,
			events: events.into_iter().map(Into::into).collect(),
		}
	}
}
