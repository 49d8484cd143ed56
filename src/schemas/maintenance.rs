use chrono::{NaiveDate, NaiveDateTime};
use models::{MaintenanceLog, MaintenanceStatus};
use serde::{Deserialize, Serialize};
use validator_derive::Validate;

use crate::schemas::NOT_BLANK_REGEX;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceLogResponse {
	pub id:           i32,
	pub room_id:      i32,
	pub description:  String,
	pub date:         NaiveDate,
	pub performed_by: String,
	pub status:       MaintenanceStatus,
	pub created_at:   NaiveDateTime,
	pub updated_at:   NaiveDateTime,
}

impl From<MaintenanceLog> for MaintenanceLogResponse {
	fn from(log: MaintenanceLog) -> Self {
		Self {
			id:           log.id,
			room_id:      log.room_id,
			description:  log.description,
			date:         log.date,
			performed_by: log.performed_by,
			status:       log.status,
			created_at:   log.created_at,
			updated_at:   log.updated_at,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleMaintenanceRequest {
	#[validate(regex(
		path = *NOT_BLANK_REGEX,
		message = "description must not be blank",
		code = "description-blank"
	))]
	pub description:  String,
	pub date:         NaiveDate,
	#[validate(length(
		min = 1,
		max = 255,
		message = "performed by must be between 1 and 255 characters long",
		code = "performed-by-length"
	))]
	pub performed_by: String,
}
