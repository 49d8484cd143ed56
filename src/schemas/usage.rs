use chrono::NaiveDateTime;
use models::UsageLog;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use validator_derive::Validate;

#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageLogResponse {
	pub id:                i32,
	pub booking_id:        i32,
	pub check_in_at:       NaiveDateTime,
	pub check_out_at:      Option<NaiveDateTime>,
	pub late_checkout:     bool,
	pub issue_reported:    bool,
	pub issue_description: Option<String>,
	pub created_at:        NaiveDateTime,
	pub updated_at:        NaiveDateTime,
}

impl From<UsageLog> for UsageLogResponse {
	fn from(log: UsageLog) -> Self {
		Self {
			id:                log.id,
			booking_id:        log.booking_id,
			check_in_at:       log.check_in_at,
			check_out_at:      log.check_out_at,
			late_checkout:     log.late_checkout,
			issue_reported:    log.issue_reported,
			issue_description: log.issue_description,
			created_at:        log.created_at,
			updated_at:        log.updated_at,
		}
	}
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReportIssueRequest {
	#[validate(length(
		max = 2000,
		message = "description must be at most 2000 characters long",
		code = "description-length"
	))]
	pub description: Option<String>,
}
