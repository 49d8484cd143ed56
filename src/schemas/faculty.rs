use chrono::NaiveDateTime;
use models::{Faculty, NewFaculty, UpdateFaculty};
use serde::{Deserialize, Serialize};
use validator_derive::Validate;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacultyResponse {
	pub id:         i32,
	pub code:       String,
	pub name:       String,
	pub created_at: NaiveDateTime,
	pub updated_at: NaiveDateTime,
}

impl From<Faculty> for FacultyResponse {
	fn from(faculty: Faculty) -> Self {
		Self {
			id:         faculty.id,
			code:       faculty.code,
			name:       faculty.name,
			created_at: faculty.created_at,
			updated_at: faculty.updated_at,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFacultyRequest {
	#[validate(length(
		min = 1,
		max = 20,
		message = "code must be between 1 and 20 characters long",
		code = "code-length"
	))]
	pub code: String,
	#[validate(length(
		min = 2,
		max = 255,
		message = "name must be between 2 and 255 characters long",
		code = "name-length"
	))]
	pub name: String,
}

impl From<CreateFacultyRequest> for NewFaculty {
	fn from(request: CreateFacultyRequest) -> Self {
		Self { code: request.code, name: request.name }
	}
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFacultyRequest {
	#[validate(length(
		min = 1,
		max = 20,
		message = "code must be between 1 and 20 characters long",
		code = "code-length"
	))]
	pub code: Option<String>,
	#[validate(length(
		min = 2,
		max = 255,
		message = "name must be between 2 and 255 characters long",
		code = "name-length"
	))]
	pub name: Option<String>,
}

impl From<UpdateFacultyRequest> for UpdateFaculty {
	fn from(request: UpdateFacultyRequest) -> Self {
		Self { code: request.code, name: request.name }
	}
}
