use chrono::NaiveDateTime;
use models::{UpdateUser, User};
use serde::{Deserialize, Serialize};
use validator_derive::Validate;

use crate::schemas::faculty::FacultyResponse;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
	pub id:         i32,
	pub name:       String,
	pub email:      String,
	pub is_admin:   bool,
	pub created_at: NaiveDateTime,
	pub updated_at: NaiveDateTime,
}

impl From<User> for UserResponse {
	fn from(user: User) -> Self {
		Self {
			id:         user.id,
			name:       user.name,
			email:      user.email,
			is_admin:   user.is_admin,
			created_at: user.created_at,
			updated_at: user.updated_at,
		}
	}
}

/// The logged in user together with their faculties
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUserResponse {
	#[serde(flatten)]
	pub user:      UserResponse,
	pub faculties: Vec<FacultyResponse>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
	#[validate(length(
		min = 2,
		max = 100,
		message = "name must be between 2 and 100 characters long",
		code = "name-length"
	))]
	pub name:     Option<String>,
	#[validate(email(message = "invalid email", code = "email"))]
	pub email:    Option<String>,
	pub is_admin: Option<bool>,
}

impl From<UpdateUserRequest> for UpdateUser {
	fn from(request: UpdateUserRequest) -> Self {
		Self {
			name:     request.name,
			email:    request.email,
			is_admin: request.is_admin,
		}
	}
}
