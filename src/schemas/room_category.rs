use chrono::NaiveDateTime;
use models::{NewRoomCategory, RoomCategory, UpdateRoomCategory};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use validator_derive::Validate;

#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomCategoryResponse {
	pub id:          i32,
	pub name:        String,
	pub description: Option<String>,
	pub created_at:  NaiveDateTime,
	pub updated_at:  NaiveDateTime,
}

impl From<RoomCategory> for RoomCategoryResponse {
	fn from(category: RoomCategory) -> Self {
		Self {
			id:          category.id,
			name:        category.name,
			description: category.description,
			created_at:  category.created_at,
			updated_at:  category.updated_at,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomCategoryRequest {
	#[validate(length(
		min = 2,
		max = 100,
		message = "name must be between 2 and 100 characters long",
		code = "name-length"
	))]
	pub name:        String,
	pub description: Option<String>,
}

impl From<CreateRoomCategoryRequest> for NewRoomCategory {
	fn from(request: CreateRoomCategoryRequest) -> Self {
		Self { name: request.name, description: request.description }
	}
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomCategoryRequest {
	#[validate(length(
		min = 2,
		max = 100,
		message = "name must be between 2 and 100 characters long",
		code = "name-length"
	))]
	pub name:        Option<String>,
	pub description: Option<String>,
}

impl From<UpdateRoomCategoryRequest> for UpdateRoomCategory {
	fn from(request: UpdateRoomCategoryRequest) -> Self {
		Self { name: request.name, description: request.description }
	}
}
