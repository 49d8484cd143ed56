use chrono::NaiveDateTime;
use models::{Building, NewBuilding, UpdateBuilding};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use validator_derive::Validate;

#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingResponse {
	pub id:         i32,
	pub code:       String,
	pub name:       String,
	pub address:    Option<String>,
	pub created_at: NaiveDateTime,
	pub updated_at: NaiveDateTime,
}

impl From<Building> for BuildingResponse {
	fn from(building: Building) -> Self {
		Self {
			id:         building.id,
			code:       building.code,
			name:       building.name,
			address:    building.address,
			created_at: building.created_at,
			updated_at: building.updated_at,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBuildingRequest {
	#[validate(length(
		min = 1,
		max = 20,
		message = "code must be between 1 and 20 characters long",
		code = "code-length"
	))]
	pub code:    String,
	#[validate(length(
		min = 2,
		max = 255,
		message = "name must be between 2 and 255 characters long",
		code = "name-length"
	))]
	pub name:    String,
	#[validate(length(
		max = 500,
		message = "address must be at most 500 characters long",
		code = "address-length"
	))]
	pub address: Option<String>,
}

impl From<CreateBuildingRequest> for NewBuilding {
	fn from(request: CreateBuildingRequest) -> Self {
		Self {
			code:    request.code,
			name:    request.name,
			address: request.address,
		}
	}
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBuildingRequest {
	#[validate(length(
		min = 1,
		max = 20,
		message = "code must be between 1 and 20 characters long",
		code = "code-length"
	))]
	pub code:    Option<String>,
	#[validate(length(
		min = 2,
		max = 255,
		message = "name must be between 2 and 255 characters long",
		code = "name-length"
	))]
	pub name:    Option<String>,
	#[validate(length(
		max = 500,
		message = "address must be at most 500 characters long",
		code = "address-length"
	))]
	pub address: Option<String>,
}

impl From<UpdateBuildingRequest> for UpdateBuilding {
	fn from(request: UpdateBuildingRequest) -> Self {
		Self {
			code:    request.code,
			name:    request.name,
			address: request.address,
		}
	}
}
