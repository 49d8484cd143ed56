use chrono::NaiveDateTime;
use models::{
	Facility,
	NewFacility,
	RoomFacility,
	UpdateFacility,
	UpdateRoomFacility,
};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use validator_derive::Validate;

#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityResponse {
	pub id:          i32,
	pub name:        String,
	pub description: Option<String>,
	pub created_at:  NaiveDateTime,
	pub updated_at:  NaiveDateTime,
}

impl From<Facility> for FacilityResponse {
	fn from(facility: Facility) -> Self {
		Self {
			id:          facility.id,
			name:        facility.name,
			description: facility.description,
			created_at:  facility.created_at,
			updated_at:  facility.updated_at,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFacilityRequest {
	#[validate(length(
		min = 2,
		max = 100,
		message = "name must be between 2 and 100 characters long",
		code = "name-length"
	))]
	pub name:        String,
	pub description: Option<String>,
}

impl From<CreateFacilityRequest> for NewFacility {
	fn from(request: CreateFacilityRequest) -> Self {
		Self { name: request.name, description: request.description }
	}
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFacilityRequest {
	#[validate(length(
		min = 2,
		max = 100,
		message = "name must be between 2 and 100 characters long",
		code = "name-length"
	))]
	pub name:        Option<String>,
	pub description: Option<String>,
}

impl From<UpdateFacilityRequest> for UpdateFacility {
	fn from(request: UpdateFacilityRequest) -> Self {
		Self { name: request.name, description: request.description }
	}
}

/// A facility as attached to a room
#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomFacilityResponse {
	pub facility_id: i32,
	pub name:        String,
	pub description: Option<String>,
	pub quantity:    i32,
	pub notes:       Option<String>,
}

impl From<(RoomFacility, Facility)> for RoomFacilityResponse {
	fn from((pivot, facility): (RoomFacility, Facility)) -> Self {
		Self {
			facility_id: facility.id,
			name:        facility.name,
			description: facility.description,
			quantity:    pivot.quantity,
			notes:       pivot.notes,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AttachFacilityRequest {
	pub facility_id: i32,
	#[validate(range(
		min = 1,
		message = "quantity must be at least 1",
		code = "quantity-range"
	))]
	#[serde(default = "quantity_default")]
	pub quantity:    i32,
	pub notes:       Option<String>,
}

const fn quantity_default() -> i32 { 1 }

#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomFacilityRequest {
	#[validate(range(
		min = 1,
		message = "quantity must be at least 1",
		code = "quantity-range"
	))]
	pub quantity: Option<i32>,
	pub notes:    Option<String>,
}

impl From<UpdateRoomFacilityRequest> for UpdateRoomFacility {
	fn from(request: UpdateRoomFacilityRequest) -> Self {
		Self { quantity: request.quantity, notes: request.notes }
	}
}
