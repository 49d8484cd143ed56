use chrono::NaiveDateTime;
use models::{FullRoom, NewRoom, RoomStatus, UpdateRoom};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use validator_derive::Validate;

use crate::schemas::building::BuildingResponse;
use crate::schemas::facility::RoomFacilityResponse;
use crate::schemas::room_category::RoomCategoryResponse;

#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
	pub id:          i32,
	pub building_id: i32,
	pub category_id: i32,
	pub code:        String,
	pub name:        String,
	pub capacity:    i32,
	pub description: Option<String>,
	pub status:      RoomStatus,
	pub created_at:  NaiveDateTime,
	pub updated_at:  NaiveDateTime,
	pub deleted_at:  Option<NaiveDateTime>,
	pub building:    Option<BuildingResponse>,
	pub category:    Option<RoomCategoryResponse>,
	pub facilities:  Option<Vec<RoomFacilityResponse>>,
}

impl From<FullRoom> for RoomResponse {
	fn from(full: FullRoom) -> Self {
		let room = full.room;

		Self {
			id:          room.id,
			building_id: room.building_id,
			category_id: room.category_id,
			code:        room.code,
			name:        room.name,
			capacity:    room.capacity,
			description: room.description,
			status:      room.status,
			created_at:  room.created_at,
			updated_at:  room.updated_at,
			deleted_at:  room.deleted_at,
			building:    full.building.map(Into::into),
			category:    full.category.map(Into::into),
			facilities:  full
				.facilities
				.map(|f| f.into_iter().map(Into::into).collect()),
		}
	}
}

impl From<models::Room> for RoomResponse {
	fn from(room: models::Room) -> Self {
		FullRoom { room, building: None, category: None, facilities: None }
			.into()
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
	pub building_id: i32,
	pub category_id: i32,
	#[validate(length(
		min = 1,
		max = 20,
		message = "code must be between 1 and 20 characters long",
		code = "code-length"
	))]
	pub code:        String,
	#[validate(length(
		min = 2,
		max = 255,
		message = "name must be between 2 and 255 characters long",
		code = "name-length"
	))]
	pub name:        String,
	#[validate(range(
		min = 1,
		max = 10000,
		message = "capacity must be between 1 and 10000",
		code = "capacity-range"
	))]
	pub capacity:    i32,
	pub description: Option<String>,
}

impl From<CreateRoomRequest> for NewRoom {
	fn from(request: CreateRoomRequest) -> Self {
		Self {
			building_id: request.building_id,
			category_id: request.category_id,
			code:        request.code,
			name:        request.name,
			capacity:    request.capacity,
			description: request.description,
		}
	}
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomRequest {
	pub building_id: Option<i32>,
	pub category_id: Option<i32>,
	#[validate(length(
		min = 1,
		max = 20,
		message = "code must be between 1 and 20 characters long",
		code = "code-length"
	))]
	pub code:        Option<String>,
	#[validate(length(
		min = 2,
		max = 255,
		message = "name must be between 2 and 255 characters long",
		code = "name-length"
	))]
	pub name:        Option<String>,
	#[validate(range(
		min = 1,
		max = 10000,
		message = "capacity must be between 1 and 10000",
		code = "capacity-range"
	))]
	pub capacity:    Option<i32>,
	pub description: Option<String>,
}

impl From<UpdateRoomRequest> for UpdateRoom {
	fn from(request: UpdateRoomRequest) -> Self {
		Self {
			building_id: request.building_id,
			category_id: request.category_id,
			code:        request.code,
			name:        request.name,
			capacity:    request.capacity,
			description: request.description,
		}
	}
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetRoomStatusRequest {
	pub status: RoomStatus,
}

#[cfg(test)]
mod tests {
	use validator::Validate;

	use super::*;

	#[test]
	fn capacity_must_be_positive() {
		let request = CreateRoomRequest {
			building_id: 1,
			category_id: 1,
			code:        "A-101".to_string(),
			name:        "Lecture hall".to_string(),
			capacity:    0,
			description: None,
		};

		assert!(request.validate().is_err());
		assert!(
			CreateRoomRequest { capacity: 120, ..request }.validate().is_ok()
		);
	}

	#[test]
	fn status_uses_lowercase_names() {
		let request: SetRoomStatusRequest =
			serde_json::from_str(r#"{"status": "maintenance"}"#).unwrap();

		assert_eq!(request.status, RoomStatus::Maintenance);
	}
}
