use serde::{Deserialize, Serialize};
use validator_derive::Validate;

use crate::schemas::NOT_BLANK_REGEX;

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
	#[validate(regex(
		path = *NOT_BLANK_REGEX,
		message = "name must not be blank",
		code = "name-blank"
	))]
	#[validate(length(
		min = 2,
		max = 100,
		message = "name must be between 2 and 100 characters long",
		code = "name-length"
	))]
	pub name:     String,
	#[validate(email(message = "invalid email", code = "email"))]
	pub email:    String,
	#[validate(length(
		min = 8,
		message = "password must be at least 8 characters long",
		code = "password-length"
	))]
	pub password: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
	pub email:    String,
	pub password: String,
}

#[cfg(test)]
mod tests {
	use validator::Validate;

	use super::*;

	fn request(name: &str, email: &str, password: &str) -> RegisterRequest {
		RegisterRequest {
			name:     name.to_string(),
			email:    email.to_string(),
			password: password.to_string(),
		}
	}

	#[test]
	fn valid_registration() {
		let req = request("Ada Lovelace", "ada@example.com", "analytical");

		assert!(req.validate().is_ok());
	}

	#[test]
	fn registration_rejects_bad_fields() {
		assert!(request("  ", "ada@example.com", "analytical").validate().is_err());
		assert!(request("Ada", "not-an-email", "analytical").validate().is_err());
		assert!(request("Ada", "ada@example.com", "short").validate().is_err());
	}
}
