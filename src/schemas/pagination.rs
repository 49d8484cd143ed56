use models::PaginationConfig;
use serde::{Deserialize, Deserializer, Serialize};

use crate::schemas::BoundedU32Visitor;

const fn page_default() -> u32 { 1 }

const fn per_page_default() -> u32 { 12 }

/// Pagination request parameters.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationOptions {
	#[serde(default = "page_default", deserialize_with = "ds_page_bounds")]
	pub page:     u32,
	#[serde(
		default = "per_page_default",
		deserialize_with = "ds_per_page_bounds"
	)]
	pub per_page: u32,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
	pub page:     u32,
	pub per_page: u32,
	pub total:    i64,
	pub data:     T,
}

impl Default for PaginationOptions {
	fn default() -> Self { Self { page: 1, per_page: 12 } }
}

impl From<PaginationOptions> for PaginationConfig {
	fn from(value: PaginationOptions) -> Self {
		Self { limit: value.limit(), offset: value.offset() }
	}
}

impl PaginationOptions {
	/// Create a new [`PaginatedResponse`] based on the current parameters
	/// with the given data
	pub fn paginate<T>(&self, total: i64, data: T) -> PaginatedResponse<T> {
		PaginatedResponse {
			page: self.page,
			per_page: self.per_page,
			total,
			data,
		}
	}

	/// Calculate the SQL LIMIT value of these parameters
	#[inline]
	#[must_use]
	pub fn limit(&self) -> i64 { self.per_page.into() }

	/// Calculate the SQL OFFSET value of these parameters
	#[inline]
	#[must_use]
	pub fn offset(&self) -> i64 {
		(i64::from(self.page) - 1) * i64::from(self.per_page)
	}
}

/// Deserialization visitor for `page` bounds.
fn ds_page_bounds<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
	d.deserialize_u32(BoundedU32Visitor { start: 1, end: u32::MAX })
}

/// Deserialization visitor for `per_page` bounds.
fn ds_per_page_bounds<'de, D: Deserializer<'de>>(
	d: D,
) -> Result<u32, D::Error> {
	d.deserialize_u32(BoundedU32Visitor { start: 1, end: 50 })
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn first_page_starts_at_zero() {
		let opts = PaginationOptions { page: 1, per_page: 20 };

		assert_eq!(opts.limit(), 20);
		assert_eq!(opts.offset(), 0);
	}

	#[test]
	fn later_pages_skip_earlier_rows() {
		let cfg: PaginationConfig =
			PaginationOptions { page: 4, per_page: 12 }.into();

		assert_eq!(cfg.limit, 12);
		assert_eq!(cfg.offset, 36);
	}

	#[test]
	fn large_pages_do_not_overflow() {
		let opts = PaginationOptions { page: u32::MAX, per_page: 50 };

		assert_eq!(opts.offset(), (i64::from(u32::MAX) - 1) * 50);
	}

	#[test]
	fn defaults_apply_to_missing_fields() {
		let opts: PaginationOptions = serde_json::from_str("{}").unwrap();

		assert_eq!(opts.page, 1);
		assert_eq!(opts.per_page, 12);
	}

	#[test]
	fn per_page_is_bounded() {
		let too_many =
			serde_json::from_str::<PaginationOptions>(r#"{"perPage": 51}"#);
		let none = serde_json::from_str::<PaginationOptions>(r#"{"page": 0}"#);

		assert!(too_many.is_err());
		assert!(none.is_err());
	}
}
