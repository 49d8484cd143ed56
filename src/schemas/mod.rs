use std::sync::LazyLock;

use regex::Regex;
use serde::de::Visitor;

pub mod auth;
pub mod booking;
pub mod building;
pub mod calendar;
pub mod document;
pub mod facility;
pub mod faculty;
pub mod maintenance;
pub mod pagination;
pub mod room;
pub mod room_category;
pub mod usage;
pub mod user;

/// Matches any text containing at least one non whitespace character
pub(crate) static NOT_BLANK_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\S").unwrap_or_else(|e| panic!("{e}")));

/// A visitor for bounded u32 values.
struct BoundedU32Visitor {
	start: u32,
	end:   u32,
}

impl Visitor<'_> for BoundedU32Visitor {
	type Value = u32;

	/// The expected format for the value.
	fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "a number between {} and {}", self.start, self.end)
	}

	/// Check if the value is within the specified bounds.
	fn visit_u32<E>(self, v: u32) -> Result<Self::Value, E>
	where
		E: serde::de::Error,
	{
		if (self.start..=self.end).contains(&v) {
			Ok(v)
		} else {
			Err(E::custom(format_args!(
				"invalid value: {v}, expected a number between {} and {}",
				self.start, self.end,
			)))
		}
	}

	fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
	where
		E: serde::de::Error,
	{
		let v = u32::try_from(v).map_err(|_| {
			E::custom(format_args!(
				"invalid value: {v}, expected a number between {} and {}",
				self.start, self.end,
			))
		})?;

		self.visit_u32(v)
	}
}

/// Serialize an `Option<Option<T>>` value.
/// Used for dynamic relationship includes in the API.
pub fn ser_includes<S, T>(
	value: &Option<Option<T>>,
	serializer: S,
) -> Result<S::Ok, S::Error>
where
	S: serde::Serializer,
	T: serde::Serialize,
{
	match value {
		None => serializer.serialize_none(),
		Some(None) => serializer.serialize_some(&None::<T>),
		Some(Some(v)) => v.serialize(serializer),
	}
}
