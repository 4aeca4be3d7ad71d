use serde::{Deserialize as _, Deserializer, Serializer};
use time::{Date, format_description::FormatItem, macros::format_description};

const ISO_DATE: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

pub fn serialize<S>(value: &Option<Date>, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	match value {
		Some(value) => {
			let formatted = value.format(&ISO_DATE).map_err(serde::ser::Error::custom)?;

			serializer.serialize_str(&formatted)
		},
		None => serializer.serialize_none(),
	}
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Date>, D::Error>
where
	D: Deserializer<'de>,
{
	let raw = Option::<String>::deserialize(deserializer)?;

	match raw {
		Some(value) => Date::parse(&value, &ISO_DATE).map(Some).map_err(serde::de::Error::custom),
		None => Ok(None),
	}
}
