//! Records: the logical view of a table row.

use core::{
	borrow::Borrow,
	fmt::{self, Debug, Formatter},
	iter::FromIterator,
};
use hashbrown::{hash_map, HashMap};

/// A flat mapping from field name to trimmed field value.
///
/// Records are projections of a row's live state and are never cached by the table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record(HashMap<String, String>);
impl Record {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Reads the value of `field`, if the record has it.
	pub fn get<Q: ?Sized>(&self, field: &Q) -> Option<&str>
	where
		String: Borrow<Q>,
		Q: Eq + core::hash::Hash,
	{
		self.0.get(field).map(String::as_str)
	}

	/// Reads the value of `field`, treating a missing field as empty.
	#[must_use]
	pub fn value(&self, field: &str) -> &str {
		self.get(field).unwrap_or("")
	}

	/// Sets `field` to `value` as-is, returning the previous value.
	pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) -> Option<String> {
		self.0.insert(field.into(), value.into())
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Whether the record has no fields at all.
	///
	/// This is unrelated to row emptiness, see [`Record::matches_defaults`].
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	/// `true` iff every field of `defaults` (except `identity_field`) has an identical value in `self`.
	///
	/// Fields only present in `self` are ignored. Missing fields compare as `""`.
	#[must_use]
	pub fn matches_defaults(&self, defaults: &Record, identity_field: Option<&str>) -> bool {
		defaults
			.fields()
			.filter(|&(field, _)| Some(field) != identity_field)
			.all(|(field, default)| self.value(field) == default)
	}

	/// A [`Debug`] view that only shows field values with the `dangerous-logging` feature.
	pub(crate) fn redacted(&self) -> Redacted<'_> {
		Redacted(self)
	}
}

impl FromIterator<(String, String)> for Record {
	fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
		Self(iter.into_iter().collect())
	}
}

impl<'a> FromIterator<(&'a str, &'a str)> for Record {
	fn from_iter<T: IntoIterator<Item = (&'a str, &'a str)>>(iter: T) -> Self {
		iter.into_iter().map(|(k, v)| (k.to_owned(), v.to_owned())).collect()
	}
}

impl IntoIterator for Record {
	type Item = (String, String);
	type IntoIter = hash_map::IntoIter<String, String>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

/// Builds a [`Record`] from raw `(name, value)` field readings in document order.
///
/// Values are trimmed. When a name repeats, the later field wins.
pub fn serialize_fields<N, V>(fields: impl IntoIterator<Item = (N, V)>) -> Record
where
	N: Into<String>,
	V: AsRef<str>,
{
	fields.into_iter().map(|(name, value)| (name.into(), value.as_ref().trim().to_owned())).collect()
}

pub(crate) struct Redacted<'a>(&'a Record);
impl Debug for Redacted<'_> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		if cfg!(feature = "dangerous-logging") {
			Debug::fmt(self.0, f)
		} else {
			write!(f, "Record {{ {} field(s) }}", self.0.len())
		}
	}
}
