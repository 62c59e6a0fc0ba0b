use serde::{ser::SerializeMap, Serialize, Serializer};
use std::{iter::FromIterator, ops::Index, slice::Iter};

/// A single named capture taken from a matched path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionalParameter {
	pub name: String,
	pub value: String,
	/// 1-based index of the capture group this parameter is bound from.
	pub pos: usize,
}

impl PositionalParameter {
	pub fn new(name: impl Into<String>, value: impl Into<String>, pos: usize) -> Self {
		Self {
			name: name.into(),
			value: value.into(),
			pos,
		}
	}

	pub(crate) fn declare(name: &str, pos: usize) -> Self {
		Self::new(name, String::new(), pos)
	}

	pub fn is_empty(&self) -> bool {
		self.name.is_empty() && self.value.is_empty()
	}

	fn is_serializable(&self) -> bool {
		!self.is_empty() && !self.name.is_empty()
	}
}

/// Ordered parameters of a structured url, in pattern declaration order.
///
/// Serializes to an object of `name: value` pairs. Empty and unnamed entries
/// are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters(Vec<PositionalParameter>);

impl Parameters {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push(&mut self, param: PositionalParameter) {
		self.0.push(param);
	}

	/// Value of the first parameter with the given name.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.0
			.iter()
			.find(|param| param.name == name)
			.map(|param| param.value.as_str())
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> Iter<'_, PositionalParameter> {
		self.0.iter()
	}
}

impl Index<usize> for Parameters {
	type Output = PositionalParameter;

	fn index(&self, index: usize) -> &Self::Output {
		&self.0[index]
	}
}

impl<'a> IntoIterator for &'a Parameters {
	type Item = &'a PositionalParameter;
	type IntoIter = Iter<'a, PositionalParameter>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}

impl FromIterator<PositionalParameter> for Parameters {
	fn from_iter<T: IntoIterator<Item = PositionalParameter>>(iter: T) -> Self {
		Self(iter.into_iter().collect())
	}
}

impl Serialize for Parameters {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let kept = self.0.iter().filter(|param| param.is_serializable());
		let mut map = serializer.serialize_map(None)?;
		for param in kept {
			map.serialize_entry(&param.name, &param.value)?;
		}
		map.end()
	}
}

#[cfg(test)]
mod test {
	use super::{Parameters, PositionalParameter};

	#[test]
	fn empty_means_no_name_and_no_value() {
		assert!(PositionalParameter::default().is_empty());
		assert!(!PositionalParameter::new("", "x", 1).is_empty());
		assert!(!PositionalParameter::new("id", "", 1).is_empty());
	}

	#[test]
	fn serializes_in_declaration_order() {
		let params: Parameters = vec![
			PositionalParameter::new("lang", "en", 1),
			PositionalParameter::new("id", "418", 2),
		]
		.into_iter()
		.collect();

		assert_eq!(
			serde_json::to_string(&params).unwrap(),
			r#"{"lang":"en","id":"418"}"#
		);
	}

	#[test]
	fn skips_empty_and_unnamed_entries() {
		let params: Parameters = vec![
			PositionalParameter::default(),
			PositionalParameter::new("", "orphan", 2),
			PositionalParameter::new("id", "7", 3),
		]
		.into_iter()
		.collect();

		assert_eq!(serde_json::to_string(&params).unwrap(), r#"{"id":"7"}"#);
		assert_eq!(serde_json::to_string(&Parameters::new()).unwrap(), "{}");
	}

	#[test]
	fn escapes_values() {
		let params: Parameters = vec![PositionalParameter::new("q", "a\"b", 1)]
			.into_iter()
			.collect();

		assert_eq!(serde_json::to_string(&params).unwrap(), r#"{"q":"a\"b"}"#);
	}

	#[test]
	fn looks_up_by_name() {
		let params: Parameters = vec![PositionalParameter::new("id", "418", 1)]
			.into_iter()
			.collect();

		assert_eq!(params.get("id"), Some("418"));
		assert_eq!(params.get("lang"), None);
		assert_eq!(params[0].pos, 1);
	}
}
