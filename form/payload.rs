use crate::fields::{coerce, field_class, FieldClass};

/// A value in a form data set.
#[derive(Clone, Debug, PartialEq)]
pub enum FormValue {
	Text(String),
	File { name: String },
}

impl From<&str> for FormValue {
	fn from(value: &str) -> FormValue {
		FormValue::Text(value.to_owned())
	}
}

impl From<String> for FormValue {
	fn from(value: String) -> FormValue {
		FormValue::Text(value)
	}
}

/// The JSON object sent to the prediction endpoint.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct Payload(pub serde_json::Map<String, serde_json::Value>);

impl Payload {
	/// Build the payload from form data set entries. When a name appears more than once the last entry wins.
	pub fn from_entries<I, K, V>(entries: I) -> Payload
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<FormValue>,
	{
		let mut map = serde_json::Map::new();
		for (name, value) in entries {
			let name = name.into();
			let value = match value.into() {
				FormValue::Text(text) => coerce(&name, &text),
				// Files never parse as numbers and serialize as an empty object.
				FormValue::File { .. } => match field_class(&name) {
					FieldClass::Integer | FieldClass::Float => serde_json::Value::from(0),
					FieldClass::String => serde_json::Value::Object(serde_json::Map::new()),
				},
			};
			map.insert(name, value);
		}
		Payload(map)
	}

	pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
		self.0.get(name)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn to_json(&self) -> String {
		serde_json::Value::Object(self.0.clone()).to_string()
	}
}

#[test]
fn test_payload_from_booking_form() {
	let payload = Payload::from_entries(vec![
		("hotel", "Resort Hotel"),
		("lead_time", "120"),
		("adults", "2"),
		("children", ""),
		("adr", "95.5"),
		("agent", "abc"),
		("country", "PRT"),
	]);
	assert_eq!(payload.len(), 7);
	assert_eq!(
		serde_json::to_value(&payload).unwrap(),
		serde_json::json!({
			"hotel": "Resort Hotel",
			"lead_time": 120,
			"adults": 2,
			"children": 0,
			"adr": 95.5,
			"agent": 0,
			"country": "PRT",
		})
	);
}

#[test]
fn test_every_entry_is_present() {
	let payload = Payload::from_entries(vec![("a", ""), ("b", "x"), ("babies", "")]);
	assert!(payload.get("a").is_some());
	assert!(payload.get("b").is_some());
	assert_eq!(payload.get("babies"), Some(&serde_json::json!(0)));
}

#[test]
fn test_last_entry_wins() {
	let payload = Payload::from_entries(vec![("meal", "BB"), ("meal", "HB")]);
	assert_eq!(payload.len(), 1);
	assert_eq!(payload.get("meal"), Some(&serde_json::json!("HB")));
}

#[test]
fn test_file_values() {
	let entries = vec![
		(
			"attachment".to_owned(),
			FormValue::File {
				name: "booking.pdf".to_owned(),
			},
		),
		(
			"lead_time".to_owned(),
			FormValue::File {
				name: "12".to_owned(),
			},
		),
	];
	let payload = Payload::from_entries(entries);
	assert_eq!(payload.get("attachment"), Some(&serde_json::json!({})));
	assert_eq!(payload.get("lead_time"), Some(&serde_json::json!(0)));
}

#[test]
fn test_to_json() {
	let payload = Payload::from_entries(vec![("adults", "2")]);
	assert_eq!(payload.to_json(), r#"{"adults":2}"#);
}

#[test]
fn test_to_json_keeps_form_order() {
	let payload = Payload::from_entries(vec![
		("lead_time", "30"),
		("hotel", "City Hotel"),
		("adr", "80.5"),
		("lead_time", "31"),
	]);
	assert_eq!(
		payload.to_json(),
		r#"{"lead_time":31,"hotel":"City Hotel","adr":80.5}"#
	);
}
