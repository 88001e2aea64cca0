use derive_more::{Display, Error};
use wasm_bindgen::JsValue;

#[derive(Debug, Display, Error)]
pub enum UiError {
	#[display(fmt = "no window")]
	NoWindow,
	#[display(fmt = "no document")]
	NoDocument,
	#[display(fmt = "missing element #{}", id)]
	MissingElement { id: String },
	#[display(fmt = "element #{} is not a {}", id, expected)]
	WrongElement { id: String, expected: &'static str },
	#[display(fmt = "invalid page url: {}", source)]
	PageUrl { source: url::ParseError },
	#[display(fmt = "{}", message)]
	Js { message: String },
}

impl From<JsValue> for UiError {
	fn from(value: JsValue) -> UiError {
		let message = value
			.as_string()
			.unwrap_or_else(|| format!("{:?}", value));
		UiError::Js { message }
	}
}

pub(crate) fn element_by_id(
	document: &web_sys::Document,
	id: &str,
) -> Result<web_sys::Element, UiError> {
	document
		.get_element_by_id(id)
		.ok_or_else(|| UiError::MissingElement { id: id.to_owned() })
}

#[test]
fn test_display() {
	let error = UiError::MissingElement {
		id: "submitBtn".to_owned(),
	};
	assert_eq!(error.to_string(), "missing element #submitBtn");
	let error = UiError::WrongElement {
		id: "predictionForm".to_owned(),
		expected: "form",
	};
	assert_eq!(error.to_string(), "element #predictionForm is not a form");
}
