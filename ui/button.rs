use crate::error::{element_by_id, UiError};
use cancellation_form::SubmitControl;
use wasm_bindgen::JsCast;

/// The label goes on this child when the button has one, so icons next to it survive.
pub const BUTTON_TEXT_SELECTOR: &str = ".button-text";

pub struct SubmitButton {
	element: web_sys::HtmlButtonElement,
}

impl SubmitButton {
	pub fn from_id(document: &web_sys::Document, id: &str) -> Result<SubmitButton, UiError> {
		let element = element_by_id(document, id)?
			.dyn_into::<web_sys::HtmlButtonElement>()
			.map_err(|_| UiError::WrongElement {
				id: id.to_owned(),
				expected: "button",
			})?;
		Ok(SubmitButton { element })
	}
}

impl SubmitControl for SubmitButton {
	fn set_disabled(&self, disabled: bool) {
		self.element.set_disabled(disabled);
	}

	fn set_label(&self, label: &str) {
		match self.element.query_selector(BUTTON_TEXT_SELECTOR) {
			Ok(Some(button_text)) => button_text.set_text_content(Some(label)),
			_ => self.element.set_text_content(Some(label)),
		}
	}
}
