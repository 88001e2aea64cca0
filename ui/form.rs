use crate::error::{element_by_id, UiError};
use cancellation_form::FormValue;
use wasm_bindgen::JsCast;

#[derive(Clone)]
pub struct PredictionForm {
	element: web_sys::HtmlFormElement,
}

impl PredictionForm {
	pub fn from_id(document: &web_sys::Document, id: &str) -> Result<PredictionForm, UiError> {
		let element = element_by_id(document, id)?
			.dyn_into::<web_sys::HtmlFormElement>()
			.map_err(|_| UiError::WrongElement {
				id: id.to_owned(),
				expected: "form",
			})?;
		Ok(PredictionForm { element })
	}

	pub fn element(&self) -> &web_sys::HtmlFormElement {
		&self.element
	}

	/// The JSON in the form's `data-props` attribute, if any.
	pub fn props(&self) -> Option<String> {
		self.element.dataset().get("props")
	}

	/// Collect the form data set the way the browser does when it submits the form, without the submitter.
	pub fn entries(&self) -> Vec<(String, FormValue)> {
		let mut entries = Vec::new();
		let elements = self.element.elements();
		for index in 0..elements.length() {
			let element = match elements.item(index) {
				Some(element) => element,
				None => continue,
			};
			// `:disabled` also matches controls inside a disabled fieldset.
			if element.matches(":disabled").unwrap_or(false) {
				continue;
			}
			if let Some(input) = element.dyn_ref::<web_sys::HtmlInputElement>() {
				push_input_entries(&mut entries, input);
			} else if let Some(select) = element.dyn_ref::<web_sys::HtmlSelectElement>() {
				let name = select.name();
				if name.is_empty() {
					continue;
				}
				let options = select.selected_options();
				for option_index in 0..options.length() {
					if let Some(option) = options
						.item(option_index)
						.and_then(|option| option.dyn_into::<web_sys::HtmlOptionElement>().ok())
					{
						entries.push((name.clone(), FormValue::Text(option.value())));
					}
				}
			} else if let Some(text_area) = element.dyn_ref::<web_sys::HtmlTextAreaElement>() {
				let name = text_area.name();
				if name.is_empty() {
					continue;
				}
				entries.push((name, FormValue::Text(text_area.value())));
			}
		}
		entries
	}
}

fn push_input_entries(entries: &mut Vec<(String, FormValue)>, input: &web_sys::HtmlInputElement) {
	let name = input.name();
	if name.is_empty() {
		return;
	}
	match input.type_().to_ascii_lowercase().as_str() {
		"submit" | "button" | "reset" | "image" => {}
		"checkbox" | "radio" => {
			if input.checked() {
				entries.push((name, FormValue::Text(input.value())));
			}
		}
		"file" => {
			let files = input.files();
			let count = files.as_ref().map(|files| files.length()).unwrap_or(0);
			// An empty file input still submits one nameless file.
			if count == 0 {
				entries.push((
					name,
					FormValue::File {
						name: String::new(),
					},
				));
				return;
			}
			if let Some(files) = files {
				for file_index in 0..count {
					if let Some(file) = files.item(file_index) {
						entries.push((name.clone(), FormValue::File { name: file.name() }));
					}
				}
			}
		}
		_ => entries.push((name, FormValue::Text(input.value()))),
	}
}
