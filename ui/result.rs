use crate::error::{element_by_id, UiError};
use cancellation_form::{Outcome, ResultDisplay};
use log::warn;

pub const HIDDEN_CLASS: &str = "hidden";

pub struct ResultElement {
	element: web_sys::Element,
}

impl ResultElement {
	pub fn from_id(document: &web_sys::Document, id: &str) -> Result<ResultElement, UiError> {
		let element = element_by_id(document, id)?;
		Ok(ResultElement { element })
	}
}

impl ResultDisplay for ResultElement {
	fn hide(&self) {
		if let Err(error) = self.element.class_list().add_1(HIDDEN_CLASS) {
			warn!("unable to hide the result: {:?}", error);
		}
	}

	fn show(&self, outcome: &Outcome) {
		// Setting the class name drops `hidden` along with the previous level.
		self.element.set_class_name(outcome.level.class_name());
		self.element.set_text_content(Some(&outcome.text));
	}

	fn scroll_into_view(&self) {
		let mut options = web_sys::ScrollIntoViewOptions::new();
		options
			.behavior(web_sys::ScrollBehavior::Smooth)
			.block(web_sys::ScrollLogicalPosition::Nearest);
		self.element
			.scroll_into_view_with_scroll_into_view_options(&options);
	}
}
