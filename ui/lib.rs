/*!
Browser implementations of the traits in `cancellation_form`, built on `web_sys`.
*/

mod button;
mod error;
mod fetch;
mod form;
mod logger;
mod result;

pub use self::button::*;
pub use self::error::*;
pub use self::fetch::*;
pub use self::form::*;
pub use self::logger::*;
pub use self::result::*;

pub fn document() -> Result<web_sys::Document, UiError> {
	web_sys::window()
		.ok_or(UiError::NoWindow)?
		.document()
		.ok_or(UiError::NoDocument)
}
