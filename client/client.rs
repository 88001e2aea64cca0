use cancellation_form::{Config, Controller};
use cancellation_ui as ui;
use log::{error, info, warn, LevelFilter};
use std::rc::Rc;
use wasm_bindgen::{prelude::*, JsCast};

const FORM_ID: &str = "predictionForm";
const SUBMIT_BUTTON_ID: &str = "submitBtn";
const RESULT_ID: &str = "result";

type PageController = Controller<ui::SubmitButton, ui::ResultElement, ui::FetchTransport>;

#[wasm_bindgen(start)]
pub fn start() {
	console_error_panic_hook::set_once();
	ui::init_logger(if cfg!(debug_assertions) {
		LevelFilter::Debug
	} else {
		LevelFilter::Info
	});
	let document = match ui::document() {
		Ok(document) => document,
		Err(error) => {
			error!("unable to start: {}", error);
			return;
		}
	};
	if document.ready_state() != "loading" {
		boot();
		return;
	}
	let callback_fn = Closure::wrap(Box::new(boot) as Box<dyn FnMut()>);
	if let Err(error) = document
		.add_event_listener_with_callback("DOMContentLoaded", callback_fn.as_ref().unchecked_ref())
	{
		error!("unable to wait for the document: {:?}", error);
	}
	callback_fn.forget();
}

fn boot() {
	if let Err(error) = bind_prediction_form() {
		error!("unable to bind the prediction form: {}", error);
	}
}

fn bind_prediction_form() -> Result<(), ui::UiError> {
	let document = ui::document()?;
	let form = ui::PredictionForm::from_id(&document, FORM_ID)?;
	let config = match form.props() {
		Some(props) => Config::from_props(&props).unwrap_or_else(|error| {
			warn!("{}, using the default config", error);
			Config::default()
		}),
		None => Config::default(),
	};
	let controller: Rc<PageController> = Rc::new(Controller::new(
		config,
		ui::SubmitButton::from_id(&document, SUBMIT_BUTTON_ID)?,
		ui::ResultElement::from_id(&document, RESULT_ID)?,
		ui::FetchTransport::for_page()?,
	));
	let form_for_closure = form.clone();
	let callback_fn = Closure::<dyn Fn(_)>::wrap(Box::new(move |event: web_sys::Event| {
		event.prevent_default();
		// Dispatch synchronously so the button is disabled before the handler returns.
		let pending = match controller.begin(form_for_closure.entries()) {
			Some(pending) => pending,
			None => return,
		};
		let controller = controller.clone();
		wasm_bindgen_futures::spawn_local(async move {
			let response = pending.await;
			controller.complete(response);
		});
	}));
	form.element()
		.add_event_listener_with_callback("submit", callback_fn.as_ref().unchecked_ref())?;
	callback_fn.forget();
	info!("prediction form ready");
	Ok(())
}
