use crate::{
	config::Config,
	error::SubmitError,
	payload::{FormValue, Payload},
	response::Outcome,
	transport::{Request, Response, Transport, TransportError},
};
use futures::{future::LocalBoxFuture, FutureExt};
use log::{debug, info, warn};
use std::cell::Cell;

/// The form's submit button.
pub trait SubmitControl {
	fn set_disabled(&self, disabled: bool);
	fn set_label(&self, label: &str);
}

/// The element that shows the outcome of a submission.
pub trait ResultDisplay {
	fn hide(&self);
	fn show(&self, outcome: &Outcome);
	fn scroll_into_view(&self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitState {
	Idle,
	Submitting,
}

pub type PendingRequest = LocalBoxFuture<'static, Result<Response, TransportError>>;

pub struct Controller<C, D, T> {
	config: Config,
	control: C,
	display: D,
	transport: T,
	state: Cell<SubmitState>,
}

impl<C, D, T> Controller<C, D, T>
where
	C: SubmitControl,
	D: ResultDisplay,
	T: Transport,
{
	pub fn new(config: Config, control: C, display: D, transport: T) -> Controller<C, D, T> {
		Controller {
			config,
			control,
			display,
			transport,
			state: Cell::new(SubmitState::Idle),
		}
	}

	pub fn config(&self) -> &Config {
		&self.config
	}

	pub fn control(&self) -> &C {
		&self.control
	}

	pub fn display(&self) -> &D {
		&self.display
	}

	pub fn state(&self) -> SubmitState {
		self.state.get()
	}

	/// Move to the submitting state and dispatch the request. Everything up to the dispatch happens before this returns. Returns `None` if a submission is already in flight.
	pub fn begin<I, K, V>(&self, entries: I) -> Option<PendingRequest>
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<FormValue>,
	{
		if self.state.get() == SubmitState::Submitting {
			warn!("ignoring submit while a prediction request is in flight");
			return None;
		}
		self.state.set(SubmitState::Submitting);
		self.control.set_disabled(true);
		self.control.set_label(&self.config.busy_label);
		self.display.hide();
		let payload = Payload::from_entries(entries);
		debug!("posting {} fields to {}", payload.len(), self.config.endpoint);
		let request = Request::post_json(&self.config.endpoint, &payload);
		Some(self.transport.send(request))
	}

	/// Render the settled request and return to the idle state.
	pub fn complete(&self, response: Result<Response, TransportError>) -> Outcome {
		let outcome = match response
			.map_err(SubmitError::from)
			.and_then(|response| Outcome::from_response(&response))
		{
			Ok(outcome) => {
				info!("prediction received: {}", outcome.text);
				outcome
			}
			Err(error) => {
				warn!("prediction request failed: {:?}", error);
				Outcome::from_error(&error)
			}
		};
		self.display.show(&outcome);
		self.control.set_disabled(false);
		self.control.set_label(&self.config.submit_label);
		self.display.scroll_into_view();
		self.state.set(SubmitState::Idle);
		debug!("submit control idle");
		outcome
	}

	/// Run a whole submission. The submit control is disabled before this returns, not when the future is first polled.
	pub fn submit<I, K, V>(&self, entries: I) -> LocalBoxFuture<'_, Option<Outcome>>
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<FormValue>,
	{
		let pending = self.begin(entries);
		self.settle(pending)
	}

	fn settle(&self, pending: Option<PendingRequest>) -> LocalBoxFuture<'_, Option<Outcome>> {
		async move {
			match pending {
				Some(pending) => Some(self.complete(pending.await)),
				None => None,
			}
		}
		.boxed_local()
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::{
		config::{DEFAULT_BUSY_LABEL, DEFAULT_SUBMIT_LABEL},
		response::ResultLevel,
	};
	use futures::{channel::oneshot, executor::block_on, FutureExt};
	use std::cell::RefCell;

	struct FakeControl {
		disabled: Cell<bool>,
		label: RefCell<String>,
	}

	impl FakeControl {
		fn new() -> FakeControl {
			FakeControl {
				disabled: Cell::new(false),
				label: RefCell::new(DEFAULT_SUBMIT_LABEL.to_owned()),
			}
		}
	}

	impl SubmitControl for FakeControl {
		fn set_disabled(&self, disabled: bool) {
			self.disabled.set(disabled);
		}
		fn set_label(&self, label: &str) {
			*self.label.borrow_mut() = label.to_owned();
		}
	}

	#[derive(Default)]
	struct FakeDisplay {
		hidden: Cell<bool>,
		outcome: RefCell<Option<Outcome>>,
		scrolls: Cell<usize>,
	}

	impl ResultDisplay for FakeDisplay {
		fn hide(&self) {
			self.hidden.set(true);
		}
		fn show(&self, outcome: &Outcome) {
			self.hidden.set(false);
			self.outcome.replace(Some(outcome.clone()));
		}
		fn scroll_into_view(&self) {
			self.scrolls.set(self.scrolls.get() + 1);
		}
	}

	enum Reply {
		Ready(Result<Response, TransportError>),
		Never,
		Channel(RefCell<Option<oneshot::Receiver<Result<Response, TransportError>>>>),
	}

	struct FakeTransport {
		reply: Reply,
		requests: RefCell<Vec<Request>>,
	}

	impl FakeTransport {
		fn new(reply: Reply) -> FakeTransport {
			FakeTransport {
				reply,
				requests: RefCell::new(Vec::new()),
			}
		}
	}

	impl Transport for FakeTransport {
		fn send(&self, request: Request) -> PendingRequest {
			self.requests.borrow_mut().push(request);
			match &self.reply {
				Reply::Ready(reply) => futures::future::ready(reply.clone()).boxed_local(),
				Reply::Never => {
					futures::future::pending::<Result<Response, TransportError>>().boxed_local()
				}
				Reply::Channel(receiver) => {
					let receiver = receiver.borrow_mut().take().unwrap();
					receiver
						.map(|reply| reply.unwrap_or_else(|_| Err(TransportError::new("dropped"))))
						.boxed_local()
				}
			}
		}
	}

	type TestController = Controller<FakeControl, FakeDisplay, FakeTransport>;

	fn controller(reply: Reply) -> TestController {
		Controller::new(
			Config::default(),
			FakeControl::new(),
			FakeDisplay::default(),
			FakeTransport::new(reply),
		)
	}

	fn json_response(status: u16, body: serde_json::Value) -> Reply {
		Reply::Ready(Ok(Response {
			status,
			body: body.to_string(),
		}))
	}

	fn booking() -> Vec<(&'static str, &'static str)> {
		vec![
			("hotel", "City Hotel"),
			("lead_time", "45"),
			("adr", "abc"),
			("deposit_type", "No Deposit"),
		]
	}

	fn assert_idle(controller: &TestController) {
		assert_eq!(controller.state(), SubmitState::Idle);
		assert!(!controller.control().disabled.get());
		assert_eq!(*controller.control().label.borrow(), DEFAULT_SUBMIT_LABEL);
		assert!(!controller.display().hidden.get());
		assert_eq!(controller.display().scrolls.get(), 1);
	}

	#[test]
	fn test_request() {
		let controller = controller(json_response(
			200,
			serde_json::json!({ "prediction": 0, "result": "Low risk" }),
		));
		block_on(controller.submit(booking()));
		let requests = controller.transport.requests.borrow();
		assert_eq!(requests.len(), 1);
		assert_eq!(requests[0].method, "POST");
		assert_eq!(requests[0].endpoint, "/predict");
		assert_eq!(requests[0].content_type, "application/json");
		assert_eq!(
			serde_json::from_str::<serde_json::Value>(&requests[0].body).unwrap(),
			serde_json::json!({
				"hotel": "City Hotel",
				"lead_time": 45,
				"adr": 0,
				"deposit_type": "No Deposit",
			})
		);
	}

	#[test]
	fn test_disabled_before_the_request_is_awaited() {
		let controller = controller(Reply::Never);
		let submission = controller.submit(booking());
		assert_eq!(controller.state(), SubmitState::Submitting);
		assert!(controller.control().disabled.get());
		assert_eq!(*controller.control().label.borrow(), DEFAULT_BUSY_LABEL);
		assert!(controller.display().hidden.get());
		assert_eq!(controller.transport.requests.borrow().len(), 1);
		assert!(submission.now_or_never().is_none());
		assert!(controller.control().disabled.get());
		assert_eq!(controller.state(), SubmitState::Submitting);
		assert_eq!(controller.display().scrolls.get(), 0);
	}

	#[test]
	fn test_reenabled_when_the_request_settles() {
		let (sender, receiver) = oneshot::channel();
		let controller = controller(Reply::Channel(RefCell::new(Some(receiver))));
		let mut submission = controller.submit(booking());
		assert!((&mut submission).now_or_never().is_none());
		assert!(controller.control().disabled.get());
		sender
			.send(Ok(Response {
				status: 200,
				body: r#"{"prediction": 1, "result": "High risk"}"#.to_owned(),
			}))
			.unwrap();
		let outcome = block_on(submission).unwrap();
		assert_eq!(outcome.text, "❌ High risk");
		assert_idle(&controller);
	}

	#[test]
	fn test_canceled() {
		let controller = controller(json_response(
			200,
			serde_json::json!({ "prediction": 1, "result": "High risk" }),
		));
		let outcome = block_on(controller.submit(booking())).unwrap();
		assert_eq!(outcome.level, ResultLevel::Canceled);
		assert_eq!(outcome.text, "❌ High risk");
		assert_eq!(*controller.display().outcome.borrow(), Some(outcome));
		assert_idle(&controller);
	}

	#[test]
	fn test_success() {
		let controller = controller(json_response(
			200,
			serde_json::json!({ "prediction": 0, "result": "Low risk" }),
		));
		let outcome = block_on(controller.submit(booking())).unwrap();
		assert_eq!(outcome.level, ResultLevel::Success);
		assert_eq!(outcome.text, "✅ Low risk");
		assert_idle(&controller);
	}

	#[test]
	fn test_application_error() {
		let controller = controller(json_response(
			400,
			serde_json::json!({ "error": "Invalid input" }),
		));
		let outcome = block_on(controller.submit(booking())).unwrap();
		assert_eq!(outcome.level, ResultLevel::Error);
		assert_eq!(outcome.text, "Error: Invalid input");
		assert_idle(&controller);
	}

	#[test]
	fn test_transport_error() {
		let controller = controller(Reply::Ready(Err(TransportError::new("Network down"))));
		let outcome = block_on(controller.submit(booking())).unwrap();
		assert_eq!(outcome.level, ResultLevel::Error);
		assert_eq!(outcome.text, "Error: Network down");
		assert_idle(&controller);
	}

	#[test]
	fn test_decode_error() {
		let controller = controller(Reply::Ready(Ok(Response {
			status: 200,
			body: "<!doctype html>".to_owned(),
		})));
		let outcome = block_on(controller.submit(booking())).unwrap();
		assert_eq!(outcome.level, ResultLevel::Error);
		assert!(outcome.text.starts_with("Error: "));
		assert_idle(&controller);
	}

	#[test]
	fn test_submit_while_submitting_is_ignored() {
		let controller = controller(Reply::Never);
		let first = controller.begin(booking());
		assert!(first.is_some());
		assert!(controller.begin(booking()).is_none());
		assert!(block_on(controller.submit(booking())).is_none());
		assert_eq!(controller.transport.requests.borrow().len(), 1);
		assert_eq!(controller.state(), SubmitState::Submitting);
	}

	#[test]
	fn test_resubmit_after_settling() {
		let controller = controller(json_response(
			200,
			serde_json::json!({ "prediction": 0, "result": "Low risk" }),
		));
		block_on(controller.submit(booking())).unwrap();
		block_on(controller.submit(booking())).unwrap();
		assert_eq!(controller.transport.requests.borrow().len(), 2);
		assert_eq!(controller.display().scrolls.get(), 2);
		assert_eq!(controller.state(), SubmitState::Idle);
	}

	#[test]
	fn test_configured_labels_and_endpoint() {
		let config = Config::from_props(
			r#"{"endpoint": "/api/predict", "submitLabel": "Go", "busyLabel": "Wait"}"#,
		)
		.unwrap();
		let controller = Controller::new(
			config,
			FakeControl::new(),
			FakeDisplay::default(),
			FakeTransport::new(Reply::Ready(Err(TransportError::new("offline")))),
		);
		let pending = controller.begin(booking()).unwrap();
		assert_eq!(*controller.control().label.borrow(), "Wait");
		controller.complete(block_on(pending));
		assert_eq!(*controller.control().label.borrow(), "Go");
		assert_eq!(
			controller.transport.requests.borrow()[0].endpoint,
			"/api/predict"
		);
	}
}
