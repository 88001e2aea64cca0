use crate::payload::Payload;
use derive_more::{Display, Error};
use futures::future::LocalBoxFuture;

pub const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Clone, Debug, PartialEq)]
pub struct Request {
	pub method: &'static str,
	pub endpoint: String,
	pub content_type: &'static str,
	pub body: String,
}

impl Request {
	pub fn post_json(endpoint: &str, payload: &Payload) -> Request {
		Request {
			method: "POST",
			endpoint: endpoint.to_owned(),
			content_type: JSON_CONTENT_TYPE,
			body: payload.to_json(),
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Response {
	pub status: u16,
	pub body: String,
}

impl Response {
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// The request could not be completed, for example because the network is down.
#[derive(Clone, Debug, Display, Error, PartialEq)]
#[display(fmt = "{}", message)]
pub struct TransportError {
	pub message: String,
}

impl TransportError {
	pub fn new(message: impl Into<String>) -> TransportError {
		TransportError {
			message: message.into(),
		}
	}
}

/// Sends a prediction request. The returned future is not `Send` because the browser transport is bound to the page's event loop.
pub trait Transport {
	fn send(&self, request: Request) -> LocalBoxFuture<'static, Result<Response, TransportError>>;
}

#[test]
fn test_post_json() {
	let payload = Payload::from_entries(vec![("lead_time", "30"), ("hotel", "City Hotel")]);
	let request = Request::post_json("/predict", &payload);
	assert_eq!(request.method, "POST");
	assert_eq!(request.endpoint, "/predict");
	assert_eq!(request.content_type, "application/json");
	assert_eq!(
		serde_json::from_str::<serde_json::Value>(&request.body).unwrap(),
		serde_json::json!({ "lead_time": 30, "hotel": "City Hotel" })
	);
}

#[test]
fn test_is_success() {
	let response = |status| Response {
		status,
		body: String::new(),
	};
	assert!(response(200).is_success());
	assert!(response(204).is_success());
	assert!(!response(199).is_success());
	assert!(!response(302).is_success());
	assert!(!response(400).is_success());
	assert!(!response(500).is_success());
}
