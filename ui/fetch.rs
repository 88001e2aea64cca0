use crate::error::UiError;
use cancellation_form::{PendingRequest, Request, Response, Transport, TransportError};
use futures::FutureExt;
use url::Url;

/// Sends prediction requests with `reqwest`, which uses `fetch` on wasm32.
pub struct FetchTransport {
	client: reqwest::Client,
	base: Url,
}

impl FetchTransport {
	pub fn new(base: Url) -> FetchTransport {
		FetchTransport {
			client: reqwest::Client::new(),
			base,
		}
	}

	/// Create a transport that resolves endpoints against the current page URL.
	pub fn for_page() -> Result<FetchTransport, UiError> {
		let window = web_sys::window().ok_or(UiError::NoWindow)?;
		let href = window.location().href()?;
		let base = Url::parse(&href).map_err(|source| UiError::PageUrl { source })?;
		Ok(FetchTransport::new(base))
	}

	pub fn base(&self) -> &Url {
		&self.base
	}
}

pub fn resolve_endpoint(base: &Url, endpoint: &str) -> Result<Url, TransportError> {
	base.join(endpoint)
		.map_err(|error| TransportError::new(format!("invalid endpoint {}: {}", endpoint, error)))
}

impl Transport for FetchTransport {
	fn send(&self, request: Request) -> PendingRequest {
		let client = self.client.clone();
		let url = resolve_endpoint(&self.base, &request.endpoint);
		async move {
			let url = url?;
			let method = reqwest::Method::from_bytes(request.method.as_bytes())
				.map_err(|error| TransportError::new(error.to_string()))?;
			let response = client
				.request(method, url)
				.header(reqwest::header::CONTENT_TYPE, request.content_type)
				.body(request.body)
				.send()
				.await
				.map_err(|error| TransportError::new(error.to_string()))?;
			let status = response.status().as_u16();
			let body = response
				.text()
				.await
				.map_err(|error| TransportError::new(error.to_string()))?;
			Ok::<_, TransportError>(Response { status, body })
		}
		.boxed_local()
	}
}

#[test]
fn test_resolve_endpoint() {
	let base = Url::parse("http://localhost:3000/hotels/form?x=1").unwrap();
	assert_eq!(
		resolve_endpoint(&base, "/predict").unwrap().as_str(),
		"http://localhost:3000/predict"
	);
	assert_eq!(
		resolve_endpoint(&base, "predict").unwrap().as_str(),
		"http://localhost:3000/hotels/predict"
	);
	assert_eq!(
		resolve_endpoint(&base, "https://api.example.com/predict")
			.unwrap()
			.as_str(),
		"https://api.example.com/predict"
	);
}

#[test]
fn test_resolve_invalid_endpoint() {
	let base = Url::parse("http://localhost:3000/").unwrap();
	assert!(resolve_endpoint(&base, "http://[::1").is_err());
}
