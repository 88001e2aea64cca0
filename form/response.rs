use crate::{error::SubmitError, transport::Response};

pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error occurred";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResultLevel {
	Success,
	Canceled,
	Error,
}

impl ResultLevel {
	/// The full `class` attribute of the result element for this level.
	pub fn class_name(self) -> &'static str {
		match self {
			ResultLevel::Success => "result success",
			ResultLevel::Canceled => "result canceled",
			ResultLevel::Error => "result error",
		}
	}
}

/// What the result element shows after a submission settles.
#[derive(Clone, Debug, PartialEq)]
pub struct Outcome {
	pub level: ResultLevel,
	pub text: String,
}

impl Outcome {
	pub fn from_response(response: &Response) -> Result<Outcome, SubmitError> {
		let body = PredictResponse::from_body(&response.body)?;
		if !response.is_success() {
			return Err(SubmitError::Application {
				status: response.status,
				message: body.error_message(),
			});
		}
		let text = body.result_text();
		let outcome = if body.is_canceled() {
			Outcome {
				level: ResultLevel::Canceled,
				text: format!("❌ {}", text),
			}
		} else {
			Outcome {
				level: ResultLevel::Success,
				text: format!("✅ {}", text),
			}
		};
		Ok(outcome)
	}

	pub fn from_error(error: &SubmitError) -> Outcome {
		Outcome {
			level: ResultLevel::Error,
			text: format!("Error: {}", error),
		}
	}
}

/// The body returned by the prediction endpoint. The fields are kept loose because error bodies may come from proxies or frameworks rather than the endpoint itself.
#[derive(Debug, Default, serde::Deserialize)]
pub struct PredictResponse {
	#[serde(default)]
	pub prediction: Option<serde_json::Value>,
	#[serde(default)]
	pub result: Option<serde_json::Value>,
	#[serde(default)]
	pub error: Option<serde_json::Value>,
}

impl PredictResponse {
	pub fn from_body(body: &str) -> Result<PredictResponse, SubmitError> {
		let value: serde_json::Value = serde_json::from_str(body)?;
		// Any JSON is accepted. Bodies that are not objects have none of the fields.
		if !value.is_object() {
			return Ok(PredictResponse::default());
		}
		Ok(serde_json::from_value(value)?)
	}

	pub fn is_canceled(&self) -> bool {
		self.prediction.as_ref().and_then(|prediction| prediction.as_f64()) == Some(1.0)
	}

	pub fn result_text(&self) -> String {
		match &self.result {
			None | Some(serde_json::Value::Null) => String::new(),
			Some(serde_json::Value::String(result)) => result.clone(),
			Some(result) => result.to_string(),
		}
	}

	pub fn error_message(&self) -> String {
		match &self.error {
			Some(error) if is_truthy(error) => match error {
				serde_json::Value::String(error) => error.clone(),
				error => error.to_string(),
			},
			_ => UNKNOWN_ERROR_MESSAGE.to_owned(),
		}
	}
}

fn is_truthy(value: &serde_json::Value) -> bool {
	match value {
		serde_json::Value::Null => false,
		serde_json::Value::Bool(value) => *value,
		serde_json::Value::Number(value) => value.as_f64().map(|v| v != 0.0).unwrap_or(true),
		serde_json::Value::String(value) => !value.is_empty(),
		serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
	}
}

#[cfg(test)]
fn response(status: u16, body: serde_json::Value) -> Response {
	Response {
		status,
		body: body.to_string(),
	}
}

#[test]
fn test_canceled_outcome() {
	let outcome = Outcome::from_response(&response(
		200,
		serde_json::json!({ "prediction": 1, "result": "High risk" }),
	))
	.unwrap();
	assert_eq!(outcome.level, ResultLevel::Canceled);
	assert_eq!(outcome.level.class_name(), "result canceled");
	assert_eq!(outcome.text, "❌ High risk");
}

#[test]
fn test_success_outcome() {
	let outcome = Outcome::from_response(&response(
		200,
		serde_json::json!({ "prediction": 0, "result": "Low risk" }),
	))
	.unwrap();
	assert_eq!(outcome.level, ResultLevel::Success);
	assert_eq!(outcome.level.class_name(), "result success");
	assert_eq!(outcome.text, "✅ Low risk");
}

#[test]
fn test_only_exactly_one_is_canceled() {
	for prediction in &[
		serde_json::json!(0),
		serde_json::json!(2),
		serde_json::json!("1"),
		serde_json::json!(true),
		serde_json::Value::Null,
	] {
		let outcome = Outcome::from_response(&response(
			200,
			serde_json::json!({ "prediction": prediction, "result": "r" }),
		))
		.unwrap();
		assert_eq!(outcome.level, ResultLevel::Success, "{}", prediction);
	}
	let outcome = Outcome::from_response(&response(
		201,
		serde_json::json!({ "prediction": 1.0, "result": "r" }),
	))
	.unwrap();
	assert_eq!(outcome.level, ResultLevel::Canceled);
}

#[test]
fn test_application_error() {
	let error = Outcome::from_response(&response(
		400,
		serde_json::json!({ "error": "Invalid input" }),
	))
	.unwrap_err();
	assert_eq!(
		error,
		SubmitError::Application {
			status: 400,
			message: "Invalid input".to_owned(),
		}
	);
	let outcome = Outcome::from_error(&error);
	assert_eq!(outcome.level, ResultLevel::Error);
	assert_eq!(outcome.level.class_name(), "result error");
	assert_eq!(outcome.text, "Error: Invalid input");
}

#[test]
fn test_application_error_without_message() {
	for body in &[
		serde_json::json!({}),
		serde_json::json!({ "error": "" }),
		serde_json::json!({ "error": null }),
		serde_json::json!({ "prediction": 1, "result": "High risk" }),
	] {
		let error = Outcome::from_response(&response(500, body.clone())).unwrap_err();
		assert_eq!(
			Outcome::from_error(&error).text,
			"Error: Unknown error occurred"
		);
	}
}

#[test]
fn test_decode_error() {
	for body in &["<html>Bad Gateway</html>", "", "{\"prediction\": 1", "ok"] {
		let error = Outcome::from_response(&Response {
			status: 200,
			body: body.to_string(),
		})
		.unwrap_err();
		match error {
			SubmitError::Decode { .. } => {}
			error => panic!("expected a decode error, got {:?}", error),
		}
	}
	// The body is decoded before the status is checked.
	let error = Outcome::from_response(&Response {
		status: 502,
		body: "Bad Gateway".to_owned(),
	})
	.unwrap_err();
	assert!(matches!(error, SubmitError::Decode { .. }));
}

#[test]
fn test_error_status_with_non_object_body() {
	for body in &["[1, 2]", "\"ok\"", "null", "42"] {
		let error = Outcome::from_response(&Response {
			status: 400,
			body: body.to_string(),
		})
		.unwrap_err();
		assert_eq!(
			error,
			SubmitError::Application {
				status: 400,
				message: UNKNOWN_ERROR_MESSAGE.to_owned(),
			}
		);
		assert_eq!(
			Outcome::from_error(&error).text,
			"Error: Unknown error occurred"
		);
	}
}

#[test]
fn test_success_status_with_non_object_body() {
	let outcome = Outcome::from_response(&Response {
		status: 200,
		body: "[1, 2]".to_owned(),
	})
	.unwrap();
	assert_eq!(outcome.level, ResultLevel::Success);
	assert_eq!(outcome.text, "✅ ");
}

#[test]
fn test_transport_error_text() {
	let error = SubmitError::Transport {
		message: "Network down".to_owned(),
	};
	assert_eq!(Outcome::from_error(&error).text, "Error: Network down");
}

#[test]
fn test_missing_result_text() {
	let outcome =
		Outcome::from_response(&response(200, serde_json::json!({ "prediction": 0 }))).unwrap();
	assert_eq!(outcome.text, "✅ ");
}
