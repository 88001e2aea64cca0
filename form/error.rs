use derive_more::{Display, Error};

/// The ways a submission can fail. The `Display` output of each variant is the message shown after the `"Error: "` prefix.
#[derive(Clone, Debug, Display, Error, PartialEq)]
pub enum SubmitError {
	/// The request could not be completed.
	#[display(fmt = "{}", message)]
	Transport { message: String },
	/// The endpoint answered with a non-success status.
	#[display(fmt = "{}", message)]
	Application { status: u16, message: String },
	/// The response body was not a JSON object.
	#[display(fmt = "{}", message)]
	Decode { message: String },
}

#[derive(Debug, Display, Error)]
pub enum ConfigError {
	#[display(fmt = "invalid form props: {}", source)]
	InvalidProps { source: serde_json::Error },
}

impl From<crate::TransportError> for SubmitError {
	fn from(error: crate::TransportError) -> SubmitError {
		SubmitError::Transport {
			message: error.message,
		}
	}
}

impl From<serde_json::Error> for SubmitError {
	fn from(error: serde_json::Error) -> SubmitError {
		SubmitError::Decode {
			message: error.to_string(),
		}
	}
}

#[test]
fn test_display_is_the_bare_message() {
	let error = SubmitError::Application {
		status: 400,
		message: "Invalid input".to_owned(),
	};
	assert_eq!(error.to_string(), "Invalid input");
	let error = SubmitError::Transport {
		message: "Network down".to_owned(),
	};
	assert_eq!(error.to_string(), "Network down");
}
