/*!
This module defines the `Config` struct. The page can override any field by putting a JSON object in the form's `data-props` attribute, for example `data-props='{"endpoint": "/api/predict"}'`.
*/

use crate::error::ConfigError;

pub const DEFAULT_ENDPOINT: &str = "/predict";
pub const DEFAULT_SUBMIT_LABEL: &str = "Analyze Cancellation Risk";
pub const DEFAULT_BUSY_LABEL: &str = "Analyzing...";

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
	/// The prediction endpoint. Relative paths are resolved against the page URL.
	pub endpoint: String,
	/// The submit button label while idle.
	pub submit_label: String,
	/// The submit button label while a request is in flight.
	pub busy_label: String,
}

impl Default for Config {
	fn default() -> Config {
		Config {
			endpoint: DEFAULT_ENDPOINT.to_owned(),
			submit_label: DEFAULT_SUBMIT_LABEL.to_owned(),
			busy_label: DEFAULT_BUSY_LABEL.to_owned(),
		}
	}
}

impl Config {
	pub fn from_props(props: &str) -> Result<Config, ConfigError> {
		serde_json::from_str(props).map_err(|source| ConfigError::InvalidProps { source })
	}
}

#[test]
fn test_default_config() {
	let config = Config::default();
	assert_eq!(config.endpoint, "/predict");
	assert_eq!(config.submit_label, "Analyze Cancellation Risk");
	assert_eq!(config.busy_label, "Analyzing...");
}

#[test]
fn test_partial_props() {
	let config = Config::from_props(r#"{"endpoint": "/api/predict"}"#).unwrap();
	assert_eq!(config.endpoint, "/api/predict");
	assert_eq!(config.submit_label, DEFAULT_SUBMIT_LABEL);
	let config = Config::from_props(r#"{"busyLabel": "Working..."}"#).unwrap();
	assert_eq!(config.busy_label, "Working...");
	assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
}

#[test]
fn test_invalid_props() {
	assert!(Config::from_props("{endpoint:").is_err());
	assert!(Config::from_props(r#"{"endpoint": 3}"#).is_err());
}
