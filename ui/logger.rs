use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::JsValue;
use web_sys::console;

/// Forwards `log` records to the browser console.
pub struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
	fn enabled(&self, metadata: &Metadata) -> bool {
		metadata.level() <= log::max_level()
	}

	fn log(&self, record: &Record) {
		if !self.enabled(record.metadata()) {
			return;
		}
		let message = JsValue::from_str(&format_record(record));
		match record.level() {
			Level::Error => console::error_1(&message),
			Level::Warn => console::warn_1(&message),
			Level::Info => console::info_1(&message),
			Level::Debug | Level::Trace => console::debug_1(&message),
		}
	}

	fn flush(&self) {}
}

/// Install the console logger. Calling this more than once keeps the first logger.
pub fn init_logger(level: LevelFilter) {
	if log::set_logger(&LOGGER).is_ok() {
		log::set_max_level(level);
	}
}

fn format_record(record: &Record) -> String {
	format!("[{} {}] {}", record.level(), record.target(), record.args())
}

#[test]
fn test_format_record() {
	assert_eq!(
		format_record(
			&Record::builder()
				.level(Level::Warn)
				.target("cancellation_form::controller")
				.args(format_args!("prediction request failed: {}", "offline"))
				.build()
		),
		"[WARN cancellation_form::controller] prediction request failed: offline"
	);
}
