/*!
This module declares how each form field is coerced before it is sent. Membership is static: a field is an integer field or a float field only if it is listed in [`FIELD_CLASSES`], and every other field is a string field.
*/

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldClass {
	Integer,
	Float,
	String,
}

pub static FIELD_CLASSES: &[(&str, FieldClass)] = &[
	("lead_time", FieldClass::Integer),
	("arrival_date_week_number", FieldClass::Integer),
	("arrival_date_day_of_month", FieldClass::Integer),
	("stays_in_weekend_nights", FieldClass::Integer),
	("stays_in_week_nights", FieldClass::Integer),
	("adults", FieldClass::Integer),
	("children", FieldClass::Integer),
	("babies", FieldClass::Integer),
	("is_repeated_guest", FieldClass::Integer),
	("required_car_parking_spaces", FieldClass::Integer),
	("total_of_special_requests", FieldClass::Integer),
	("adr", FieldClass::Float),
	("agent", FieldClass::Float),
];

pub fn field_class(name: &str) -> FieldClass {
	FIELD_CLASSES
		.iter()
		.find(|(field_name, _)| *field_name == name)
		.map(|(_, class)| *class)
		.unwrap_or(FieldClass::String)
}

/// Parse the base-10 integer at the start of `value`, ignoring anything after it. Returns 0 if there is no integer. Integers too large for an `i64` are sent as floats.
pub fn parse_integer(value: &str) -> serde_json::Value {
	let value = value.trim_start();
	let (negative, rest) = split_sign(value);
	let digits = &rest[..count_digits(rest)];
	if digits.is_empty() {
		return serde_json::Value::from(0);
	}
	// Parse with the sign attached so `i64::MIN` fits.
	let signed = if negative {
		format!("-{}", digits)
	} else {
		digits.to_owned()
	};
	match lexical::parse::<i64, _>(&signed) {
		Ok(integer) => serde_json::Value::from(integer),
		Err(_) => lexical::parse::<f64, _>(&signed)
			.map(float_to_json)
			.unwrap_or_else(|_| serde_json::Value::from(0)),
	}
}

/// Parse the longest decimal number at the start of `value`, ignoring anything after it. Returns 0 if there is no number or it is not finite.
pub fn parse_float(value: &str) -> f64 {
	let value = value.trim_start();
	let (negative, rest) = split_sign(value);
	if rest.starts_with(|c: char| c == '+' || c == '-') {
		return 0.0;
	}
	let magnitude = match parse_float_prefix(rest) {
		Some(magnitude) => magnitude,
		None => return 0.0,
	};
	if !magnitude.is_finite() || magnitude == 0.0 {
		return 0.0;
	}
	if negative {
		-magnitude
	} else {
		magnitude
	}
}

/// Shrink the input to the position lexical reports until what is left parses, so a dangling exponent like the `e` in `7e` is dropped.
fn parse_float_prefix(value: &str) -> Option<f64> {
	let mut end = value.len();
	loop {
		match lexical::parse_partial::<f64, _>(value.get(..end)?) {
			Ok((magnitude, _)) => return Some(magnitude),
			Err(error) if error.index > 0 && end > 1 => end = error.index.min(end - 1),
			Err(_) => return None,
		}
	}
}

/// Coerce a raw form value into the JSON value sent for the field `name`.
pub fn coerce(name: &str, value: &str) -> serde_json::Value {
	match field_class(name) {
		FieldClass::Integer => parse_integer(value),
		FieldClass::Float => float_to_json(parse_float(value)),
		FieldClass::String => serde_json::Value::String(value.to_owned()),
	}
}

/// Whole floats are written without a fractional part, so `12` is sent as `12` rather than `12.0`.
fn float_to_json(value: f64) -> serde_json::Value {
	if value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
		return serde_json::Value::from(value as i64);
	}
	serde_json::Number::from_f64(value)
		.map(serde_json::Value::Number)
		.unwrap_or_else(|| serde_json::Value::from(0))
}

fn split_sign(value: &str) -> (bool, &str) {
	if let Some(rest) = value.strip_prefix('-') {
		(true, rest)
	} else if let Some(rest) = value.strip_prefix('+') {
		(false, rest)
	} else {
		(false, value)
	}
}

fn count_digits(value: &str) -> usize {
	value.bytes().take_while(|byte| byte.is_ascii_digit()).count()
}

#[test]
fn test_field_class() {
	assert_eq!(field_class("lead_time"), FieldClass::Integer);
	assert_eq!(field_class("total_of_special_requests"), FieldClass::Integer);
	assert_eq!(field_class("adr"), FieldClass::Float);
	assert_eq!(field_class("agent"), FieldClass::Float);
	assert_eq!(field_class("hotel"), FieldClass::String);
	assert_eq!(field_class("Lead_Time"), FieldClass::String);
}

#[test]
fn test_parse_integer() {
	assert_eq!(parse_integer("42"), serde_json::json!(42));
	assert_eq!(parse_integer("  7 nights"), serde_json::json!(7));
	assert_eq!(parse_integer("-3"), serde_json::json!(-3));
	assert_eq!(parse_integer("+5"), serde_json::json!(5));
	assert_eq!(parse_integer("3.9"), serde_json::json!(3));
	assert_eq!(parse_integer("-0"), serde_json::json!(0));
	assert_eq!(parse_integer("abc"), serde_json::json!(0));
	assert_eq!(parse_integer(""), serde_json::json!(0));
	assert_eq!(parse_integer("-"), serde_json::json!(0));
	assert_eq!(parse_integer("0x1A"), serde_json::json!(0));
}

#[test]
fn test_parse_integer_outside_i64() {
	assert_eq!(
		parse_integer("-9223372036854775808"),
		serde_json::json!(i64::MIN)
	);
	assert_eq!(
		parse_integer("9223372036854775807"),
		serde_json::json!(i64::MAX)
	);
	assert_eq!(parse_integer("99999999999999999999"), serde_json::json!(1e20));
	assert_eq!(
		coerce("lead_time", "99999999999999999999 days"),
		serde_json::json!(1e20)
	);
	assert_eq!(
		parse_integer("-99999999999999999999"),
		serde_json::json!(-1e20)
	);
}

#[test]
fn test_parse_float() {
	assert_eq!(parse_float("95.5"), 95.5);
	assert_eq!(parse_float(" 1.5e2 euros"), 150.0);
	assert_eq!(parse_float(".25"), 0.25);
	assert_eq!(parse_float("4."), 4.0);
	assert_eq!(parse_float("-2.5"), -2.5);
	assert_eq!(parse_float("7e"), 7.0);
	assert_eq!(parse_float("7e+"), 7.0);
	assert_eq!(parse_float("."), 0.0);
	assert_eq!(parse_float("NaN"), 0.0);
	assert_eq!(parse_float("Infinity"), 0.0);
	assert_eq!(parse_float("1e999"), 0.0);
	assert_eq!(parse_float("-0"), 0.0);
	assert_eq!(parse_float("--5"), 0.0);
	assert_eq!(parse_float("1.5e"), 1.5);
	assert_eq!(parse_float("n/a"), 0.0);
}

#[test]
fn test_non_numeric_values_coerce_to_zero() {
	for (name, class) in FIELD_CLASSES {
		let value = coerce(name, "not a number");
		match class {
			FieldClass::Integer => assert_eq!(value, serde_json::json!(0), "{}", name),
			FieldClass::Float => assert_eq!(value, serde_json::json!(0), "{}", name),
			FieldClass::String => unreachable!(),
		}
	}
}

#[test]
fn test_string_fields_pass_through() {
	for value in &["Resort Hotel", "  12  ", "", "3.5", "PRT"] {
		assert_eq!(coerce("hotel", value), serde_json::json!(value));
	}
}

#[test]
fn test_coerce_float_output() {
	assert_eq!(coerce("adr", "95.5"), serde_json::json!(95.5));
	assert_eq!(coerce("agent", "9"), serde_json::json!(9));
	assert_eq!(coerce("adults", "2"), serde_json::json!(2));
}
