//! Assertion Library - Stateless Precondition Checks
//!
//! Every check either returns `Ok(())` or fails with the caller-supplied
//! message. Checks never mutate their arguments and keep no state between
//! calls; the dynamic value domain is `serde_json::Value`, with `Null` as
//! the absent sentinel.

use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use serde_json::Value;

use crate::enums::EnumRegistry;
use crate::error::{AssertError, AssertResult};

#[cfg(feature = "test-hooks")]
use std::sync::atomic::{AtomicU32, Ordering};

#[cfg(feature = "test-hooks")]
static ASSERT_CALL_COUNT: AtomicU32 = AtomicU32::new(0);

#[cfg(feature = "test-hooks")]
pub fn get_assert_call_count() -> u32 {
    ASSERT_CALL_COUNT.load(Ordering::SeqCst)
}

#[cfg(feature = "test-hooks")]
pub fn reset_assert_call_count() {
    ASSERT_CALL_COUNT.store(0, Ordering::SeqCst)
}

#[inline]
fn record_call() {
    #[cfg(feature = "test-hooks")]
    ASSERT_CALL_COUNT.fetch_add(1, Ordering::SeqCst);
}

/// Default maximum length for the composite ID checks.
pub const DEFAULT_ID_LENGTH: usize = 10;

pub static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[_a-zA-Z0-9-]+(\.[_a-zA-z0-9-]+)*@[a-zA-Z0-9-]+(\.[a-zA-Z0-9-]+)*(\.[a-zA-Z]{2,3})$")
        .unwrap()
});

pub static DATETIME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}.?").unwrap());

pub static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r"^http(s)?://[a-z0-9-]+(\.[a-z0-9-]+)*(:[0-9]+)?(/.*)?$")
        .case_insensitive(true)
        .build()
        .unwrap()
});

static INT_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-?[0-9]+$").unwrap());

static FLOAT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[0-9]+([,.][0-9]+)?$").unwrap());

/// Runtime shape of a dynamic value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        };
        f.write_str(name)
    }
}

/// Text the pattern checks operate on. Strings pass through, numbers print
/// in their JSON form; other shapes have no text and fail pattern checks.
fn scalar_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s)),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        _ => None,
    }
}

/// Fails if `value` is the absent sentinel.
pub fn validate_is_not_null(value: &Value, msg: &str) -> AssertResult {
    record_call();
    if value.is_null() {
        return Err(AssertError::Validation(msg.to_string()));
    }
    Ok(())
}

/// Fails on the absent sentinel, the empty string, `"0"`, `false`, numeric
/// zero, and empty containers.
pub fn validate_is_not_empty(value: &Value, msg: &str) -> AssertResult {
    record_call();
    let empty = match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f == 0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    };
    if empty {
        return Err(AssertError::Validation(msg.to_string()));
    }
    Ok(())
}

/// Fails unless `value` has runtime kind `kind`.
pub fn validate_is_kind(value: &Value, kind: ValueKind, msg: &str) -> AssertResult {
    record_call();
    if ValueKind::of(value) != kind {
        return Err(AssertError::Validation(msg.to_string()));
    }
    Ok(())
}

pub fn validate_is_string(value: &Value, msg: &str) -> AssertResult {
    validate_is_kind(value, ValueKind::String, msg)
}

/// Fails unless the value's text matches `^-?[0-9]+$`.
pub fn validate_is_int(value: &Value, msg: &str) -> AssertResult {
    validate_is_match(value, &INT_REGEX, msg)
}

/// Alias of [`validate_is_int`].
pub fn validate_is_long(value: &Value, msg: &str) -> AssertResult {
    validate_is_int(value, msg)
}

/// Fails unless the value's text matches `^-?[0-9]+([,.][0-9]+)?$`.
pub fn validate_is_float(value: &Value, msg: &str) -> AssertResult {
    validate_is_match(value, &FLOAT_REGEX, msg)
}

/// Alias of [`validate_is_float`].
pub fn validate_is_double(value: &Value, msg: &str) -> AssertResult {
    validate_is_float(value, msg)
}

fn bool_like(value: &Value) -> bool {
    match value {
        Value::Bool(_) => true,
        Value::String(s) => {
            let lowered = s.to_ascii_lowercase();
            matches!(lowered.as_str(), "true" | "1" | "false" | "0")
        }
        Value::Number(n) => n.as_f64().map_or(false, |f| f == 0.0 || f == 1.0),
        _ => false,
    }
}

/// Accepts boolean literals, the strings `"true"`/`"1"`/`"false"`/`"0"`
/// case-insensitively, and numeric 1 or 0.
pub fn validate_is_bool(value: &Value, msg: &str) -> AssertResult {
    record_call();
    if !bool_like(value) {
        return Err(AssertError::Validation(msg.to_string()));
    }
    Ok(())
}

/// Like [`validate_is_bool`] but the absent sentinel also passes.
pub fn validate_is_bool_or_null(value: &Value, msg: &str) -> AssertResult {
    record_call();
    if !value.is_null() && !bool_like(value) {
        return Err(AssertError::Validation(msg.to_string()));
    }
    Ok(())
}

pub fn validate_is_date_time(value: &Value, msg: &str) -> AssertResult {
    validate_is_match(value, &DATETIME_REGEX, msg)
}

/// Fails unless the value's text matches `pattern`.
pub fn validate_is_match(value: &Value, pattern: &Regex, msg: &str) -> AssertResult {
    record_call();
    let matched = scalar_text(value).map_or(false, |text| pattern.is_match(&text));
    if !matched {
        return Err(AssertError::Validation(msg.to_string()));
    }
    Ok(())
}

/// Exact inverse of [`validate_is_match`] for any (value, pattern) pair.
pub fn validate_is_not_match(value: &Value, pattern: &Regex, msg: &str) -> AssertResult {
    record_call();
    let matched = scalar_text(value).map_or(false, |text| pattern.is_match(&text));
    if matched {
        return Err(AssertError::Validation(msg.to_string()));
    }
    Ok(())
}

pub fn validate_is_email(value: &Value, msg: &str) -> AssertResult {
    validate_is_match(value, &EMAIL_REGEX, msg)
}

pub fn validate_is_url(value: &Value, msg: &str) -> AssertResult {
    validate_is_match(value, &URL_REGEX, msg)
}

/// Fails unless the value's character count is within `[min, max]`,
/// counting Unicode scalars rather than bytes.
pub fn validate_length(value: &Value, min: usize, max: usize, msg: &str) -> AssertResult {
    record_call();
    let ok = scalar_text(value).map_or(false, |text| {
        let len = text.chars().count();
        len >= min && len <= max
    });
    if !ok {
        return Err(AssertError::Validation(msg.to_string()));
    }
    Ok(())
}

pub fn validate_is_array(value: &Value, msg: &str) -> AssertResult {
    record_call();
    if !value.is_array() {
        return Err(AssertError::Validation(msg.to_string()));
    }
    Ok(())
}

/// Array check plus a per-element kind check.
pub fn validate_is_array_of_kind(value: &Value, kind: ValueKind, msg: &str) -> AssertResult {
    validate_is_array(value, msg)?;
    for element in value.as_array().into_iter().flatten() {
        validate_is_kind(element, kind, msg)?;
    }
    Ok(())
}

/// Array check plus a per-element string-and-pattern check. An empty array
/// always passes.
pub fn validate_is_array_and_match(value: &Value, pattern: &Regex, msg: &str) -> AssertResult {
    validate_is_array(value, msg)?;
    for element in value.as_array().into_iter().flatten() {
        validate_is_string(element, msg)?;
        validate_is_match(element, pattern, msg)?;
    }
    Ok(())
}

/// Inclusive on both ends.
pub fn validate_range<T: PartialOrd>(value: T, min: T, max: T, msg: &str) -> AssertResult {
    record_call();
    if value < min || value > max {
        return Err(AssertError::Validation(msg.to_string()));
    }
    Ok(())
}

/// Composite check for numeric IDs: non-empty, long-integer form, then at
/// most `length` digits.
pub fn validate_long_id(id: &str, entity_name: &str, length: usize) -> AssertResult {
    let value = Value::from(id);
    validate_is_not_empty(
        &value,
        &format!("{entity_name} ID cannot be NULL or Empty."),
    )?;
    validate_is_long(
        &value,
        &format!("{entity_name} ID is not long integer value."),
    )?;
    let pattern = id_pattern("0-9", length)?;
    validate_is_match(
        &value,
        &pattern,
        &format!("{entity_name} ID does not match pattern: [0-9]{{1,{length}}}. Current value is: {id}."),
    )
}

/// Composite check for alphanumeric IDs: non-empty, then at most `length`
/// characters from `[0-9A-Za-z]`.
pub fn validate_alphanumeric_id(id: &str, entity_name: &str, length: usize) -> AssertResult {
    let value = Value::from(id);
    validate_is_not_empty(
        &value,
        &format!("{entity_name} ID cannot be NULL or Empty."),
    )?;
    let pattern = id_pattern("0-9A-Za-z", length)?;
    validate_is_match(
        &value,
        &pattern,
        &format!("{entity_name} ID does not match pattern: [0-9A-Za-z]{{1,{length}}}. Current value is: {id}."),
    )
}

fn id_pattern(class: &str, length: usize) -> Result<Regex, AssertError> {
    Regex::new(&format!("^[{class}]{{1,{length}}}$"))
        .map_err(|e| AssertError::Configuration(format!("Invalid ID pattern: {e}")))
}

/// Membership check against a named enum domain.
///
/// Resolution and capability gaps are configuration failures; a value
/// outside the allowed set is a validation failure whose message carries
/// the allowed values joined by `", "`.
pub fn validate_enum(
    registry: &EnumRegistry,
    value: &Value,
    name: &str,
    msg: &str,
) -> AssertResult {
    record_call();
    let entry = registry
        .lookup(name)
        .ok_or_else(|| AssertError::Configuration(format!("type '{name}' cannot be identified")))?;
    let is_valid = entry.is_valid_fn().ok_or_else(|| {
        AssertError::Configuration(format!("type '{name}' doesn't have operation isValid"))
    })?;
    let values = entry.values_fn().ok_or_else(|| {
        AssertError::Configuration(format!("type '{name}' doesn't have operation values"))
    })?;

    let candidate = scalar_text(value).unwrap_or(Cow::Borrowed(""));
    if !is_valid(&candidate) {
        let allowed = values().join(", ");
        return Err(AssertError::Validation(format!(
            "{msg} may only be one of [{allowed}] and '{candidate}' given."
        )));
    }
    Ok(())
}
