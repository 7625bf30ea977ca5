//! Typed parameter binding for tool arguments
//!
//! Tool arguments arrive as an untyped JSON object. [`ParameterBinder`] pulls
//! typed values out of it, and [`ParameterSpec`] declares what a tool accepts so
//! the registry can publish a JSON schema and enforce numeric bounds and
//! allowed values before the handler runs.
//!
//! Required parameters are "present and non-zero": an empty string, `0` or
//! `false` is reported exactly like a missing key. Optional parameters come in
//! two flavours, a plain form returning the zero value when absent and a
//! `_present` form returning `Option<T>` so callers can tell "not supplied"
//! from "supplied empty". JSON `null` is treated as absent everywhere.

use serde_json::{json, Map, Value};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Untyped argument mapping of a tool call
pub type Arguments = Map<String, Value>;

/// Default page number when none is supplied
pub const DEFAULT_PAGE: i64 = 1;
/// Default page size when none is supplied
pub const DEFAULT_PER_PAGE: i64 = 30;
/// Largest page size GitHub accepts
pub const MAX_PER_PAGE: i64 = 100;

/// The kinds of value a tool parameter can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterKind {
    /// A JSON string
    String,
    /// An integer; accepts integral numbers and decimal strings
    Integer,
    /// A JSON boolean
    Boolean,
    /// A JSON array whose every element is a string
    StringArray,
    /// A JSON array whose every element is an object
    ObjectArray,
}

impl ParameterKind {
    /// JSON schema type keyword for this kind
    pub fn json_type(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "number",
            Self::Boolean => "boolean",
            Self::StringArray | Self::ObjectArray => "array",
        }
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::StringArray => "string array",
            Self::ObjectArray => "object array",
        };
        f.write_str(name)
    }
}

/// A tool argument failed validation
///
/// Always caller-correctable; never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Absent, `null`, or the zero value of its kind
    #[error("missing required parameter: {parameter}")]
    Missing {
        /// Offending parameter
        parameter: String,
        /// Kind the parameter was declared with
        expected: ParameterKind,
    },

    /// Present with the wrong JSON type
    #[error("parameter {parameter} is not of type {expected}, is {actual}")]
    WrongType {
        /// Offending parameter
        parameter: String,
        /// Kind the parameter was declared with
        expected: ParameterKind,
        /// JSON type actually supplied
        actual: &'static str,
    },

    /// A number or string that does not denote an integer
    #[error("parameter {parameter} is not a valid integer: {value}")]
    NotAnInteger {
        /// Offending parameter
        parameter: String,
        /// The supplied value, rendered as JSON
        value: String,
    },

    /// An element of an array has the wrong JSON type
    #[error("parameter {parameter} could not be coerced to {expected}: element {index} is {actual}")]
    ArrayElement {
        /// Offending parameter
        parameter: String,
        /// Kind the parameter was declared with
        expected: ParameterKind,
        /// Position of the bad element
        index: usize,
        /// JSON type of the bad element
        actual: &'static str,
    },

    /// An integer outside the declared bounds
    #[error("parameter {parameter} must be {}, got {value}", describe_bounds(.minimum, .maximum))]
    OutOfBounds {
        /// Offending parameter
        parameter: String,
        /// Declared inclusive lower bound
        minimum: Option<i64>,
        /// Declared inclusive upper bound
        maximum: Option<i64>,
        /// The supplied value
        value: i64,
    },

    /// A value the parameter's declaration does not allow
    #[error("invalid value for parameter {parameter}: {reason}")]
    Invalid {
        /// Offending parameter
        parameter: String,
        /// Kind the parameter was declared with
        expected: ParameterKind,
        /// What is wrong with the value
        reason: String,
    },
}

fn describe_bounds(minimum: &Option<i64>, maximum: &Option<i64>) -> String {
    match (*minimum, *maximum) {
        (Some(min), Some(max)) => format!("between {min} and {max}"),
        (Some(min), None) => format!("at least {min}"),
        (None, Some(max)) => format!("at most {max}"),
        (None, None) => "within bounds".to_string(),
    }
}

impl ValidationError {
    /// Name of the offending parameter
    pub fn parameter(&self) -> &str {
        match self {
            Self::Missing { parameter, .. }
            | Self::WrongType { parameter, .. }
            | Self::NotAnInteger { parameter, .. }
            | Self::ArrayElement { parameter, .. }
            | Self::OutOfBounds { parameter, .. }
            | Self::Invalid { parameter, .. } => parameter,
        }
    }

    /// Kind the parameter was expected to have
    pub fn expected(&self) -> ParameterKind {
        match self {
            Self::Missing { expected, .. }
            | Self::WrongType { expected, .. }
            | Self::ArrayElement { expected, .. }
            | Self::Invalid { expected, .. } => *expected,
            Self::NotAnInteger { .. } | Self::OutOfBounds { .. } => ParameterKind::Integer,
        }
    }
}

/// JSON type name of a value, for error messages
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Normalize a JSON value to an integer
///
/// Accepts signed and unsigned integers, floats without a fractional part and
/// decimal strings such as `"5"` or `"5.0"`.
pub fn coerce_integer(parameter: &str, value: &Value) -> Result<i64, ValidationError> {
    let not_an_integer = || ValidationError::NotAnInteger {
        parameter: parameter.to_string(),
        value: value.to_string(),
    };

    match value {
        Value::Number(number) => {
            if let Some(i) = number.as_i64() {
                Ok(i)
            } else if let Some(u) = number.as_u64() {
                i64::try_from(u).map_err(|_| not_an_integer())
            } else {
                number
                    .as_f64()
                    .and_then(integral_f64)
                    .ok_or_else(not_an_integer)
            }
        }
        Value::String(text) => {
            let trimmed = text.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().and_then(integral_f64))
                .ok_or_else(not_an_integer)
        }
        other => Err(ValidationError::WrongType {
            parameter: parameter.to_string(),
            expected: ParameterKind::Integer,
            actual: json_type_name(other),
        }),
    }
}

fn integral_f64(value: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, hence the strict upper comparison
    if value.is_finite() && value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64
    {
        Some(value as i64)
    } else {
        None
    }
}

/// Page request extracted from `page` / `perPage`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page number
    pub page: i64,
    /// Items per page
    pub per_page: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl Pagination {
    /// Query pairs in the form the REST API expects
    pub fn query_pairs(&self) -> [(String, String); 2] {
        [
            ("page".to_string(), self.page.to_string()),
            ("per_page".to_string(), self.per_page.to_string()),
        ]
    }
}

/// Borrowing view over a tool call's arguments with typed accessors
#[derive(Debug, Clone, Copy)]
pub struct ParameterBinder<'a> {
    args: &'a Arguments,
}

impl<'a> ParameterBinder<'a> {
    /// Wrap an argument mapping
    pub fn new(args: &'a Arguments) -> Self {
        Self { args }
    }

    /// Raw value for `name`, with `null` treated as absent
    pub fn get(&self, name: &str) -> Option<&'a Value> {
        self.args.get(name).filter(|value| !value.is_null())
    }

    fn missing(name: &str, expected: ParameterKind) -> ValidationError {
        ValidationError::Missing {
            parameter: name.to_string(),
            expected,
        }
    }

    fn wrong_type(name: &str, expected: ParameterKind, value: &Value) -> ValidationError {
        ValidationError::WrongType {
            parameter: name.to_string(),
            expected,
            actual: json_type_name(value),
        }
    }

    /// A present, non-empty string
    pub fn require_string(&self, name: &str) -> Result<String, ValidationError> {
        match self.optional_string_present(name)? {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(Self::missing(name, ParameterKind::String)),
        }
    }

    /// A present, non-zero integer
    pub fn require_int(&self, name: &str) -> Result<i64, ValidationError> {
        match self.optional_int_present(name)? {
            Some(value) if value != 0 => Ok(value),
            _ => Err(Self::missing(name, ParameterKind::Integer)),
        }
    }

    /// A present boolean equal to `true`
    pub fn require_bool(&self, name: &str) -> Result<bool, ValidationError> {
        match self.optional_bool_present(name)? {
            Some(true) => Ok(true),
            _ => Err(Self::missing(name, ParameterKind::Boolean)),
        }
    }

    /// A string, or the empty string when absent
    pub fn optional_string(&self, name: &str) -> Result<String, ValidationError> {
        Ok(self.optional_string_present(name)?.unwrap_or_default())
    }

    /// A string, or `None` when absent
    pub fn optional_string_present(&self, name: &str) -> Result<Option<String>, ValidationError> {
        match self.get(name) {
            None => Ok(None),
            Some(Value::String(value)) => Ok(Some(value.clone())),
            Some(other) => Err(Self::wrong_type(name, ParameterKind::String, other)),
        }
    }

    /// A boolean, or `false` when absent
    pub fn optional_bool(&self, name: &str) -> Result<bool, ValidationError> {
        Ok(self.optional_bool_present(name)?.unwrap_or_default())
    }

    /// A boolean, or `None` when absent
    pub fn optional_bool_present(&self, name: &str) -> Result<Option<bool>, ValidationError> {
        match self.get(name) {
            None => Ok(None),
            Some(Value::Bool(value)) => Ok(Some(*value)),
            Some(other) => Err(Self::wrong_type(name, ParameterKind::Boolean, other)),
        }
    }

    /// An integer, or `0` when absent
    pub fn optional_int(&self, name: &str) -> Result<i64, ValidationError> {
        Ok(self.optional_int_present(name)?.unwrap_or_default())
    }

    /// An integer, or `None` when absent
    pub fn optional_int_present(&self, name: &str) -> Result<Option<i64>, ValidationError> {
        self.get(name)
            .map(|value| coerce_integer(name, value))
            .transpose()
    }

    /// An integer, or `default` when absent or zero
    pub fn optional_int_with_default(
        &self,
        name: &str,
        default: i64,
    ) -> Result<i64, ValidationError> {
        match self.optional_int(name)? {
            0 => Ok(default),
            value => Ok(value),
        }
    }

    /// An array of strings; absent yields an empty vector
    pub fn optional_string_array(&self, name: &str) -> Result<Vec<String>, ValidationError> {
        Ok(self.optional_string_array_present(name)?.unwrap_or_default())
    }

    /// An array of strings, or `None` when absent
    pub fn optional_string_array_present(
        &self,
        name: &str,
    ) -> Result<Option<Vec<String>>, ValidationError> {
        let items = match self.get(name) {
            None => return Ok(None),
            Some(Value::Array(items)) => items,
            Some(other) => return Err(Self::wrong_type(name, ParameterKind::StringArray, other)),
        };

        items
            .iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::String(text) => Ok(text.clone()),
                other => Err(ValidationError::ArrayElement {
                    parameter: name.to_string(),
                    expected: ParameterKind::StringArray,
                    index,
                    actual: json_type_name(other),
                }),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    /// An array of objects; absent yields an empty vector
    ///
    /// Each element can be bound with its own [`ParameterBinder`].
    pub fn optional_object_array(&self, name: &str) -> Result<Vec<&'a Arguments>, ValidationError> {
        let items = match self.get(name) {
            None => return Ok(Vec::new()),
            Some(Value::Array(items)) => items,
            Some(other) => return Err(Self::wrong_type(name, ParameterKind::ObjectArray, other)),
        };

        items
            .iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(fields) => Ok(fields),
                other => Err(ValidationError::ArrayElement {
                    parameter: name.to_string(),
                    expected: ParameterKind::ObjectArray,
                    index,
                    actual: json_type_name(other),
                }),
            })
            .collect()
    }

    /// `page` and `perPage`, defaulting to 1 and 30 when absent or zero
    ///
    /// Bounds are not applied here; they are declared through
    /// [`ParameterSpec::pagination`] and enforced by the registry.
    pub fn pagination(&self) -> Result<Pagination, ValidationError> {
        Ok(Pagination {
            page: self.optional_int_with_default("page", DEFAULT_PAGE)?,
            per_page: self.optional_int_with_default("perPage", DEFAULT_PER_PAGE)?,
        })
    }
}

/// Declaration of one tool parameter
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    /// Argument key
    pub name: &'static str,
    /// Expected kind
    pub kind: ParameterKind,
    /// Whether the parameter must be present and non-zero
    pub required: bool,
    /// Human-readable description published in the schema
    pub description: &'static str,
    /// Default applied when absent, published in the schema
    pub default: Option<Value>,
    /// Inclusive lower bound for integers
    pub minimum: Option<i64>,
    /// Inclusive upper bound for integers
    pub maximum: Option<i64>,
    /// Allowed values for strings
    pub allowed: Option<&'static [&'static str]>,
}

impl ParameterSpec {
    fn new(name: &'static str, kind: ParameterKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            required: false,
            description,
            default: None,
            minimum: None,
            maximum: None,
            allowed: None,
        }
    }

    /// Declare a string parameter
    pub fn string(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParameterKind::String, description)
    }

    /// Declare an integer parameter
    pub fn integer(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParameterKind::Integer, description)
    }

    /// Declare a boolean parameter
    pub fn boolean(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParameterKind::Boolean, description)
    }

    /// Declare a string-array parameter
    pub fn string_array(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParameterKind::StringArray, description)
    }

    /// Declare an object-array parameter
    pub fn object_array(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParameterKind::ObjectArray, description)
    }

    /// Mark the parameter as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Attach a default value
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Attach inclusive numeric bounds
    pub fn with_bounds(mut self, minimum: i64, maximum: i64) -> Self {
        self.minimum = Some(minimum);
        self.maximum = Some(maximum);
        self
    }

    /// Attach an inclusive lower bound
    pub fn with_minimum(mut self, minimum: i64) -> Self {
        self.minimum = Some(minimum);
        self
    }

    /// Restrict a string parameter to a fixed set of values
    pub fn one_of(mut self, allowed: &'static [&'static str]) -> Self {
        self.allowed = Some(allowed);
        self
    }

    /// The `page` and `perPage` parameters shared by list and search tools
    pub fn pagination() -> [ParameterSpec; 2] {
        [
            Self::integer("page", "Page number for pagination (min 1)")
                .with_minimum(1)
                .with_default(DEFAULT_PAGE),
            Self::integer("perPage", "Results per page for pagination (min 1, max 100)")
                .with_bounds(1, MAX_PER_PAGE)
                .with_default(DEFAULT_PER_PAGE),
        ]
    }

    fn has_bounds(&self) -> bool {
        self.minimum.is_some() || self.maximum.is_some()
    }

    /// Check declared bounds and allowed values against the supplied arguments
    ///
    /// Absent values are skipped, as are zero integers and empty strings:
    /// those stand for "use the default".
    pub fn check_constraints(&self, args: &Arguments) -> Result<(), ValidationError> {
        let binder = ParameterBinder::new(args);
        match self.kind {
            ParameterKind::Integer if self.has_bounds() => {
                let value = match binder.optional_int(self.name)? {
                    0 => return Ok(()),
                    value => value,
                };
                let below = self.minimum.is_some_and(|min| value < min);
                let above = self.maximum.is_some_and(|max| value > max);
                if below || above {
                    return Err(ValidationError::OutOfBounds {
                        parameter: self.name.to_string(),
                        minimum: self.minimum,
                        maximum: self.maximum,
                        value,
                    });
                }
            }
            ParameterKind::String => {
                if let Some(allowed) = self.allowed {
                    let value = binder.optional_string(self.name)?;
                    if !value.is_empty() && !allowed.contains(&value.as_str()) {
                        return Err(ValidationError::Invalid {
                            parameter: self.name.to_string(),
                            expected: self.kind,
                            reason: format!("must be one of {}, got '{value}'", allowed.join(", ")),
                        });
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// JSON schema for this parameter
    pub fn to_schema(&self) -> Value {
        let mut schema = Map::new();
        schema.insert("type".into(), json!(self.kind.json_type()));
        schema.insert("description".into(), json!(self.description));
        match self.kind {
            ParameterKind::StringArray => {
                schema.insert("items".into(), json!({ "type": "string" }));
            }
            ParameterKind::ObjectArray => {
                schema.insert("items".into(), json!({ "type": "object" }));
            }
            _ => {}
        }
        if let Some(default) = &self.default {
            schema.insert("default".into(), default.clone());
        }
        if let Some(minimum) = self.minimum {
            schema.insert("minimum".into(), json!(minimum));
        }
        if let Some(maximum) = self.maximum {
            schema.insert("maximum".into(), json!(maximum));
        }
        if let Some(allowed) = self.allowed {
            schema.insert("enum".into(), json!(allowed));
        }
        Value::Object(schema)
    }
}

/// Build the input schema for a tool from its parameter declarations
pub fn schema_for(specs: &[ParameterSpec]) -> Value {
    let properties: Map<String, Value> = specs
        .iter()
        .map(|spec| (spec.name.to_string(), spec.to_schema()))
        .collect();
    let required: Vec<&str> = specs
        .iter()
        .filter(|spec| spec.required)
        .map(|spec| spec.name)
        .collect();

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

/// Check a tool's parameter declarations for consistency
///
/// Names must be unique; bounds only make sense on integers and must not be
/// inverted.
pub fn validate_specs(specs: &[ParameterSpec]) -> Result<(), String> {
    let mut seen = HashSet::new();
    for spec in specs {
        if spec.name.is_empty() {
            return Err("parameter with an empty name".to_string());
        }
        if !seen.insert(spec.name) {
            return Err(format!("duplicate parameter '{}'", spec.name));
        }
        if spec.has_bounds() && spec.kind != ParameterKind::Integer {
            return Err(format!(
                "parameter '{}' declares bounds but is a {}",
                spec.name, spec.kind
            ));
        }
        if spec.allowed.is_some() && spec.kind != ParameterKind::String {
            return Err(format!(
                "parameter '{}' declares allowed values but is a {}",
                spec.name, spec.kind
            ));
        }
        if let (Some(min), Some(max)) = (spec.minimum, spec.maximum) {
            if min > max {
                return Err(format!(
                    "parameter '{}' has minimum {min} above maximum {max}",
                    spec.name
                ));
            }
        }
    }
    Ok(())
}
