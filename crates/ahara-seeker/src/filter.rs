//! Categorical and range predicates.
//!
//! A view exposes two kinds of filter controls besides the search box:
//! select boxes (category, dosha, gender) and min/max sliders (calories,
//! age). [`FacetChoice`] models the former, [`RangeBounds`] the latter.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::QueryError;
use crate::value::{format_number, Value};

/// The select-box sentinel meaning "no constraint".
pub const ALL: &str = "all";

/// Owned value a categorical filter compares against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FacetValue {
    /// Boolean flag.
    Bool(bool),
    /// Numeric value.
    Number(f64),
    /// Text value.
    Text(String),
}

impl FacetValue {
    /// Tests a record field for exact equality with this value.
    ///
    /// Absent fields take the neutral value of the expected type: `""`,
    /// `0` or `false`. A list field matches when one of its elements equals
    /// the expected text. Text typed into a select box also matches numeric
    /// and boolean fields it parses to, so `"40"` matches an age of 40.
    pub fn matches(&self, field_value: &Value<'_>) -> bool {
        match (self, field_value) {
            (FacetValue::Text(expected), Value::String(s)) => s == expected,
            (FacetValue::Text(expected), Value::List(items)) => {
                items.iter().any(|item| item == expected)
            }
            (FacetValue::Text(expected), Value::None) => expected.is_empty(),
            (FacetValue::Text(expected), Value::Number(n)) => {
                expected.trim().parse::<f64>().is_ok_and(|e| e == *n)
            }
            (FacetValue::Text(expected), Value::Bool(b)) => {
                expected.trim().parse::<bool>().is_ok_and(|e| e == *b)
            }

            (FacetValue::Number(expected), Value::Number(n)) => n == expected,
            (FacetValue::Number(expected), Value::None) => *expected == 0.0,

            (FacetValue::Bool(expected), Value::Bool(b)) => b == expected,
            (FacetValue::Bool(expected), Value::None) => !*expected,

            // Type mismatch
            _ => false,
        }
    }
}

impl fmt::Display for FacetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FacetValue::Bool(b) => write!(f, "{}", b),
            FacetValue::Number(n) => f.write_str(&format_number(*n)),
            FacetValue::Text(s) => f.write_str(s),
        }
    }
}

/// A select-box choice: everything, or exactly one value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetChoice {
    /// No constraint.
    #[default]
    All,
    /// The record field must equal this value.
    Only(FacetValue),
}

impl FacetChoice {
    /// Returns `true` if this choice constrains nothing.
    pub fn is_all(&self) -> bool {
        matches!(self, FacetChoice::All)
    }

    /// Tests a record field against this choice.
    pub fn matches(&self, field_value: &Value<'_>) -> bool {
        match self {
            FacetChoice::All => true,
            FacetChoice::Only(expected) => expected.matches(field_value),
        }
    }
}

impl From<&str> for FacetChoice {
    fn from(s: &str) -> Self {
        if s == ALL {
            FacetChoice::All
        } else {
            FacetChoice::Only(FacetValue::Text(s.to_string()))
        }
    }
}

impl From<String> for FacetChoice {
    fn from(s: String) -> Self {
        FacetChoice::from(s.as_str())
    }
}

impl From<f64> for FacetChoice {
    fn from(n: f64) -> Self {
        FacetChoice::Only(FacetValue::Number(n))
    }
}

impl From<i64> for FacetChoice {
    fn from(n: i64) -> Self {
        FacetChoice::Only(FacetValue::Number(n as f64))
    }
}

impl From<bool> for FacetChoice {
    fn from(b: bool) -> Self {
        FacetChoice::Only(FacetValue::Bool(b))
    }
}

impl fmt::Display for FacetChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FacetChoice::All => f.write_str(ALL),
            FacetChoice::Only(value) => value.fmt(f),
        }
    }
}

/// Inclusive numeric bounds for a slider filter.
///
/// A malformed range (`min > max`) is accepted and simply matches nothing.
/// Open ends are infinite in memory and `null` in serialized form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeBounds {
    /// Lower bound, inclusive.
    #[serde(serialize_with = "ser_bound", deserialize_with = "de_lower")]
    pub min: f64,
    /// Upper bound, inclusive.
    #[serde(serialize_with = "ser_bound", deserialize_with = "de_upper")]
    pub max: f64,
}

fn ser_bound<S: Serializer>(bound: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if bound.is_finite() {
        serializer.serialize_some(bound)
    } else {
        serializer.serialize_none()
    }
}

fn de_lower<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NEG_INFINITY))
}

fn de_upper<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
}

impl RangeBounds {
    /// Creates bounds covering `[min, max]`.
    pub fn new(min: f64, max: f64) -> Self {
        RangeBounds { min, max }
    }

    /// Bounds with only an upper limit.
    pub fn at_most(max: f64) -> Self {
        RangeBounds::new(f64::NEG_INFINITY, max)
    }

    /// Bounds with only a lower limit.
    pub fn at_least(min: f64) -> Self {
        RangeBounds::new(min, f64::INFINITY)
    }

    /// Returns `true` if `min > max`.
    pub fn is_empty(&self) -> bool {
        !(self.min <= self.max)
    }

    /// Tests a number against the bounds, inclusive at both ends.
    pub fn contains(&self, n: f64) -> bool {
        self.min <= n && n <= self.max
    }

    /// Tests a record field; absent or non-numeric fields read as `0`.
    pub fn matches(&self, field_value: &Value<'_>) -> bool {
        self.contains(field_value.number_or_zero())
    }
}

/// Parses `MIN..MAX`, where either side may be left empty for an open end.
impl FromStr for RangeBounds {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (min, max) = s.split_once("..").ok_or_else(|| {
            QueryError::InvalidArgument(format!("range '{}' must look like MIN..MAX", s))
        })?;

        let parse = |part: &str, open: f64| -> Result<f64, QueryError> {
            let part = part.trim();
            if part.is_empty() {
                return Ok(open);
            }
            part.parse::<f64>().map_err(|_| {
                QueryError::InvalidArgument(format!("'{}' is not a number in range '{}'", part, s))
            })
        };

        Ok(RangeBounds::new(
            parse(min, f64::NEG_INFINITY)?,
            parse(max, f64::INFINITY)?,
        ))
    }
}

impl fmt::Display for RangeBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min.is_finite() {
            f.write_str(&format_number(self.min))?;
        }
        f.write_str("..")?;
        if self.max.is_finite() {
            f.write_str(&format_number(self.max))?;
        }
        Ok(())
    }
}
