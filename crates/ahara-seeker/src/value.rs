//! Runtime value types for field comparison.
//!
//! The [`Value`] enum is the borrowed view of a single record field that the
//! engine filters, sorts and counts on. It covers the four shapes a clinic
//! record carries: text, numbers, flags and lists of tags.

/// Runtime value for comparison, borrowed from the source record.
///
/// # Example
///
/// ```
/// use ahara_seeker::Value;
///
/// struct Food {
///     name: String,
///     calories: u32,
///     tags: Vec<String>,
/// }
///
/// fn field<'a>(food: &'a Food, name: &str) -> Value<'a> {
///     match name {
///         "name" => Value::String(&food.name),
///         "calories" => Value::Number(food.calories as f64),
///         "tags" => Value::List(&food.tags),
///         _ => Value::None,
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    /// String value (borrowed).
    String(&'a str),
    /// Numeric value.
    Number(f64),
    /// Boolean value.
    Bool(bool),
    /// List of strings, e.g. tags or conditions.
    List(&'a [String]),
    /// Field not present on the record.
    None,
}

impl<'a> Value<'a> {
    /// Returns `true` if this is a `None` value.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Returns `true` if this is a `String` value.
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` if this is a `Number` value.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Returns `true` if this is a `Bool` value.
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns `true` if this is a `List` value.
    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the boolean value, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extracts the list value, if present.
    pub fn as_list(&self) -> Option<&'a [String]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Numeric reading used by range filters.
    ///
    /// Absent and non-numeric fields read as `0`.
    pub fn number_or_zero(&self) -> f64 {
        self.as_number().unwrap_or(0.0)
    }

    /// Case-insensitive substring test used by free-text search.
    ///
    /// `needle` must already be lowercased. Lists match when any element
    /// contains the needle; numbers, flags and absent fields never match.
    pub fn contains_folded(&self, needle: &str) -> bool {
        match self {
            Value::String(s) => s.to_lowercase().contains(needle),
            Value::List(items) => items
                .iter()
                .any(|item| item.to_lowercase().contains(needle)),
            _ => false,
        }
    }
}

/// Formats a number the way facet labels and tables show it.
///
/// Whole numbers drop the fractional part (`130` rather than `130.0`).
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}
