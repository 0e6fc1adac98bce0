//! The [`Seekable`] trait, implemented by anything the engine can query.

use crate::value::Value;

/// Trait for types that can be filtered, sorted and counted by the engine.
///
/// [`Record`](crate::Record) implements it for schemaless data. Typed
/// structs can implement it by hand:
///
/// ```
/// use ahara_seeker::{Seekable, Value};
///
/// struct Patient {
///     id: String,
///     name: String,
///     age: u8,
/// }
///
/// impl Seekable for Patient {
///     fn record_id(&self) -> &str {
///         &self.id
///     }
///
///     fn seeker_field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "name" => Value::String(&self.name),
///             "age" => Value::Number(self.age as f64),
///             _ => Value::None,
///         }
///     }
/// }
/// ```
pub trait Seekable {
    /// Returns the unique identifier of the record.
    fn record_id(&self) -> &str;

    /// Returns the value of a field for query comparison.
    ///
    /// Unknown or absent fields return [`Value::None`]; the engine treats
    /// those as neutral values rather than errors.
    fn seeker_field_value(&self, field: &str) -> Value<'_>;
}

impl<T: Seekable + ?Sized> Seekable for &T {
    fn record_id(&self) -> &str {
        (**self).record_id()
    }

    fn seeker_field_value(&self, field: &str) -> Value<'_> {
        (**self).seeker_field_value(field)
    }
}
