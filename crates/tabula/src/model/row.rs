//! Type-erased row content.
//!
//! A section stores heterogeneous rows. Each row is kept behind `dyn Any` and
//! recovered by naming its concrete type at the call site; a row of any other
//! type simply does not match.

use std::any::Any;
use std::fmt;

use crate::text::strip_type_path;

/// A single opaque row value.
///
/// `Row` can hold any `'static + Send + Sync` value. Lookups are generic over
/// the type the caller expects:
///
/// ```
/// use tabula::model::Row;
///
/// let row = Row::new(String::from("Apple"));
/// assert!(row.is::<String>());
/// assert_eq!(row.downcast_ref::<String>().map(String::as_str), Some("Apple"));
/// assert!(row.downcast_ref::<u32>().is_none());
/// assert!(row.matches(&String::from("Apple")));
/// ```
pub struct Row {
    value: Box<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Row {
    /// Wraps a value as a row.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            value: Box::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Returns `true` if the row holds a value of type `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    /// Returns a reference to the value if it is of type `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// Returns a mutable reference to the value if it is of type `T`.
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.value.downcast_mut::<T>()
    }

    /// Takes the value out of the row if it is of type `T`.
    ///
    /// On a type mismatch the row is handed back unchanged.
    pub fn downcast<T: Any>(self) -> Result<T, Row> {
        let Row { value, type_name } = self;
        match value.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(value) => Err(Row { value, type_name }),
        }
    }

    /// Returns `true` if the row holds a `T` equal to `other`.
    ///
    /// Rows of a different type never match, whatever their content.
    pub fn matches<T: Any + PartialEq>(&self, other: &T) -> bool {
        self.downcast_ref::<T>().is_some_and(|value| value == other)
    }

    /// Returns the fully qualified type name of the stored value.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns the stored value's type name without module path or generics.
    pub fn short_type_name(&self) -> &'static str {
        strip_type_path(self.type_name)
    }
}

impl fmt::Debug for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row<{}>", self.short_type_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Contact {
        name: String,
    }

    #[test]
    fn test_downcast_ref() {
        let row = Row::new(42u32);
        assert!(row.is::<u32>());
        assert!(!row.is::<i32>());
        assert_eq!(row.downcast_ref::<u32>(), Some(&42));
        assert_eq!(row.downcast_ref::<i32>(), None);
    }

    #[test]
    fn test_downcast_mut() {
        let mut row = Row::new(String::from("draft"));
        if let Some(text) = row.downcast_mut::<String>() {
            text.push_str(" v2");
        }
        assert_eq!(row.downcast_ref::<String>().map(String::as_str), Some("draft v2"));
    }

    #[test]
    fn test_downcast_owned() {
        let row = Row::new(Contact {
            name: String::from("Ada"),
        });
        let row = row.downcast::<String>().unwrap_err();
        let contact = row.downcast::<Contact>().unwrap();
        assert_eq!(contact.name, "Ada");
    }

    #[test]
    fn test_matches_is_type_filtered() {
        let row = Row::new(1i64);
        assert!(row.matches(&1i64));
        assert!(!row.matches(&2i64));
        // Same numeric value, different declared type
        assert!(!row.matches(&1i32));
    }

    #[test]
    fn test_debug_uses_short_type_name() {
        let row = Row::new(Contact {
            name: "Grace".into(),
        });
        assert_eq!(format!("{:?}", row), "Row<Contact>");
        assert_eq!(row.short_type_name(), "Contact");
        assert!(row.type_name().ends_with("Contact"));
    }
}
