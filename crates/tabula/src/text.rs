//! Small string helpers.
//!
//! Type-name formatting for diagnostics and character-offset slicing. These
//! are stateless free functions.

use std::ops::{Range, RangeInclusive};

/// Returns the unqualified name of `T` with generic arguments stripped.
///
/// ```
/// use tabula::text::short_type_name;
///
/// assert_eq!(short_type_name::<String>(), "String");
/// assert_eq!(short_type_name::<Vec<u8>>(), "Vec");
/// ```
pub fn short_type_name<T: ?Sized>() -> &'static str {
    strip_type_path(std::any::type_name::<T>())
}

/// Returns the unqualified type name of a value.
///
/// Convenience for `short_type_name::<T>()` when the type is inferred.
pub fn type_name_of<T: ?Sized>(_value: &T) -> &'static str {
    short_type_name::<T>()
}

/// Strips the module path and generic arguments from a type name.
///
/// `alloc::collections::btree::map::BTreeMap<u32, alloc::string::String>`
/// becomes `BTreeMap`. Names without a path are returned unchanged.
pub fn strip_type_path(name: &str) -> &str {
    let base = name.split_once('<').map_or(name, |(head, _)| head);
    base.rsplit("::").next().unwrap_or(base)
}

/// Slices `s` by character offsets over the half-open range `range`.
///
/// Returns `None` if the range is reversed or extends past the end of `s`.
///
/// ```
/// use tabula::text::char_slice;
///
/// assert_eq!(char_slice("héllo", 1..3), Some("él"));
/// assert_eq!(char_slice("abc", 2..5), None);
/// ```
pub fn char_slice(s: &str, range: Range<usize>) -> Option<&str> {
    if range.start > range.end {
        return None;
    }
    let start = byte_offset(s, range.start)?;
    let end = byte_offset(s, range.end)?;
    s.get(start..end)
}

/// Slices `s` by character offsets over the closed range `range`.
///
/// Returns `None` if the range is reversed or extends past the end of `s`.
pub fn char_slice_inclusive(s: &str, range: RangeInclusive<usize>) -> Option<&str> {
    let (start, end) = range.into_inner();
    char_slice(s, start..end.checked_add(1)?)
}

/// Byte offset of the character at `chars`, where `chars == len` maps to the end.
fn byte_offset(s: &str, chars: usize) -> Option<usize> {
    s.char_indices()
        .map(|(offset, _)| offset)
        .chain(std::iter::once(s.len()))
        .nth(chars)
}
