//! Request field presence checks.
//!
//! A field counts as missing when it is absent or "falsy": an empty string
//! or `false`. An empty list is still a present value. One consequence is
//! that an edit with empty `content` is rejected as missing.

use super::error::ApiError;

pub trait Truthy {
    fn is_truthy(&self) -> bool;
}

impl Truthy for str {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for String {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}

impl<T> Truthy for [T] {
    fn is_truthy(&self) -> bool {
        true
    }
}

/// Returns the field value, or a missing-field error naming it.
pub fn require<'a, T>(field: Option<&'a T>, name: &'static str) -> Result<&'a T, ApiError>
where
    T: Truthy + ?Sized,
{
    field
        .filter(|value| value.is_truthy())
        .ok_or(ApiError::MissingField(name))
}
