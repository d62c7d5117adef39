// Type-level trust markers for values crossing the boundary

use std::ops::Deref;

/// A value authored by the host from consensus-validated chain state.
///
/// Only this crate constructs one (see [`Env::assemble`](crate::env::Env::assemble)),
/// so guest-decoded data can never be passed where a `Trusted` value is
/// expected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trusted<T>(T);

impl<T> Trusted<T> {
    pub(crate) fn new(value: T) -> Self {
        Trusted(value)
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Trusted<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

/// A guest-originated value that has passed the validation layer.
///
/// Produced only by [`Validator`](crate::validate::Validator); the dispatch
/// path accepts nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verified<T>(T);

impl<T> Verified<T> {
    pub(crate) fn new(value: T) -> Self {
        Verified(value)
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Verified<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}
