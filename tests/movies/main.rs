//! Movie service integration tests.

mod support;
mod catalogue;

#[cfg(feature = "http")]
mod cors;
