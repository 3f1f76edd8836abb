//! Concrete link and display implementations.
//!
//! This module contains implementations of the traits defined in
//! [`crate::traits`]:
//!
//! - `mock`: test doubles for desktop development
//! - `serial`: real serial transport over the `serialport` crate
//!   (requires the `serial` feature, on by default)

pub mod mock;

#[cfg(feature = "serial")]
pub mod serial;

pub use mock::*;

#[cfg(feature = "serial")]
pub use serial::*;
