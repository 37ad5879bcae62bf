//! Domain entities for editor settings.
//!
//! This module contains pure business logic with no infrastructure
//! dependencies: no file access, no environment lookups, no locking.  The
//! host crate wraps these types in a mutex and adds persistence.
//!
//! # Why keep locking out of the domain? (for beginners)
//!
//! [`store::PropertyStore`] takes `&mut self` for every mutation.  The Rust
//! borrow checker then guarantees that nobody reads while somebody writes, at
//! compile time.  When the store must be shared between threads the caller
//! decides how (a `Mutex`, a single owner task, ...), and the domain stays
//! trivially unit-testable.

/// Presentation metadata overlaid on settings.
pub mod hints;

/// The ordered property bag.
pub mod store;

/// The closed set of setting value types.
pub mod value;
