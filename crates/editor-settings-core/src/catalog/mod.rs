//! Default settings and bootstrap seeding.
//!
//! - **`defaults`** – The versioned catalog of default keys, values and hints.
//! - **`bootstrap`** – The optional descriptor a packaged distribution ships
//!   to pre-seed project entries and preset values.
//!
//! Neither module reads or writes the main settings file; the host crate only
//! runs them when no saved settings could be loaded, or to seed the defaults a
//! saved file is merged over.

pub mod bootstrap;
pub mod defaults;
