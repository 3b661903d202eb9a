//! Shared fixtures for unit tests: a recording native store and stub portable providers.


pub use stubs::*;
pub use symstore::*;
