//! Metadata tokens referenced by symbol files.
//!
//! # Key Components
//!
//! - [`token::Token`] - A table/row pair identifying a `MethodDef` or `StandAloneSig` row

pub mod token;
