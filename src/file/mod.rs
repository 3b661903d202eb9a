//! Byte-level helpers shared by the debug directory codecs.
//!
//! Symbol files are never mapped or parsed wholesale here; the only raw data this crate
//! decodes is the fixed-size CodeView record, the debug directory descriptor and the portable
//! PDB signature. [`io`] provides the bounds-checked little-endian primitives for those.

pub mod io;
