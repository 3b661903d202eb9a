// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # cilpdb
//!
//! Debug symbol emission for .NET (CIL) modules.
//!
//! `cilpdb` takes the per-method debug information of a module (sequence points, lexical
//! scopes and local variables) and writes it into a Windows PDB through the platform's
//! native symbol store. It also recovers the CodeView identity (GUID and age) of the written
//! file so the module's debug directory can point at it, and it routes symbol reading and
//! writing between native and portable PDBs.
//!
//! ## Features
//!
//! - **Native PDB emission** - Drives a native symbol store writer method by method
//! - **CodeView codec** - Validates and encodes `RSDS` debug directory payloads
//! - **Document deduplication** - Each source file is registered once per session
//! - **Format dispatch** - Portable PDBs are detected by their `BSJB` signature
//! - **Deterministic builds** - Source paths can be rewritten before they are recorded
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cilpdb::prelude::*;
//! use std::{path::Path, sync::Arc};
//!
//! # fn store() -> Arc<dyn SymStore> { unimplemented!() }
//! let module = ModuleContext::from_file("bin/App.dll").with_entry_point(Token::method_def(1));
//! let provider = NativePdbWriterProvider::new(store());
//!
//! let mut writer =
//!     provider.get_symbol_writer(&module, Path::new("bin/App.dll"), WriterParameters::default())?;
//!
//! let mut info = MethodDebugInformation::new(Token::method_def(1), 12);
//! let document = Arc::new(Document::new("/src/Program.cs"));
//! info.sequence_points.push(SequencePoint::new(0, Some(document), 3, 5, 3, 30));
//! writer.write(&info)?;
//!
//! if let Some(header) = writer.get_debug_header()? {
//!     println!("{:?}", header.codeview());
//! }
//! writer.close()?;
//! # Ok::<(), cilpdb::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`symbols`] - Debug info model, CodeView codec, native emitter and providers
//! - [`metadata`] - Metadata tokens identifying methods and signatures
//! - [`prelude`] - Re-exports of the commonly used types
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T>`]. Precondition failures are reported as
//! [`Error::InvalidArgument`] before any file or native resource is touched.

#[macro_use]
pub(crate) mod error;
pub(crate) mod file;

/// Shared functionality which is used in unit-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use cilpdb::prelude::*;
///
/// let token = Token::method_def(3);
/// assert_eq!(token.value(), 0x0600_0003);
/// ```
pub mod prelude;

/// Metadata tokens.
///
/// Only the part of ECMA-335 metadata that symbol files reference: the `MethodDef` token of
/// a method and the `StandAloneSig` token of its local signature.
pub mod metadata;

/// Debug symbol model, codecs, emitter and providers.
pub mod symbols;

/// `cilpdb` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `cilpdb` Error type
///
/// # Examples
///
/// ```rust
/// use cilpdb::{symbols::stream::check_file_name, Error};
///
/// match check_file_name(std::path::Path::new("")) {
///     Err(Error::InvalidArgument { message, .. }) => println!("rejected: {}", message),
///     other => panic!("{:?}", other),
/// }
/// ```
pub use error::Error;
