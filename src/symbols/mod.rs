//! Debug symbol reading and writing for .NET modules.
//!
//! This module connects a module's in-memory debug information to a symbol file in one of
//! two formats:
//!
//! - **Native PDB**: the Windows MSF-based format. It is produced by the platform symbol
//!   store; this crate drives the store through [`native::SymWriter`] and never touches the
//!   file layout itself.
//! - **Portable PDB**: the self-contained ECMA-335 metadata based format. Its readers and
//!   writers are supplied by the caller as [`SymbolReaderProvider`] / [`SymbolWriterProvider`]
//!   implementations.
//!
//! # Architecture
//!
//! ```text
//! PdbReaderProvider / PdbWriterProvider        format dispatch
//!        |                         |
//!        v                         v
//! NativePdb*Provider        portable provider (caller supplied)
//!        |
//!        v
//! NativePdbWriter  --> DocumentCache --> SymWriter (platform store)
//!        |
//!        +--> CodeViewHeader::parse (GUID/age of the written PDB)
//! ```
//!
//! Reading sniffs the symbol file: a portable PDB starts with the metadata root signature
//! `BSJB`, anything else goes to the native store. Writing does not sniff; it follows the
//! kind of reader the module was loaded with, so a round-tripped module keeps its format.
//!
//! # Usage Examples
//!
//! ```rust,no_run
//! use std::{path::Path, sync::Arc};
//! use cilpdb::symbols::{
//!     native::SymStore, ModuleContext, PdbWriterProvider, SymbolReaderProvider,
//!     SymbolWriterProvider, WriterParameters,
//! };
//!
//! # fn run(
//! #     store: Arc<dyn SymStore>,
//! #     portable_readers: Arc<dyn SymbolReaderProvider>,
//! #     portable_writers: Arc<dyn SymbolWriterProvider>,
//! #     methods: Vec<cilpdb::symbols::MethodDebugInformation>,
//! # ) -> cilpdb::Result<()> {
//! let module = ModuleContext::from_file("bin/App.dll");
//! let provider = PdbWriterProvider::new(store, portable_writers);
//!
//! let mut writer = provider.get_symbol_writer(
//!     &module,
//!     Path::new("bin/App.dll"),
//!     WriterParameters::default().with_source_path_rewriter(|path| path.replace('\\', "/")),
//! )?;
//!
//! for info in &methods {
//!     writer.write(info)?;
//! }
//! if let Some(header) = writer.get_debug_header()? {
//!     if let Some(codeview) = header.codeview() {
//!         println!("pdb guid {} age {}", codeview.guid, codeview.age);
//!     }
//! }
//! writer.close()?;
//! # Ok(())
//! # }
//! ```

pub mod debugdir;
pub mod debuginfo;
pub mod module;
pub mod native;
pub mod provider;
pub mod stream;

pub use debugdir::{CodeViewHeader, DebugHeader, ImageDebugDirectory};
pub use debuginfo::{
    Document, DocumentLanguage, DocumentLanguageVendor, DocumentRc, DocumentType,
    InstructionOffset, MethodDebugInformation, ScopeDebugInformation, SequencePoint,
    VariableAttributes, VariableDebugInformation,
};
pub use module::ModuleContext;
pub use native::{NativePdbReaderProvider, NativePdbWriter, NativePdbWriterProvider};
pub use provider::{PdbReaderProvider, PdbWriterProvider};
pub use stream::{SymbolSink, SymbolSource};

use std::{fmt, path::Path};

use strum::{Display, EnumIter};
use uguid::Guid;

use crate::{metadata::token::Token, Result};

/// Rewrites a source document path before it is recorded in a symbol file.
///
/// Used for deterministic builds, e.g. mapping `/home/ci/work/src` to `/_/src`.
pub type SourcePathRewriter = Box<dyn Fn(&str) -> String>;

/// Receives the GUID identifying a symbol file. Invoked at most once per session.
pub type SignatureProvider = Box<dyn FnOnce(Guid)>;

/// The symbol file formats this crate dispatches between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum SymbolFormat {
    /// Windows PDB written by the platform symbol store
    Native,
    /// ECMA-335 metadata based portable PDB
    Portable,
}

/// Per-session hooks of a symbol writer.
#[derive(Default)]
pub struct WriterParameters {
    source_path_rewriter: Option<SourcePathRewriter>,
    signature_provider: Option<SignatureProvider>,
}

impl WriterParameters {
    /// Rewrites every document URL before it is registered with the symbol file
    #[must_use]
    pub fn with_source_path_rewriter(
        mut self,
        rewriter: impl Fn(&str) -> String + 'static,
    ) -> Self {
        self.source_path_rewriter = Some(Box::new(rewriter));
        self
    }

    /// Receives the symbol file GUID once the debug header has been produced
    #[must_use]
    pub fn with_signature_provider(mut self, provider: impl FnOnce(Guid) + 'static) -> Self {
        self.signature_provider = Some(Box::new(provider));
        self
    }

    /// True if a source path rewriter is configured
    #[must_use]
    pub fn has_source_path_rewriter(&self) -> bool {
        self.source_path_rewriter.is_some()
    }

    /// True if a signature provider is configured
    #[must_use]
    pub fn has_signature_provider(&self) -> bool {
        self.signature_provider.is_some()
    }

    /// Splits the parameters into the rewriter and the signature provider
    #[must_use]
    pub fn into_parts(self) -> (Option<SourcePathRewriter>, Option<SignatureProvider>) {
        (self.source_path_rewriter, self.signature_provider)
    }
}

impl fmt::Debug for WriterParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterParameters")
            .field("source_path_rewriter", &self.has_source_path_rewriter())
            .field("signature_provider", &self.has_signature_provider())
            .finish()
    }
}

/// A loaded symbol file.
pub trait SymbolReader {
    /// Format of the symbol file behind this reader
    fn format(&self) -> SymbolFormat;

    /// Checks that the symbol file matches the module's debug header
    ///
    /// # Errors
    /// Reader failure
    fn process_debug_header(&mut self, header: &DebugHeader) -> Result<bool>;

    /// Reads the debug information of `method`, if the symbol file has any
    ///
    /// # Errors
    /// Reader failure
    fn read(&mut self, method: Token) -> Result<Option<MethodDebugInformation>>;
}

/// A symbol writer session.
///
/// Sessions are consumed by [`SymbolWriter::close`], so nothing can be written afterwards.
pub trait SymbolWriter {
    /// Format of the symbol file being written
    fn format(&self) -> SymbolFormat;

    /// Produces the debug directory entry to embed in the module.
    ///
    /// Returns `Ok(None)` if the symbol file's debug header does not validate as a
    /// version 0.0 CodeView PDB 7.0 record.
    ///
    /// # Errors
    /// Writer failure
    fn get_debug_header(&mut self) -> Result<Option<DebugHeader>>;

    /// Writes the debug information of one method. At most once per method.
    ///
    /// # Errors
    /// Writer failure; the session must not be used further after one
    fn write(&mut self, info: &MethodDebugInformation) -> Result<()>;

    /// Finalizes the symbol file
    ///
    /// # Errors
    /// Writer failure
    fn close(self: Box<Self>) -> Result<()>;
}

/// Creates symbol readers for a module.
pub trait SymbolReaderProvider {
    /// Opens the symbol file belonging to the module file `file_name`
    ///
    /// # Errors
    /// [`crate::Error::InvalidArgument`] for an empty file name, I/O or reader failures
    fn get_symbol_reader(
        &self,
        module: &ModuleContext,
        file_name: &Path,
    ) -> Result<Box<dyn SymbolReader>>;

    /// Opens a symbol reader over `stream`
    ///
    /// # Errors
    /// [`crate::Error::InvalidArgument`] for unusable streams, reader failures
    fn get_symbol_reader_from_stream(
        &self,
        module: &ModuleContext,
        stream: Box<dyn SymbolSource>,
        signature_provider: Option<SignatureProvider>,
    ) -> Result<Box<dyn SymbolReader>>;
}

/// Creates symbol writer sessions for a module.
pub trait SymbolWriterProvider {
    /// Starts a session writing the symbol file belonging to the module file `file_name`
    ///
    /// # Errors
    /// [`crate::Error::InvalidArgument`] for an empty file name, I/O or writer failures
    fn get_symbol_writer(
        &self,
        module: &ModuleContext,
        file_name: &Path,
        parameters: WriterParameters,
    ) -> Result<Box<dyn SymbolWriter>>;

    /// Starts a session writing into `stream`
    ///
    /// # Errors
    /// [`crate::Error::InvalidArgument`] for unusable streams, [`crate::Error::NotSupported`]
    /// if the format cannot target a stream
    fn get_symbol_writer_for_stream(
        &self,
        module: &ModuleContext,
        stream: Box<dyn SymbolSink>,
    ) -> Result<Box<dyn SymbolWriter>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writer_parameters_builder() {
        let parameters = WriterParameters::default();
        assert!(!parameters.has_source_path_rewriter());
        assert!(!parameters.has_signature_provider());

        let parameters = parameters
            .with_source_path_rewriter(|path| path.to_uppercase())
            .with_signature_provider(|_| {});
        assert!(parameters.has_source_path_rewriter());
        assert!(parameters.has_signature_provider());
        assert_eq!(
            format!("{:?}", parameters),
            "WriterParameters { source_path_rewriter: true, signature_provider: true }"
        );

        let (rewriter, provider) = parameters.into_parts();
        assert_eq!(rewriter.unwrap()("a.cs"), "A.CS");
        assert!(provider.is_some());
    }

    #[test]
    fn format_display() {
        assert_eq!(SymbolFormat::Native.to_string(), "Native");
        assert_eq!(SymbolFormat::Portable.to_string(), "Portable");
    }
}
