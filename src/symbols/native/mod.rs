//! Native (Windows PDB) symbol emission through the platform symbol store.
//!
//! The native PDB format is written by the platform's symbol store (`ISymUnmanagedWriter`
//! on Windows), not by this crate. This module defines the slice of that store's contract
//! the emitter relies on, [`SymWriter`], together with the factory [`SymStore`] that creates
//! writers and opens readers, and builds the debug info emitter on top of it.
//!
//! # Key Components
//!
//! - [`SymWriter`] - Native writer contract: methods, scopes, sequence points, locals, documents
//! - [`SymStore`] - Creates native writers for a target file and opens native readers
//! - [`NativePdbWriter`] - Walks [`crate::symbols::MethodDebugInformation`] into a [`SymWriter`]
//! - [`DocumentCache`] - Per-session URL to [`DocumentHandle`] cache
//! - [`NativePdbReaderProvider`] / [`NativePdbWriterProvider`] - Providers for the native format
//!
//! # Thread Safety
//!
//! A native session is single-threaded state: the store tracks the currently open method and
//! scope internally. [`SymWriter`] takes `&mut self` everywhere, so one session can only be
//! driven from one place at a time; callers needing parallelism open one session per thread.

mod documents;
mod provider;
mod writer;

pub use documents::DocumentCache;
pub use provider::{NativePdbReaderProvider, NativePdbWriterProvider};
pub use writer::NativePdbWriter;

use std::path::Path;

use uguid::Guid;

use crate::{
    metadata::token::Token,
    symbols::{
        debugdir::ImageDebugDirectory, module::ModuleContext, SignatureProvider, SymbolReader,
        SymbolSource,
    },
    Result,
};

/// Opaque handle to a document registered with a native writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentHandle(pub u32);

/// How a local variable's address is interpreted by the native store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum SymAddressKind {
    /// Address relative to the start of the IL stream
    IlOffset = 1,
    /// Native relative virtual address
    NativeRva = 2,
    /// Native register
    NativeRegister = 3,
    /// Register relative
    NativeRegRel = 4,
    /// Native offset
    NativeOffset = 5,
    /// Native register pair
    NativeRegisterRegister = 6,
    /// Native register and stack
    NativeRegisterStack = 7,
    /// Native stack and register
    NativeStackRegister = 8,
    /// Bit field
    BitField = 9,
    /// Native section and offset
    NativeSectionOffset = 10,
}

/// A single batch of sequence points for one document.
///
/// All slices have the same length; entry `i` of each slice describes one point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequencePointBatch<'a> {
    /// IL offsets
    pub offsets: &'a [u32],
    /// Start lines
    pub start_lines: &'a [u32],
    /// Start columns
    pub start_columns: &'a [u32],
    /// End lines
    pub end_lines: &'a [u32],
    /// End columns
    pub end_columns: &'a [u32],
}

impl SequencePointBatch<'_> {
    /// Number of points in the batch
    #[must_use]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// True if the batch holds no points
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

/// Local variable definition handed to [`SymWriter::define_local_variable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalVariableDef<'a> {
    /// Source-level name
    pub name: &'a str,
    /// Raw variable attributes
    pub attributes: u32,
    /// Local signature token of the containing method
    pub signature: Token,
    /// Address kind of `address1..address3`
    pub address_kind: SymAddressKind,
    /// Slot index for [`SymAddressKind::IlOffset`]
    pub address1: u32,
    /// Reserved, zero for IL locals
    pub address2: u32,
    /// Reserved, zero for IL locals
    pub address3: u32,
    /// First IL offset the variable is live at
    pub start_offset: u32,
    /// IL offset the variable stops being live at
    pub end_offset: u32,
}

/// Contract of a native symbol store writer session.
///
/// Implementations wrap the platform writer. Every call returns the store's own failure
/// unchanged; callers add no retry logic.
pub trait SymWriter {
    /// Registers a source document and returns its handle
    ///
    /// # Errors
    /// Store failure
    fn define_document(
        &mut self,
        url: &str,
        language: Guid,
        language_vendor: Guid,
        document_type: Guid,
    ) -> Result<DocumentHandle>;

    /// Defines sequence points of the open method in `document`, `None` for no document
    ///
    /// # Errors
    /// Store failure
    fn define_sequence_points(
        &mut self,
        document: Option<DocumentHandle>,
        points: SequencePointBatch<'_>,
    ) -> Result<()>;

    /// Opens the method identified by `method`
    ///
    /// # Errors
    /// Store failure, e.g. a method that was already closed
    fn open_method(&mut self, method: Token) -> Result<()>;

    /// Closes the open method
    ///
    /// # Errors
    /// Store failure
    fn close_method(&mut self) -> Result<()>;

    /// Opens a lexical scope at `start_offset`
    ///
    /// # Errors
    /// Store failure
    fn open_scope(&mut self, start_offset: u32) -> Result<()>;

    /// Closes the innermost open scope at `end_offset`
    ///
    /// # Errors
    /// Store failure
    fn close_scope(&mut self, end_offset: u32) -> Result<()>;

    /// Defines a local variable in the innermost open scope
    ///
    /// # Errors
    /// Store failure
    fn define_local_variable(&mut self, variable: LocalVariableDef<'_>) -> Result<()>;

    /// Marks `method` as the user entry point
    ///
    /// # Errors
    /// Store failure
    fn set_user_entry_point(&mut self, method: Token) -> Result<()>;

    /// Returns the debug directory descriptor and raw payload for the module image
    ///
    /// # Errors
    /// Store failure
    fn get_debug_info(&mut self) -> Result<(ImageDebugDirectory, Vec<u8>)>;

    /// Finalizes the symbol file and flushes it to its backing store
    ///
    /// # Errors
    /// Store failure
    fn close(&mut self) -> Result<()>;
}

/// Factory for native symbol store sessions.
pub trait SymStore {
    /// Creates a writer targeting `pdb_path` for `module`.
    ///
    /// Any file previously at `pdb_path` has already been removed by the caller.
    ///
    /// # Errors
    /// Store failure, e.g. the target cannot be created
    fn create_writer(&self, module: &ModuleContext, pdb_path: &Path) -> Result<Box<dyn SymWriter>>;

    /// Opens a native reader over `source`
    ///
    /// # Errors
    /// Store failure, e.g. the source is not a native PDB
    fn open_reader(
        &self,
        module: &ModuleContext,
        source: Box<dyn SymbolSource>,
        signature_provider: Option<SignatureProvider>,
    ) -> Result<Box<dyn SymbolReader>>;
}
