//! # cilpdb Prelude
//!
//! Commonly used types from across the crate, for glob imports.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all cilpdb operations
pub use crate::Error;

/// The result type used throughout cilpdb
pub use crate::Result;

/// Metadata token type for methods and signatures
pub use crate::metadata::token::Token;

// ================================================================================================
// Debug Information Model
// ================================================================================================

pub use crate::symbols::{
    Document, DocumentLanguage, DocumentLanguageVendor, DocumentRc, DocumentType,
    InstructionOffset, MethodDebugInformation, ScopeDebugInformation, SequencePoint,
    VariableAttributes, VariableDebugInformation,
};

// ================================================================================================
// Debug Directory
// ================================================================================================

pub use crate::symbols::{CodeViewHeader, DebugHeader, ImageDebugDirectory};

// ================================================================================================
// Readers, Writers and Providers
// ================================================================================================

pub use crate::symbols::{
    ModuleContext, NativePdbReaderProvider, NativePdbWriter, NativePdbWriterProvider,
    PdbReaderProvider, PdbWriterProvider, SignatureProvider, SourcePathRewriter, SymbolFormat,
    SymbolReader, SymbolReaderProvider, SymbolSink, SymbolSource, SymbolWriter,
    SymbolWriterProvider, WriterParameters,
};

/// Native symbol store contract
pub use crate::symbols::native::{SymStore, SymWriter};
