//! In-memory debug information model consumed by symbol writers.
//!
//! This module defines the method-level debug information a symbol writer emits: source
//! [`Document`]s, [`SequencePoint`]s mapping IL offsets to source ranges, and the lexical
//! [`ScopeDebugInformation`] tree holding [`VariableDebugInformation`] entries.
//!
//! # Architecture
//!
//! A [`MethodDebugInformation`] belongs to exactly one compiled method (identified by its
//! `MethodDef` token) and owns:
//! - an ordered list of sequence points, emitted in stored order,
//! - an optional root scope whose children nest inside their parent's IL range.
//!
//! Documents are shared between sequence points through [`DocumentRc`]; writers identify
//! them by [`Document::url`], not by pointer identity.
//!
//! # Usage Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use cilpdb::metadata::token::Token;
//! use cilpdb::symbols::{
//!     Document, InstructionOffset, MethodDebugInformation, ScopeDebugInformation,
//!     SequencePoint, VariableDebugInformation,
//! };
//!
//! let document = Arc::new(Document::new("C:\\src\\Program.cs"));
//!
//! let mut scope = ScopeDebugInformation::new(0, InstructionOffset::EndOfMethod);
//! scope.variables.push(VariableDebugInformation::new(0, "count"));
//!
//! let mut info = MethodDebugInformation::new(Token::method_def(1), 12);
//! info.sequence_points.push(SequencePoint::new(0, Some(document.clone()), 3, 9, 3, 30));
//! info.scope = Some(scope);
//!
//! assert_eq!(info.scope.as_ref().unwrap().end_offset(info.code_size), 12);
//! ```
//!
//! # References
//!
//! - [ISymUnmanagedWriter](https://learn.microsoft.com/en-us/dotnet/framework/unmanaged-api/diagnostics/isymunmanagedwriter-interface)

use std::sync::Arc;

use bitflags::bitflags;
use strum::{Display, EnumIter};
use uguid::{guid, Guid};

use crate::metadata::token::Token;

/// Start line value marking a sequence point as hidden from the debugger.
pub const HIDDEN_LINE: u32 = 0x00FE_EFEE;

/// Source language of a [`Document`].
///
/// Each language maps to the fixed GUID the native symbol store expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter)]
pub enum DocumentLanguage {
    /// Unknown or unspecified language
    #[default]
    Other,
    /// C
    C,
    /// C++
    Cpp,
    /// C#
    CSharp,
    /// Visual Basic
    Basic,
    /// Java
    Java,
    /// COBOL
    Cobol,
    /// Pascal
    Pascal,
    /// Common Intermediate Language
    Cil,
    /// JScript
    JScript,
    /// Smalltalk-like SMC
    Smc,
    /// Managed C++
    MCpp,
    /// F#
    FSharp,
}

impl DocumentLanguage {
    /// Returns the language GUID understood by the native symbol store
    #[must_use]
    pub fn to_guid(self) -> Guid {
        match self {
            DocumentLanguage::Other => Guid::ZERO,
            DocumentLanguage::C => guid!("63a08714-fc37-11d2-904c-00c04fa302a1"),
            DocumentLanguage::Cpp => guid!("3a12d0b7-c26c-11d0-b442-00a0244a1dd2"),
            DocumentLanguage::CSharp => guid!("3f5162f8-07c6-11d3-9053-00c04fa302a1"),
            DocumentLanguage::Basic => guid!("3a12d0b8-c26c-11d0-b442-00a0244a1dd2"),
            DocumentLanguage::Java => guid!("3a12d0b4-c26c-11d0-b442-00a0244a1dd2"),
            DocumentLanguage::Cobol => guid!("af046cd1-d0e1-11d2-977c-00a0c9b4d50c"),
            DocumentLanguage::Pascal => guid!("af046cd2-d0e1-11d2-977c-00a0c9b4d50c"),
            DocumentLanguage::Cil => guid!("af046cd3-d0e1-11d2-977c-00a0c9b4d50c"),
            DocumentLanguage::JScript => guid!("3a12d0b6-c26c-11d0-b442-00a0244a1dd2"),
            DocumentLanguage::Smc => guid!("0d9b9f7b-6611-11d3-bd2a-0000f80849bd"),
            DocumentLanguage::MCpp => guid!("4b35fde8-07c6-11d3-9053-00c04fa302a1"),
            DocumentLanguage::FSharp => guid!("ab4f38c9-b6e6-43ba-be3b-58080b2ccce3"),
        }
    }
}

/// Vendor of the compiler that produced a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter)]
pub enum DocumentLanguageVendor {
    /// Unknown vendor
    #[default]
    Other,
    /// Microsoft
    Microsoft,
}

impl DocumentLanguageVendor {
    /// Returns the vendor GUID understood by the native symbol store
    #[must_use]
    pub fn to_guid(self) -> Guid {
        match self {
            DocumentLanguageVendor::Other => Guid::ZERO,
            DocumentLanguageVendor::Microsoft => guid!("994b45c4-e6e9-11d2-903f-00c04fa302a1"),
        }
    }
}

/// Kind of a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter)]
pub enum DocumentType {
    /// Unknown document kind
    #[default]
    Other,
    /// Plain text source file
    Text,
}

impl DocumentType {
    /// Returns the document type GUID understood by the native symbol store
    #[must_use]
    pub fn to_guid(self) -> Guid {
        match self {
            DocumentType::Other => Guid::ZERO,
            DocumentType::Text => guid!("5a869d0b-6611-11d3-bd2a-0000f80849bd"),
        }
    }
}

/// A source document referenced by sequence points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Path or URL of the source file; the identity used by symbol writers
    pub url: String,
    /// Source language
    pub language: DocumentLanguage,
    /// Compiler vendor
    pub language_vendor: DocumentLanguageVendor,
    /// Document kind
    pub doc_type: DocumentType,
}

impl Document {
    /// Creates a text document with unspecified language and vendor
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Document {
            url: url.into(),
            language: DocumentLanguage::Other,
            language_vendor: DocumentLanguageVendor::Other,
            doc_type: DocumentType::Text,
        }
    }

    /// Sets the language and vendor of this document
    #[must_use]
    pub fn with_language(
        mut self,
        language: DocumentLanguage,
        vendor: DocumentLanguageVendor,
    ) -> Self {
        self.language = language;
        self.language_vendor = vendor;
        self
    }
}

/// A reference-counted pointer to a [`Document`]
pub type DocumentRc = Arc<Document>;

/// Maps an IL offset to a range in a source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencePoint {
    /// Offset in the method's IL stream.
    pub offset: u32,
    /// Source document; `None` for compiler-synthesized points
    pub document: Option<DocumentRc>,
    /// Starting line in the source file.
    pub start_line: u32,
    /// Starting column in the source file.
    pub start_column: u32,
    /// Ending line in the source file.
    pub end_line: u32,
    /// Ending column in the source file.
    pub end_column: u32,
}

impl SequencePoint {
    /// Creates a sequence point
    #[must_use]
    pub fn new(
        offset: u32,
        document: Option<DocumentRc>,
        start_line: u32,
        start_column: u32,
        end_line: u32,
        end_column: u32,
    ) -> Self {
        SequencePoint {
            offset,
            document,
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }

    /// Creates a hidden sequence point at `offset`
    #[must_use]
    pub fn hidden(offset: u32, document: Option<DocumentRc>) -> Self {
        Self::new(offset, document, HIDDEN_LINE, 0, HIDDEN_LINE, 0)
    }

    /// True if this point is hidden from the debugger (start line 0xFEEFEE)
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.start_line == HIDDEN_LINE
    }
}

/// Start or end marker of a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstructionOffset {
    /// An explicit IL offset
    Offset(u32),
    /// The end of the method body, resolved against the method's code size
    EndOfMethod,
}

impl InstructionOffset {
    /// Resolves this marker to a concrete offset given the method's code size
    #[must_use]
    pub fn resolve(self, code_size: u32) -> u32 {
        match self {
            InstructionOffset::Offset(offset) => offset,
            InstructionOffset::EndOfMethod => code_size,
        }
    }

    /// True for the end-of-method sentinel
    #[must_use]
    pub fn is_end_of_method(self) -> bool {
        matches!(self, InstructionOffset::EndOfMethod)
    }
}

impl From<u32> for InstructionOffset {
    fn from(offset: u32) -> Self {
        InstructionOffset::Offset(offset)
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    /// Attributes of a local variable as recorded in debug information
    pub struct VariableAttributes: u16 {
        /// Variable is hidden from the debugger
        const DEBUGGER_HIDDEN = 0x0001;
    }
}

/// A local variable declared by a scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDebugInformation {
    /// Slot index in the method's local signature
    pub index: u32,
    /// Source-level name
    pub name: String,
    /// Debugger attributes
    pub attributes: VariableAttributes,
}

impl VariableDebugInformation {
    /// Creates a visible variable bound to local slot `index`
    #[must_use]
    pub fn new(index: u32, name: impl Into<String>) -> Self {
        VariableDebugInformation {
            index,
            name: name.into(),
            attributes: VariableAttributes::empty(),
        }
    }

    /// True if the variable is hidden from the debugger
    #[must_use]
    pub fn is_debugger_hidden(&self) -> bool {
        self.attributes.contains(VariableAttributes::DEBUGGER_HIDDEN)
    }
}

/// A lexical scope node.
///
/// Child scopes are expected to nest within this scope's range; that is not re-validated here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeDebugInformation {
    /// First IL offset covered by the scope
    pub start: InstructionOffset,
    /// End marker of the scope
    pub end: InstructionOffset,
    /// Variables declared by this scope, in declaration order
    pub variables: Vec<VariableDebugInformation>,
    /// Nested scopes, in stored order
    pub scopes: Vec<ScopeDebugInformation>,
}

impl ScopeDebugInformation {
    /// Creates an empty scope starting at `start`
    #[must_use]
    pub fn new(start: u32, end: impl Into<InstructionOffset>) -> Self {
        ScopeDebugInformation {
            start: InstructionOffset::Offset(start),
            end: end.into(),
            variables: Vec::new(),
            scopes: Vec::new(),
        }
    }

    /// Resolved start offset
    #[must_use]
    pub fn start_offset(&self, code_size: u32) -> u32 {
        self.start.resolve(code_size)
    }

    /// Resolved end offset; the end-of-method sentinel becomes `code_size`
    #[must_use]
    pub fn end_offset(&self, code_size: u32) -> u32 {
        self.end.resolve(code_size)
    }
}

/// Debug information attached to a single compiled method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDebugInformation {
    /// `MethodDef` token of the owning method
    pub method: Token,
    /// Size of the method's IL body in bytes
    pub code_size: u32,
    /// `StandAloneSig` token of the method's local variable signature, null if none
    pub local_var_token: Token,
    /// Sequence points in IL order
    pub sequence_points: Vec<SequencePoint>,
    /// Root lexical scope
    pub scope: Option<ScopeDebugInformation>,
}

impl MethodDebugInformation {
    /// Creates empty debug information for `method`
    #[must_use]
    pub fn new(method: Token, code_size: u32) -> Self {
        MethodDebugInformation {
            method,
            code_size,
            local_var_token: Token::default(),
            sequence_points: Vec::new(),
            scope: None,
        }
    }

    /// True if the method has any sequence points
    #[must_use]
    pub fn has_sequence_points(&self) -> bool {
        !self.sequence_points.is_empty()
    }
}
