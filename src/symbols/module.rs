//! The view of a module that symbol providers need.
//!
//! Symbol plumbing only needs three things from a module: where it lives on disk (to find
//! the matching `.pdb`), which method is its entry point (recorded in native PDBs), and which
//! kind of symbol reader it was loaded with (to write symbols back in the same format).

use std::{
    fmt,
    path::{Path, PathBuf},
};

use crate::{
    metadata::token::Token,
    symbols::{
        SignatureProvider, SymbolFormat, SymbolReader, SymbolReaderProvider, SymbolSource,
    },
    Result,
};

/// A module as seen by symbol readers and writers.
#[derive(Default)]
pub struct ModuleContext {
    file_name: Option<PathBuf>,
    entry_point: Option<Token>,
    symbol_reader: Option<Box<dyn SymbolReader>>,
}

impl ModuleContext {
    /// Creates an in-memory module without file name, entry point or symbols
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a module loaded from `file_name`
    #[must_use]
    pub fn from_file(file_name: impl Into<PathBuf>) -> Self {
        ModuleContext {
            file_name: Some(file_name.into()),
            ..Self::default()
        }
    }

    /// Sets the `MethodDef` token of the entry point
    #[must_use]
    pub fn with_entry_point(mut self, entry_point: Token) -> Self {
        self.entry_point = Some(entry_point);
        self
    }

    /// Path the module was loaded from
    #[must_use]
    pub fn file_name(&self) -> Option<&Path> {
        self.file_name.as_deref()
    }

    /// `MethodDef` token of the entry point, if the module declares one
    #[must_use]
    pub fn entry_point(&self) -> Option<Token> {
        self.entry_point
    }

    /// Replaces the entry point
    pub fn set_entry_point(&mut self, entry_point: Option<Token>) {
        self.entry_point = entry_point;
    }

    /// The reader the module's symbols were loaded with
    #[must_use]
    pub fn symbol_reader(&self) -> Option<&dyn SymbolReader> {
        self.symbol_reader.as_deref()
    }

    /// Mutable access to the attached reader
    pub fn symbol_reader_mut(&mut self) -> Option<&mut (dyn SymbolReader + 'static)> {
        self.symbol_reader.as_deref_mut()
    }

    /// Attaches a symbol reader
    pub fn set_symbol_reader(&mut self, reader: Box<dyn SymbolReader>) {
        self.symbol_reader = Some(reader);
    }

    /// Detaches and returns the symbol reader
    pub fn take_symbol_reader(&mut self) -> Option<Box<dyn SymbolReader>> {
        self.symbol_reader.take()
    }

    /// Format of the attached symbol reader
    #[must_use]
    pub fn symbol_format(&self) -> Option<SymbolFormat> {
        self.symbol_reader.as_ref().map(|reader| reader.format())
    }

    /// True if the module was loaded with portable PDB symbols
    #[must_use]
    pub fn has_portable_symbols(&self) -> bool {
        self.symbol_format() == Some(SymbolFormat::Portable)
    }

    /// Loads the symbols next to the module file through `provider` and attaches the reader.
    ///
    /// # Errors
    ///
    /// [`crate::Error::InvalidArgument`] if the module has no file name, otherwise whatever
    /// the provider reports.
    pub fn read_symbols(&mut self, provider: &dyn SymbolReaderProvider) -> Result<()> {
        let Some(file_name) = self.file_name.clone() else {
            return Err(invalid_argument!("module has no file name to derive symbols from"));
        };

        let reader = provider.get_symbol_reader(self, &file_name)?;
        self.symbol_reader = Some(reader);
        Ok(())
    }

    /// Loads symbols from `stream` through `provider` and attaches the reader.
    ///
    /// # Errors
    ///
    /// Whatever the provider reports.
    pub fn read_symbols_from_stream(
        &mut self,
        provider: &dyn SymbolReaderProvider,
        stream: Box<dyn SymbolSource>,
        signature_provider: Option<SignatureProvider>,
    ) -> Result<()> {
        let reader = provider.get_symbol_reader_from_stream(self, stream, signature_provider)?;
        self.symbol_reader = Some(reader);
        Ok(())
    }
}

impl fmt::Debug for ModuleContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleContext")
            .field("file_name", &self.file_name)
            .field("entry_point", &self.entry_point)
            .field("symbol_format", &self.symbol_format())
            .finish()
    }
}
