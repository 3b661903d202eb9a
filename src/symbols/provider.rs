//! Providers that pick between native and portable symbol files.
//!
//! Reading decides by content: the symbol file (or stream) is sniffed for the portable PDB
//! signature. Writing decides by history: a module loaded with portable symbols is written
//! back as portable, everything else as native.

use std::{path::Path, sync::Arc};

use crate::{
    symbols::{
        module::ModuleContext,
        native::{NativePdbReaderProvider, NativePdbWriterProvider, SymStore},
        stream::{
            check_file_name, check_read_seek, is_portable_pdb, is_portable_pdb_file,
            pdb_file_name,
        },
        SignatureProvider, SymbolFormat, SymbolReader, SymbolReaderProvider, SymbolSink,
        SymbolSource, SymbolWriter, SymbolWriterProvider, WriterParameters,
    },
    Result,
};

/// Opens whichever kind of PDB sits next to a module.
#[derive(Clone)]
pub struct PdbReaderProvider {
    native: NativePdbReaderProvider,
    portable: Arc<dyn SymbolReaderProvider>,
}

impl PdbReaderProvider {
    /// Creates a provider reading native PDBs through `store` and portable PDBs through
    /// `portable`
    #[must_use]
    pub fn new(store: Arc<dyn SymStore>, portable: Arc<dyn SymbolReaderProvider>) -> Self {
        PdbReaderProvider {
            native: NativePdbReaderProvider::new(store),
            portable,
        }
    }

    fn select(&self, format: SymbolFormat) -> &dyn SymbolReaderProvider {
        match format {
            SymbolFormat::Native => &self.native,
            SymbolFormat::Portable => self.portable.as_ref(),
        }
    }
}

impl SymbolReaderProvider for PdbReaderProvider {
    fn get_symbol_reader(
        &self,
        module: &ModuleContext,
        file_name: &Path,
    ) -> Result<Box<dyn SymbolReader>> {
        check_file_name(file_name)?;

        let pdb = pdb_file_name(file_name);
        let format = if is_portable_pdb_file(&pdb)? {
            SymbolFormat::Portable
        } else {
            SymbolFormat::Native
        };

        tracing::debug!(pdb = %pdb.display(), %format, "dispatching symbol reader");
        self.select(format).get_symbol_reader(module, file_name)
    }

    fn get_symbol_reader_from_stream(
        &self,
        module: &ModuleContext,
        mut stream: Box<dyn SymbolSource>,
        signature_provider: Option<SignatureProvider>,
    ) -> Result<Box<dyn SymbolReader>> {
        check_read_seek(&mut *stream)?;

        let format = if is_portable_pdb(&mut *stream)? {
            SymbolFormat::Portable
        } else {
            SymbolFormat::Native
        };

        tracing::debug!(%format, "dispatching symbol reader for stream");
        self.select(format)
            .get_symbol_reader_from_stream(module, stream, signature_provider)
    }
}

/// Writes symbols in the format the module was loaded with.
#[derive(Clone)]
pub struct PdbWriterProvider {
    native: NativePdbWriterProvider,
    portable: Arc<dyn SymbolWriterProvider>,
}

impl PdbWriterProvider {
    /// Creates a provider writing native PDBs through `store` and portable PDBs through
    /// `portable`
    #[must_use]
    pub fn new(store: Arc<dyn SymStore>, portable: Arc<dyn SymbolWriterProvider>) -> Self {
        PdbWriterProvider {
            native: NativePdbWriterProvider::new(store),
            portable,
        }
    }

    /// Format a session for `module` will produce
    #[must_use]
    pub fn format_for(module: &ModuleContext) -> SymbolFormat {
        if module.has_portable_symbols() {
            SymbolFormat::Portable
        } else {
            SymbolFormat::Native
        }
    }

    fn select(&self, module: &ModuleContext) -> &dyn SymbolWriterProvider {
        match Self::format_for(module) {
            SymbolFormat::Native => &self.native,
            SymbolFormat::Portable => self.portable.as_ref(),
        }
    }
}

impl SymbolWriterProvider for PdbWriterProvider {
    fn get_symbol_writer(
        &self,
        module: &ModuleContext,
        file_name: &Path,
        parameters: WriterParameters,
    ) -> Result<Box<dyn SymbolWriter>> {
        check_file_name(file_name)?;

        tracing::debug!(
            file = %file_name.display(),
            format = %Self::format_for(module),
            "dispatching symbol writer"
        );
        self.select(module)
            .get_symbol_writer(module, file_name, parameters)
    }

    fn get_symbol_writer_for_stream(
        &self,
        module: &ModuleContext,
        mut stream: Box<dyn SymbolSink>,
    ) -> Result<Box<dyn SymbolWriter>> {
        check_read_seek(&mut *stream)?;

        self.select(module)
            .get_symbol_writer_for_stream(module, stream)
    }
}
