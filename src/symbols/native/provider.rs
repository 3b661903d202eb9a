use std::{fs, path::Path, sync::Arc};

use crate::{
    symbols::{
        module::ModuleContext,
        native::{NativePdbWriter, SymStore},
        stream::{check_file_name, pdb_file_name},
        SignatureProvider, SymbolReader, SymbolReaderProvider, SymbolSink, SymbolSource,
        SymbolWriter, SymbolWriterProvider, WriterParameters,
    },
    Error, Result,
};

/// Opens native PDBs through the platform symbol store.
#[derive(Clone)]
pub struct NativePdbReaderProvider {
    store: Arc<dyn SymStore>,
}

impl NativePdbReaderProvider {
    /// Creates a provider backed by `store`
    #[must_use]
    pub fn new(store: Arc<dyn SymStore>) -> Self {
        NativePdbReaderProvider { store }
    }
}

impl SymbolReaderProvider for NativePdbReaderProvider {
    fn get_symbol_reader(
        &self,
        module: &ModuleContext,
        file_name: &Path,
    ) -> Result<Box<dyn SymbolReader>> {
        check_file_name(file_name)?;

        let file = fs::File::open(pdb_file_name(file_name))?;
        self.store.open_reader(module, Box::new(file), None)
    }

    fn get_symbol_reader_from_stream(
        &self,
        module: &ModuleContext,
        stream: Box<dyn SymbolSource>,
        signature_provider: Option<SignatureProvider>,
    ) -> Result<Box<dyn SymbolReader>> {
        self.store.open_reader(module, stream, signature_provider)
    }
}

/// Writes native PDBs through the platform symbol store.
///
/// The store only writes to files it opens itself, so
/// [`SymbolWriterProvider::get_symbol_writer_for_stream`] always fails with
/// [`Error::NotSupported`].
#[derive(Clone)]
pub struct NativePdbWriterProvider {
    store: Arc<dyn SymStore>,
}

impl NativePdbWriterProvider {
    /// Creates a provider backed by `store`
    #[must_use]
    pub fn new(store: Arc<dyn SymStore>) -> Self {
        NativePdbWriterProvider { store }
    }
}

impl SymbolWriterProvider for NativePdbWriterProvider {
    fn get_symbol_writer(
        &self,
        module: &ModuleContext,
        file_name: &Path,
        parameters: WriterParameters,
    ) -> Result<Box<dyn SymbolWriter>> {
        check_file_name(file_name)?;

        let pdb = pdb_file_name(file_name);
        if pdb.exists() {
            tracing::debug!(pdb = %pdb.display(), "removing stale pdb");
            fs::remove_file(&pdb)?;
        }

        tracing::debug!(pdb = %pdb.display(), "creating native pdb writer");
        let writer = self.store.create_writer(module, &pdb)?;

        Ok(Box::new(NativePdbWriter::new(
            writer,
            module.entry_point(),
            parameters,
        )))
    }

    fn get_symbol_writer_for_stream(
        &self,
        _module: &ModuleContext,
        _stream: Box<dyn SymbolSink>,
    ) -> Result<Box<dyn SymbolWriter>> {
        Err(Error::NotSupported)
    }
}
