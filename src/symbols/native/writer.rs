//! Debug info emitter for the native symbol store.
//!
//! [`NativePdbWriter`] owns one native writer session. For every method it receives it
//! issues the store's calls in a fixed shape:
//!
//! ```text
//! open_method(token)
//!   define_sequence_points(doc, [offset], [line], [col], [end_line], [end_col])   per point
//!   open_scope(start)
//!     define_local_variable(..)                                                  per local
//!     <child scopes, recursively, in stored order>
//!   close_scope(end)
//! close_method()
//! ```
//!
//! The session ends with [`SymbolWriter::close`], which records the module entry point and
//! flushes the store. Dropping a session without closing it releases the native writer
//! without flushing.

use crate::{
    metadata::token::Token,
    symbols::{
        debugdir::{CodeViewHeader, DebugHeader},
        debuginfo::{MethodDebugInformation, ScopeDebugInformation, SequencePoint},
        native::{DocumentCache, LocalVariableDef, SequencePointBatch, SymAddressKind, SymWriter},
        SignatureProvider, SymbolFormat, SymbolWriter, WriterParameters,
    },
    Result,
};

/// A native PDB writer session.
pub struct NativePdbWriter {
    writer: Box<dyn SymWriter>,
    documents: DocumentCache,
    entry_point: Option<Token>,
    signature_provider: Option<SignatureProvider>,
    identity: Option<CodeViewHeader>,
}

impl NativePdbWriter {
    /// Wraps a freshly initialized native writer.
    ///
    /// `entry_point` is the `MethodDef` token of the module's entry point, if it has one; it
    /// is handed to the store when the session closes.
    #[must_use]
    pub fn new(
        writer: Box<dyn SymWriter>,
        entry_point: Option<Token>,
        parameters: WriterParameters,
    ) -> Self {
        let (source_path_rewriter, signature_provider) = parameters.into_parts();
        NativePdbWriter {
            writer,
            documents: DocumentCache::new(source_path_rewriter),
            entry_point,
            signature_provider,
            identity: None,
        }
    }

    /// The GUID and age recovered by the last successful [`SymbolWriter::get_debug_header`]
    #[must_use]
    pub fn identity(&self) -> Option<CodeViewHeader> {
        self.identity
    }

    /// The documents registered so far in this session
    #[must_use]
    pub fn documents(&self) -> &DocumentCache {
        &self.documents
    }

    fn define_sequence_points(&mut self, points: &[SequencePoint]) -> Result<()> {
        for point in points {
            let document = self
                .documents
                .resolve(self.writer.as_mut(), point.document.as_deref())?;

            self.writer.define_sequence_points(
                document,
                SequencePointBatch {
                    offsets: &[point.offset],
                    start_lines: &[point.start_line],
                    start_columns: &[point.start_column],
                    end_lines: &[point.end_line],
                    end_columns: &[point.end_column],
                },
            )?;
        }

        Ok(())
    }

    fn define_scope(
        &mut self,
        scope: &ScopeDebugInformation,
        code_size: u32,
        local_var_token: Token,
    ) -> Result<()> {
        let start_offset = scope.start_offset(code_size);
        let end_offset = scope.end_offset(code_size);

        self.writer.open_scope(start_offset)?;

        for variable in &scope.variables {
            self.writer.define_local_variable(LocalVariableDef {
                name: &variable.name,
                attributes: u32::from(variable.attributes.bits()),
                signature: local_var_token,
                address_kind: SymAddressKind::IlOffset,
                address1: variable.index,
                address2: 0,
                address3: 0,
                start_offset,
                end_offset,
            })?;
        }

        for child in &scope.scopes {
            self.define_scope(child, code_size, local_var_token)?;
        }

        self.writer.close_scope(end_offset)
    }
}

impl SymbolWriter for NativePdbWriter {
    fn format(&self) -> SymbolFormat {
        SymbolFormat::Native
    }

    fn get_debug_header(&mut self) -> Result<Option<DebugHeader>> {
        let (directory, data) = self.writer.get_debug_info()?;

        let Some(identity) = CodeViewHeader::parse(&directory, &data) else {
            return Ok(None);
        };

        tracing::debug!(guid = %identity.guid, age = identity.age, "recovered pdb identity");
        self.identity = Some(identity);
        if let Some(provider) = self.signature_provider.take() {
            provider(identity.guid);
        }

        Ok(Some(DebugHeader::new(directory, data)))
    }

    fn write(&mut self, info: &MethodDebugInformation) -> Result<()> {
        self.writer.open_method(info.method)?;

        if info.has_sequence_points() {
            self.define_sequence_points(&info.sequence_points)?;
        }

        if let Some(scope) = &info.scope {
            self.define_scope(scope, info.code_size, info.local_var_token)?;
        }

        self.writer.close_method()
    }

    fn close(mut self: Box<Self>) -> Result<()> {
        if let Some(entry_point) = self.entry_point {
            self.writer.set_user_entry_point(entry_point)?;
        }

        tracing::debug!(
            entry_point = ?self.entry_point,
            documents = self.documents.len(),
            "closing native pdb writer"
        );
        self.writer.close()
    }
}
