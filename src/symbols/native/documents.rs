use std::collections::HashMap;

use crate::{
    symbols::{
        debuginfo::Document,
        native::{DocumentHandle, SymWriter},
        SourcePathRewriter,
    },
    Result,
};

/// Maps document URLs to the native handles registered for them in one writer session.
///
/// Entries are keyed by the document's original URL; the path rewriter only changes the URL
/// the native store records. The cache lives and dies with its session.
#[derive(Default)]
pub struct DocumentCache {
    documents: HashMap<String, DocumentHandle>,
    rewriter: Option<SourcePathRewriter>,
}

impl DocumentCache {
    /// Creates an empty cache, optionally rewriting URLs before registration
    #[must_use]
    pub fn new(rewriter: Option<SourcePathRewriter>) -> Self {
        DocumentCache {
            documents: HashMap::new(),
            rewriter,
        }
    }

    /// Resolves `document` to a native handle, registering it on first use.
    ///
    /// `None` resolves to `None`, which the native store treats as "no document".
    ///
    /// # Errors
    ///
    /// Propagates failures of [`SymWriter::define_document`]; nothing is cached then.
    pub fn resolve(
        &mut self,
        writer: &mut dyn SymWriter,
        document: Option<&Document>,
    ) -> Result<Option<DocumentHandle>> {
        let Some(document) = document else {
            return Ok(None);
        };

        if let Some(handle) = self.documents.get(&document.url) {
            return Ok(Some(*handle));
        }

        let url = match &self.rewriter {
            Some(rewrite) => rewrite(&document.url),
            None => document.url.clone(),
        };

        let handle = writer.define_document(
            &url,
            document.language.to_guid(),
            document.language_vendor.to_guid(),
            document.doc_type.to_guid(),
        )?;
        tracing::trace!(url = %document.url, native_url = %url, "registered document");

        self.documents.insert(document.url.clone(), handle);
        Ok(Some(handle))
    }

    /// Number of documents registered so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// True if no document has been registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
