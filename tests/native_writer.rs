//! End-to-end tests for native PDB emission.
//!
//! A file-backed symbol store stands in for the platform writer: every call is appended to an
//! in-memory log which is only written to the target `.pdb` when the session is closed. This
//! makes flushing, stale-file replacement and call ordering observable from the outside.

use std::{
    cell::RefCell,
    fs,
    path::{Path, PathBuf},
    rc::Rc,
    sync::{Arc, Mutex},
};

use cilpdb::{
    prelude::*,
    symbols::native::{DocumentHandle, LocalVariableDef, SequencePointBatch},
};
use uguid::{guid, Guid};

const PDB_GUID: Guid = guid!("0f1e2d3c-4b5a-4968-8776-a5b4c3d2e1f0");
const PDB_AGE: u32 = 3;

struct LogWriter {
    path: PathBuf,
    log: Vec<String>,
    documents: u32,
}

impl SymWriter for LogWriter {
    fn define_document(
        &mut self,
        url: &str,
        language: uguid::Guid,
        _language_vendor: uguid::Guid,
        _document_type: uguid::Guid,
    ) -> Result<DocumentHandle> {
        self.documents += 1;
        self.log
            .push(format!("document {} {} {}", self.documents, url, language));
        Ok(DocumentHandle(self.documents))
    }

    fn define_sequence_points(
        &mut self,
        document: Option<DocumentHandle>,
        points: SequencePointBatch<'_>,
    ) -> Result<()> {
        let document = document.map_or(0, |handle| handle.0);
        for i in 0..points.len() {
            self.log.push(format!(
                "point doc={} il={} {}:{}-{}:{}",
                document,
                points.offsets[i],
                points.start_lines[i],
                points.start_columns[i],
                points.end_lines[i],
                points.end_columns[i]
            ));
        }
        Ok(())
    }

    fn open_method(&mut self, method: Token) -> Result<()> {
        self.log.push(format!("method {}", method));
        Ok(())
    }

    fn close_method(&mut self) -> Result<()> {
        self.log.push("end method".to_string());
        Ok(())
    }

    fn open_scope(&mut self, start_offset: u32) -> Result<()> {
        self.log.push(format!("scope {}", start_offset));
        Ok(())
    }

    fn close_scope(&mut self, end_offset: u32) -> Result<()> {
        self.log.push(format!("end scope {}", end_offset));
        Ok(())
    }

    fn define_local_variable(&mut self, variable: LocalVariableDef<'_>) -> Result<()> {
        self.log.push(format!(
            "local {} slot={} attrs={} sig={} [{}, {})",
            variable.name,
            variable.address1,
            variable.attributes,
            variable.signature,
            variable.start_offset,
            variable.end_offset
        ));
        Ok(())
    }

    fn set_user_entry_point(&mut self, method: Token) -> Result<()> {
        self.log.push(format!("entry {}", method));
        Ok(())
    }

    fn get_debug_info(&mut self) -> Result<(ImageDebugDirectory, Vec<u8>)> {
        let data = CodeViewHeader {
            guid: PDB_GUID,
            age: PDB_AGE,
        }
        .to_bytes()
        .to_vec();
        Ok((ImageDebugDirectory::codeview(data.len() as u32), data))
    }

    fn close(&mut self) -> Result<()> {
        fs::write(&self.path, self.log.join("\n"))?;
        Ok(())
    }
}

#[derive(Default)]
struct LogStore {
    created: Mutex<Vec<PathBuf>>,
}

impl SymStore for LogStore {
    fn create_writer(
        &self,
        _module: &ModuleContext,
        pdb_path: &Path,
    ) -> Result<Box<dyn SymWriter>> {
        self.created.lock().unwrap().push(pdb_path.to_path_buf());
        Ok(Box::new(LogWriter {
            path: pdb_path.to_path_buf(),
            log: Vec::new(),
            documents: 0,
        }))
    }

    fn open_reader(
        &self,
        _module: &ModuleContext,
        _source: Box<dyn SymbolSource>,
        _signature_provider: Option<SignatureProvider>,
    ) -> Result<Box<dyn SymbolReader>> {
        Err(Error::NotSupported)
    }
}

fn read_log(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

/// A method with points in two documents, nested scopes and locals produces the full call
/// shape, and the log only reaches disk on close.
#[test]
fn test_full_method_round() -> Result<()> {
    let dir = tempfile::tempdir().unwrap();
    let dll = dir.path().join("App.dll");
    let pdb = dir.path().join("App.pdb");

    let store = Arc::new(LogStore::default());
    let provider = NativePdbWriterProvider::new(store.clone());
    let module = ModuleContext::from_file(&dll).with_entry_point(Token::method_def(1));

    let mut writer = provider.get_symbol_writer(&module, &dll, WriterParameters::default())?;
    assert_eq!(writer.format(), SymbolFormat::Native);

    let program = Arc::new(
        Document::new("/src/Program.cs")
            .with_language(DocumentLanguage::CSharp, DocumentLanguageVendor::Microsoft),
    );
    let helpers = Arc::new(Document::new("/src/Helpers.cs"));

    let mut info = MethodDebugInformation::new(Token::method_def(1), 40);
    info.local_var_token = Token::standalone_sig(2);
    info.sequence_points = vec![
        SequencePoint::new(0, Some(program.clone()), 10, 5, 10, 6),
        SequencePoint::new(1, Some(helpers.clone()), 3, 9, 3, 40),
        SequencePoint::hidden(8, Some(program.clone())),
        SequencePoint::new(12, Some(program.clone()), 11, 9, 11, 22),
    ];

    let mut inner = ScopeDebugInformation::new(12, 30);
    inner.variables.push(VariableDebugInformation::new(1, "item"));
    let mut root = ScopeDebugInformation::new(0, InstructionOffset::EndOfMethod);
    root.variables.push(VariableDebugInformation::new(0, "count"));
    root.scopes.push(inner);
    info.scope = Some(root);

    writer.write(&info)?;
    assert!(!pdb.exists());

    writer.close()?;

    assert_eq!(
        read_log(&pdb),
        vec![
            "method 0x06000001".to_string(),
            format!("document 1 /src/Program.cs {}", DocumentLanguage::CSharp.to_guid()),
            "point doc=1 il=0 10:5-10:6".to_string(),
            format!("document 2 /src/Helpers.cs {}", Guid::ZERO),
            "point doc=2 il=1 3:9-3:40".to_string(),
            "point doc=1 il=8 16707566:0-16707566:0".to_string(),
            "point doc=1 il=12 11:9-11:22".to_string(),
            "scope 0".to_string(),
            "local count slot=0 attrs=0 sig=0x11000002 [0, 40)".to_string(),
            "scope 12".to_string(),
            "local item slot=1 attrs=0 sig=0x11000002 [12, 30)".to_string(),
            "end scope 30".to_string(),
            "end scope 40".to_string(),
            "end method".to_string(),
            "entry 0x06000001".to_string(),
        ]
    );
    Ok(())
}

/// The path rewriter changes recorded URLs, the signature provider sees the PDB GUID, and the
/// debug header carries a valid CodeView payload.
#[test]
fn test_rewriter_and_signature() -> Result<()> {
    let dir = tempfile::tempdir().unwrap();
    let dll = dir.path().join("Lib.dll");
    let pdb = dir.path().join("Lib.pdb");

    let provider = NativePdbWriterProvider::new(Arc::new(LogStore::default()));
    let signatures = Rc::new(RefCell::new(Vec::new()));
    let sink = signatures.clone();

    let parameters = WriterParameters::default()
        .with_source_path_rewriter(|path| path.replace("/home/ci/work", "/_"))
        .with_signature_provider(move |guid| sink.borrow_mut().push(guid));

    let mut writer =
        provider.get_symbol_writer(&ModuleContext::from_file(&dll), &dll, parameters)?;

    let document = Arc::new(Document::new("/home/ci/work/src/Lib.cs"));
    for row in 1..=2 {
        let mut info = MethodDebugInformation::new(Token::method_def(row), 2);
        info.sequence_points
            .push(SequencePoint::new(0, Some(document.clone()), row, 1, row, 10));
        writer.write(&info)?;
    }

    let header = writer.get_debug_header()?.expect("valid codeview header");
    assert!(header.directory.is_codeview());
    assert_eq!(header.data.len(), 24);
    assert_eq!(&header.data[..4], b"RSDS");
    assert_eq!(
        header.codeview(),
        Some(CodeViewHeader {
            guid: PDB_GUID,
            age: PDB_AGE
        })
    );
    assert_eq!(*signatures.borrow(), vec![PDB_GUID]);

    writer.close()?;

    let log = read_log(&pdb);
    let documents: Vec<_> = log.iter().filter(|l| l.starts_with("document")).collect();
    assert_eq!(documents.len(), 1);
    assert!(documents[0].contains("/_/src/Lib.cs"));
    // No entry point on the module, none recorded
    assert!(!log.iter().any(|l| l.starts_with("entry")));
    Ok(())
}

/// A stale PDB is removed before the store creates the new one.
#[test]
fn test_stale_pdb_replaced() -> Result<()> {
    let dir = tempfile::tempdir().unwrap();
    let dll = dir.path().join("App.exe");
    let pdb = dir.path().join("App.pdb");
    fs::write(&pdb, b"old contents").unwrap();

    let store = Arc::new(LogStore::default());
    let provider = NativePdbWriterProvider::new(store.clone());

    let module = ModuleContext::from_file(&dll);
    let writer = provider.get_symbol_writer(&module, &dll, WriterParameters::default())?;
    assert!(!pdb.exists());
    assert_eq!(*store.created.lock().unwrap(), vec![pdb.clone()]);

    writer.close()?;
    assert!(read_log(&pdb).iter().all(|l| !l.contains("old contents")));
    Ok(())
}

/// Dropping a session without closing it never flushes.
#[test]
fn test_drop_without_close() -> Result<()> {
    let dir = tempfile::tempdir().unwrap();
    let dll = dir.path().join("App.dll");

    let provider = NativePdbWriterProvider::new(Arc::new(LogStore::default()));
    let module = ModuleContext::from_file(&dll);
    let mut writer = provider.get_symbol_writer(&module, &dll, WriterParameters::default())?;
    writer.write(&MethodDebugInformation::new(Token::method_def(1), 1))?;
    drop(writer);

    assert!(!dir.path().join("App.pdb").exists());
    Ok(())
}

/// The stream overload is refused whatever the inputs.
#[test]
fn test_stream_writer_not_supported() {
    let provider = NativePdbWriterProvider::new(Arc::new(LogStore::default()));
    let module = ModuleContext::from_file("App.dll").with_entry_point(Token::method_def(1));

    let result =
        provider.get_symbol_writer_for_stream(&module, Box::new(std::io::Cursor::new(Vec::new())));
    assert!(matches!(result, Err(Error::NotSupported)));
}
