//! Benchmarks for debug directory decoding and native emission.
//!
//! - CodeView PDB 7.0 header validation and encoding
//! - Walking a method with sequence points and nested scopes into a no-op native writer

extern crate cilpdb;

use cilpdb::{
    prelude::*,
    symbols::native::{DocumentHandle, LocalVariableDef, SequencePointBatch},
};
use criterion::{criterion_group, criterion_main, Criterion};
use std::{hint::black_box, sync::Arc};
use uguid::guid;

struct NullWriter;

impl SymWriter for NullWriter {
    fn define_document(
        &mut self,
        _: &str,
        _: uguid::Guid,
        _: uguid::Guid,
        _: uguid::Guid,
    ) -> Result<DocumentHandle> {
        Ok(DocumentHandle(1))
    }

    fn define_sequence_points(
        &mut self,
        _: Option<DocumentHandle>,
        points: SequencePointBatch<'_>,
    ) -> Result<()> {
        black_box(points);
        Ok(())
    }

    fn open_method(&mut self, _: Token) -> Result<()> {
        Ok(())
    }

    fn close_method(&mut self) -> Result<()> {
        Ok(())
    }

    fn open_scope(&mut self, _: u32) -> Result<()> {
        Ok(())
    }

    fn close_scope(&mut self, _: u32) -> Result<()> {
        Ok(())
    }

    fn define_local_variable(&mut self, variable: LocalVariableDef<'_>) -> Result<()> {
        black_box(variable);
        Ok(())
    }

    fn set_user_entry_point(&mut self, _: Token) -> Result<()> {
        Ok(())
    }

    fn get_debug_info(&mut self) -> Result<(ImageDebugDirectory, Vec<u8>)> {
        Ok((ImageDebugDirectory::default(), Vec::new()))
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Benchmark validating a well-formed RSDS record.
fn bench_codeview_parse(c: &mut Criterion) {
    let header = CodeViewHeader {
        guid: guid!("01234567-89ab-cdef-0123-456789abcdef"),
        age: 1,
    };
    let mut data = header.to_bytes().to_vec();
    data.extend_from_slice(b"C:\\build\\App.pdb\0");
    let directory = ImageDebugDirectory::codeview(data.len() as u32);

    c.bench_function("codeview_parse", |b| {
        b.iter(|| black_box(CodeViewHeader::parse(black_box(&directory), black_box(&data))));
    });
}

/// Benchmark rejecting a record with the wrong magic.
fn bench_codeview_reject(c: &mut Criterion) {
    let data = [0u8; 24];
    let directory = ImageDebugDirectory::codeview(24);

    c.bench_function("codeview_reject", |b| {
        b.iter(|| black_box(CodeViewHeader::parse(black_box(&directory), black_box(&data))));
    });
}

/// Benchmark emitting a method with 64 sequence points over 4 documents and 8 nested scopes.
fn bench_emit_method(c: &mut Criterion) {
    let documents: Vec<DocumentRc> = (0..4)
        .map(|i| Arc::new(Document::new(format!("/src/File{}.cs", i))))
        .collect();

    let mut info = MethodDebugInformation::new(Token::method_def(1), 512);
    info.local_var_token = Token::standalone_sig(1);
    for i in 0..64u32 {
        let document = documents[(i % 4) as usize].clone();
        info.sequence_points
            .push(SequencePoint::new(i * 8, Some(document), i + 1, 9, i + 1, 40));
    }

    let mut scope = ScopeDebugInformation::new(0, InstructionOffset::EndOfMethod);
    for depth in (1..8u32).rev() {
        let mut outer = ScopeDebugInformation::new(depth * 8, 512 - depth * 8);
        outer
            .variables
            .push(VariableDebugInformation::new(depth, format!("v{}", depth)));
        outer.scopes.push(scope);
        scope = outer;
    }
    info.scope = Some(scope);

    c.bench_function("emit_method", |b| {
        b.iter(|| {
            let mut writer =
                NativePdbWriter::new(Box::new(NullWriter), None, WriterParameters::default());
            writer.write(black_box(&info)).unwrap();
            black_box(writer.documents().len())
        });
    });
}

criterion_group!(
    benches,
    bench_codeview_parse,
    bench_codeview_reject,
    bench_emit_method
);
criterion_main!(benches);
