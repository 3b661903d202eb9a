//! Argument checks, symbol file naming and format sniffing.
//!
//! Every provider entry point validates its inputs here before opening a file or acquiring a
//! native resource, so precondition failures surface as [`crate::Error::InvalidArgument`]
//! without side effects.

use std::{
    fs::File,
    io::{ErrorKind, Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};

use crate::{file::io::read_le, Result};

/// Signature at the start of a portable PDB: the ECMA-335 metadata root magic `"BSJB"`.
pub const PORTABLE_PDB_SIGNATURE: u32 = 0x424A_5342;

/// A readable, seekable symbol stream.
pub trait SymbolSource: Read + Seek {}

impl<T: Read + Seek> SymbolSource for T {}

/// A readable, writable, seekable symbol stream.
pub trait SymbolSink: Read + Write + Seek {}

impl<T: Read + Write + Seek> SymbolSink for T {}

/// Rejects an empty file name.
///
/// # Errors
///
/// [`crate::Error::InvalidArgument`] if `file_name` is empty.
pub fn check_file_name(file_name: &Path) -> Result<()> {
    if file_name.as_os_str().is_empty() {
        return Err(invalid_argument!("file name must not be empty"));
    }

    Ok(())
}

/// Rejects a stream that cannot report or change its position.
///
/// A `File` backed by a pipe implements [`Seek`] yet fails every seek; this probes the
/// stream once so such inputs are refused before any provider is built.
///
/// # Errors
///
/// [`crate::Error::InvalidArgument`] if the stream is not seekable.
pub fn check_read_seek<S: Seek + ?Sized>(stream: &mut S) -> Result<()> {
    match stream.stream_position() {
        Ok(_) => Ok(()),
        Err(error) => Err(invalid_argument!("stream must be seekable: {}", error)),
    }
}

/// Returns the symbol file path for the module file `file_name`: same stem, `.pdb` extension.
#[must_use]
pub fn pdb_file_name(file_name: &Path) -> PathBuf {
    file_name.with_extension("pdb")
}

/// True if the stream holds a portable PDB at its current position.
///
/// Reads four bytes and compares them against [`PORTABLE_PDB_SIGNATURE`]; a stream with
/// fewer than four remaining bytes is not portable. The stream position is restored.
///
/// # Errors
///
/// Propagates I/O failures other than a short read. The position is restored before a read
/// failure is returned.
pub fn is_portable_pdb<S: Read + Seek + ?Sized>(stream: &mut S) -> Result<bool> {
    let position = stream.stream_position()?;

    let mut signature = [0u8; 4];
    let outcome = stream.read_exact(&mut signature);

    stream.seek(SeekFrom::Start(position))?;

    match outcome {
        Ok(()) => Ok(read_le::<u32>(&signature)? == PORTABLE_PDB_SIGNATURE),
        Err(error) if error.kind() == ErrorKind::UnexpectedEof => Ok(false),
        Err(error) => Err(error.into()),
    }
}

/// True if the file at `path` is a portable PDB.
///
/// # Errors
///
/// Propagates I/O failures, including a missing file.
pub fn is_portable_pdb_file(path: &Path) -> Result<bool> {
    let mut file = File::open(path)?;
    is_portable_pdb(&mut file)
}
