//! CodeView debug directory parsing for module/PDB correlation.
//!
//! A compiled module links to its PDB through an `IMAGE_DEBUG_DIRECTORY` entry of type
//! CodeView whose payload starts with an `RSDS` record:
//!
//! ```text
//! offset  size  field
//! 0       4     magic, 0x53445352 ("RSDS") little-endian
//! 4       16    GUID (little-endian field layout)
//! 20      4     age, u32 little-endian
//! 24      ..    PDB path, NUL terminated (not interpreted here)
//! ```
//!
//! The native symbol store produces both the directory descriptor and the payload when a
//! session is finalised; [`CodeViewHeader::parse`] validates them and recovers the GUID and
//! age that a debugger later uses to match the module with its symbol file.
//!
//! Validation failures are not errors: a header that is not a PDB 7.0 CodeView record simply
//! yields `None`, and the caller decides whether that matters.
//!
//! # Usage Examples
//!
//! ```rust
//! use cilpdb::symbols::{CodeViewHeader, ImageDebugDirectory};
//! use uguid::guid;
//!
//! let header = CodeViewHeader {
//!     guid: guid!("01234567-89ab-cdef-0123-456789abcdef"),
//!     age: 1,
//! };
//! let data = header.to_bytes();
//! let directory = ImageDebugDirectory::codeview(data.len() as u32);
//!
//! assert_eq!(CodeViewHeader::parse(&directory, &data), Some(header));
//! ```
//!
//! # References
//!
//! - [PE Format - Debug Directory](https://learn.microsoft.com/en-us/windows/win32/debug/pe-format#the-debug-section)

use uguid::Guid;

use crate::{
    file::io::{read_le_at, write_le_at},
    Result,
};

/// `IMAGE_DEBUG_TYPE_CODEVIEW`, the directory type of a CodeView entry.
pub const IMAGE_DEBUG_TYPE_CODEVIEW: u32 = 2;

/// Magic of a PDB 7.0 CodeView record, `"RSDS"` read as a little-endian u32.
pub const CODEVIEW_PDB70_MAGIC: u32 = 0x5344_5352;

/// Minimum size of a PDB 7.0 CodeView record: magic, GUID and age.
pub const CODEVIEW_PDB70_MIN_SIZE: usize = 24;

/// Reads a little-endian 32-bit integer from `data` at `offset`.
///
/// Equivalent to `b0 | b1 << 8 | b2 << 16 | b3 << 24` over the four bytes at `offset`.
///
/// # Errors
///
/// Returns [`crate::Error::OutOfBounds`] if fewer than four bytes remain at `offset`.
pub fn read_int32(data: &[u8], offset: usize) -> Result<u32> {
    let mut offset = offset;
    read_le_at::<u32>(data, &mut offset)
}

/// Descriptor of a debug directory entry (`IMAGE_DEBUG_DIRECTORY`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImageDebugDirectory {
    /// Reserved, zero
    pub characteristics: u32,
    /// Time and date the debug data was created
    pub time_date_stamp: u32,
    /// Major version of the debug data format
    pub major_version: u16,
    /// Minor version of the debug data format
    pub minor_version: u16,
    /// Format of the debug data, see [`IMAGE_DEBUG_TYPE_CODEVIEW`]
    pub debug_type: u32,
    /// Size of the debug data in bytes
    pub size_of_data: u32,
    /// RVA of the debug data once loaded
    pub address_of_raw_data: u32,
    /// File offset of the debug data
    pub pointer_to_raw_data: u32,
}

impl ImageDebugDirectory {
    /// Size of the on-disk descriptor in bytes.
    pub const SIZE: usize = 28;

    /// Creates a version 0.0 CodeView descriptor for `size_of_data` bytes of payload
    #[must_use]
    pub fn codeview(size_of_data: u32) -> Self {
        ImageDebugDirectory {
            debug_type: IMAGE_DEBUG_TYPE_CODEVIEW,
            size_of_data,
            ..Default::default()
        }
    }

    /// True if this descriptor announces a version 0.0 CodeView entry
    #[must_use]
    pub fn is_codeview(&self) -> bool {
        self.debug_type == IMAGE_DEBUG_TYPE_CODEVIEW
            && self.major_version == 0
            && self.minor_version == 0
    }

    /// Serializes the descriptor in its on-disk layout
    ///
    /// # Errors
    ///
    /// Never fails for the fixed-size output buffer; the `Result` carries the bounds checks
    /// of the underlying writer.
    pub fn to_bytes(&self) -> Result<[u8; Self::SIZE]> {
        let mut data = [0u8; Self::SIZE];
        let mut offset = 0;
        write_le_at(&mut data, &mut offset, self.characteristics)?;
        write_le_at(&mut data, &mut offset, self.time_date_stamp)?;
        write_le_at(&mut data, &mut offset, self.major_version)?;
        write_le_at(&mut data, &mut offset, self.minor_version)?;
        write_le_at(&mut data, &mut offset, self.debug_type)?;
        write_le_at(&mut data, &mut offset, self.size_of_data)?;
        write_le_at(&mut data, &mut offset, self.address_of_raw_data)?;
        write_le_at(&mut data, &mut offset, self.pointer_to_raw_data)?;
        Ok(data)
    }
}

/// Debug directory descriptor together with the raw payload it describes.
///
/// Returned by a symbol writer so the module writer can embed it in the module's own
/// debug directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugHeader {
    /// The directory descriptor
    pub directory: ImageDebugDirectory,
    /// The raw payload, starting with the `RSDS` record
    pub data: Vec<u8>,
}

impl DebugHeader {
    /// Creates a debug header from its parts
    #[must_use]
    pub fn new(directory: ImageDebugDirectory, data: Vec<u8>) -> Self {
        DebugHeader { directory, data }
    }

    /// Parses the CodeView identity carried by this header, if it is valid
    #[must_use]
    pub fn codeview(&self) -> Option<CodeViewHeader> {
        CodeViewHeader::parse(&self.directory, &self.data)
    }
}

/// Identity of a PDB 7.0 symbol file: content GUID and age counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeViewHeader {
    /// Signature shared by a module and its symbol file
    pub guid: Guid,
    /// Number of times the symbol file has been written under this GUID
    pub age: u32,
}

impl CodeViewHeader {
    /// Validates a CodeView debug directory entry and recovers its identity.
    ///
    /// Checks, in order: the directory type is CodeView, the directory version is 0.0, the
    /// payload holds at least 24 bytes and starts with the `RSDS` magic. The first failing
    /// check yields `None`.
    #[must_use]
    pub fn parse(directory: &ImageDebugDirectory, data: &[u8]) -> Option<Self> {
        if directory.debug_type != IMAGE_DEBUG_TYPE_CODEVIEW {
            tracing::debug!(
                debug_type = directory.debug_type,
                "debug directory is not a CodeView entry"
            );
            return None;
        }
        if directory.major_version != 0 || directory.minor_version != 0 {
            tracing::debug!(
                major = directory.major_version,
                minor = directory.minor_version,
                "unsupported CodeView directory version"
            );
            return None;
        }
        if data.len() < CODEVIEW_PDB70_MIN_SIZE {
            tracing::debug!(len = data.len(), "CodeView record is truncated");
            return None;
        }

        let magic = read_int32(data, 0).ok()?;
        if magic != CODEVIEW_PDB70_MAGIC {
            tracing::debug!(magic, "CodeView record is not a PDB 7.0 record");
            return None;
        }

        let mut guid = [0u8; 16];
        guid.copy_from_slice(&data[4..20]);
        let age = read_int32(data, 20).ok()?;

        Some(CodeViewHeader {
            guid: Guid::from_bytes(guid),
            age,
        })
    }

    /// Serializes the fixed 24-byte `RSDS` prefix of a CodeView record
    #[must_use]
    pub fn to_bytes(&self) -> [u8; CODEVIEW_PDB70_MIN_SIZE] {
        let mut data = [0u8; CODEVIEW_PDB70_MIN_SIZE];
        data[..4].copy_from_slice(&CODEVIEW_PDB70_MAGIC.to_le_bytes());
        data[4..20].copy_from_slice(&self.guid.to_bytes());
        data[20..].copy_from_slice(&self.age.to_le_bytes());
        data
    }
}
