//! Low-level byte order and safe reading/writing utilities for debug directory and PDB parsing.
//!
//! This module provides bounds-checked, little-endian reading and writing of primitive integers
//! from/to byte buffers. Every multi-byte field this crate touches, the CodeView `RSDS` header,
//! the `IMAGE_DEBUG_DIRECTORY` descriptor and the metadata root signature used to recognise
//! portable PDBs, is stored little-endian, so only that byte order is provided.
//!
//! # Key Components
//!
//! - [`crate::file::io::CilIO`] - Trait defining little-endian conversion for primitive types
//! - [`crate::file::io::read_le`] - Read values from buffer start
//! - [`crate::file::io::read_le_at`] - Read values at specific offset with auto-advance
//! - [`crate::file::io::write_le_at`] - Write values at specific offset with auto-advance
//!
//! # Usage Examples
//!
//! ```rust,ignore
//! use cilpdb::file::io::{read_le_at, write_le_at};
//!
//! let mut data = [0u8; 8];
//! let mut offset = 0;
//! write_le_at(&mut data, &mut offset, 0x5344_5352u32)?;
//! write_le_at(&mut data, &mut offset, 7u32)?;
//! assert_eq!(&data[..4], b"RSDS");
//!
//! offset = 0;
//! let magic: u32 = read_le_at(&data, &mut offset)?;
//! let age: u32 = read_le_at(&data, &mut offset)?;
//! assert_eq!((magic, age, offset), (0x5344_5352, 7, 8));
//! # Ok::<(), cilpdb::Error>(())
//! ```
//!
//! # Error Handling
//!
//! All functions return [`crate::Result<T>`] and report [`crate::Error::OutOfBounds`] if the
//! buffer is too short to complete the operation; nothing in here panics on short input.

use crate::{Error::OutOfBounds, Result};

/// Trait for implementing type-specific safe binary data conversion.
///
/// Each implementation defines a `Bytes` associated type that represents the fixed-size byte
/// array required for that particular type (`[u8; 4]` for `u32`).
pub trait CilIO: Sized {
    /// Associated type representing the byte array type for this numeric type.
    type Bytes: Sized + AsRef<[u8]> + for<'a> TryFrom<&'a [u8]>;

    /// Read T from a byte buffer in little-endian
    fn from_le_bytes(bytes: Self::Bytes) -> Self;

    /// Write T to a byte buffer in little-endian
    fn to_le_bytes(self) -> Self::Bytes;
}

macro_rules! impl_cil_io {
    ($($ty:ty => $len:literal),* $(,)?) => {
        $(
            impl CilIO for $ty {
                type Bytes = [u8; $len];

                fn from_le_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_le_bytes(bytes)
                }

                fn to_le_bytes(self) -> Self::Bytes {
                    <$ty>::to_le_bytes(self)
                }
            }
        )*
    };
}

impl_cil_io! {
    u16 => 2,
    u32 => 4,
}

/// Safely reads a value of type `T` in little-endian byte order from the start of a buffer.
///
/// # Arguments
///
/// * `data` - The byte buffer to read from
///
/// # Errors
///
/// Returns [`crate::Error::OutOfBounds`] if there are insufficient bytes.
pub fn read_le<T: CilIO>(data: &[u8]) -> Result<T> {
    let mut offset = 0_usize;
    read_le_at(data, &mut offset)
}

/// Safely reads a value of type `T` in little-endian byte order at a specific offset.
///
/// The offset is advanced by the number of bytes read.
///
/// # Arguments
///
/// * `data` - The byte buffer to read from
/// * `offset` - Mutable reference to the offset position (will be advanced after reading)
///
/// # Errors
///
/// Returns [`crate::Error::OutOfBounds`] if there are insufficient bytes. The offset is left
/// untouched in that case.
pub fn read_le_at<T: CilIO>(data: &[u8], offset: &mut usize) -> Result<T> {
    let type_len = std::mem::size_of::<T>();
    let Some(end) = offset.checked_add(type_len) else {
        return Err(OutOfBounds);
    };
    if end > data.len() {
        return Err(OutOfBounds);
    }

    let Ok(read) = data[*offset..end].try_into() else {
        return Err(OutOfBounds);
    };

    *offset = end;

    Ok(T::from_le_bytes(read))
}

/// Safely writes a value of type `T` in little-endian byte order at a specific offset.
///
/// The offset is advanced by the number of bytes written.
///
/// # Errors
///
/// Returns [`crate::Error::OutOfBounds`] if there are insufficient bytes.
pub fn write_le_at<T: CilIO>(data: &mut [u8], offset: &mut usize, value: T) -> Result<()> {
    let type_len = std::mem::size_of::<T>();
    let Some(end) = offset.checked_add(type_len) else {
        return Err(OutOfBounds);
    };
    if end > data.len() {
        return Err(OutOfBounds);
    }

    let bytes = value.to_le_bytes();
    data[*offset..end].copy_from_slice(bytes.as_ref());
    *offset = end;

    Ok(())
}
