use thiserror::Error;

macro_rules! invalid_argument {
    // Single string version
    ($msg:expr) => {
        crate::Error::InvalidArgument {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::InvalidArgument {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// The variants follow the failure taxonomy of the symbol plumbing: argument checks that run
/// before any file or native resource is touched, operations that are valid on their own but
/// cannot be combined, and failures passed through from the file system or the native symbol
/// store.
///
/// A CodeView debug header that does not validate is *not* an error; see
/// [`crate::symbols::SymbolWriter::get_debug_header`].
///
/// # Error Categories
///
/// ## Precondition Errors
/// - [`Error::InvalidArgument`] - Empty file name, unseekable stream or missing module file name
///
/// ## Capability Errors
/// - [`Error::NotSupported`] - Native symbol writers cannot target an arbitrary stream
///
/// ## Decoding Errors
/// - [`Error::OutOfBounds`] - Attempted to read beyond the end of a buffer
///
/// ## I/O and External Errors
/// - [`Error::FileError`] - Filesystem I/O errors
/// - [`Error::SymStore`] - Failure reported by the native symbol store
/// - [`Error::Error`] - Failure reported by any other collaborator
///
/// # Examples
///
/// ```rust
/// use cilpdb::{Error, symbols::{NativePdbWriterProvider, ModuleContext, SymbolWriterProvider}};
/// # use cilpdb::symbols::native::{SymStore, SymWriter};
/// # fn provider() -> NativePdbWriterProvider { unimplemented!() }
///
/// # fn run() {
/// let module = ModuleContext::new();
/// let stream = Box::new(std::io::Cursor::new(Vec::new()));
///
/// match provider().get_symbol_writer_for_stream(&module, stream) {
///     Err(Error::NotSupported) => eprintln!("native symbols need a file"),
///     Err(Error::InvalidArgument { message, .. }) => eprintln!("bad input: {}", message),
///     Err(e) => eprintln!("Other error: {}", e),
///     Ok(_) => unreachable!(),
/// }
/// # }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// An argument failed a precondition check.
    ///
    /// Raised before any file is opened or native resource acquired, e.g. for an empty
    /// file name or a stream that cannot be repositioned while sniffing its signature.
    /// The error includes the source location where the check failed.
    ///
    /// # Fields
    ///
    /// * `message` - Description of the violated precondition
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Invalid argument - {file}:{line}: {message}")]
    InvalidArgument {
        /// The message to be printed for the InvalidArgument error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// The requested operation is not supported.
    ///
    /// The inputs are individually valid but the combination cannot be implemented, such as
    /// asking the native symbol store to write into a caller-provided stream.
    #[error("This operation is not supported")]
    NotSupported,

    /// An out of bound access was attempted while decoding a buffer.
    #[error("Out of Bound read would have occurred!")]
    OutOfBounds,

    /// File I/O error.
    ///
    /// Wraps standard I/O errors raised while opening, sniffing or replacing symbol files.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// The native symbol store reported a failure.
    ///
    /// Produced by implementations of [`crate::symbols::native::SymWriter`] and
    /// [`crate::symbols::native::SymStore`]; this crate propagates it unchanged.
    #[error("Symbol store failed during {operation}: {message}")]
    SymStore {
        /// The native operation that failed
        operation: &'static str,
        /// The failure reported by the store
        message: String,
    },

    /// Generic error for miscellaneous failures.
    ///
    /// Used by collaborators such as portable symbol providers that have no dedicated variant.
    #[error("{0}")]
    Error(String),
}
