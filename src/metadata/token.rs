//! Metadata tokens, the table/row pairs that name methods and local signatures in symbol records.

use std::fmt;

/// Table identifier of the `MethodDef` metadata table.
pub const TABLE_METHOD_DEF: u8 = 0x06;

/// Table identifier of the `StandAloneSig` metadata table, home of local variable signatures.
pub const TABLE_STANDALONE_SIG: u8 = 0x11;

/// A metadata token representing a reference to a metadata table entry.
///
/// Tokens in .NET metadata consist of a 32-bit value where:
/// - The high byte (bits 24-31) indicates the table type
/// - The low 24 bits (bits 0-23) indicate the row index within that table
///
/// The native symbol store keys methods and local signatures by the raw 32-bit value, which
/// is what [`Token::value`] hands to it.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Token(pub u32);

impl Token {
    /// Creates a new token from a raw 32-bit value
    #[must_use]
    pub fn new(value: u32) -> Self {
        Token(value)
    }

    /// Creates a token from a table identifier and a 1-based row index
    #[must_use]
    pub fn from_parts(table: u8, row: u32) -> Self {
        Token((u32::from(table) << 24) | (row & 0x00FF_FFFF))
    }

    /// Creates a `MethodDef` token for the given row
    #[must_use]
    pub fn method_def(row: u32) -> Self {
        Self::from_parts(TABLE_METHOD_DEF, row)
    }

    /// Creates a `StandAloneSig` token for the given row
    #[must_use]
    pub fn standalone_sig(row: u32) -> Self {
        Self::from_parts(TABLE_STANDALONE_SIG, row)
    }

    /// Returns the raw token value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Extracts the table type from the token (high byte)
    #[must_use]
    pub fn table(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Extracts the row index from the token (low 24 bits)
    #[must_use]
    pub fn row(&self) -> u32 {
        self.0 & 0x00FF_FFFF
    }

    /// Returns true if this is a null token (value 0)
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for Token {
    fn from(value: u32) -> Self {
        Token(value)
    }
}

impl From<Token> for u32 {
    fn from(token: Token) -> Self {
        token.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Token(0x{:08x}, table: 0x{:02x}, row: {})",
            self.0,
            self.table(),
            self.row()
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_token_parts() {
        let token = Token(0x06000001);
        assert_eq!(token.value(), 0x06000001);
        assert_eq!(token.table(), TABLE_METHOD_DEF);
        assert_eq!(token.row(), 1);

        let token = Token(0x06FFFFFF);
        assert_eq!(token.row(), 0x00FFFFFF);
    }

    #[test]
    fn test_token_from_parts() {
        assert_eq!(Token::method_def(3), Token(0x06000003));
        assert_eq!(Token::standalone_sig(0x12), Token(0x11000012));
        // Rows wider than 24 bits never leak into the table byte
        assert_eq!(Token::from_parts(0x06, 0x0100_0001), Token(0x06000001));
    }

    #[test]
    fn test_token_is_null() {
        assert!(Token(0).is_null());
        assert!(Token::default().is_null());
        assert!(!Token::method_def(1).is_null());
    }

    #[test]
    fn test_token_from_conversion() {
        let value = 0x06000001u32;
        let token: Token = value.into();
        assert_eq!(token.value(), value);

        let back_to_u32: u32 = token.into();
        assert_eq!(back_to_u32, value);
    }

    #[test]
    fn test_token_display() {
        assert_eq!(format!("{}", Token(0x06000001)), "0x06000001");
        assert_eq!(format!("{}", Token(0)), "0x00000000");
    }

    #[test]
    fn test_token_debug() {
        let debug_str = format!("{:?}", Token(0x11000002));
        assert!(debug_str.contains("Token(0x11000002"));
        assert!(debug_str.contains("table: 0x11"));
        assert!(debug_str.contains("row: 2"));
    }

    #[test]
    fn test_token_hash() {
        let mut map = HashMap::new();
        map.insert(Token::method_def(1), "Main");
        map.insert(Token::method_def(2), "Helper");

        assert_eq!(map.get(&Token(0x06000001)), Some(&"Main"));
        assert_eq!(map.get(&Token(0x06000002)), Some(&"Helper"));
    }
}
