use std::fmt;

/// Serialized size of one token in bytes: three big-endian u16 fields
pub const TOKEN_SIZE: usize = 6;

/// A single (offset, length, next_unit) triple in the LZ77 stream
///
/// A literal token has `offset == 0` and `length == 0` and emits only
/// `next_unit`. A match token copies `length` units starting `offset` units
/// back from the end of the output, then emits `next_unit`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    pub offset: u16,
    pub length: u16,
    pub next_unit: u8,
}

impl Token {
    /// A bare literal: nothing copied, one unit emitted
    pub const fn literal(unit: u8) -> Self {
        Self { offset: 0, length: 0, next_unit: unit }
    }

    /// A back-reference followed by one literal unit
    pub const fn back_ref(offset: u16, length: u16, next_unit: u8) -> Self {
        Self { offset, length, next_unit }
    }

    pub fn is_literal(&self) -> bool {
        self.offset == 0 && self.length == 0
    }

    /// Whether the decoder will copy anything for this token.
    ///
    /// Tokens with only one of offset/length set copy nothing and behave
    /// like literals.
    pub fn is_match(&self) -> bool {
        self.offset > 0 && self.length > 0
    }

    /// Returns the uncompressed size this token represents
    pub fn uncompressed_size(&self) -> usize {
        if self.is_match() {
            self.length as usize + 1
        } else {
            1
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {:?})", self.offset, self.length, self.next_unit as char)
    }
}

/// Total number of units a token stream decodes to
pub fn uncompressed_size(tokens: &[Token]) -> usize {
    tokens.iter().map(Token::uncompressed_size).sum()
}
