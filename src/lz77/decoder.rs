use super::tokens::Token;
use crate::error::{Error, Result};

/// Reconstruct the original units from a token stream
///
/// Fails with [`Error::InvalidReference`] when a back-reference points
/// before the start of the output produced so far.
pub fn decode(tokens: &[Token]) -> Result<Vec<u8>> {
    // Every token yields at least one unit; lengths are untrusted until
    // their back-reference has been checked
    let mut output = Vec::with_capacity(tokens.len());
    for token in tokens {
        decode_token(token, &mut output)?;
    }
    log::debug!("decoded {} tokens into {} units", tokens.len(), output.len());
    Ok(output)
}

/// Apply one token to the end of `output`
pub fn decode_token(token: &Token, output: &mut Vec<u8>) -> Result<()> {
    if token.is_match() {
        let distance = token.offset as usize;
        if distance > output.len() {
            return Err(Error::InvalidReference { offset: token.offset, available: output.len() });
        }

        let start = output.len() - distance;
        if token.length as usize <= distance {
            output.extend_from_within(start..start + token.length as usize);
        } else {
            // RLE case: each copied unit becomes readable by the next index
            for i in 0..token.length as usize {
                let unit = output[start + i];
                output.push(unit);
            }
        }
    }
    output.push(token.next_unit);
    Ok(())
}
