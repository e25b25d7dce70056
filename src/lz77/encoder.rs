use super::tokens::Token;
use crate::error::{Error, Result};
use crate::EncoderConfig;

/// Greedy longest-match LZ77 encoder over a bounded history window
///
/// For each cursor position the encoder searches the preceding
/// `window_size` units for the longest run equal to the upcoming input.
/// A match may run past the cursor into the text it is about to cover
/// (self-overlap); the decoder reproduces this by copying unit by unit.
/// Among equally long matches the closest one wins.
#[derive(Clone, Debug, Default)]
pub struct Encoder {
    config: EncoderConfig,
}

/// Longest match found for one cursor position
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Match {
    distance: usize,
    length: usize,
}

impl Encoder {
    /// Create an encoder, rejecting window or match limits that cannot be
    /// represented in the 16-bit token fields
    pub fn new(config: EncoderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Encode the whole input into a token stream
    pub fn encode(&self, input: &[u8]) -> Result<Vec<Token>> {
        let mut tokens = Vec::with_capacity(input.len() / 4 + 1);
        let mut pos = 0;

        while pos < input.len() {
            let m = self.find_longest_match(input, pos);

            if m.length > 0 {
                let offset = to_field("offset", m.distance)?;
                let length = to_field("length", m.length)?;
                tokens.push(Token::back_ref(offset, length, input[pos + m.length]));
                pos += m.length + 1;
            } else {
                tokens.push(Token::literal(input[pos]));
                pos += 1;
            }
        }

        log::debug!(
            "encoded {} units into {} tokens (window {})",
            input.len(),
            tokens.len(),
            self.config.window_size
        );

        Ok(tokens)
    }

    /// Search `[pos - window_size, pos)` for the longest match against
    /// `input[pos..]`, nearest candidate first.
    ///
    /// The match is capped so at least one unit remains after it for the
    /// token's trailing literal. This shapes the byte-exact output: a run
    /// reaching the end of input is shortened by one unit instead of being
    /// dropped to literals, so `"abcabc"` encodes as `a b c (3, 2, 'c')`.
    fn find_longest_match(&self, input: &[u8], pos: usize) -> Match {
        let limit = (input.len() - pos - 1).min(self.config.max_match_length);
        if limit == 0 {
            return Match::default();
        }

        let search_start = pos.saturating_sub(self.config.window_size);
        let lookahead = &input[pos..pos + limit];
        let mut best = Match::default();

        // Only candidates sharing the first unit can match at all
        for rel in memchr::memrchr_iter(input[pos], &input[search_start..pos]) {
            let i = search_start + rel;
            let length = match_length(&input[i..], lookahead);

            // Strictly longer only: ties keep the closer candidate
            if length > best.length {
                best = Match { distance: pos - i, length };
                if length == limit {
                    break;
                }
            }
        }

        best
    }
}

/// Encode `input` with the given window size and the default match limit
pub fn encode(input: &[u8], window_size: usize) -> Result<Vec<Token>> {
    Encoder::new(EncoderConfig { window_size, ..Default::default() })?.encode(input)
}

/// Count leading units shared by `source` and `lookahead`.
///
/// `source` may overlap `lookahead` in the original input; the units it
/// reads past the cursor are exactly the ones the decoder will have
/// produced by then.
#[inline]
fn match_length(source: &[u8], lookahead: &[u8]) -> usize {
    source.iter().zip(lookahead).take_while(|(a, b)| a == b).count()
}

fn to_field(field: &'static str, value: usize) -> Result<u16> {
    u16::try_from(value).map_err(|_| Error::FieldOverflow {
        field,
        value: value as u64,
        max: u16::MAX as u64,
    })
}
