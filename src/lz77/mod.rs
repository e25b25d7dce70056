pub mod decoder;
pub mod encoder;
pub mod tokens;

pub use decoder::decode;
pub use encoder::{encode, Encoder};
pub use tokens::{Token, TOKEN_SIZE};
