pub mod reader;
pub mod writer;

pub use reader::{deserialize, TokenReader};
pub use writer::{serialize, TokenWriter};
