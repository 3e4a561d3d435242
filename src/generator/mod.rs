pub mod paging;
pub mod text;
pub mod vocabulary;

pub use text::{Token, TokenKind, TokenSequence, tokenize};
