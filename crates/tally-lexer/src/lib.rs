//! Tally lexer: converts the text of a program line into a token stream.

pub mod lexer;
pub mod token;

pub use lexer::Lexer;
pub use token::{Token, TokenKind};

/// Lex `text` as found on program line `line`, starting at column 1.
pub fn lex(text: &str, line: u32) -> Vec<Token> {
    Lexer::new(text, line, 0).lex()
}
