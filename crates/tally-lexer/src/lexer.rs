//! Core Tally lexer: converts the text of one line into a token stream.
//!
//! Features:
//! - Integer literals, checked into `i64`
//! - Identifiers `[a-zA-Z_][a-zA-Z0-9_]*`
//! - Arithmetic, comparison and punctuation operators
//! - No failure mode: unknown characters become [`TokenKind::Unexpected`]
//!   tokens and the parser decides what they mean

use tally_types::Span;

use crate::token::{Token, TokenKind};

/// The Tally lexer.
///
/// Lexes a slice of a program line. `col_offset` is the number of
/// characters that precede the slice in the raw line, so spans always
/// point into the line as the user wrote it. Columns count characters,
/// not bytes.
pub struct Lexer<'src> {
    /// The text being lexed.
    text: &'src str,
    /// The text as bytes.
    source: &'src [u8],
    /// Program line number (1-based).
    line: u32,
    /// Columns preceding `text` in the raw line.
    col_offset: u32,
    /// Current byte offset into `source`.
    pos: usize,
    /// Continuation bytes of the multibyte characters scanned so far.
    wide: usize,
}

impl<'src> Lexer<'src> {
    /// Create a lexer for `text`, found on `line` after `col_offset` columns.
    pub fn new(text: &'src str, line: u32, col_offset: u32) -> Self {
        Self {
            text,
            source: text.as_bytes(),
            line,
            col_offset,
            pos: 0,
            wide: 0,
        }
    }

    /// Lex the whole text. The stream always ends with [`TokenKind::Eol`].
    pub fn lex(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.scan();
            let is_eol = token.kind == TokenKind::Eol;
            tokens.push(token);
            if is_eol {
                break;
            }
        }
        tokens
    }

    // ─────────────────────────────────────────────────────────────
    // Character-level helpers
    // ─────────────────────────────────────────────────────────────

    fn peek(&self) -> Option<u8> {
        self.source.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    /// Column of the character at `byte`, which must not precede the last
    /// multibyte character scanned.
    fn column(&self, byte: usize) -> u32 {
        self.col_offset + (byte - self.wide) as u32 + 1
    }

    fn token_from(&self, kind: TokenKind, start: usize) -> Token {
        let end_col = self.column(self.pos.max(start + 1) - 1);
        Token::new(
            kind,
            Span::on_line(self.line, self.column(start), end_col),
            start..self.pos,
        )
    }

    /// Skip spaces and tabs (and a stray `\r`).
    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\r') = self.peek() {
            self.advance();
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Scanning
    // ─────────────────────────────────────────────────────────────

    /// Scan one token.
    fn scan(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.pos;
        let Some(ch) = self.advance() else {
            return Token::new(
                TokenKind::Eol,
                Span::point(self.line, self.column(start)),
                start..start,
            );
        };

        match ch {
            b'0'..=b'9' => self.scan_number(start),
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.scan_identifier(start),

            b'+' => self.token_from(TokenKind::Plus, start),
            b'-' => self.token_from(TokenKind::Minus, start),
            b'*' => self.token_from(TokenKind::Star, start),
            b'/' => self.token_from(TokenKind::Slash, start),
            b'(' => self.token_from(TokenKind::LParen, start),
            b')' => self.token_from(TokenKind::RParen, start),
            b':' => self.token_from(TokenKind::Colon, start),

            b'=' => {
                let kind = self.pair(b'=', TokenKind::EqEq, TokenKind::Eq);
                self.token_from(kind, start)
            }
            b'!' => {
                let kind = self.pair(b'=', TokenKind::BangEq, TokenKind::Unexpected('!'));
                self.token_from(kind, start)
            }
            b'>' => {
                let kind = self.pair(b'=', TokenKind::GreaterEq, TokenKind::Greater);
                self.token_from(kind, start)
            }
            b'<' => {
                let kind = self.pair(b'=', TokenKind::LessEq, TokenKind::Less);
                self.token_from(kind, start)
            }

            _ => {
                // Step over the whole character, not just its first byte.
                let unexpected = self.text[start..].chars().next().unwrap_or('\u{FFFD}');
                let col = self.column(start);
                self.pos = start + unexpected.len_utf8();
                self.wide += unexpected.len_utf8() - 1;
                Token::new(
                    TokenKind::Unexpected(unexpected),
                    Span::on_line(self.line, col, col),
                    start..self.pos,
                )
            }
        }
    }

    /// Consume `second` if it comes next and return `two`, else `one`.
    fn pair(&mut self, second: u8, two: TokenKind, one: TokenKind) -> TokenKind {
        if self.peek() == Some(second) {
            self.advance();
            two
        } else {
            one
        }
    }

    fn scan_number(&mut self, start: usize) -> Token {
        // We already consumed the first digit
        while let Some(b'0'..=b'9') = self.peek() {
            self.advance();
        }
        let digits = &self.text[start..self.pos];
        let kind = match digits.parse::<i64>() {
            Ok(value) => TokenKind::IntLit(value),
            Err(_) => TokenKind::Overflowing(digits.to_string()),
        };
        self.token_from(kind, start)
    }

    fn scan_identifier(&mut self, start: usize) -> Token {
        // First character was already consumed (letter or `_`)
        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == b'_' {
                self.advance();
            } else {
                break;
            }
        }
        let name = self.text[start..self.pos].to_string();
        self.token_from(TokenKind::Identifier(name), start)
    }
}
