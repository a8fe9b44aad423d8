//! Expression lexer/tokenizer
//!
//! Converts source text into a stream of tokens, one per call.

use std::fmt;

use thiserror::Error;

/// Token types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// One of `+ - * / ^ ( )`
    Operator(char),
    /// Decimal literal text, `digit+ ('.' digit+)?`
    Number(String),
    /// Alphabetic name of a constant or function
    Ident(String),
}

impl Token {
    /// True if this token is the given operator character
    pub fn is_op(&self, op: char) -> bool {
        matches!(self, Token::Operator(c) if *c == op)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Operator(c) => write!(f, "{}", c),
            Token::Number(text) | Token::Ident(text) => f.write_str(text),
        }
    }
}

/// Lexical error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// Character that cannot begin any token
    #[error("unexpected character: {0:?}")]
    UnexpectedCharacter(char),
    /// Decimal point not followed by a digit
    #[error("malformed number: {0}")]
    MalformedNumber(String),
}

/// Number scanner states, entered after the leading digit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberState {
    /// Integer digits
    Integer,
    /// Just saw `.`, a digit must follow
    Point,
    /// Fraction digits
    Fraction,
}

/// Lexer for arithmetic expressions
pub struct Lexer<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source
    pub fn new(source: &'a str) -> Self {
        Lexer {
            source,
            pos: 0,
        }
    }

    /// Current byte offset into the source
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Peek at the current character without consuming it
    fn peek(&self) -> Option<u8> {
        self.source.as_bytes().get(self.pos).copied()
    }

    /// Consume the current character
    fn advance(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    /// Skip Unicode whitespace, including the byte order mark
    fn skip_whitespace(&mut self) {
        while let Some(c) = self.current_char() {
            if c.is_whitespace() || c == '\u{FEFF}' {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
    }

    /// Read the next token
    ///
    /// Returns `Ok(None)` once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        self.skip_whitespace();

        let Some(c) = self.peek() else {
            return Ok(None);
        };

        match c {
            b'+' | b'-' | b'*' | b'/' | b'^' | b'(' | b')' => {
                self.advance();
                Ok(Some(Token::Operator(c as char)))
            }
            c if c.is_ascii_digit() => self.read_number().map(Some),
            c if c.is_ascii_alphabetic() => Ok(Some(self.read_identifier())),
            _ => Err(LexError::UnexpectedCharacter(
                self.current_char().unwrap_or(char::REPLACEMENT_CHARACTER),
            )),
        }
    }

    /// Return what `next_token` would, leaving the cursor in place
    pub fn peek_token(&mut self) -> Result<Option<Token>, LexError> {
        let saved = self.pos;
        let token = self.next_token();
        self.pos = saved;
        token
    }

    /// Decode the full character at the cursor
    ///
    /// The cursor only ever moves over whole characters, so it always sits
    /// on a char boundary.
    fn current_char(&self) -> Option<char> {
        self.source.get(self.pos..)?.chars().next()
    }

    /// Read an identifier
    fn read_identifier(&mut self) -> Token {
        let start = self.pos;

        while let Some(c) = self.peek() {
            if c.is_ascii_alphabetic() {
                self.advance();
            } else {
                break;
            }
        }

        Token::Ident(self.slice(start))
    }

    /// Read a number literal
    fn read_number(&mut self) -> Result<Token, LexError> {
        let start = self.pos;
        self.advance();

        let mut state = NumberState::Integer;
        loop {
            let c = self.peek();
            state = match (state, c) {
                (NumberState::Integer, Some(b'0'..=b'9')) => NumberState::Integer,
                (NumberState::Integer, Some(b'.')) => NumberState::Point,
                (NumberState::Point, Some(b'0'..=b'9')) => NumberState::Fraction,
                (NumberState::Point, _) => {
                    return Err(LexError::MalformedNumber(self.slice(start)));
                }
                (NumberState::Fraction, Some(b'0'..=b'9')) => NumberState::Fraction,
                (NumberState::Integer | NumberState::Fraction, _) => break,
            };
            self.advance();
        }

        Ok(Token::Number(self.slice(start)))
    }

    fn slice(&self, start: usize) -> String {
        self.source[start..self.pos].to_string()
    }
}
