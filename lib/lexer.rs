use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    error::LexError,
    token::{Number, Token, TokenKind},
};

lazy_static! {
    // First match wins, so the order here decides precedence between rules.
    static ref RULES: Vec<(TokenKind, Regex)> = [
        (TokenKind::Quit, r"(?i)^quit"),
        (TokenKind::Bool, r"^(true|false)"),
        (TokenKind::Id, r"^[a-zA-Z][a-zA-Z0-9_]*"),
        (TokenKind::Comment, r"^//([^\r\n]+)"),
        (TokenKind::Assign, r"^:="),
        (TokenKind::Semi, r"^;"),
        (TokenKind::Plus, r"^\+"),
        (TokenKind::Minus, r"^-"),
        (TokenKind::Multiply, r"^\*"),
        (TokenKind::Divide, r"^/"),
        (TokenKind::Eq, r"^="),
        (TokenKind::Neq, r"^<>"),
        (TokenKind::Ge, r"^>="),
        (TokenKind::Le, r"^<="),
        (TokenKind::Lt, r"^<"),
        (TokenKind::Gt, r"^>"),
        (TokenKind::LParen, r"^\("),
        (TokenKind::RParen, r"^\)"),
        (TokenKind::Num, r"^([0-9]*[.])?[0-9]+"),
    ]
    .into_iter()
    .map(|(kind, pattern)| (kind, Regex::new(pattern).unwrap()))
    .collect();
    static ref WHITESPACE: Regex = Regex::new(r"^\s+").unwrap();
}

pub fn scan(input: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }
    Ok(tokens)
}

pub struct Lexer<'a> {
    input: &'a str,
    offset: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, offset: 0 }
    }

    /// Returns `Ok(None)` once the input is exhausted. An error leaves the
    /// lexer where it failed; scanning does not resume past it.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        self.skip_whitespace();

        if self.offset >= self.input.len() {
            return Ok(None);
        }

        let start = self.offset;
        let buffer = self.buffer();

        for (kind, rule) in RULES.iter() {
            let Some(captures) = rule.captures(buffer) else {
                continue;
            };
            let literal = &buffer[..captures[0].len()];
            self.offset += literal.len();

            let token = match kind {
                TokenKind::Num => Token::Num(self.read_number(literal, start)?),
                TokenKind::Id => Token::Id(literal.to_string()),
                TokenKind::Comment => Token::Comment(captures[1].trim().to_string()),
                TokenKind::Bool => Token::Bool(literal == "true"),
                TokenKind::Quit => Token::Quit,
                TokenKind::Assign => Token::Assign,
                TokenKind::Semi => Token::Semi,
                TokenKind::Plus => Token::Plus,
                TokenKind::Minus => Token::Minus,
                TokenKind::Multiply => Token::Multiply,
                TokenKind::Divide => Token::Divide,
                TokenKind::Eq => Token::Eq,
                TokenKind::Neq => Token::Neq,
                TokenKind::Ge => Token::Ge,
                TokenKind::Le => Token::Le,
                TokenKind::Lt => Token::Lt,
                TokenKind::Gt => Token::Gt,
                TokenKind::LParen => Token::LParen,
                TokenKind::RParen => Token::RParen,
            };

            return Ok(Some(token));
        }

        Err(LexError::InvalidToken {
            offset: start,
            remainder: buffer.to_string(),
        })
    }

    fn buffer(&self) -> &'a str {
        &self.input[self.offset..]
    }

    fn peek_char(&self) -> Option<char> {
        self.buffer().chars().next()
    }

    fn skip_whitespace(&mut self) {
        if let Some(found) = WHITESPACE.find(self.buffer()) {
            self.offset += found.end();
        }
    }

    fn read_number(&self, literal: &str, start: usize) -> Result<Number, LexError> {
        let invalid = || LexError::InvalidNumberFormat {
            offset: start,
            literal: literal.to_string(),
        };

        if literal.contains('.') {
            if self.peek_char().is_some_and(|char| !char.is_whitespace()) {
                return Err(invalid());
            }
            literal
                .parse::<f64>()
                .map(Number::Float)
                .map_err(|_| invalid())
        } else {
            literal
                .parse::<i64>()
                .map(Number::Integer)
                .map_err(|_| invalid())
        }
    }
}
