use std::fmt;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    pub fn negate(self) -> Self {
        match self {
            Number::Integer(value) => match value.checked_neg() {
                Some(value) => Number::Integer(value),
                None => Number::Float(-(value as f64)),
            },
            Number::Float(value) => Number::Float(-value),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Number::Integer(value) => write!(f, "{}", value),
            Number::Float(value) => write!(f, "{}", value),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    Quit,
    Id(String),
    Assign,

    Plus,
    Minus,
    Multiply,
    Divide,

    Eq,
    Neq,
    Ge,
    Le,
    Lt,
    Gt,

    Num(Number),
    Semi,
    Comment(String),
    LParen,
    RParen,
    Bool(bool),
}

/// Payload-free tag of a [`Token`], used by the lexer rule table and by
/// parser diagnostics.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TokenKind {
    Quit,
    Id,
    Assign,
    Plus,
    Minus,
    Multiply,
    Divide,
    Eq,
    Neq,
    Ge,
    Le,
    Lt,
    Gt,
    Num,
    Semi,
    Comment,
    LParen,
    RParen,
    Bool,
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Quit => TokenKind::Quit,
            Token::Id(_) => TokenKind::Id,
            Token::Assign => TokenKind::Assign,
            Token::Plus => TokenKind::Plus,
            Token::Minus => TokenKind::Minus,
            Token::Multiply => TokenKind::Multiply,
            Token::Divide => TokenKind::Divide,
            Token::Eq => TokenKind::Eq,
            Token::Neq => TokenKind::Neq,
            Token::Ge => TokenKind::Ge,
            Token::Le => TokenKind::Le,
            Token::Lt => TokenKind::Lt,
            Token::Gt => TokenKind::Gt,
            Token::Num(_) => TokenKind::Num,
            Token::Semi => TokenKind::Semi,
            Token::Comment(_) => TokenKind::Comment,
            Token::LParen => TokenKind::LParen,
            Token::RParen => TokenKind::RParen,
            Token::Bool(_) => TokenKind::Bool,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Id(name) => write!(f, "{}", name),
            Token::Num(value) => write!(f, "{}", value),
            Token::Comment(text) => write!(f, "// {}", text),
            Token::Bool(value) => write!(f, "{}", value),
            token => write!(f, "{}", token.kind()),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenKind::Quit => write!(f, "quit"),
            TokenKind::Id => write!(f, "identifier"),
            TokenKind::Assign => write!(f, ":="),
            TokenKind::Plus => write!(f, "+"),
            TokenKind::Minus => write!(f, "-"),
            TokenKind::Multiply => write!(f, "*"),
            TokenKind::Divide => write!(f, "/"),
            TokenKind::Eq => write!(f, "="),
            TokenKind::Neq => write!(f, "<>"),
            TokenKind::Ge => write!(f, ">="),
            TokenKind::Le => write!(f, "<="),
            TokenKind::Lt => write!(f, "<"),
            TokenKind::Gt => write!(f, ">"),
            TokenKind::Num => write!(f, "number"),
            TokenKind::Semi => write!(f, ";"),
            TokenKind::Comment => write!(f, "comment"),
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
            TokenKind::Bool => write!(f, "boolean"),
        }
    }
}
