use tracing::trace;

use crate::{
    ast::{Command, Node},
    error::ParseError,
    token::{Number, Token, TokenKind},
};

type Result<T> = std::result::Result<T, ParseError>;

type BinaryNode = fn(Box<Node>, Box<Node>) -> Node;

const ADDITIVE: &[TokenKind] = &[TokenKind::Plus, TokenKind::Minus];
const MULTIPLICATIVE: &[TokenKind] = &[TokenKind::Multiply, TokenKind::Divide];
const SIGN: &[TokenKind] = &[TokenKind::Plus, TokenKind::Minus];
const COMPARISON: &[TokenKind] = &[
    TokenKind::Eq,
    TokenKind::Neq,
    TokenKind::Gt,
    TokenKind::Ge,
    TokenKind::Lt,
    TokenKind::Le,
];

pub fn parse(tokens: Vec<Token>) -> Result<Node> {
    Parser::new(tokens).parse()
}

/// Recursive-descent parser for exactly one statement.
///
/// ```text
/// Command             ::= ID ( ':=' ArithExp | IdlessTail ) ';'
///                       | NonIdArithOrCompare ';'
///                       | QUIT [ ';' ]
/// IdlessTail          ::= { ('+'|'-') Term | ('*'|'/') Factor } [ CompareOp ArithExp ]
/// NonIdArithOrCompare ::= NonIdArithExp [ CompareOp ArithExp ]
/// NonIdArithExp       ::= NonIdTerm { ('+'|'-') Term }
/// NonIdTerm           ::= NonIdFactor { ('*'|'/') Factor }
/// NonIdFactor         ::= [SIGN] NUM | '(' ArithExp ')'
/// ArithExp            ::= Term { ('+'|'-') Term }
/// Term                ::= Factor { ('*'|'/') Factor }
/// Factor              ::= ID | [SIGN] NUM | '(' ArithExp ')'
/// CompareOp           ::= '=' | '<>' | '>' | '>=' | '<' | '<='
/// ```
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    /// Comments are dropped here; they never take part in the grammar.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens: tokens
                .into_iter()
                .filter(|token| !token.is(TokenKind::Comment))
                .collect(),
            position: 0,
        }
    }

    pub fn parse(&mut self) -> Result<Node> {
        self.position = 0;
        let statement = self.parse_command()?;

        if let Some(token) = self.cur_token() {
            return Err(ParseError::new(
                Some(token.clone()),
                "only one statement is allowed per input",
            ));
        }

        Ok(statement)
    }

    fn parse_command(&mut self) -> Result<Node> {
        trace!(position = self.position, "command");

        if let Some(Token::Id(name)) = self.match_token(&[TokenKind::Id]) {
            let statement = if self.match_token(&[TokenKind::Assign]).is_some() {
                let value = self.parse_arith_exp()?;
                Node::assign(name, value)
            } else {
                self.parse_idless_tail(Node::Id(name))?
            };
            self.consume(TokenKind::Semi, "semicolon required")?;
            return Ok(statement);
        }

        if self.match_token(&[TokenKind::Quit]).is_some() {
            // a trailing `;` after quit is optional
            self.match_token(&[TokenKind::Semi]);
            return Ok(Node::Command(Command::Quit));
        }

        let statement = self.parse_non_id_arith_or_compare()?;
        self.consume(TokenKind::Semi, "semicolon required")?;
        Ok(statement)
    }

    fn parse_idless_tail(&mut self, first: Node) -> Result<Node> {
        trace!(position = self.position, "idless tail");

        let mut expression = first;
        loop {
            if let Some(token) = self.match_token(ADDITIVE) {
                let right = self.parse_term()?;
                expression = additive(&token)(Box::new(expression), Box::new(right));
            } else if let Some(token) = self.match_token(MULTIPLICATIVE) {
                let right = self.parse_factor()?;
                expression = multiplicative(&token)(Box::new(expression), Box::new(right));
            } else {
                break;
            }
        }

        self.parse_comparison_tail(expression)
    }

    fn parse_non_id_arith_or_compare(&mut self) -> Result<Node> {
        trace!(position = self.position, "non-id arith or compare");

        let expression = self.parse_non_id_arith_exp()?;
        self.parse_comparison_tail(expression)
    }

    fn parse_comparison_tail(&mut self, left: Node) -> Result<Node> {
        match self.match_token(COMPARISON) {
            Some(token) => {
                let right = self.parse_arith_exp()?;
                Ok(comparison(&token)(Box::new(left), Box::new(right)))
            }
            None => Ok(left),
        }
    }

    fn parse_non_id_arith_exp(&mut self) -> Result<Node> {
        trace!(position = self.position, "non-id arith exp");

        let mut expression = self.parse_non_id_term()?;
        while let Some(token) = self.match_token(ADDITIVE) {
            let right = self.parse_term()?;
            expression = additive(&token)(Box::new(expression), Box::new(right));
        }
        Ok(expression)
    }

    fn parse_non_id_term(&mut self) -> Result<Node> {
        trace!(position = self.position, "non-id term");

        let mut expression = self.parse_non_id_factor()?;
        while let Some(token) = self.match_token(MULTIPLICATIVE) {
            let right = self.parse_factor()?;
            expression = multiplicative(&token)(Box::new(expression), Box::new(right));
        }
        Ok(expression)
    }

    fn parse_non_id_factor(&mut self) -> Result<Node> {
        trace!(position = self.position, "non-id factor");

        match self.cur_token().map(Token::kind) {
            Some(TokenKind::Plus | TokenKind::Minus | TokenKind::Num) => self.parse_signed_number(),
            Some(TokenKind::LParen) => self.parse_grouped_expression(),
            _ => Err(self.error("expected a number or '(' to start the statement")),
        }
    }

    fn parse_arith_exp(&mut self) -> Result<Node> {
        trace!(position = self.position, "arith exp");

        let mut expression = self.parse_term()?;
        while let Some(token) = self.match_token(ADDITIVE) {
            let right = self.parse_term()?;
            expression = additive(&token)(Box::new(expression), Box::new(right));
        }
        Ok(expression)
    }

    fn parse_term(&mut self) -> Result<Node> {
        trace!(position = self.position, "term");

        let mut expression = self.parse_factor()?;
        while let Some(token) = self.match_token(MULTIPLICATIVE) {
            let right = self.parse_factor()?;
            expression = multiplicative(&token)(Box::new(expression), Box::new(right));
        }
        Ok(expression)
    }

    fn parse_factor(&mut self) -> Result<Node> {
        trace!(position = self.position, "factor");

        match self.cur_token().map(Token::kind) {
            Some(TokenKind::Id) => match self.next_token() {
                Some(Token::Id(name)) => Ok(Node::Id(name)),
                token => Err(ParseError::new(token, "expected identifier")),
            },
            Some(TokenKind::Plus | TokenKind::Minus | TokenKind::Num) => self.parse_signed_number(),
            Some(TokenKind::LParen) => self.parse_grouped_expression(),
            _ => Err(self.error("expected an identifier, a number or '('")),
        }
    }

    fn parse_signed_number(&mut self) -> Result<Node> {
        let sign = self.match_token(SIGN);
        let message = match sign {
            Some(_) => "number expected after sign",
            None => "number expected",
        };

        let number = match self.consume(TokenKind::Num, message)? {
            Token::Num(number) => number,
            token => return Err(ParseError::new(Some(token), message)),
        };

        let number = match sign {
            Some(Token::Minus) => number.negate(),
            _ => number,
        };

        Ok(number_leaf(number))
    }

    fn parse_grouped_expression(&mut self) -> Result<Node> {
        self.consume(TokenKind::LParen, "'(' expected")?;
        let expression = self.parse_arith_exp()?;
        self.consume(TokenKind::RParen, "missing right parenthesis")?;
        Ok(expression)
    }

    fn cur_token(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn next_token(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    fn match_token(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        match self.cur_token() {
            Some(token) if kinds.contains(&token.kind()) => self.next_token(),
            _ => None,
        }
    }

    fn consume(&mut self, kind: TokenKind, message: &str) -> Result<Token> {
        self.match_token(&[kind]).ok_or_else(|| self.error(message))
    }

    fn error(&self, message: &str) -> ParseError {
        ParseError::new(self.cur_token().cloned(), message)
    }
}

/// Whole-valued literals become `Integer` leaves, everything else `Float`.
fn number_leaf(number: Number) -> Node {
    match number {
        Number::Integer(value) => Node::Integer(value),
        Number::Float(value)
            if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 =>
        {
            Node::Integer(value as i64)
        }
        Number::Float(value) => Node::Float(value),
    }
}

fn additive(token: &Token) -> BinaryNode {
    match token {
        Token::Minus => Node::Sub,
        _ => Node::Add,
    }
}

fn multiplicative(token: &Token) -> BinaryNode {
    match token {
        Token::Divide => Node::Divide,
        _ => Node::Multiply,
    }
}

fn comparison(token: &Token) -> BinaryNode {
    match token {
        Token::Neq => Node::Neq,
        Token::Gt => Node::Gt,
        Token::Ge => Node::Ge,
        Token::Lt => Node::Lt,
        Token::Le => Node::Le,
        _ => Node::Eq,
    }
}
