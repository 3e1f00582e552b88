use crate::errors::{EvalError, LexError, PlotError, SyntaxError};
use std::fmt;

/// Name of the free variable.
pub const VARIABLE: &str = "x";

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Op(char),
    Ident(String),
    LParen,
    RParen,
    Comma,
    End,
}

static END: Token = Token::End;

pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().enumerate().peekable();

    while let Some(&(position, c)) = chars.peek() {
        match c {
            _ if c.is_whitespace() => {
                chars.next();
            }
            '(' => {
                tokens.push(Token::LParen);
                chars.next();
            }
            ')' => {
                tokens.push(Token::RParen);
                chars.next();
            }
            ',' => {
                tokens.push(Token::Comma);
                chars.next();
            }
            '+' | '-' | '*' | '/' | '^' => {
                tokens.push(Token::Op(c));
                chars.next();
            }
            '0'..='9' | '.' => {
                let mut num_str = String::new();
                let mut has_dot = false;
                let mut has_exp = false;

                while let Some(&(_, ch)) = chars.peek() {
                    match ch {
                        '.' if has_dot || has_exp => break,
                        '.' => {
                            has_dot = true;
                            num_str.push(ch);
                            chars.next();
                        }
                        'e' | 'E' if !has_exp => {
                            // Only an exponent when digits follow; `2exp(x)` stays `2`, `exp`.
                            let mut ahead = chars.clone();
                            ahead.next();
                            let mut sign = None;
                            if let Some(&(_, s)) = ahead.peek() {
                                if s == '+' || s == '-' {
                                    sign = Some(s);
                                    ahead.next();
                                }
                            }
                            if !matches!(ahead.peek(), Some(&(_, d)) if d.is_ascii_digit()) {
                                break;
                            }

                            has_exp = true;
                            num_str.push(ch);
                            chars.next();
                            if let Some(s) = sign {
                                num_str.push(s);
                                chars.next();
                            }
                        }
                        '0'..='9' => {
                            num_str.push(ch);
                            chars.next();
                        }
                        _ => break,
                    }
                }

                let value = num_str.parse::<f64>().map_err(|_| LexError::InvalidNumber {
                    text: num_str.clone(),
                    position,
                })?;
                tokens.push(Token::Number(value));
            }
            'a'..='z' | 'A'..='Z' | '_' => {
                let mut ident = String::new();
                while let Some(&(_, ch)) = chars.peek() {
                    if ch.is_ascii_alphanumeric() || ch == '_' {
                        ident.push(ch);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(ident));
            }
            _ => return Err(LexError::UnexpectedChar { ch: c, position }),
        }
    }

    tokens.push(Token::End);
    Ok(tokens)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    pub fn symbol(self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Sub => '-',
            BinaryOp::Mul => '*',
            BinaryOp::Div => '/',
            BinaryOp::Pow => '^',
        }
    }

    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            BinaryOp::Add => left + right,
            BinaryOp::Sub => left - right,
            BinaryOp::Mul => left * right,
            BinaryOp::Div => left / right,
            BinaryOp::Pow => left.powf(right),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Plus,
}

impl UnaryOp {
    pub fn apply(self, value: f64) -> f64 {
        match self {
            UnaryOp::Neg => -value,
            UnaryOp::Plus => value,
        }
    }
}

/// Expression tree. Every child is owned by its parent.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Literal(f64),
    Variable,
    Binary(BinaryOp, Box<Node>, Box<Node>),
    Unary(UnaryOp, Box<Node>),
    Call(String, Box<Node>),
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Literal(v) => write!(f, "{}", v),
            Node::Variable => f.write_str(VARIABLE),
            Node::Binary(op, left, right) => write!(f, "({} {} {})", left, op.symbol(), right),
            Node::Unary(UnaryOp::Neg, operand) => write!(f, "-{}", operand),
            Node::Unary(UnaryOp::Plus, operand) => write!(f, "+{}", operand),
            Node::Call(name, arg) => write!(f, "{}({})", name, arg),
        }
    }
}

pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, current: 0 }
    }

    /// Parses a whole expression; the `End` token must follow it.
    pub fn parse(&mut self) -> Result<Node, SyntaxError> {
        let node = self.expr()?;
        if *self.peek() != Token::End {
            return Err(SyntaxError::new(self.current, "end of input"));
        }
        self.current += 1;
        Ok(node)
    }

    fn peek(&self) -> &Token {
        self.tokens.get(self.current).unwrap_or(&END)
    }

    fn expect(&mut self, token: Token, expected: &str) -> Result<(), SyntaxError> {
        if *self.peek() == token {
            self.current += 1;
            Ok(())
        } else {
            Err(SyntaxError::new(self.current, expected))
        }
    }

    fn expr(&mut self) -> Result<Node, SyntaxError> {
        let mut left = self.term()?;

        loop {
            let op = match self.peek() {
                Token::Op('+') => BinaryOp::Add,
                Token::Op('-') => BinaryOp::Sub,
                _ => break,
            };
            self.current += 1;
            let right = self.term()?;
            left = Node::Binary(op, Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn term(&mut self) -> Result<Node, SyntaxError> {
        let mut left = self.unary()?;

        loop {
            let op = match self.peek() {
                Token::Op('*') => BinaryOp::Mul,
                Token::Op('/') => BinaryOp::Div,
                _ => break,
            };
            self.current += 1;
            let right = self.unary()?;
            left = Node::Binary(op, Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn unary(&mut self) -> Result<Node, SyntaxError> {
        let op = match self.peek() {
            Token::Op('-') => UnaryOp::Neg,
            Token::Op('+') => UnaryOp::Plus,
            _ => return self.power(),
        };
        self.current += 1;
        let operand = self.unary()?;
        Ok(Node::Unary(op, Box::new(operand)))
    }

    fn power(&mut self) -> Result<Node, SyntaxError> {
        let base = self.primary()?;

        if *self.peek() == Token::Op('^') {
            self.current += 1;
            // Right operand goes back through `unary`, so `2^3^2` nests to the right.
            let exponent = self.unary()?;
            Ok(Node::Binary(BinaryOp::Pow, Box::new(base), Box::new(exponent)))
        } else {
            Ok(base)
        }
    }

    fn primary(&mut self) -> Result<Node, SyntaxError> {
        let position = self.current;

        match self.peek() {
            Token::Number(n) => {
                let n = *n;
                self.current += 1;
                Ok(Node::Literal(n))
            }
            Token::LParen => {
                self.current += 1;
                let inner = self.expr()?;
                self.expect(Token::RParen, "')'")?;
                Ok(inner)
            }
            Token::Ident(ident) => {
                let name = ident.clone();
                self.current += 1;

                if *self.peek() == Token::LParen {
                    self.current += 1;
                    let arg = self.expr()?;
                    self.expect(Token::RParen, "')' after function argument")?;
                    Ok(Node::Call(name, Box::new(arg)))
                } else if name == VARIABLE {
                    Ok(Node::Variable)
                } else {
                    Err(SyntaxError::new(
                        position,
                        format!("'(' after '{}' (only '{}' is a variable)", name, VARIABLE),
                    ))
                }
            }
            _ => Err(SyntaxError::new(position, "operand")),
        }
    }
}

/// Tokenizes and parses `input`, tagging the failure with its phase.
pub fn parse(input: &str) -> Result<Node, PlotError> {
    let tokens = tokenize(input)?;
    Ok(Parser::new(tokens).parse()?)
}

const FUNCTIONS: &[(&str, fn(f64) -> f64)] = &[
    ("sin", f64::sin),
    ("cos", f64::cos),
    ("tan", f64::tan),
    ("log", f64::ln),
    ("exp", f64::exp),
];

pub fn lookup_function(name: &str) -> Option<fn(f64) -> f64> {
    FUNCTIONS
        .iter()
        .find(|(registered, _)| *registered == name)
        .map(|&(_, f)| f)
}

pub fn function_names() -> impl Iterator<Item = &'static str> {
    FUNCTIONS.iter().map(|&(name, _)| name)
}

/// Evaluates `node` with the free variable bound to `x`.
///
/// Pure: the same tree may be evaluated from several threads at once.
/// Division by zero and friends yield infinities or NaN, not errors.
pub fn evaluate(node: &Node, x: f64) -> Result<f64, EvalError> {
    match node {
        Node::Literal(value) => Ok(*value),
        Node::Variable => Ok(x),
        Node::Unary(op, operand) => Ok(op.apply(evaluate(operand, x)?)),
        Node::Binary(op, left, right) => Ok(op.apply(evaluate(left, x)?, evaluate(right, x)?)),
        Node::Call(name, arg) => {
            let function =
                lookup_function(name).ok_or_else(|| EvalError::UnknownFunction(name.clone()))?;
            Ok(function(evaluate(arg, x)?))
        }
    }
}
