use node::{Expr, Number, Operator, UnaryOperator};

use crate::{
    char_reader::position::{Position, Span},
    error::{Error, ErrorKind},
    lexer::{
        Lexer,
        token::{Token, Type},
    },
};

pub mod char_reader;
pub mod error;
pub mod lexer;

/// トークン列から式の木を組み立てる再帰下降パーサー
///
/// ```text
/// expr   := term (('+' | '-') term)*
/// term   := factor (('*' | '/') factor)*
/// factor := ('+' | '-') factor | INT | FLOAT | '(' expr ')'
/// ```
pub struct Parser {
    tokens: std::iter::Peekable<std::vec::IntoIter<Token>>,
    end_of_input: Position,
    nesting: usize,
}

/// 括弧・単項演算子の入れ子の上限（解析の再帰の深さ）
pub const MAX_NESTING: usize = 128;
/// 式の木の深さの上限（評価・表示・破棄の再帰の深さ）
pub const MAX_DEPTH: usize = 1024;

/// 解析した式と、その木の深さ
type Parsed = Result<(Expr<Span>, usize), Error>;

impl Parser {
    /// end_of_input はトークンが尽きた場合のエラー位置に使う
    pub fn new(tokens: Vec<Token>, end_of_input: Position) -> Self {
        Self {
            tokens: tokens.into_iter().peekable(),
            end_of_input,
            nesting: 0,
        }
    }

    /// トークン列全体を１つの式として解析する
    pub fn parse(&mut self) -> Result<Expr<Span>, Error> {
        let (expr, _) = self.expr()?;

        match self.tokens.next() {
            None => Ok(expr),
            Some(Token {
                ty: Type::RParen,
                span,
            }) => Err(Error::new(
                ErrorKind::UnmatchedParenthesis,
                span,
                "')' has no matching '('",
            )),
            Some(token) => Err(Error::new(
                ErrorKind::UnexpectedToken,
                token.span.clone(),
                format!("Expected '+', '-', '*' or '/', found {}", token),
            )),
        }
    }

    fn expr(&mut self) -> Parsed {
        self.binary(Self::term, |ty| match ty {
            Type::Plus => Some(Operator::Add),
            Type::Minus => Some(Operator::Subtract),
            _ => None,
        })
    }

    fn term(&mut self) -> Parsed {
        self.binary(Self::factor, |ty| match ty {
            Type::Mul => Some(Operator::Multiply),
            Type::Div => Some(Operator::Divide),
            _ => None,
        })
    }

    /// operand を左から畳み込む（`8 - 3 - 2` は `(8 - 3) - 2`）
    fn binary(
        &mut self,
        operand: fn(&mut Self) -> Parsed,
        operator: fn(&Type) -> Option<Operator>,
    ) -> Parsed {
        let (mut left, mut depth) = operand(self)?;

        while let Some(op) = self.tokens.peek().and_then(|token| operator(&token.ty)) {
            let op_span = match self.tokens.next() {
                Some(token) => token.span,
                None => break,
            };
            let (right, right_depth) = operand(self)?;
            depth = Self::check_depth(depth.max(right_depth) + 1, op_span)?;
            let span = left.span().to(right.span());
            left = Expr::binary(op, left, right, span);
        }

        Ok((left, depth))
    }

    fn factor(&mut self) -> Parsed {
        let token = match self.tokens.next() {
            Some(token) => token,
            None => return Err(self.unexpected_end("Expected a number")),
        };

        match token.ty {
            Type::Int(v) => Ok((Expr::literal(Number::Int(v), token.span), 1)),
            Type::Float(v) => Ok((Expr::literal(Number::Float(v), token.span), 1)),
            Type::Plus | Type::Minus => {
                let op = match token.ty {
                    Type::Minus => UnaryOperator::Minus,
                    _ => UnaryOperator::Plus,
                };
                self.enter(&token.span)?;
                let (operand, depth) = self.factor()?;
                self.nesting -= 1;

                let depth = Self::check_depth(depth + 1, token.span.clone())?;
                let span = token.span.to(operand.span());

                Ok((Expr::unary(op, operand, span), depth))
            }
            Type::LParen => {
                self.enter(&token.span)?;
                let inner = self.expr()?;
                self.nesting -= 1;

                match self.tokens.next() {
                    Some(Token {
                        ty: Type::RParen, ..
                    }) => Ok(inner),
                    None => Err(Error::new(
                        ErrorKind::UnmatchedParenthesis,
                        token.span,
                        "'(' is never closed",
                    )),
                    Some(other) => Err(Error::new(
                        ErrorKind::UnexpectedToken,
                        other.span.clone(),
                        format!("Expected ')', found {}", other),
                    )),
                }
            }
            Type::Mul | Type::Div | Type::RParen => Err(Error::new(
                ErrorKind::ExpectedNumber,
                token.span.clone(),
                format!("Expected a number, found {}", token),
            )),
        }
    }

    fn enter(&mut self, span: &Span) -> Result<(), Error> {
        self.nesting += 1;

        if self.nesting > MAX_NESTING {
            Err(Error::new(
                ErrorKind::NestingTooDeep,
                span.clone(),
                format!("Parentheses and signs nest deeper than {}", MAX_NESTING),
            ))
        } else {
            Ok(())
        }
    }

    fn check_depth(depth: usize, span: Span) -> Result<usize, Error> {
        if depth > MAX_DEPTH {
            Err(Error::new(
                ErrorKind::NestingTooDeep,
                span,
                format!("Expression is deeper than {}", MAX_DEPTH),
            ))
        } else {
            Ok(depth)
        }
    }

    fn unexpected_end(&self, message: &str) -> Error {
        Error::new(
            ErrorKind::UnexpectedEndOfInput,
            Span::new(self.end_of_input.clone(), self.end_of_input.clone()),
            message,
        )
    }
}

/// テキストを字句解析・構文解析・評価し、結果を数値トークンとして返す
/// 最初に発生したエラーを返し、呼び出し間で状態は持たない
pub fn run(source_name: &str, text: &str) -> Result<Token, Error> {
    run_at_line(source_name, text, 0)
}

/// run と同じだが、text をソースの line 行目（0 始まり）として扱う
/// 複数行のファイルを１行ずつ評価する場合にエラーの行番号を合わせるために使う
pub fn run_at_line(source_name: &str, text: &str, line: usize) -> Result<Token, Error> {
    let mut lexer = Lexer::new(source_name, text).at_line(line);
    let tokens = lexer.tokenize()?;

    let mut parser = Parser::new(tokens, lexer.position().clone());
    let expr = parser.parse()?;

    let value = expr
        .evaluate()
        .map_err(|(e, span)| Error::evaluation(e, span.clone()))?;

    Ok(Token::new(Type::from(value), expr.span().clone()))
}
