use crate::{
    char_reader::{
        CharReader,
        position::{Position, Span},
    },
    error::{Error, ErrorKind},
    lexer::token::{Token, Type},
};

pub mod token;

/// 入力テキストをトークン列に分解する
/// 最初の不正な文字でエラーを返し、以降はトークンを返さない
pub struct Lexer<'a> {
    reader: CharReader<'a>,
    failed: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source_name: &str, text: &'a str) -> Self {
        Self {
            reader: CharReader::new(source_name, text),
            failed: false,
        }
    }

    /// 入力の先頭を line 行目（0 始まり）として数える
    pub fn at_line(mut self, line: usize) -> Self {
        self.reader = self.reader.at_line(line);
        self
    }

    /// 入力の終端まで読み、トークン列を返す
    /// エラー時は途中までのトークンを捨ててエラーのみ返す
    pub fn tokenize(&mut self) -> Result<Vec<Token>, Error> {
        self.by_ref().collect()
    }

    /// 次に読み出す文字の位置（読み終えていれば入力の終端）
    pub fn position(&self) -> &Position {
        self.reader.position()
    }

    /// 数字と高々１つの `.` を読み進める
    /// ２つ目の `.` は読まずに残すため `3.1.4` は `3.1` と `.4` の２つの数値になる
    fn read_number(&mut self) -> Result<Token, Error> {
        let start = self.reader.position().clone();
        let mut literal = String::new();
        let mut dot_count = 0;

        while let Some(c) = self.reader.peek() {
            match c {
                '0'..='9' => literal.push(c),
                '.' if dot_count == 0 => {
                    dot_count += 1;
                    literal.push(c);
                }
                _ => break,
            }
            self.reader.read();
        }

        let span = Span::new(start, self.reader.position().clone());

        if literal == "." {
            return Err(Error::new(ErrorKind::IllegalCharacter, span, "'.'"));
        }

        let ty = if dot_count == 0 {
            literal.parse::<i64>().map(Type::Int).map_err(|e| {
                Error::new(
                    ErrorKind::InvalidNumber,
                    span.clone(),
                    format!("{} ({})", literal, e),
                )
            })?
        } else {
            match literal.parse::<f64>() {
                Ok(v) if v.is_finite() => Type::Float(v),
                _ => {
                    return Err(Error::new(
                        ErrorKind::InvalidNumber,
                        span,
                        format!("{} (number too large to fit in target type)", literal),
                    ));
                }
            }
        };

        Ok(Token::new(ty, span))
    }

    fn resolve_token(c: char) -> Option<Type> {
        match c {
            '+' => Some(Type::Plus),
            '-' => Some(Type::Minus),
            '*' => Some(Type::Mul),
            '/' => Some(Type::Div),
            '(' => Some(Type::LParen),
            ')' => Some(Type::RParen),
            _ => None,
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            let c = self.reader.peek()?;

            match c {
                ' ' | '\t' => {
                    self.reader.read();
                }
                '0'..='9' | '.' => {
                    let result = self.read_number();
                    self.failed = result.is_err();
                    return Some(result);
                }
                _ => {
                    let start = self.reader.position().clone();
                    self.reader.read();
                    let span = Span::new(start, self.reader.position().clone());

                    return Some(match Self::resolve_token(c) {
                        Some(ty) => Ok(Token::new(ty, span)),
                        None => {
                            self.failed = true;
                            Err(Error::new(
                                ErrorKind::IllegalCharacter,
                                span,
                                format!("{:?}", c),
                            ))
                        }
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn types(input: &str) -> Result<Vec<Type>, Error> {
        Lexer::new("<test>", input)
            .tokenize()
            .map(|tokens| tokens.into_iter().map(|token| token.ty).collect())
    }

    #[rstest::rstest]
    #[case("", vec![])]
    #[case(" \t ", vec![])]
    #[case("42", vec![Type::Int(42)])]
    #[case("007", vec![Type::Int(7)])]
    #[case("3.25", vec![Type::Float(3.25)])]
    #[case("3.", vec![Type::Float(3.0)])]
    #[case(".5", vec![Type::Float(0.5)])]
    #[
        case(
            "12+3*4",
            vec![Type::Int(12), Type::Plus, Type::Int(3), Type::Mul, Type::Int(4)]
        )
    ]
    #[case("3.1.4", vec![Type::Float(3.1), Type::Float(0.4)])]
    #[case("1..2", vec![Type::Float(1.0), Type::Float(0.2)])]
    #[
        case(
            "(1 - 2) / 3",
            vec![
                Type::LParen,
                Type::Int(1),
                Type::Minus,
                Type::Int(2),
                Type::RParen,
                Type::Div,
                Type::Int(3),
            ]
        )
    ]
    #[case("1\t+ \t2", vec![Type::Int(1), Type::Plus, Type::Int(2)])]
    fn test_lexer(#[case] input: &str, #[case] expected: Vec<Type>) {
        let result = types(input);
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), expected);
    }

    #[rstest::rstest]
    #[case("5 $ 2", ErrorKind::IllegalCharacter, "'$'", 2, 3)]
    #[case("1\n+2", ErrorKind::IllegalCharacter, "'\\n'", 1, 2)]
    #[case("1 +\r\n2", ErrorKind::IllegalCharacter, "'\\r'", 3, 4)]
    #[case("1 + x", ErrorKind::IllegalCharacter, "'x'", 4, 5)]
    #[case("2 . 3", ErrorKind::IllegalCharacter, "'.'", 2, 3)]
    #[case("1 % 2 $", ErrorKind::IllegalCharacter, "'%'", 2, 3)]
    #[
        case(
            "1 + 99999999999999999999",
            ErrorKind::InvalidNumber,
            "99999999999999999999 (number too large to fit in target type)",
            4,
            24
        )
    ]
    fn test_lexer_error(
        #[case] input: &str,
        #[case] kind: ErrorKind,
        #[case] message: &str,
        #[case] start: usize,
        #[case] end: usize,
    ) {
        let result = types(input);
        assert!(result.is_err());

        let error = result.unwrap_err();
        assert_eq!(error.kind(), kind);
        assert_eq!(error.message(), message);
        assert_eq!(error.span().start.index(), start);
        assert_eq!(error.span().end.index(), end);
    }

    #[test]
    fn test_span() {
        let tokens = Lexer::new("<test>", "12 +\t 3.5").tokenize().unwrap();

        assert_eq!(tokens.len(), 3);

        assert_eq!(tokens[0].span().start.index(), 0);
        assert_eq!(tokens[0].span().end.index(), 2);
        assert_eq!(tokens[0].span().text(), "12");

        assert_eq!(tokens[1].span().start.index(), 3);
        assert_eq!(tokens[1].span().start.column(), 3);

        assert_eq!(tokens[2].span().start.index(), 6);
        assert_eq!(tokens[2].span().start.line(), 0);
        assert_eq!(tokens[2].span().start.column(), 6);
        assert_eq!(tokens[2].span().text(), "3.5");
    }

    #[test]
    fn test_at_line() {
        let tokens = Lexer::new("<test>", "1 + 2").at_line(4).tokenize().unwrap();

        assert_eq!(tokens[0].span().start.line(), 4);
        assert_eq!(tokens[2].span().start.line(), 4);
        assert_eq!(tokens[2].span().start.index(), 4);
        assert_eq!(tokens[2].span().start.column(), 4);
    }

    #[test]
    fn test_stops_after_error() {
        let mut lexer = Lexer::new("<test>", "1 $ 2");

        assert!(matches!(lexer.next(), Some(Ok(Token { ty: Type::Int(1), .. }))));
        assert!(matches!(lexer.next(), Some(Err(_))));
        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_position_at_end() {
        let mut lexer = Lexer::new("<test>", "1 +\t2 ");
        assert!(lexer.tokenize().is_ok());

        assert_eq!(lexer.position().index(), 6);
        assert_eq!(lexer.position().line(), 0);
        assert_eq!(lexer.position().column(), 6);
    }
}
