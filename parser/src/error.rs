use crate::char_reader::position::Span;

/// エラーの種類
/// 表示名はエラー文字列の先頭に使われる
#[derive(thiserror::Error, std::fmt::Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum ErrorKind {
    /// 字句解析: 受け付けない文字
    #[error("Illegal Character")]
    IllegalCharacter,
    /// 字句解析: 数値として表現できないリテラル
    #[error("Invalid Number")]
    InvalidNumber,
    /// 構文解析: 数値が来るべき位置に別のトークンがある
    #[error("Expected Number")]
    ExpectedNumber,
    /// 構文解析: 式の途中で入力が尽きた
    #[error("Unexpected End Of Input")]
    UnexpectedEndOfInput,
    /// 構文解析: 括弧の対応が取れていない
    #[error("Unmatched Parenthesis")]
    UnmatchedParenthesis,
    /// 構文解析: 式の後ろに余計なトークンがある
    #[error("Unexpected Token")]
    UnexpectedToken,
    /// 構文解析: 括弧・単項演算子の入れ子、または式の木が深すぎる
    #[error("Nesting Too Deep")]
    NestingTooDeep,
    /// 評価: ゼロ除算
    #[error("Division By Zero")]
    DivisionByZero,
    /// 評価: 整数の桁あふれ、または有限でない浮動小数点数
    #[error("Overflow")]
    Overflow,
}

/// 字句解析・構文解析・評価で発生するエラー
/// 行番号は内部では 0 始まり、表示は 1 始まり
#[derive(thiserror::Error, std::fmt::Debug, Clone, PartialEq, serde::Serialize)]
#[error(
    "{kind}: {message} in {}, line {}",
    .span.start.source_name(),
    .span.start.line() + 1
)]
pub struct Error {
    kind: ErrorKind,
    span: Span,
    message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, span: Span, message: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            message: message.into(),
        }
    }

    /// 評価時のエラーを失敗したノードの範囲と合わせて変換する
    pub fn evaluation(error: node::error::Error, span: Span) -> Self {
        let kind = match error {
            node::error::Error::DivisionByZero => ErrorKind::DivisionByZero,
            node::error::Error::IntegerOverflow(_)
            | node::error::Error::NegationOverflow
            | node::error::Error::NotFinite(_) => ErrorKind::Overflow,
        };

        Self::new(kind, span, error.to_string())
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
