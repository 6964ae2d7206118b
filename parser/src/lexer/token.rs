use node::Number;

use crate::char_reader::position::Span;

/// トークンの種類
/// 数値のトークンは必ず値を持ち、演算子・括弧は値を持たない
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Int(i64),
    Float(f64),
    Plus,
    Minus,
    Mul,
    Div,
    LParen,
    RParen,
}

impl Type {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Int(_) => "INT",
            Self::Float(_) => "FLOAT",
            Self::Plus => "PLUS",
            Self::Minus => "MINUS",
            Self::Mul => "MUL",
            Self::Div => "DIV",
            Self::LParen => "LPAREN",
            Self::RParen => "RPAREN",
        }
    }

    pub fn value(&self) -> Option<Number> {
        match self {
            Self::Int(v) => Some(Number::Int(*v)),
            Self::Float(v) => Some(Number::Float(*v)),
            _ => None,
        }
    }
}

impl From<Number> for Type {
    fn from(value: Number) -> Self {
        match value {
            Number::Int(v) => Self::Int(v),
            Number::Float(v) => Self::Float(v),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub(crate) ty: Type,
    pub(crate) span: Span,
}

impl Token {
    pub fn new(ty: Type, span: Span) -> Self {
        Self { ty, span }
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn value(&self) -> Option<Number> {
        self.ty.value()
    }
}

/// 値を持つトークンは `INT:14`、持たないトークンは `PLUS` のように表示する
impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.value() {
            Some(value) => write!(f, "{}:{}", self.ty.name(), value),
            None => write!(f, "{}", self.ty.name()),
        }
    }
}

/// `{"kind": "INT", "value": 14}` の形で書き出す（値を持たないトークンは value が null）
impl serde::Serialize for Token {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("Token", 2)?;
        state.serialize_field("kind", self.ty.name())?;
        state.serialize_field("value", &self.value())?;
        state.end()
    }
}
