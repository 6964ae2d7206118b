use crate::error::Error;

pub mod error;

/// 式が扱う数値
/// 整数同士の加減乗算は整数のまま、浮動小数点数が混ざると浮動小数点数に昇格する
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// 二項演算を適用する
    /// 除算は被演算子の型によらず常に浮動小数点数の除算として扱う（`6 / 3` は `2.0`）
    pub fn apply(self, op: Operator, rhs: Number) -> Result<Number, Error> {
        match (op, self, rhs) {
            (Operator::Divide, _, rhs) if rhs.is_zero() => Err(Error::DivisionByZero),
            (Operator::Divide, lhs, rhs) => Self::finite(lhs.as_f64() / rhs.as_f64()),
            (Operator::Add, Self::Int(l), Self::Int(r)) => l
                .checked_add(r)
                .map(Self::Int)
                .ok_or(Error::IntegerOverflow(op)),
            (Operator::Subtract, Self::Int(l), Self::Int(r)) => l
                .checked_sub(r)
                .map(Self::Int)
                .ok_or(Error::IntegerOverflow(op)),
            (Operator::Multiply, Self::Int(l), Self::Int(r)) => l
                .checked_mul(r)
                .map(Self::Int)
                .ok_or(Error::IntegerOverflow(op)),
            (Operator::Add, lhs, rhs) => Self::finite(lhs.as_f64() + rhs.as_f64()),
            (Operator::Subtract, lhs, rhs) => Self::finite(lhs.as_f64() - rhs.as_f64()),
            (Operator::Multiply, lhs, rhs) => Self::finite(lhs.as_f64() * rhs.as_f64()),
        }
    }

    pub fn negate(self) -> Result<Number, Error> {
        match self {
            Self::Int(v) => v.checked_neg().map(Self::Int).ok_or(Error::NegationOverflow),
            Self::Float(v) => Ok(Self::Float(-v)),
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(v) => v as f64,
            Self::Float(v) => v,
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Self::Int(v) => v == 0,
            Self::Float(v) => v == 0.0,
        }
    }

    fn finite(value: f64) -> Result<Number, Error> {
        if value.is_finite() {
            Ok(Self::Float(value))
        } else {
            Err(Error::NotFinite(value))
        }
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            // 整数値でも小数部を付けて表示する（2.0）
            Self::Float(v) => write!(f, "{:?}", v),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        };
        write!(f, "{}", symbol)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Plus,
    Minus,
}

impl UnaryOperator {
    pub fn apply(self, operand: Number) -> Result<Number, Error> {
        match self {
            Self::Plus => Ok(operand),
            Self::Minus => operand.negate(),
        }
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
        }
    }
}

/// 式の木
/// S はノードに付与する位置情報で、パーサーが生成した木ではソース上の範囲が入る
/// 手で組み立てる場合は `()` でよい
#[derive(Debug, Clone, PartialEq)]
pub enum Expr<S = ()> {
    Literal(Number, S),
    Unary {
        op: UnaryOperator,
        operand: Box<Expr<S>>,
        span: S,
    },
    Binary {
        op: Operator,
        left: Box<Expr<S>>,
        right: Box<Expr<S>>,
        span: S,
    },
}

impl<S> Expr<S> {
    pub fn literal(value: Number, span: S) -> Self {
        Self::Literal(value, span)
    }

    pub fn unary(op: UnaryOperator, operand: Expr<S>, span: S) -> Self {
        Self::Unary {
            op,
            operand: Box::new(operand),
            span,
        }
    }

    pub fn binary(op: Operator, left: Expr<S>, right: Expr<S>, span: S) -> Self {
        Self::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
            span,
        }
    }

    pub fn span(&self) -> &S {
        match self {
            Self::Literal(_, span) => span,
            Self::Unary { span, .. } => span,
            Self::Binary { span, .. } => span,
        }
    }

    /// 木を評価して数値を返す
    /// 失敗時は失敗したノードの位置情報をエラーと一緒に返す
    /// ゼロ除算のみ除数側のノードを指す
    pub fn evaluate(&self) -> Result<Number, (Error, &S)> {
        match self {
            Self::Literal(value, _) => Ok(*value),
            Self::Unary { op, operand, span } => {
                let value = operand.evaluate()?;
                op.apply(value).map_err(|e| (e, span))
            }
            Self::Binary {
                op,
                left,
                right,
                span,
            } => {
                let lhs = left.evaluate()?;
                let rhs = right.evaluate()?;
                lhs.apply(*op, rhs).map_err(|e| match e {
                    Error::DivisionByZero => (e, right.span()),
                    _ => (e, span),
                })
            }
        }
    }
}

/// 結合を明示するため各演算を括弧で囲って表示する
impl<S> std::fmt::Display for Expr<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal(value, _) => write!(f, "{}", value),
            Self::Unary { op, operand, .. } => write!(f, "({}{})", op, operand),
            Self::Binary {
                op, left, right, ..
            } => write!(f, "({} {} {})", left, op, right),
        }
    }
}
