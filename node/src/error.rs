use crate::Operator;

/// 式の評価時（算術演算時）のエラーを表現する
#[derive(thiserror::Error, std::fmt::Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Integer overflow in '{0}'")]
    IntegerOverflow(Operator),
    #[error("Integer overflow in negation")]
    NegationOverflow,
    #[error("Result {0} is not a finite number")]
    NotFinite(f64),
}
