//! Operator tables keyed by type.
//!
//! Each table lists the operators that keep an expression of the given type
//! well-typed. An empty table means the operator family does not apply and
//! the caller degrades to a terminal.

use crate::random::{Dice, pick};
use crate::types::DartType;

const PLAIN_ASSIGN: &[&str] = &["="];
const INT_ASSIGN: &[&str] = &[
    "=", "+=", "-=", "*=", "~/=", "%=", "&=", "|=", "^=", ">>=", "<<=",
];
const DOUBLE_ASSIGN: &[&str] = &["=", "+=", "-=", "*=", "/="];

const BOOL_UNARY: &[&str] = &["!"];
const INT_UNARY: &[&str] = &["-", "~"];
const DOUBLE_UNARY: &[&str] = &["-"];

const BOOL_BINARY: &[&str] = &["&&", "||"];
const INT_BINARY: &[&str] = &["+", "-", "*", "~/", "%", "&", "|", "^", ">>", "<<"];
const DOUBLE_BINARY: &[&str] = &["+", "-", "*", "/"];

const INT_INCREMENT: &[&str] = &["++", "--"];

const EQUALITY: &[&str] = &["==", "!="];
const ORDERING: &[&str] = &["==", "!=", "<", "<=", ">", ">="];

/// Assignment operators (plain and compound) valid for `ty`.
pub fn assign_ops(ty: DartType) -> &'static [&'static str] {
    match ty {
        DartType::Int => INT_ASSIGN,
        DartType::Double => DOUBLE_ASSIGN,
        DartType::Bool | DartType::String | DartType::IntList | DartType::IntStringMap => {
            PLAIN_ASSIGN
        }
    }
}

pub fn unary_ops(ty: DartType) -> &'static [&'static str] {
    match ty {
        DartType::Bool => BOOL_UNARY,
        DartType::Int => INT_UNARY,
        DartType::Double => DOUBLE_UNARY,
        DartType::String | DartType::IntList | DartType::IntStringMap => &[],
    }
}

pub fn binary_ops(ty: DartType) -> &'static [&'static str] {
    match ty {
        DartType::Bool => BOOL_BINARY,
        DartType::Int => INT_BINARY,
        DartType::Double => DOUBLE_BINARY,
        DartType::String | DartType::IntList | DartType::IntStringMap => &[],
    }
}

pub fn increment_ops(ty: DartType) -> &'static [&'static str] {
    match ty {
        DartType::Int => INT_INCREMENT,
        DartType::Bool
        | DartType::Double
        | DartType::String
        | DartType::IntList
        | DartType::IntStringMap => &[],
    }
}

/// Comparison operators yielding `bool` for two operands of type `ty`.
pub fn relational_ops(ty: DartType) -> &'static [&'static str] {
    match ty {
        DartType::Int | DartType::Double => ORDERING,
        DartType::Bool | DartType::String | DartType::IntList | DartType::IntStringMap => {
            EQUALITY
        }
    }
}

/// Uniformly pick an operator from a non-empty table.
pub fn pick_op(dice: &mut dyn Dice, table: &'static [&'static str]) -> &'static str {
    *pick(dice, table)
}
