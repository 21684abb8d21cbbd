use lazy_static::lazy_static;
use std::collections::HashMap;

use crate::ast::operators::{BinOp, BoolOp, CmpOp, UnaryOp};

lazy_static! {
    static ref BOOL_OP_PHRASES: HashMap<BoolOp, &'static str> = {
        let mut map = HashMap::new();
        map.insert(BoolOp::And, "and");
        map.insert(BoolOp::Or, "or");
        map
    };
    static ref BIN_OP_PHRASES: HashMap<BinOp, &'static str> = {
        let mut map = HashMap::new();
        map.insert(BinOp::Add, "plus");
        map.insert(BinOp::Sub, "minus");
        map.insert(BinOp::Mult, "times");
        map.insert(BinOp::MatMult, "matrix times");
        map.insert(BinOp::Div, "divided by");
        map.insert(BinOp::Mod, "modulo");
        map.insert(BinOp::Pow, "to the power of");
        map.insert(BinOp::LShift, "left shifted by");
        map.insert(BinOp::RShift, "right shifted by");
        map.insert(BinOp::BitOr, "bitwise or");
        map.insert(BinOp::BitXor, "bitwise exclusive or");
        map.insert(BinOp::BitAnd, "bitwise and");
        map.insert(BinOp::FloorDiv, "integer divided by");
        map
    };
    static ref UNARY_OP_PHRASES: HashMap<UnaryOp, &'static str> = {
        let mut map = HashMap::new();
        map.insert(UnaryOp::Invert, "inverted");
        map.insert(UnaryOp::Not, "not");
        map.insert(UnaryOp::UAdd, "positive");
        map.insert(UnaryOp::USub, "negative");
        map
    };
    // Every phrase starts with "is" so chained clauses read "..., which is in c".
    static ref CMP_OP_PHRASES: HashMap<CmpOp, &'static str> = {
        let mut map = HashMap::new();
        map.insert(CmpOp::Eq, "is equal to");
        map.insert(CmpOp::NotEq, "is not equal to");
        map.insert(CmpOp::Lt, "is less than");
        map.insert(CmpOp::LtE, "is less than or equal to");
        map.insert(CmpOp::Gt, "is greater than");
        map.insert(CmpOp::GtE, "is greater than or equal to");
        map.insert(CmpOp::Is, "is");
        map.insert(CmpOp::IsNot, "is not");
        map.insert(CmpOp::In, "is in");
        map.insert(CmpOp::NotIn, "is not in");
        map
    };
}

// A miss below means a table fell out of step with its operator enum.

pub fn bool_op_phrase(op: BoolOp) -> &'static str {
    BOOL_OP_PHRASES
        .get(&op)
        .copied()
        .unwrap_or_else(|| panic!("no phrase for boolean operator {:?}", op))
}

pub fn bin_op_phrase(op: BinOp) -> &'static str {
    BIN_OP_PHRASES
        .get(&op)
        .copied()
        .unwrap_or_else(|| panic!("no phrase for binary operator {:?}", op))
}

pub fn unary_op_phrase(op: UnaryOp) -> &'static str {
    UNARY_OP_PHRASES
        .get(&op)
        .copied()
        .unwrap_or_else(|| panic!("no phrase for unary operator {:?}", op))
}

pub fn cmp_op_phrase(op: CmpOp) -> &'static str {
    CMP_OP_PHRASES
        .get(&op)
        .copied()
        .unwrap_or_else(|| panic!("no phrase for comparison operator {:?}", op))
}
