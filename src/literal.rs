//! Literal synthesis.
//!
//! Literals are the leaves of every expression tree and the initialisers of
//! globals and fields. Each type has its own weighted branch structure.
//! Nullable types first take a one-in-four `null` branch; value types never
//! yield `null`.

use crate::random::{Dice, pick};
use crate::types::DartType;

/// 64-bit patterns at the edges of 8/16/32/53/64-bit signed and unsigned
/// arithmetic.
pub const INTERESTING_INTS: [u64; 36] = [
    0x0000_0000_0000_007f,
    0x0000_0000_0000_0080,
    0x0000_0000_0000_00ff,
    0x0000_0000_0000_0100,
    0x0000_0000_0000_7fff,
    0x0000_0000_0000_8000,
    0x0000_0000_0000_ffff,
    0x0000_0000_0001_0000,
    0x0000_0000_3fff_ffff,
    0x0000_0000_4000_0000,
    0x0000_0000_7fff_ffff,
    0x0000_0000_8000_0000,
    0x0000_0000_ffff_ffff,
    0x0000_0001_0000_0000,
    0x001f_ffff_ffff_ffff,
    0x0020_0000_0000_0000,
    0x3fff_ffff_ffff_ffff,
    0x4000_0000_0000_0000,
    0x7fff_ffff_ffff_ffff,
    0x8000_0000_0000_0000,
    0x8000_0000_0000_0001,
    0xbfff_ffff_ffff_ffff,
    0xc000_0000_0000_0000,
    0xffe0_0000_0000_0000,
    0xffdf_ffff_ffff_ffff,
    0xffff_ffff_0000_0000,
    0xffff_fffe_ffff_ffff,
    0xffff_ffff_8000_0000,
    0xffff_ffff_7fff_ffff,
    0xffff_ffff_c000_0000,
    0xffff_ffff_bfff_ffff,
    0xffff_ffff_ffff_8000,
    0xffff_ffff_ffff_7fff,
    0xffff_ffff_ffff_ff80,
    0xffff_ffff_ffff_ff7f,
    0xffff_ffff_ffff_ffff,
];

/// Characters allowed inside generated string literals. None of them needs
/// escaping in a single-quoted Dart string.
pub const STRING_ALPHABET: &[u8; 71] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!#&()*+,-";

const SPECIAL_DOUBLES: [&str; 5] = [
    "double.infinity",
    "double.maxFinite",
    "double.minPositive",
    "double.nan",
    "double.negativeInfinity",
];

const MAX_STRING_LEN: usize = 8;
const MAX_CONTAINER_LEN: usize = 4;

/// A random literal of type `ty`.
pub fn literal(dice: &mut dyn Dice, ty: DartType) -> String {
    if ty.is_nullable() && dice.below(4) == 0 {
        return "null".to_string();
    }
    match ty {
        DartType::Bool => bool_literal(dice),
        DartType::Int => int_literal(dice),
        DartType::Double => double_literal(dice),
        DartType::String => string_literal(dice),
        DartType::IntList => list_literal(dice),
        DartType::IntStringMap => map_literal(dice),
    }
}

fn bool_literal(dice: &mut dyn Dice) -> String {
    let value = dice.below(2) == 0;
    value.to_string()
}

fn int_literal(dice: &mut dyn Dice) -> String {
    match dice.below(4) {
        0 => format!("{:#x}", pick(dice, &INTERESTING_INTS)),
        1 => format!("-{}", 1 + dice.below(99)),
        _ => dice.below(100).to_string(),
    }
}

fn double_literal(dice: &mut dyn Dice) -> String {
    match dice.below(SPECIAL_DOUBLES.len() + 2) {
        i if i < SPECIAL_DOUBLES.len() => SPECIAL_DOUBLES[i].to_string(),
        // `{:?}` always keeps a decimal point or exponent, so the literal
        // stays a double in Dart.
        _ => format!("{:?}", dice.fraction()),
    }
}

fn string_literal(dice: &mut dyn Dice) -> String {
    let len = dice.below(MAX_STRING_LEN);
    let text: String = (0..len)
        .map(|_| char::from(*pick(dice, STRING_ALPHABET)))
        .collect();
    format!("'{text}'")
}

fn list_literal(dice: &mut dyn Dice) -> String {
    let len = 1 + dice.below(MAX_CONTAINER_LEN);
    let elements: Vec<String> = (0..len).map(|_| int_literal(dice)).collect();
    format!("<int>[{}]", elements.join(", "))
}

/// Values are `String?` literals, so an entry may be `null`.
fn map_literal(dice: &mut dyn Dice) -> String {
    let len = 1 + dice.below(MAX_CONTAINER_LEN);
    let entries: Vec<String> = (0..len)
        .map(|key| format!("{key}: {}", literal(dice, DartType::String)))
        .collect();
    format!("<int, String?>{{{}}}", entries.join(", "))
}
