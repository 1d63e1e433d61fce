//! The type universe: the closed set of Dart types the generator can
//! synthesize, plus uniform pickers for types and signatures.

use std::fmt;

use crate::random::{Dice, pick};

/// Maximum number of entries produced by the `pick_*` list builders.
const MAX_LIST_LEN: usize = 4;

/// A synthesizable Dart type.
///
/// Every expression the generator emits is requested for exactly one of
/// these. `String`, `IntList` and `IntStringMap` are reference-like and may
/// hold `null`; the value types never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DartType {
    Bool,
    Int,
    Double,
    String,
    IntList,
    IntStringMap,
}

impl DartType {
    /// Every type, in catalogue order.
    pub const ALL: [DartType; 6] = [
        DartType::Bool,
        DartType::Int,
        DartType::Double,
        DartType::String,
        DartType::IntList,
        DartType::IntStringMap,
    ];

    /// The Dart spelling used in declarations.
    ///
    /// Reference-like types are spelled nullable so that `null` literals are
    /// accepted under sound null safety.
    pub fn name(self) -> &'static str {
        match self {
            DartType::Bool => "bool",
            DartType::Int => "int",
            DartType::Double => "double",
            DartType::String => "String?",
            DartType::IntList => "List<int>?",
            DartType::IntStringMap => "Map<int, String?>?",
        }
    }

    /// Whether literals of this type may be `null`.
    pub fn is_nullable(self) -> bool {
        matches!(
            self,
            DartType::String | DartType::IntList | DartType::IntStringMap
        )
    }

    /// Pick a type uniformly from [`DartType::ALL`].
    pub fn pick(dice: &mut dyn Dice) -> Self {
        *pick(dice, &Self::ALL)
    }
}

impl fmt::Display for DartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

/// A function or method prototype: return type followed by parameter types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature(Vec<DartType>);

impl Signature {
    /// Build a signature from `[return, params...]`.
    ///
    /// Panics if `types` is empty, since a signature always has a return type.
    pub fn new(types: Vec<DartType>) -> Self {
        assert!(!types.is_empty(), "signature without a return type");
        Self(types)
    }

    pub fn return_type(&self) -> DartType {
        self.0[0]
    }

    /// Parameter types; parameter `k` of this slice is named `par{k + 1}`.
    pub fn params(&self) -> &[DartType] {
        &self.0[1..]
    }

    /// Return type at index 0, parameters after it.
    pub fn types(&self) -> &[DartType] {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Pickers
// ---------------------------------------------------------------------------

fn pick_len(dice: &mut dyn Dice) -> usize {
    1 + dice.below(MAX_LIST_LEN)
}

/// Between one and four uniformly picked types.
pub fn pick_types(dice: &mut dyn Dice) -> Vec<DartType> {
    let len = pick_len(dice);
    (0..len).map(|_| DartType::pick(dice)).collect()
}

/// A random signature with zero to three parameters.
pub fn pick_signature(dice: &mut dyn Dice) -> Signature {
    Signature::new(pick_types(dice))
}

/// Between one and four random signatures.
pub fn pick_signature_set(dice: &mut dyn Dice) -> Vec<Signature> {
    let len = pick_len(dice);
    (0..len).map(|_| pick_signature(dice)).collect()
}

/// One signature set per class.
pub fn pick_signature_set_set(dice: &mut dyn Dice, classes: usize) -> Vec<Vec<Signature>> {
    (0..classes).map(|_| pick_signature_set(dice)).collect()
}
