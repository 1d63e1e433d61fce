//! Plan phase: the program catalogue.
//!
//! Before any body is emitted, the generator fixes the shape of the whole
//! program: global variables, free function signatures, and for every class
//! in the inheritance chain its field types and method signatures. Bodies
//! are then filled in against this catalogue so every name and call they
//! reference is known to exist with the right type.

use serde::{Deserialize, Serialize};

use crate::random::Dice;
use crate::types::{
    DartType, Signature, pick_signature_set, pick_signature_set_set, pick_types,
};

/// Maximum number of classes in the inheritance chain.
const MAX_CLASSES: usize = 4;

/// Declarations fixed for the lifetime of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalogue {
    /// Types of `var0`, `var1`, ...; covers every [`DartType`] at least once.
    pub globals: Vec<DartType>,
    /// Signatures of `foo0`, `foo1`, ...
    pub functions: Vec<Signature>,
    /// Field types of `X<c>`, named `fld<c>_<i>`.
    pub class_fields: Vec<Vec<DartType>>,
    /// Method signatures of `X<c>`, named `foo<c>_<m>`.
    pub class_methods: Vec<Vec<Signature>>,
}

/// Declaration counts, recorded in the run manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogueSummary {
    pub globals: usize,
    pub functions: usize,
    pub classes: usize,
    pub fields: usize,
    pub methods: usize,
}

impl Catalogue {
    /// Draw a fresh catalogue.
    ///
    /// Randomness is consumed in a fixed order (globals, functions, class
    /// fields, class methods) so a seed maps to one catalogue.
    pub fn plan(dice: &mut dyn Dice) -> Self {
        let mut globals = pick_types(dice);
        globals.extend(DartType::ALL);

        let functions = pick_signature_set(dice);

        let classes = 1 + dice.below(MAX_CLASSES);
        let class_fields: Vec<Vec<DartType>> = (0..classes).map(|_| pick_types(dice)).collect();
        let class_methods = pick_signature_set_set(dice, class_fields.len());

        let catalogue = Self {
            globals,
            functions,
            class_fields,
            class_methods,
        };
        catalogue.check();
        tracing::debug!(summary = ?catalogue.summary(), "planned catalogue");
        catalogue
    }

    pub fn class_count(&self) -> usize {
        self.class_fields.len()
    }

    pub fn summary(&self) -> CatalogueSummary {
        CatalogueSummary {
            globals: self.globals.len(),
            functions: self.functions.len(),
            classes: self.class_count(),
            fields: self.class_fields.iter().map(Vec::len).sum(),
            methods: self.class_methods.iter().map(Vec::len).sum(),
        }
    }

    /// Assert the structural invariants name resolution relies on.
    pub fn check(&self) {
        assert_eq!(
            self.class_fields.len(),
            self.class_methods.len(),
            "class field and method tables are misaligned"
        );
        assert!(self.class_count() > 0, "catalogue has no classes");
        for ty in DartType::ALL {
            assert!(
                self.globals.contains(&ty),
                "no global variable of type {ty:?}"
            );
        }
    }
}
