//! Random Dart program generator.
//!
//! A run plans a [`Catalogue`] of declarations, then emits a complete,
//! well-typed Dart program whose globals are printed at exit. The same seed
//! always yields the same program.

pub mod catalogue;
pub mod config;
pub mod emit;
pub mod error;
pub mod literal;
pub mod manifest;
pub mod ops;
pub mod random;
pub mod scope;
pub mod seed;
pub mod types;

mod expr;
mod stmt;

use std::io::Write;

use rand::SeedableRng;
use rand::rngs::StdRng;

pub use catalogue::{Catalogue, CatalogueSummary};
pub use config::GenConfig;
pub use emit::{EMITTER_VERSION, Generator};
pub use error::{Error, Result};
pub use random::{Dice, ScriptedDice};
pub use seed::Seed;
pub use types::{DartType, Signature};

/// A generated program and the facts recorded about it.
#[derive(Debug, Clone)]
pub struct Program {
    pub seed: Seed,
    pub text: String,
    pub summary: CatalogueSummary,
}

impl Program {
    /// Write the program text to `out`; `target` names it in errors.
    pub fn write_to<W: Write>(&self, out: &mut W, target: &str) -> Result<()> {
        out.write_all(self.text.as_bytes())
            .and_then(|()| out.flush())
            .map_err(|source| Error::WriteProgram {
                target: target.to_string(),
                source,
            })
    }
}

/// Generate the program for `seed`.
pub fn generate_program(seed: Seed, config: &GenConfig) -> Program {
    let mut rng = StdRng::seed_from_u64(seed.get());
    generate_with(&mut rng, seed, config)
}

/// Generate a program drawing every decision from `dice`.
///
/// `seed` only labels the header; callers replaying a script pass whatever
/// seed the script stands for.
pub fn generate_with(dice: &mut dyn Dice, seed: Seed, config: &GenConfig) -> Program {
    let mut generator = Generator::new(dice, seed, config);
    generator.run();
    let summary = generator.catalogue().summary();
    Program {
        seed,
        text: generator.into_output(),
        summary,
    }
}
