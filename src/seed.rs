//! Seed handling.

use std::fmt;
use std::num::NonZeroU64;

use rand::Rng;

/// A generation seed. Never zero: zero is reserved on the command line for
/// "pick a fresh seed".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Seed(NonZeroU64);

impl Seed {
    /// Use `requested` as-is, or draw a fresh non-zero seed from system
    /// entropy when it is zero.
    pub fn resolve(requested: u64) -> Self {
        match NonZeroU64::new(requested) {
            Some(seed) => Seed(seed),
            None => Self::fresh(),
        }
    }

    pub fn fresh() -> Self {
        let value = rand::thread_rng().gen_range(1..=u64::MAX);
        match NonZeroU64::new(value) {
            Some(seed) => Seed(seed),
            None => unreachable!("range excludes zero"),
        }
    }

    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
