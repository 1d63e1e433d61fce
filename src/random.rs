//! Randomness seam for program generation.
//!
//! Every random decision the generator makes goes through [`Dice`], which
//! exposes exactly two primitives: a uniform integer draw and a uniform
//! fraction. Any [`RngCore`] is a `Dice`, so production runs use a seeded
//! [`StdRng`](rand::rngs::StdRng), while tests can replay a fixed decision
//! trace through [`ScriptedDice`].

use std::collections::VecDeque;

use rand::{Rng, RngCore};

// ---------------------------------------------------------------------------
// Dice
// ---------------------------------------------------------------------------

/// Source of uniform random choices.
pub trait Dice {
    /// Uniform draw in `0..n`. `n` must be non-zero.
    fn below(&mut self, n: usize) -> usize;

    /// Uniform draw in `[0, 1)`.
    fn fraction(&mut self) -> f64;
}

impl<R: RngCore + ?Sized> Dice for R {
    fn below(&mut self, n: usize) -> usize {
        assert!(n > 0, "below(0) has no valid outcome");
        self.gen_range(0..n)
    }

    fn fraction(&mut self) -> f64 {
        self.gen_range(0.0..1.0)
    }
}

/// Pick one element of a non-empty slice uniformly.
///
/// An empty slice means the caller violated a generation invariant, so this
/// panics instead of returning an `Option`.
pub fn pick<'t, T>(dice: &mut dyn Dice, items: &'t [T]) -> &'t T {
    assert!(!items.is_empty(), "uniform choice over an empty sequence");
    &items[dice.below(items.len())]
}

// ---------------------------------------------------------------------------
// ScriptedDice
// ---------------------------------------------------------------------------

/// Number of distinct values [`ScriptedDice::fraction`] can produce.
pub const SCRIPTED_FRACTION_STEPS: usize = 4;

/// Replays a fixed sequence of draws.
///
/// `below(n)` returns the next scripted value and panics if it is not in
/// `0..n`. `fraction()` consumes the next value `v` (which must be below
/// [`SCRIPTED_FRACTION_STEPS`]) and returns `v / SCRIPTED_FRACTION_STEPS`.
/// Running past the end of the script panics.
#[derive(Debug, Clone)]
pub struct ScriptedDice {
    draws: VecDeque<usize>,
    consumed: usize,
}

impl ScriptedDice {
    pub fn new<I: IntoIterator<Item = usize>>(draws: I) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            consumed: 0,
        }
    }

    /// Number of scripted draws not yet consumed.
    pub fn remaining(&self) -> usize {
        self.draws.len()
    }

    fn next(&mut self, n: usize) -> usize {
        let Some(value) = self.draws.pop_front() else {
            panic!("script exhausted after {} draws", self.consumed);
        };
        assert!(
            value < n,
            "scripted draw #{} is {value}, outside 0..{n}",
            self.consumed
        );
        self.consumed += 1;
        value
    }
}

impl Dice for ScriptedDice {
    fn below(&mut self, n: usize) -> usize {
        self.next(n)
    }

    fn fraction(&mut self) -> f64 {
        self.next(SCRIPTED_FRACTION_STEPS) as f64 / SCRIPTED_FRACTION_STEPS as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn rng_draws_stay_in_range() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        for n in 1..20 {
            for _ in 0..50 {
                assert!(rng.below(n) < n);
            }
        }
        for _ in 0..100 {
            let f = rng.fraction();
            assert!((0.0..1.0).contains(&f), "fraction out of range: {f}");
        }
    }

    #[test]
    fn pick_reaches_every_element() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let items = ["a", "b", "c", "d"];
        let mut seen = [false; 4];
        for _ in 0..200 {
            let chosen = pick(&mut rng, &items);
            let idx = items.iter().position(|i| i == chosen).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|s| *s), "not all elements picked: {seen:?}");
    }

    #[test]
    #[should_panic(expected = "empty sequence")]
    fn pick_from_empty_panics() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let empty: [u8; 0] = [];
        pick(&mut rng, &empty);
    }

    #[test]
    fn scripted_dice_replays_in_order() {
        let mut dice = ScriptedDice::new([2, 0, 3, 1]);
        assert_eq!(dice.below(3), 2);
        assert_eq!(dice.below(1), 0);
        assert_eq!(dice.below(4), 3);
        assert_eq!(dice.remaining(), 1);
        assert_eq!(dice.fraction(), 0.25);
        assert_eq!(dice.remaining(), 0);
    }

    #[test]
    #[should_panic(expected = "outside 0..2")]
    fn scripted_dice_rejects_out_of_range_draw() {
        let mut dice = ScriptedDice::new([5]);
        dice.below(2);
    }

    #[test]
    #[should_panic(expected = "script exhausted")]
    fn scripted_dice_panics_when_exhausted() {
        let mut dice = ScriptedDice::new([]);
        dice.below(2);
    }
}
