//! Injectable randomness for round generation
//!
//! Generators never touch a global RNG. They draw from a [`RandomSource`],
//! which every `rand` RNG implements through a blanket impl. Tests that need
//! to assert exact round contents use [`ScriptedSource`], which replays a
//! predetermined sequence of draws.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha12Rng;
use std::collections::VecDeque;

/// A source of uniform integer draws
pub trait RandomSource {
    /// Draw uniformly from the inclusive range `low..=high`
    ///
    /// Callers guarantee `low <= high`.
    fn draw(&mut self, low: u32, high: u32) -> u32;
}

impl<R: RngCore + ?Sized> RandomSource for R {
    fn draw(&mut self, low: u32, high: u32) -> u32 {
        self.gen_range(low..=high)
    }
}

/// Replays a fixed sequence of draws, then falls back to a seeded RNG
///
/// Each scripted value is clamped into the requested range, so a script can
/// never produce a value a generator did not ask for. Once the script is
/// exhausted the fallback keeps resampling loops terminating.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    script: VecDeque<u32>,
    fallback: ChaCha12Rng,
}

impl ScriptedSource {
    pub fn new(script: impl IntoIterator<Item = u32>) -> Self {
        ScriptedSource {
            script: script.into_iter().collect(),
            fallback: ChaCha12Rng::seed_from_u64(0),
        }
    }

    /// Number of scripted draws not yet consumed
    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.script.is_empty()
    }
}

impl RandomSource for ScriptedSource {
    fn draw(&mut self, low: u32, high: u32) -> u32 {
        match self.script.pop_front() {
            Some(value) => value.clamp(low, high),
            None => self.fallback.gen_range(low..=high),
        }
    }
}

/// Fair coin: `true` with probability one half
pub fn coin<S: RandomSource + ?Sized>(src: &mut S) -> bool {
    src.draw(0, 1) == 1
}

/// Pick a random element of a non-empty table
pub fn pick<T: Copy, S: RandomSource + ?Sized>(src: &mut S, table: &[T]) -> T {
    let last = table.len().saturating_sub(1) as u32;
    table[src.draw(0, last) as usize]
}

/// Draw from `low..=high`, resampling while `excluded` holds
///
/// The range must contain at least one value that is not excluded.
pub fn draw_excluding<S, F>(src: &mut S, low: u32, high: u32, excluded: F) -> u32
where
    S: RandomSource + ?Sized,
    F: Fn(u32) -> bool,
{
    loop {
        let value = src.draw(low, high);
        if !excluded(value) {
            return value;
        }
    }
}

/// Pick a table element different from `avoid`
///
/// The table must hold at least one element other than `avoid`.
pub fn pick_excluding<T, S>(src: &mut S, table: &[T], avoid: T) -> T
where
    T: Copy + PartialEq,
    S: RandomSource + ?Sized,
{
    let last = table.len().saturating_sub(1) as u32;
    let index = draw_excluding(src, 0, last, |i| table[i as usize] == avoid);
    table[index as usize]
}

/// Fisher-Yates shuffle, walking from the back of the slice
pub fn shuffle<T, S: RandomSource + ?Sized>(src: &mut S, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = src.draw(0, i as u32) as usize;
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_source_replays_then_falls_back() {
        let mut src = ScriptedSource::new([3, 1]);
        assert_eq!(src.draw(0, 5), 3);
        assert_eq!(src.remaining(), 1);
        assert_eq!(src.draw(0, 5), 1);
        assert!(src.is_exhausted());
        let v = src.draw(2, 4);
        assert!((2..=4).contains(&v));
    }

    #[test]
    fn test_scripted_source_clamps() {
        let mut src = ScriptedSource::new([99, 0]);
        assert_eq!(src.draw(2, 4), 4);
        assert_eq!(src.draw(2, 4), 2);
    }

    #[test]
    fn test_rng_blanket_impl_stays_in_range() {
        let mut rng = ChaCha12Rng::seed_from_u64(42);
        for _ in 0..1000 {
            let v = rng.draw(3, 6);
            assert!((3..=6).contains(&v));
        }
    }

    #[test]
    fn test_draw_excluding_skips_excluded() {
        let mut src = ScriptedSource::new([2, 2, 3]);
        assert_eq!(draw_excluding(&mut src, 1, 4, |v| v == 2), 3);
        assert!(src.is_exhausted());
    }

    #[test]
    fn test_pick_excluding() {
        let table = ['a', 'b', 'c'];
        let mut src = ScriptedSource::new([0, 0, 2]);
        assert_eq!(pick_excluding(&mut src, &table, 'a'), 'c');
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = ChaCha12Rng::seed_from_u64(7);
        let mut items: Vec<u32> = (1..=8).collect();
        shuffle(&mut rng, &mut items);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (1..=8).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffle_follows_script() {
        // i=2 swaps with 0, i=1 stays put
        let mut src = ScriptedSource::new([0, 1]);
        let mut items = [3, 2, 5];
        shuffle(&mut src, &mut items);
        assert_eq!(items, [5, 2, 3]);
    }

    #[test]
    fn test_boxed_source_is_usable() {
        let mut boxed: Box<dyn RandomSource + Send> = Box::new(ChaCha12Rng::seed_from_u64(1));
        assert!(boxed.draw(0, 1) <= 1);
        let picked = pick(&mut *boxed, &[10, 20, 30]);
        assert!([10, 20, 30].contains(&picked));
    }
}
