//! Seeded Park–Miller generator owned by a single world.
//!
//! Layout, frog kinds, hop directions and powerup kinds are all drawn from
//! this stream in a fixed call order, so two worlds built from the same seed
//! and driven by the same commands stay bit-identical.

const MODULUS: i64 = 2_147_483_647;
const MULTIPLIER: i64 = 16_807;

/// Multiplicative linear congruential generator (multiplier 16807, modulus 2^31 − 1).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeededRandom {
    state: i64,
}

impl SeededRandom {
    /// Creates a generator whose state is folded into `[1, 2^31 − 2]`.
    #[must_use]
    pub fn new(seed: i64) -> Self {
        let mut state = seed % MODULUS;
        if state <= 0 {
            state += MODULUS - 1;
        }
        // -(2^31 - 2) folds onto zero, which is a fixed point of the recurrence.
        if state == 0 {
            state = MODULUS - 1;
        }
        Self { state }
    }

    /// Advances the stream and returns a float in `[0, 1)`.
    pub fn next(&mut self) -> f64 {
        self.state = self.state * MULTIPLIER % MODULUS;
        (self.state - 1) as f64 / (MODULUS - 1) as f64
    }

    /// Returns an integer in `min..=max`.
    pub fn next_int(&mut self, min: i64, max: i64) -> i64 {
        debug_assert!(min <= max, "next_int requires min <= max");
        let span = (max - min + 1) as f64;
        (self.next() * span).floor() as i64 + min
    }

    /// Returns one element of the slice, or `None` when it is empty.
    pub fn choice<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let last = items.len() as i64 - 1;
        let index = self.next_int(0, last) as usize;
        items.get(index)
    }

    /// Returns a Fisher–Yates permutation of the slice, leaving the input untouched.
    pub fn shuffle<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        let mut shuffled = items.to_vec();
        for index in (1..shuffled.len()).rev() {
            let swap_index = self.next_int(0, index as i64) as usize;
            shuffled.swap(index, swap_index);
        }
        shuffled
    }
}
