//! Stochastic content generators for test variations
//!
//! Uses seeded RNG for reproducibility. Print seed on failure for replay.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::common::E;

/// Seeded generator for reproducible stochastic tests
pub struct Gen {
    pub rng: StdRng,
    pub seed: u64,
}

impl Gen {
    /// Create with specific seed (for reproduction)
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create from environment or random seed
    pub fn from_env_or_random() -> Self {
        let seed = std::env::var("BLACKNOT_TEST_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(rand::random);
        Self::new(seed)
    }

    /// Geometric distribution: count until rand > alpha
    pub fn geometric(&mut self, alpha: f64) -> usize {
        let mut n = 0;
        while self.rng.gen::<f64>() < alpha {
            n += 1;
        }
        n
    }

    /// Poisson-like count (simplified)
    pub fn poisson(&mut self, lambda: f64) -> usize {
        let l = (-lambda).exp();
        let mut k = 0;
        let mut p = 1.0;
        loop {
            k += 1;
            p *= self.rng.gen::<f64>();
            if p <= l {
                break;
            }
        }
        k - 1
    }

    /// Random boolean with probability p
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.gen::<f64>() < p
    }

    /// Random name: letter, then letters/digits/underscores
    pub fn name(&mut self) -> Vec<u8> {
        let len = 1 + self.geometric(0.7);
        let starters = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
        let continuers = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_";
        let mut name = Vec::with_capacity(len);
        name.push(starters[self.rng.gen_range(0..starters.len())]);
        for _ in 1..len {
            name.push(continuers[self.rng.gen_range(0..continuers.len())]);
        }
        name
    }

    /// Random unescaped value, biased towards bytes the grammar cares about
    pub fn value(&mut self) -> Vec<u8> {
        let len = self.geometric(0.85);
        let chars = b"abcxyz019 _-=#[]\"\\\n\t";
        (0..len)
            .map(|_| {
                if self.chance(0.05) {
                    self.rng.gen_range(0x80..=0xff)
                } else {
                    chars[self.rng.gen_range(0..chars.len())]
                }
            })
            .collect()
    }

    /// Random run of whitespace (possibly empty)
    pub fn whitespace(&mut self) -> Vec<u8> {
        let chars = b"  \t\n\r\x0b\x0c";
        let len = self.geometric(0.4);
        (0..len).map(|_| chars[self.rng.gen_range(0..chars.len())]).collect()
    }

    /// Comment line including its newline
    pub fn comment(&mut self) -> Vec<u8> {
        let mut out = b"#".to_vec();
        let chars = b"abc [x] = \"q\" \\ #";
        for _ in 0..self.geometric(0.8) {
            out.push(chars[self.rng.gen_range(0..chars.len())]);
        }
        out.push(b'\n');
        out
    }

    /// Comments and blank lines; always ends on a fresh line
    pub fn preamble(&mut self) -> Vec<u8> {
        let mut out = Vec::new();
        for _ in 0..self.geometric(0.5) {
            if self.chance(0.5) {
                out.extend(self.comment());
            } else {
                out.extend(self.whitespace());
                out.push(b'\n');
            }
        }
        out
    }

    /// Whitespace and maybe a comment, for appending after complete input
    pub fn trailer(&mut self) -> Vec<u8> {
        let mut out = b"\n".to_vec();
        out.extend(self.whitespace());
        if self.chance(0.5) {
            out.extend(self.comment());
            // drop the newline now and then: comments may end at EOI
            if self.chance(0.5) {
                out.pop();
            }
        }
        out
    }

    /// Random well-formed document and the events it must produce
    pub fn document(&mut self) -> (Vec<u8>, Vec<E>) {
        let mut out = Vec::new();
        let mut events = Vec::new();
        let mut section = Vec::new();

        for _ in 0..self.geometric(0.9) {
            out.extend(self.whitespace());
            match self.rng.gen_range(0..10) {
                0 => out.extend(self.comment()),
                1 | 2 => {
                    section = self.name();
                    out.push(b'[');
                    out.extend(self.whitespace());
                    out.extend(&section);
                    out.extend(self.whitespace());
                    out.push(b']');
                    events.push(E::Section(section.clone()));
                }
                _ => {
                    let name = self.name();
                    let value = self.value();
                    out.extend(&name);
                    out.extend(self.whitespace());
                    out.push(b'=');
                    out.extend(self.whitespace());
                    out.extend(escape(&value));
                    events.push(E::Entry(section.clone(), name, value));
                }
            }
        }
        out.extend(self.whitespace());
        (out, events)
    }
}

/// Quote and escape a value
pub fn escape(value: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(value.len() + 2);
    out.push(b'"');
    for &b in value {
        if b == b'"' || b == b'\\' {
            out.push(b'\\');
        }
        out.push(b);
    }
    out.push(b'"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reproducibility() {
        let mut g1 = Gen::new(42);
        let mut g2 = Gen::new(42);

        for _ in 0..10 {
            assert_eq!(g1.name(), g2.name());
            assert_eq!(g1.document(), g2.document());
        }
    }
}
