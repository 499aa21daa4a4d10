//! Stochastic content generators for test variations
//!
//! Uses seeded RNG for reproducibility. Print seed on failure for replay.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const NAME_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_";
const VALUE_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789_!\"$%&'()*+-./:;<=>?@[\\]^`{|}~";
const COMMENT_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789 #[]=;:,.!\t";

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
        let seed = std::env::var("CFGFILE_TEST_SEED")
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

    /// Random boolean with probability p
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.gen::<f64>() < p
    }

    fn pick(&mut self, set: &[u8]) -> u8 {
        set[self.rng.gen_range(0..set.len())]
    }

    /// Section name or key
    pub fn name(&mut self) -> Vec<u8> {
        let len = 1 + self.geometric(0.7);
        (0..len).map(|_| self.pick(NAME_CHARS)).collect()
    }

    /// Value without leading or trailing blanks; may be empty
    pub fn value(&mut self) -> Vec<u8> {
        if self.chance(0.1) {
            return Vec::new();
        }
        let len = 1 + self.geometric(0.8);
        let mut out: Vec<u8> = (0..len).map(|_| self.pick(VALUE_CHARS)).collect();
        if len > 2 && self.chance(0.3) {
            let at = self.rng.gen_range(1..len - 1);
            out[at] = b' ';
        }
        out
    }

    /// Comment including its `#` and optional blank lead
    pub fn comment(&mut self, lead: bool) -> Vec<u8> {
        let mut out = Vec::new();
        if lead {
            let blanks = 1 + self.geometric(0.3);
            for _ in 0..blanks {
                out.push(if self.chance(0.8) { b' ' } else { b'\t' });
            }
        }
        out.push(b'#');
        let len = self.geometric(0.9);
        out.extend((0..len).map(|_| self.pick(COMMENT_CHARS)));
        out
    }

    /// Blank lines (usually none)
    pub fn blank_lines(&mut self) -> Vec<u8> {
        vec![b'\n'; self.geometric(0.2)]
    }

    /// A canonical document: renders back byte for byte.
    pub fn document(&mut self) -> Vec<u8> {
        let mut out = Vec::new();
        for _ in 0..self.geometric(0.3) {
            let lead = self.chance(0.2);
            out.extend(self.comment(lead));
            out.push(b'\n');
            out.extend(self.blank_lines());
        }
        let sections = self.geometric(0.7);
        for _ in 0..sections {
            out.push(b'[');
            out.extend(self.name());
            out.push(b']');
            if self.chance(0.2) {
                out.extend(self.comment(true));
            }
            out.push(b'\n');
            for _ in 0..self.geometric(0.8) {
                if self.chance(0.15) {
                    let lead = self.chance(0.3);
                    out.extend(self.comment(lead));
                } else {
                    out.extend(self.name());
                    out.push(b'=');
                    out.extend(self.value());
                    if self.chance(0.25) {
                        out.extend(self.comment(true));
                    }
                }
                out.push(b'\n');
                out.extend(self.blank_lines());
            }
        }
        out
    }

    /// Sorted cut offsets splitting `len` bytes into random pieces.
    pub fn cuts(&mut self, len: usize) -> Vec<usize> {
        if len == 0 {
            return Vec::new();
        }
        let count = self.geometric(0.8);
        let mut cuts: Vec<usize> = (0..count).map(|_| self.rng.gen_range(0..=len)).collect();
        cuts.sort_unstable();
        cuts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reproducibility() {
        let mut g1 = Gen::new(42);
        let mut g2 = Gen::new(42);

        for _ in 0..10 {
            assert_eq!(g1.document(), g2.document());
        }
    }
}
