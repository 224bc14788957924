use sha2::{Digest, Sha256};

/// Deterministic random stream for draw selection. Expands a 32-byte seed
/// into SHA-256 blocks in counter mode, so the same seed always yields the
/// same winner ordering on every node replaying the draw.
#[derive(Clone, Debug)]
pub struct DrawRng {
    seed: [u8; 32],
    counter: u64,
    buffer: [u8; 32],
    offset: usize,
}

impl DrawRng {
    pub fn from_seed(seed: [u8; 32]) -> Self {
        DrawRng {
            seed,
            counter: 0,
            buffer: [0u8; 32],
            offset: 32,
        }
    }

    fn refill(&mut self) {
        let mut hasher = Sha256::new();
        hasher.update(self.seed);
        hasher.update(self.counter.to_be_bytes());
        self.buffer = hasher.finalize().into();
        self.counter += 1;
        self.offset = 0;
    }

    pub fn next_u64(&mut self) -> u64 {
        if self.offset >= 32 {
            self.refill();
        }
        let mut word = [0u8; 8];
        word.copy_from_slice(&self.buffer[self.offset..self.offset + 8]);
        self.offset += 8;
        u64::from_be_bytes(word)
    }

    /// Uniform value in `[0, n)` via rejection sampling, so small pools get
    /// no modulo bias. Panics if `n` is zero.
    pub fn next_below(&mut self, n: u64) -> u64 {
        // Reject draws below 2^64 mod n; what remains is an exact multiple
        // of n values.
        let threshold = (u64::MAX - n + 1) % n;
        loop {
            let sample = self.next_u64();
            if sample >= threshold {
                return sample % n;
            }
        }
    }
}

/// In-place Fisher-Yates shuffle driven by the draw stream.
pub fn shuffle<T>(items: &mut [T], rng: &mut DrawRng) {
    for i in (1..items.len()).rev() {
        let j = rng.next_below(i as u64 + 1) as usize;
        items.swap(i, j);
    }
}
