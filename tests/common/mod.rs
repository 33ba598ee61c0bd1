//! Shared helpers: tracing setup and a toy convolutional encoder.
#![allow(dead_code)]

use tracing_subscriber::EnvFilter;

/// Install a test subscriber once; `RUST_LOG=convtree=trace` shows tree mutations.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Rate 1/2, constraint length 3 encoder with generators (7, 5) octal.
///
/// State holds the two previous input bits, most recent in bit 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToyEncoder {
    pub state: u32,
}

impl ToyEncoder {
    /// Output pair and next state for input `bit` from `state`.
    pub fn step(state: u32, bit: u32) -> ([u8; 2], u32) {
        let reg = (bit << 2) | state;
        let out0 = (reg & 0b111).count_ones() % 2;
        let out1 = (reg & 0b101).count_ones() % 2;
        ([out0 as u8, out1 as u8], reg >> 1)
    }

    /// Encode `bits`, returning one output pair per input bit.
    pub fn encode(&mut self, bits: &[u32]) -> Vec<[u8; 2]> {
        bits.iter()
            .map(|&bit| {
                let (out, next) = Self::step(self.state, bit);
                self.state = next;
                out
            })
            .collect()
    }
}

/// Hamming distance between a candidate output pair and the received pair.
pub fn hamming(candidate: [u8; 2], received: [u8; 2]) -> i32 {
    candidate
        .iter()
        .zip(received.iter())
        .filter(|(a, b)| a != b)
        .count() as i32
}
