//! Tree configuration

use super::{Result, TreeError};

/// Largest supported input-symbol width in bits
pub const MAX_INPUT_BITS: u32 = 16;

/// Per-tree configuration fixed at construction
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
    /// Input symbol width k; each node has `2^k` outgoing branches
    pub input_bits: u32,

    /// Number of node slots to reserve up front
    pub capacity: usize,
}

impl TreeConfig {
    /// Configuration for k-bit input symbols
    pub fn new(input_bits: u32) -> Self {
        Self {
            input_bits,
            capacity: 0,
        }
    }

    /// Reserve arena space for `capacity` nodes
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Branch fan-out `2^k`
    ///
    /// Returns 0 when `2^k` does not fit in `usize`; [`TreeConfig::validate`]
    /// rejects such widths.
    #[inline]
    pub fn fan_out(&self) -> usize {
        1usize.checked_shl(self.input_bits).unwrap_or(0)
    }

    /// Number of encoder registers saved per node (k)
    #[inline]
    pub fn register_count(&self) -> usize {
        self.input_bits as usize
    }

    /// Reject widths outside `1..=MAX_INPUT_BITS`
    pub fn validate(&self) -> Result<()> {
        if self.input_bits == 0 || self.input_bits > MAX_INPUT_BITS {
            return Err(TreeError::InvalidConfiguration(format!(
                "input symbol width must be in 1..={MAX_INPUT_BITS} bits, got {}",
                self.input_bits
            )));
        }
        Ok(())
    }
}
