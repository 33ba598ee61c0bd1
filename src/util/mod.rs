//! Numeric and display helpers shared with the soft-decision decoders
//!
//! Stateless free functions: factorials and binomial coefficients (with a
//! Lucas-theorem parity test) plus symbol-vector comparison and printing.

mod combinatorics;
mod symbols;

pub use combinatorics::{binomial_coeff, binomial_coeff_parity, checked_binomial_coeff, factorial};
pub use symbols::{symbols_equal, DisplaySymbols, DisplayWithErasures};
