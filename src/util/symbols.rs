//! Symbol vector comparison and formatting
//!
//! Vectors print as `[a, b, c]`; erased positions print as `*`.

use std::fmt;

use bitvec::slice::BitSlice;

/// Element-wise equality of two symbol vectors (lengths must match)
pub fn symbols_equal<S: PartialEq>(lhs: &[S], rhs: &[S]) -> bool {
    lhs.len() == rhs.len() && lhs.iter().zip(rhs).all(|(a, b)| a == b)
}

/// Formats a symbol slice as `[a, b, c]`
#[derive(Debug, Clone, Copy)]
pub struct DisplaySymbols<'a, S>(pub &'a [S]);

impl<S: fmt::Display> fmt::Display for DisplaySymbols<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, symbol) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{symbol}")?;
        }
        write!(f, "]")
    }
}

/// Formats a symbol slice with erased positions shown as `*`
///
/// Bit `i` of `erasures` set means position `i` is erased. Positions past
/// the end of the mask are not erased.
#[derive(Debug, Clone, Copy)]
pub struct DisplayWithErasures<'a, S> {
    /// Symbols to print
    pub symbols: &'a [S],
    /// Erasure mask, one bit per position
    pub erasures: &'a BitSlice,
}

impl<'a, S> DisplayWithErasures<'a, S> {
    /// Pair symbols with their erasure mask
    pub fn new(symbols: &'a [S], erasures: &'a BitSlice) -> Self {
        Self { symbols, erasures }
    }
}

impl<S: fmt::Display> fmt::Display for DisplayWithErasures<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, symbol) in self.symbols.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            if self.erasures.get(i).is_some_and(|bit| *bit) {
                write!(f, "*")?;
            } else {
                write!(f, "{symbol}")?;
            }
        }
        write!(f, "]")
    }
}
