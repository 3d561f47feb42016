//! The top-level driver: seed a [`State`] from raw source text, run a
//! parser, and turn its outcome into a plain [`Result`].

use crate::parser::Parser;
use crate::state::State;
use crate::step::Step;

#[cfg(feature = "alloc")]
use crate::error::DeadEnd;
#[cfg(feature = "alloc")]
use crate::lib::std::vec::Vec;

/// Runs `parser` against `source` from the start, returning its value on
/// success or the flattened list of [`DeadEnd`]s recorded along the failing
/// path on failure, in the order they were produced.
///
/// Equivalent to `winnow`'s `Parser::parse`, except the error type is always
/// the crate's own accumulator rather than a caller-chosen `ParserError`.
#[cfg(feature = "alloc")]
pub fn run<'s, C, X, T>(
    parser: impl Parser<'s, C, X, T>,
    source: &'s str,
) -> Result<T, Vec<DeadEnd<C, X>>>
where
    C: Clone,
    X: Clone,
{
    match parser.parse(State::new(source)) {
        Step::Good { value, .. } => Ok(value),
        Step::Bad { bag, .. } => Err(bag.flatten()),
    }
}

/// `alloc`-free variant: returns only the single, most recent [`DeadEnd`] on
/// failure, since without `alloc` the error accumulator can hold at most one.
#[cfg(not(feature = "alloc"))]
pub fn run<'s, C, X, T>(
    parser: impl Parser<'s, C, X, T>,
    source: &'s str,
) -> Result<T, crate::error::DeadEnd<C, X>>
where
    C: Clone,
    X: Clone,
{
    match parser.parse(State::new(source)) {
        Step::Good { value, .. } => Ok(value),
        Step::Bad { bag, .. } => Err(bag.flatten_one().cloned().expect("Bad step without a DeadEnd")),
    }
}
