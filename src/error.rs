//! Error accumulation: the `DeadEnd` record, the literal `Token`, and the
//! persistent bag that threads failures through combinators at O(1) append
//! cost.
//!
//! Mirrors the role `winnow::error` plays for its teacher: a small set of
//! types every combinator touches, kept deliberately low-overhead since most
//! bags built along a parse are discarded by `oneOf`/`andThen` without ever
//! being flattened.

use crate::lib::std::fmt;
use crate::state::{Located, State};

#[cfg(feature = "alloc")]
use crate::lib::std::vec::Vec;
#[cfg(feature = "alloc")]
use alloc::boxed::Box;

/// A literal string paired with the problem to report if it does not match.
///
/// Used by [`crate::primitive::token`], [`crate::primitive::keyword`], and
/// [`crate::primitive::symbol`] (an alias of `token`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a, X> {
    /// The literal text to match.
    pub literal: &'a str,
    /// The problem to report on mismatch.
    pub problem: X,
}

impl<'a, X> Token<'a, X> {
    /// Creates a new token. Panics if `literal` is empty: an empty literal
    /// cannot usefully report "whether it consumed input", which is the
    /// caller-misuse case `spec.md` §7 calls out as a programming error
    /// rather than a `DeadEnd`.
    pub fn new(literal: &'a str, problem: X) -> Self {
        assert!(!literal.is_empty(), "Token literal must not be empty");
        Token { literal, problem }
    }
}

/// One failure record: where it happened, what went wrong, and which
/// syntactic contexts were active at the time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadEnd<C, X> {
    /// 1-based row at which the failure occurred.
    pub row: usize,
    /// 1-based column at which the failure occurred.
    pub column: usize,
    /// The caller-defined problem tag.
    pub problem: X,
    /// The context stack active when the failure occurred, outermost first.
    #[cfg(feature = "alloc")]
    pub context: Vec<Located<C>>,
    #[cfg(not(feature = "alloc"))]
    pub context: core::marker::PhantomData<C>,
}

impl<C, X> DeadEnd<C, X> {
    /// Builds a `DeadEnd` from the current position of `state` and a
    /// problem tag, capturing `state`'s context stack.
    pub fn at(state: &State<'_, C>, problem: X) -> Self
    where
        C: Clone,
    {
        DeadEnd {
            row: state.row(),
            column: state.column(),
            problem,
            #[cfg(feature = "alloc")]
            context: state.context().to_vec(),
            #[cfg(not(feature = "alloc"))]
            context: core::marker::PhantomData,
        }
    }
}

impl<C, X: fmt::Display> fmt::Display for DeadEnd<C, X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.row, self.column, self.problem)
    }
}

#[cfg(feature = "std")]
impl<C: fmt::Debug, X: fmt::Debug + fmt::Display> std::error::Error for DeadEnd<C, X> {}

/// A persistent binary tree of [`DeadEnd`]s supporting O(1) append and O(n)
/// flatten, in recording order.
///
/// `oneOf` accumulates one bag per failed, non-committing alternative by
/// appending rather than concatenating eagerly, so trying N alternatives
/// costs O(N) total regardless of how large each alternative's own bag is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorBag<C, X> {
    /// No failures recorded.
    Empty,
    /// A single failure appended to the right of `bag`.
    #[cfg(feature = "alloc")]
    AddRight(Box<ErrorBag<C, X>>, DeadEnd<C, X>),
    /// Two bags concatenated; used when merging the result of independent
    /// branches (e.g. two `oneOf` accumulators).
    #[cfg(feature = "alloc")]
    Append(Box<ErrorBag<C, X>>, Box<ErrorBag<C, X>>),
    /// `alloc` is unavailable: a bag can hold at most one `DeadEnd`.
    #[cfg(not(feature = "alloc"))]
    One(DeadEnd<C, X>),
}

impl<C, X> ErrorBag<C, X> {
    /// A bag with a single `DeadEnd`, built from `state`'s position and
    /// context plus a problem tag. This is what every primitive parser calls
    /// on failure.
    pub fn one(state: &State<'_, C>, problem: X) -> Self
    where
        C: Clone,
    {
        let dead_end = DeadEnd::at(state, problem);
        #[cfg(feature = "alloc")]
        {
            ErrorBag::AddRight(Box::new(ErrorBag::Empty), dead_end)
        }
        #[cfg(not(feature = "alloc"))]
        {
            ErrorBag::One(dead_end)
        }
    }

    /// Appends a `DeadEnd` to the right of this bag in O(1).
    #[cfg(feature = "alloc")]
    pub fn add_right(self, dead_end: DeadEnd<C, X>) -> Self {
        ErrorBag::AddRight(Box::new(self), dead_end)
    }

    /// Concatenates two bags in O(1); `oneOf` uses this to merge the running
    /// accumulator with a freshly-failed alternative's own bag.
    #[cfg(feature = "alloc")]
    pub fn append(self, other: Self) -> Self {
        match (&self, &other) {
            (ErrorBag::Empty, _) => other,
            (_, ErrorBag::Empty) => self,
            _ => ErrorBag::Append(Box::new(self), Box::new(other)),
        }
    }

    #[cfg(not(feature = "alloc"))]
    pub(crate) fn append(self, other: Self) -> Self {
        // Without `alloc` there is nowhere to stash more than one DeadEnd;
        // keep whichever one is present, preferring the left.
        match self {
            ErrorBag::One(_) => self,
            #[allow(unreachable_patterns)]
            _ => other,
        }
    }

    /// Flattens the tree into the list of `DeadEnd`s in the order they were
    /// recorded: an in-order traversal, left to right.
    #[cfg(feature = "alloc")]
    pub fn flatten(&self) -> Vec<DeadEnd<C, X>>
    where
        C: Clone,
        X: Clone,
    {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    #[cfg(feature = "alloc")]
    fn flatten_into(&self, out: &mut Vec<DeadEnd<C, X>>)
    where
        C: Clone,
        X: Clone,
    {
        match self {
            ErrorBag::Empty => {}
            ErrorBag::AddRight(left, dead_end) => {
                left.flatten_into(out);
                out.push(dead_end.clone());
            }
            ErrorBag::Append(left, right) => {
                left.flatten_into(out);
                right.flatten_into(out);
            }
        }
    }

    #[cfg(not(feature = "alloc"))]
    pub(crate) fn flatten_one(&self) -> Option<&DeadEnd<C, X>> {
        match self {
            ErrorBag::One(dead_end) => Some(dead_end),
        }
    }
}
