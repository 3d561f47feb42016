//! The outcome of running a single parser: [`Step::Good`] or [`Step::Bad`].

use crate::error::ErrorBag;
use crate::state::State;

/// What a [`crate::parser::Parser`] returns.
///
/// Every combinator that composes two parsers in sequence propagates
/// `progress` as `a.progress || b.progress`; every combinator that composes
/// alternatives refuses to try the next one once the previous alternative
/// returned `Bad` with `progress = true`. That single boolean is this
/// crate's entire commit/backtrack discipline — see the crate-level docs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step<'s, C, X, T> {
    /// The parser succeeded.
    Good {
        /// Whether any input was consumed reaching this result.
        progress: bool,
        /// The parsed value.
        value: T,
        /// The state positioned just past what was consumed.
        state: State<'s, C>,
    },
    /// The parser failed.
    Bad {
        /// Whether any input was consumed before failing.
        progress: bool,
        /// The accumulated failure(s). Partial progress is always discarded
        /// here: a `Bad` step carries no state, only the positions and
        /// problem tags of what went wrong.
        bag: ErrorBag<C, X>,
    },
}

impl<'s, C, X, T> Step<'s, C, X, T> {
    /// Shorthand for constructing a successful step.
    pub fn good(progress: bool, value: T, state: State<'s, C>) -> Self {
        Step::Good { progress, value, state }
    }

    /// Shorthand for constructing a failed step.
    pub fn bad(progress: bool, bag: ErrorBag<C, X>) -> Self {
        Step::Bad { progress, bag }
    }

    /// Whether this step succeeded.
    pub fn is_good(&self) -> bool {
        matches!(self, Step::Good { .. })
    }

    /// Whether this step consumed any input, success or failure alike.
    pub fn progress(&self) -> bool {
        match self {
            Step::Good { progress, .. } | Step::Bad { progress, .. } => *progress,
        }
    }

    /// Transforms the success value, leaving failures untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Step<'s, C, X, U> {
        match self {
            Step::Good { progress, value, state } => Step::Good { progress, value: f(value), state },
            Step::Bad { progress, bag } => Step::Bad { progress, bag },
        }
    }

    /// Forces `progress` to `false` regardless of the outcome. This is the
    /// primitive [`crate::parser::backtrackable`] is built from: it is the
    /// only operation in this crate that launders the progress flag.
    pub fn launder_progress(self) -> Self {
        match self {
            Step::Good { value, state, .. } => Step::Good { progress: false, value, state },
            Step::Bad { bag, .. } => Step::Bad { progress: false, bag },
        }
    }
}
