//! Trying several parsers in order: [`one_of`] and the [`Choice`] trait it's
//! built on.
//!
//! Static-dispatch tuple impls, grounded in `winnow`'s `Alt`/`alt_trait!`
//! pattern (`src/branch/mod.rs`), but generated per fixed arity here rather
//! than through `winnow`'s `succ!` numeric-recursion macro — simpler to
//! read and safer to get right without a compiler to check it against.

use crate::error::ErrorBag;
use crate::parser::Parser;
use crate::state::State;
use crate::step::Step;

/// A fixed set of alternatives tried in order by [`one_of`].
///
/// Implemented for tuples of 2 to 8 parsers sharing the same `(C, X, T)`; for
/// a dynamic, runtime-sized set of alternatives use a `Vec` of boxed
/// parsers, also covered by a blanket impl below.
pub trait Choice<'s, C, X, T> {
    /// Tries each alternative in order. Stops and returns the first `Good`.
    /// Stops and returns the first `Bad` with `progress = true` (that
    /// alternative has committed). Otherwise accumulates every
    /// non-committing `Bad`'s bag and, once every alternative has been
    /// tried, fails with the merged bag.
    fn choose(&self, state: State<'s, C>) -> Step<'s, C, X, T>;
}

/// Tries each of `choices`' alternatives in order against `state`.
///
/// This is the `oneOf` of the design notes: the commit rule is exactly
/// [`Choice::choose`]'s — the first alternative that makes progress, good or
/// bad, wins outright.
pub fn one_of<'s, C, X, T, Ch>(choices: Ch) -> impl Parser<'s, C, X, T>
where
    Ch: Choice<'s, C, X, T>,
{
    move |state: State<'s, C>| choices.choose(state)
}

macro_rules! try_alternative {
    ($state:ident, $bag:ident, $parser:expr) => {
        match $parser.parse($state.clone()) {
            good @ Step::Good { .. } => return good,
            Step::Bad { progress: true, bag } => return Step::Bad { progress: true, bag },
            Step::Bad { progress: false, bag } => {
                $bag = $bag.append(bag);
            }
        }
    };
}

macro_rules! choice_tuple_impl {
    ($($idx:tt $name:ident),+) => {
        impl<'s, C, X, T, $($name),+> Choice<'s, C, X, T> for ($($name,)+)
        where
            C: Clone,
            $($name: Parser<'s, C, X, T>),+
        {
            fn choose(&self, state: State<'s, C>) -> Step<'s, C, X, T> {
                let mut bag: ErrorBag<C, X> = ErrorBag::Empty;
                $(
                    try_alternative!(state, bag, self.$idx);
                )+
                Step::Bad { progress: false, bag }
            }
        }
    };
}

choice_tuple_impl!(0 A, 1 B);
choice_tuple_impl!(0 A, 1 B, 2 C3);
choice_tuple_impl!(0 A, 1 B, 2 C3, 3 D);
choice_tuple_impl!(0 A, 1 B, 2 C3, 3 D, 4 E);
choice_tuple_impl!(0 A, 1 B, 2 C3, 3 D, 4 E, 5 F);
choice_tuple_impl!(0 A, 1 B, 2 C3, 3 D, 4 E, 5 F, 6 G);
choice_tuple_impl!(0 A, 1 B, 2 C3, 3 D, 4 E, 5 F, 6 G, 7 H);

/// A runtime-sized set of alternatives, for when the choice set isn't known
/// at compile time (e.g. user-defined operator tables).
#[cfg(feature = "alloc")]
impl<'s, C, X, T, P> Choice<'s, C, X, T> for alloc::vec::Vec<P>
where
    C: Clone,
    P: Parser<'s, C, X, T>,
{
    fn choose(&self, state: State<'s, C>) -> Step<'s, C, X, T> {
        let mut bag: ErrorBag<C, X> = ErrorBag::Empty;
        for parser in self {
            try_alternative!(state, bag, parser);
        }
        Step::Bad { progress: false, bag }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{backtrackable, problem, succeed};
    use crate::run::run;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum P {
        A,
        B,
        C,
    }

    #[test]
    fn first_good_alternative_wins() {
        let choices = (problem::<'_, (), P, i32>(P::A), succeed::<'_, (), P, i32>(2));
        assert_eq!(run(one_of(choices), ""), Ok(2));
    }

    #[test]
    fn committed_failure_is_not_retried() {
        let consuming_failure = |state: State<'_, ()>| {
            let next = state.advanced_to(1);
            let _ = next;
            Step::<'_, (), P, i32>::Bad { progress: true, bag: ErrorBag::one(&state, P::A) }
        };
        let choices = (consuming_failure, succeed::<'_, (), P, i32>(9));
        let errs = run(one_of(choices), "x").unwrap_err();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].problem, P::A);
    }

    #[test]
    fn noncommitting_failures_accumulate_in_order() {
        let choices = (
            problem::<'_, (), P, i32>(P::A),
            problem::<'_, (), P, i32>(P::B),
            problem::<'_, (), P, i32>(P::C),
        );
        let errs = run(one_of(choices), "").unwrap_err();
        let tags: Vec<_> = errs.into_iter().map(|d| d.problem).collect();
        assert_eq!(tags, vec![P::A, P::B, P::C]);
    }

    #[test]
    fn backtrackable_alternative_is_retried_after_consuming() {
        let consuming_failure = |state: State<'_, ()>| {
            let next = state.advanced_to(1);
            let _ = next;
            Step::<'_, (), P, i32>::Bad { progress: true, bag: ErrorBag::one(&state, P::A) }
        };
        let choices = (backtrackable(consuming_failure), succeed::<'_, (), P, i32>(9));
        assert_eq!(run(one_of(choices), "x"), Ok(9));
    }
}
