//! The [`Parser`] trait and the sequencing combinators built on it.

use crate::error::ErrorBag;
use crate::state::State;
use crate::step::Step;

#[cfg(feature = "alloc")]
use alloc::rc::Rc;

/// A function from a [`State<'s, C>`] to a [`Step<'s, C, X, T>`].
///
/// The input lifetime `'s` is a parameter of the trait itself, not of
/// [`Self::parse`] — a given parser value is tied to one source lifetime for
/// its whole life, the same way `winnow`'s `Parser<I, O, E>` is tied to one
/// input type `I`. This is what lets combinators like
/// [`get_chomped_string`] hand back a `&'s str` borrowed straight from the
/// source text.
///
/// Implemented for `Fn(State<'s, C>) -> Step<'s, C, X, T>` closures via the
/// blanket impl below, so most callers never name this trait directly —
/// they write a closure or compose existing combinators.
pub trait Parser<'s, C, X, T> {
    /// Runs this parser against `state`.
    fn parse(&self, state: State<'s, C>) -> Step<'s, C, X, T>;
}

impl<'s, C, X, T, F> Parser<'s, C, X, T> for F
where
    F: Fn(State<'s, C>) -> Step<'s, C, X, T>,
{
    fn parse(&self, state: State<'s, C>) -> Step<'s, C, X, T> {
        self(state)
    }
}

#[cfg(feature = "alloc")]
impl<'s, C, X, T> Parser<'s, C, X, T> for Rc<dyn Parser<'s, C, X, T> + 's> {
    fn parse(&self, state: State<'s, C>) -> Step<'s, C, X, T> {
        (**self).parse(state)
    }
}

/// Transforms the value produced by `p` with `f`, leaving `progress` and
/// failures untouched.
pub fn map<'s, C, X, T, U>(
    p: impl Parser<'s, C, X, T>,
    f: impl Fn(T) -> U,
) -> impl Parser<'s, C, X, U> {
    move |state: State<'s, C>| p.parse(state).map(&f)
}

/// Runs `keep`, then `ignored`, and returns `keep`'s value — `ignored`'s
/// value and `keep`'s end state are both discarded in favor of `ignored`'s
/// end state. A specialization of [`map2`] that projects the left value,
/// the way `winnow`'s `Parser::with_taken`/sequencing helpers specialize
/// `(A, B)` tuples down to one side.
pub fn ignore<'s, C, X, T, U>(
    keep: impl Parser<'s, C, X, T>,
    ignored: impl Parser<'s, C, X, U>,
) -> impl Parser<'s, C, X, T>
where
    C: Clone,
{
    map2(keep, ignored, |k, _| k)
}

/// Runs `pa`, then `pb`, combining both values with `combine`. `progress` is
/// `pa.progress || pb.progress`: this is the two-parser sequencing rule every
/// other sequencing combinator in this crate reduces to.
pub fn map2<'s, C, X, A, B, T>(
    pa: impl Parser<'s, C, X, A>,
    pb: impl Parser<'s, C, X, B>,
    combine: impl Fn(A, B) -> T,
) -> impl Parser<'s, C, X, T>
where
    C: Clone,
{
    move |state: State<'s, C>| match pa.parse(state) {
        Step::Good { progress: pa_progress, value: a, state } => match pb.parse(state) {
            Step::Good { progress: pb_progress, value: b, state } => Step::Good {
                progress: pa_progress || pb_progress,
                value: combine(a, b),
                state,
            },
            Step::Bad { progress: pb_progress, bag } => {
                Step::Bad { progress: pa_progress || pb_progress, bag }
            }
        },
        Step::Bad { progress, bag } => Step::Bad { progress, bag },
    }
}

/// Runs `p` first; once it succeeds, feeds its value to `f` to build the
/// next parser and runs that. `progress` is `p.progress || next.progress`.
///
/// This is `andThen(f, p)` from the design notes, reordered to `(p, f)` so
/// call sites read left to right, matching how `winnow`'s own `Parser::then`
/// family of combinators orders its arguments.
pub fn and_then<'s, C, X, T, U, P2>(
    p: impl Parser<'s, C, X, T>,
    f: impl Fn(T) -> P2,
) -> impl Parser<'s, C, X, U>
where
    C: Clone,
    P2: Parser<'s, C, X, U>,
{
    move |state: State<'s, C>| match p.parse(state) {
        Step::Good { progress: p_progress, value, state } => match f(value).parse(state) {
            Step::Good { progress: n_progress, value, state } => {
                Step::Good { progress: p_progress || n_progress, value, state }
            }
            Step::Bad { progress: n_progress, bag } => {
                Step::Bad { progress: p_progress || n_progress, bag }
            }
        },
        Step::Bad { progress, bag } => Step::Bad { progress, bag },
    }
}

/// Runs `p`, then forces `progress = false` on the result regardless of
/// outcome. Used inside [`crate::choice::one_of`] to mark an alternative as
/// always retryable even if it consumed input before failing (or succeeding)
/// — the caller is asserting the alternative is unambiguous from a single
/// token of lookahead.
pub fn backtrackable<'s, C, X, T>(p: impl Parser<'s, C, X, T>) -> impl Parser<'s, C, X, T> {
    move |state: State<'s, C>| p.parse(state).launder_progress()
}

/// Defers construction of `p` until the parser actually runs. Required to
/// build recursive grammars without infinite-sizing the parser value itself:
/// `f` is called once per invocation.
pub fn lazy<'s, C, X, T, P>(f: impl Fn() -> P) -> impl Parser<'s, C, X, T>
where
    P: Parser<'s, C, X, T>,
{
    move |state: State<'s, C>| f().parse(state)
}

/// Pushes `context` onto the state's context stack before running `p`, and
/// pops it again once `p` returns (success only — on failure the pushed
/// frame is exactly what should remain attached to any
/// [`crate::error::DeadEnd`] recorded while inside `p`, since `DeadEnd::at`
/// snapshots the stack at failure time).
#[cfg(feature = "alloc")]
pub fn in_context<'s, C, X, T>(
    context: C,
    p: impl Parser<'s, C, X, T>,
) -> impl Parser<'s, C, X, T>
where
    C: Clone,
{
    move |state: State<'s, C>| {
        let depth = state.context().len();
        let inner = state.push_context(context.clone());
        match p.parse(inner) {
            Step::Good { progress, value, state } => {
                Step::Good { progress, value, state: state.with_context_len(depth) }
            }
            bad => bad,
        }
    }
}

/// Runs `p` with the state's indent overridden to `indent`, restoring the
/// prior indent once `p` returns.
pub fn with_indent<'s, C, X, T>(
    indent: i64,
    p: impl Parser<'s, C, X, T>,
) -> impl Parser<'s, C, X, T>
where
    C: Clone,
{
    move |state: State<'s, C>| {
        let previous = state.indent();
        let inner = state.with_indent(indent);
        match p.parse(inner) {
            Step::Good { progress, value, state } => {
                Step::Good { progress, value, state: state.with_indent(previous) }
            }
            bad => bad,
        }
    }
}

/// Runs `p`, then replaces its value with the exact source slice it
/// consumed.
pub fn get_chomped_string<'s, C, X, T>(
    p: impl Parser<'s, C, X, T>,
) -> impl Parser<'s, C, X, &'s str>
where
    C: Clone,
{
    map_chomped_string(p, |s, _| s)
}

/// Runs `p`, then calls `f` with the exact source slice it consumed and its
/// value, replacing the value with `f`'s result.
pub fn map_chomped_string<'s, C, X, T, U>(
    p: impl Parser<'s, C, X, T>,
    f: impl Fn(&'s str, T) -> U,
) -> impl Parser<'s, C, X, U>
where
    C: Clone,
{
    move |state: State<'s, C>| {
        let start = state.offset();
        let source = state.source();
        match p.parse(state) {
            Step::Good { progress, value, state } => {
                let chomped = &source[start..state.offset()];
                Step::Good { progress, value: f(chomped, value), state }
            }
            Step::Bad { progress, bag } => Step::Bad { progress, bag },
        }
    }
}

/// Reports `problem` without consuming input. Useful inside [`and_then`] to
/// reject a value that parsed fine syntactically but fails a semantic check
/// (e.g. a number literal that overflows its target type).
pub fn problem<'s, C, X, T>(problem: X) -> impl Parser<'s, C, X, T>
where
    X: Clone,
    C: Clone,
{
    move |state: State<'s, C>| Step::Bad {
        progress: false,
        bag: ErrorBag::one(&state, problem.clone()),
    }
}

/// Always succeeds with `value`, consuming no input.
pub fn succeed<'s, C, X, T>(value: T) -> impl Parser<'s, C, X, T>
where
    T: Clone,
{
    move |state: State<'s, C>| Step::Good { progress: false, value: value.clone(), state }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::run::run;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum P {
        Nope,
    }

    #[test]
    fn succeed_is_idempotent_and_consumes_nothing() {
        let result: Result<i32, _> = run(succeed::<'_, (), P, i32>(7), "anything");
        assert_eq!(result, Ok(7));
    }

    #[test]
    fn map_transforms_value() {
        let p = map(succeed::<'_, (), P, i32>(2), |v| v * 10);
        assert_eq!(run(p, ""), Ok(20));
    }

    #[test]
    fn ignore_projects_left_value() {
        let p = ignore(succeed::<'_, (), P, i32>(2), succeed::<'_, (), P, &str>("discarded"));
        assert_eq!(run(p, ""), Ok(2));
    }

    #[test]
    fn and_then_threads_state_left_to_right() {
        let p = and_then(succeed::<'_, (), P, i32>(2), |a| succeed::<'_, (), P, i32>(a + 1));
        assert_eq!(run(p, ""), Ok(3));
    }

    #[test]
    fn problem_fails_without_progress() {
        let state = State::<()>::new("abc");
        let step = problem::<'_, (), P, i32>(P::Nope).parse(state);
        assert!(!step.progress());
        assert!(!step.is_good());
    }

    #[test]
    fn backtrackable_launders_progress_on_success_and_failure() {
        let consuming = |state: State<'_, ()>| {
            let next = state.advanced_to(1);
            Step::Good { progress: true, value: (), state: next }
        };
        let wrapped = backtrackable(consuming);
        let step = wrapped.parse(State::<()>::new("a"));
        assert!(!step.progress());
        assert!(step.is_good());
    }

    #[test]
    fn get_chomped_string_borrows_from_source() {
        let p = get_chomped_string(|state: State<'_, ()>| {
            let next = state.advanced_to(3);
            Step::Good { progress: true, value: (), state: next }
        });
        assert_eq!(run(p, "abcdef"), Ok("abc"));
    }
}
