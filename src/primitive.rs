//! Primitive parsers: the leaves every grammar is built from.
//!
//! [`succeed`] and [`problem`] are defined in [`crate::parser`], since the
//! sequencing combinators there depend on them directly, and re-exported
//! here so they sit alongside the rest of the primitives.

use crate::error::{ErrorBag, Token};
use crate::parser::Parser;
use crate::state::State;
use crate::step::Step;
use crate::stream::{self, CharProbe};

pub use crate::parser::{problem, succeed};

#[cfg(feature = "alloc")]
use crate::lib::std::string::String;

/// Succeeds with `()` only at the end of input.
pub fn end<'s, C, X>(problem: X) -> impl Parser<'s, C, X, ()>
where
    C: Clone,
    X: Clone,
{
    move |state: State<'s, C>| {
        if state.is_at_end() {
            Step::Good { progress: false, value: (), state }
        } else {
            Step::Bad { progress: false, bag: ErrorBag::one(&state, problem.clone()) }
        }
    }
}

/// Succeeds with the current byte offset, consuming no input.
pub fn get_offset<'s, C, X>() -> impl Parser<'s, C, X, usize> {
    |state: State<'s, C>| {
        let offset = state.offset();
        Step::Good { progress: false, value: offset, state }
    }
}

/// Succeeds with the current 1-based row, consuming no input.
pub fn get_row<'s, C, X>() -> impl Parser<'s, C, X, usize> {
    |state: State<'s, C>| {
        let row = state.row();
        Step::Good { progress: false, value: row, state }
    }
}

/// Succeeds with the current 1-based column, consuming no input.
pub fn get_column<'s, C, X>() -> impl Parser<'s, C, X, usize> {
    |state: State<'s, C>| {
        let column = state.column();
        Step::Good { progress: false, value: column, state }
    }
}

/// Succeeds with the current `(row, column)` pair, consuming no input.
pub fn get_position<'s, C, X>() -> impl Parser<'s, C, X, (usize, usize)> {
    |state: State<'s, C>| {
        let position = (state.row(), state.column());
        Step::Good { progress: false, value: position, state }
    }
}

/// Succeeds with the full source text, consuming no input.
pub fn get_source<'s, C, X>() -> impl Parser<'s, C, X, &'s str> {
    |state: State<'s, C>| {
        let source = state.source();
        Step::Good { progress: false, value: source, state }
    }
}

/// Succeeds with the current caller-defined indent level, consuming no
/// input.
pub fn get_indent<'s, C, X>() -> impl Parser<'s, C, X, i64> {
    |state: State<'s, C>| {
        let indent = state.indent();
        Step::Good { progress: false, value: indent, state }
    }
}

/// Matches `token.literal` exactly at the current position, consuming it.
/// Succeeds with no progress only when `token.literal` is itself consumed
/// (which, by [`Token::new`]'s precondition, never happens for an empty
/// literal — `token` always makes progress on success).
pub fn token<'s, C, X>(token: Token<'s, X>) -> impl Parser<'s, C, X, ()>
where
    C: Clone,
    X: Clone,
{
    move |state: State<'s, C>| {
        if stream::match_literal(state.remaining(), token.literal) {
            let next = state.advanced_to(state.offset() + token.literal.len());
            Step::Good { progress: true, value: (), state: next }
        } else {
            Step::Bad { progress: false, bag: ErrorBag::one(&state, token.problem.clone()) }
        }
    }
}

/// `symbol` is exactly [`token`] under a different name, matching the
/// vocabulary distinction the design notes draw between a keyword-shaped
/// literal and a punctuation-shaped one; the matching logic is identical.
pub fn symbol<'s, C, X>(symbol: Token<'s, X>) -> impl Parser<'s, C, X, ()>
where
    C: Clone,
    X: Clone,
{
    token(symbol)
}

/// Matches `keyword.literal` exactly, additionally requiring that it not be
/// immediately followed by another identifier character — so `keyword("let",
/// ..)` does not match a prefix of `letter`.
pub fn keyword<'s, C, X>(keyword: Token<'s, X>) -> impl Parser<'s, C, X, ()>
where
    C: Clone,
    X: Clone,
{
    move |state: State<'s, C>| {
        let remaining = state.remaining();
        if !stream::match_literal(remaining, keyword.literal) {
            return Step::Bad {
                progress: false,
                bag: ErrorBag::one(&state, keyword.problem.clone()),
            };
        }
        let after = &remaining[keyword.literal.len()..];
        let boundary_ok = match after.chars().next() {
            None => true,
            Some(c) => !(c.is_alphanumeric() || c == '_'),
        };
        if !boundary_ok {
            return Step::Bad {
                progress: false,
                bag: ErrorBag::one(&state, keyword.problem.clone()),
            };
        }
        let next = state.advanced_to(state.offset() + keyword.literal.len());
        Step::Good { progress: true, value: (), state: next }
    }
}

/// Consumes exactly one character if `predicate` accepts it; fails with
/// `problem` without consuming otherwise.
pub fn chomp_if<'s, C, X>(
    predicate: impl Fn(char) -> bool,
    problem: X,
) -> impl Parser<'s, C, X, ()>
where
    C: Clone,
    X: Clone,
{
    move |state: State<'s, C>| match stream::probe_char(state.remaining(), &predicate) {
        CharProbe::Found(len) => {
            let next = state.advanced_to(state.offset() + len);
            Step::Good { progress: true, value: (), state: next }
        }
        CharProbe::Mismatch | CharProbe::EndOfInput => {
            Step::Bad { progress: false, bag: ErrorBag::one(&state, problem.clone()) }
        }
    }
}

/// Consumes the longest run of characters satisfying `predicate`, possibly
/// zero; always succeeds, and makes progress exactly when it consumed at
/// least one character.
pub fn chomp_while<'s, C, X>(predicate: impl Fn(char) -> bool) -> impl Parser<'s, C, X, ()>
where
    C: Clone,
{
    move |state: State<'s, C>| {
        let len = stream::match_while(state.remaining(), &predicate);
        let next = state.advanced_to(state.offset() + len);
        Step::Good { progress: len > 0, value: (), state: next }
    }
}

/// Consumes up to, but not including, the next occurrence of `needle`.
/// Fails with `problem` if `needle` never occurs in the remaining input; the
/// reported position is the end of input, not the position this parser
/// started at, since that's as far as the scan got before giving up.
pub fn chomp_until<'s, C, X>(needle: &'s str, problem: X) -> impl Parser<'s, C, X, ()>
where
    C: Clone,
    X: Clone,
{
    move |state: State<'s, C>| match stream::find_substring(state.remaining(), needle) {
        Some(len) => {
            let next = state.advanced_to(state.offset() + len);
            Step::Good { progress: len > 0, value: (), state: next }
        }
        None => {
            let at_end = state.advanced_to(state.source().len());
            Step::Bad { progress: false, bag: ErrorBag::one(&at_end, problem.clone()) }
        }
    }
}

/// Consumes up to the next occurrence of `needle`, or to the end of input if
/// `needle` never occurs — unlike [`chomp_until`], this never fails.
pub fn chomp_until_end_or<'s, C, X>(needle: &'s str) -> impl Parser<'s, C, X, ()>
where
    C: Clone,
{
    move |state: State<'s, C>| {
        let len = stream::find_substring(state.remaining(), needle)
            .unwrap_or_else(|| state.remaining().len());
        let next = state.advanced_to(state.offset() + len);
        Step::Good { progress: len > 0, value: (), state: next }
    }
}

/// Consumes a (possibly empty) run of ASCII space, newline and
/// carriage-return characters. Tabs are not whitespace here; callers needing
/// tabs compose their own. Never fails.
pub fn spaces<'s, C, X>() -> impl Parser<'s, C, X, ()>
where
    C: Clone,
{
    chomp_while(|c: char| c == ' ' || c == '\n' || c == '\r')
}

/// Parses an identifier: one character satisfying `start`, then a run of
/// characters satisfying `inner`, then rejects the result if it's one of
/// `reserved`.
///
/// `C` must outlive the returned value only through the `'s` source
/// lifetime; the identifier value is an owned `String` under `alloc` so it
/// survives independently of the source borrow, matching the design notes'
/// choice to hand callers an owned name rather than a borrowed slice (ASTs
/// routinely outlive the parse that produced them).
#[cfg(feature = "alloc")]
pub fn variable<'s, C, X>(
    start: impl Fn(char) -> bool,
    inner: impl Fn(char) -> bool,
    reserved: &'s [&'s str],
    problem: X,
) -> impl Parser<'s, C, X, String>
where
    C: Clone,
    X: Clone,
{
    move |state: State<'s, C>| {
        let first_len = match stream::probe_char(state.remaining(), &start) {
            CharProbe::Found(len) => len,
            CharProbe::Mismatch | CharProbe::EndOfInput => {
                return Step::Bad { progress: false, bag: ErrorBag::one(&state, problem.clone()) };
            }
        };
        let rest_start = state.offset() + first_len;
        let rest_len = stream::match_while(&state.source()[rest_start..], &inner);
        let end = rest_start + rest_len;
        let name = &state.source()[state.offset()..end];
        if reserved.contains(&name) {
            return Step::Bad { progress: false, bag: ErrorBag::one(&state, problem.clone()) };
        }
        let next = state.advanced_to(end);
        Step::Good { progress: true, value: String::from(name), state: next }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::run::run;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum P {
        ExpectedEnd,
        ExpectedLet,
        ExpectedDigit,
        ExpectedClose,
        ExpectedName,
    }

    #[test]
    fn end_succeeds_only_at_end_of_input() {
        assert_eq!(run(end::<(), P>(P::ExpectedEnd), ""), Ok(()));
        assert!(run(end::<(), P>(P::ExpectedEnd), "x").is_err());
    }

    #[test]
    fn token_matches_and_advances() {
        let p = token::<(), P>(Token::new("let", P::ExpectedLet));
        assert_eq!(run(p, "let x"), Ok(()));
        let p = token::<(), P>(Token::new("let", P::ExpectedLet));
        assert!(run(p, "letter").is_ok());
    }

    #[test]
    fn keyword_rejects_identifier_prefix_match() {
        let p = keyword::<(), P>(Token::new("let", P::ExpectedLet));
        assert!(run(p, "letter").is_err());
        let p = keyword::<(), P>(Token::new("let", P::ExpectedLet));
        assert!(run(p, "let x").is_ok());
    }

    #[test]
    fn chomp_if_consumes_one_char() {
        let p = chomp_if::<(), P>(|c: char| c.is_ascii_digit(), P::ExpectedDigit);
        assert!(run(p, "5").is_ok());
        assert!(run(chomp_if::<(), P>(|c: char| c.is_ascii_digit(), P::ExpectedDigit), "x").is_err());
    }

    #[test]
    fn chomp_while_never_fails_and_tracks_progress() {
        let step = chomp_while::<(), P>(|c: char| c == 'a').parse(State::new("aaab"));
        match step {
            Step::Good { progress, state, .. } => {
                assert!(progress);
                assert_eq!(state.offset(), 3);
            }
            Step::Bad { .. } => panic!("chomp_while must not fail"),
        }
    }

    #[test]
    fn chomp_until_fails_when_absent() {
        let p = chomp_until::<(), P>("*/", P::ExpectedClose);
        assert!(run(p, "no comment end").is_err());
        let p = chomp_until::<(), P>("*/", P::ExpectedClose);
        assert_eq!(
            p.parse(State::<()>::new("abc*/def")).progress(),
            true
        );
    }

    #[test]
    fn chomp_until_end_or_consumes_to_end_when_absent() {
        let step = chomp_until_end_or::<(), P>("*/").parse(State::new("abc"));
        match step {
            Step::Good { state, .. } => assert!(state.is_at_end()),
            Step::Bad { .. } => panic!("chomp_until_end_or must not fail"),
        }
    }

    #[test]
    fn variable_rejects_reserved_words() {
        let reserved = ["let", "in"];
        let p = variable::<(), P>(
            |c: char| c.is_alphabetic() || c == '_',
            |c: char| c.is_alphanumeric() || c == '_',
            &reserved,
            P::ExpectedName,
        );
        assert!(run(p, "let").is_err());
        let p = variable::<(), P>(
            |c: char| c.is_alphabetic() || c == '_',
            |c: char| c.is_alphanumeric() || c == '_',
            &reserved,
            P::ExpectedName,
        );
        assert_eq!(run(p, "letter"), Ok(String::from("letter")));
    }

    #[test]
    fn get_position_reports_row_and_column_after_newline() {
        let p = crate::parser::and_then(chomp_until_end_or::<(), P>("z"), |_| get_position::<(), P>());
        assert_eq!(run(p, "ab\ncd"), Ok((2usize, 3usize)));
    }
}
