//! Property-based tests for the quantified invariants.

use proptest::prelude::*;

use stepwise::choice::one_of;
use stepwise::error::{ErrorBag, Token};
use stepwise::parser::{and_then, backtrackable, ignore, map2, problem, succeed};
use stepwise::primitive::{chomp_while, keyword};
use stepwise::run::run;
use stepwise::state::State;
use stepwise::step::Step;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum P {
    Bad,
}

proptest! {
    #[test]
    fn succeed_is_idempotent(v in any::<i32>(), s in ".*") {
        prop_assert_eq!(run(succeed::<'_, (), P, i32>(v), &s), Ok(v));
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    fn and_then_left_identity(v in any::<i32>(), bump in any::<i32>()) {
        let via_succeed = and_then(succeed::<'_, (), P, i32>(v), move |x| succeed::<'_, (), P, i32>(x + bump));
        let direct = succeed::<'_, (), P, i32>(v + bump);
        prop_assert_eq!(run(via_succeed, ""), run(direct, ""));
    }

    #[test]
    fn ignore_projects_left_value_and_right_end_state(a in any::<i32>(), consumed in 0usize..5) {
        let text: String = "x".repeat(consumed);
        let keep = succeed::<'_, (), P, i32>(a);
        let discard_but_advance = move |state: State<'_, ()>| {
            let next = state.advanced_to(consumed.min(state.remaining().len()));
            Step::Good { progress: consumed > 0, value: (), state: next }
        };
        let combined = ignore(keep, discard_but_advance);
        let step = combined.parse(State::new(&text));
        match step {
            Step::Good { value, state, .. } => {
                prop_assert_eq!(value, a);
                prop_assert_eq!(state.offset(), consumed.min(text.len()));
            }
            Step::Bad { .. } => prop_assert!(false, "ignore must succeed when both sides succeed"),
        }
    }

    #[test]
    fn progress_monotonicity_chomp_while(s in "[a]{0,20}[b]{0,5}") {
        let step = chomp_while::<(), P>(|c: char| c == 'a').parse(State::new(&s));
        match step {
            Step::Good { progress, state, .. } => {
                prop_assert_eq!(progress, state.offset() > 0);
            }
            Step::Bad { .. } => prop_assert!(false, "chomp_while never fails"),
        }
    }

    #[test]
    fn one_of_commits_on_first_progressing_failure(tag in 0i32..1000) {
        let _ = tag;
        let consuming_bad = |state: State<'_, ()>| {
            let next = state.advanced_to(1);
            Step::<'_, (), P, ()>::Bad { progress: true, bag: ErrorBag::one(&next, P::Bad) }
        };
        let choices = (consuming_bad, succeed::<'_, (), P, ()>(()));
        prop_assert!(run(one_of(choices), "x").is_err());
    }

    #[test]
    fn backtrackable_lets_next_alternative_run_regardless_of_consumption(consumed in 0usize..10) {
        let text: String = "x".repeat(consumed.max(1));
        let consuming_bad = move |state: State<'_, ()>| {
            let n = consumed.min(state.remaining().len());
            let next = state.advanced_to(n);
            Step::<'_, (), P, i32>::Bad { progress: true, bag: ErrorBag::one(&next, P::Bad) }
        };
        let choices = (backtrackable(consuming_bad), succeed::<'_, (), P, i32>(7));
        prop_assert_eq!(run(one_of(choices), &text), Ok(7));
    }

    #[test]
    fn keyword_boundary_holds(suffix in "[ \t]?") {
        let input = alloc_string("let", &suffix);
        let result = run(keyword::<(), P>(Token::new("let", P::Bad)), &input);
        prop_assert!(result.is_ok());
        let glued = alloc_string("let", "ter");
        prop_assert!(run(keyword::<(), P>(Token::new("let", P::Bad)), &glued).is_err());
    }

    #[test]
    fn position_bookkeeping_after_chomp_while(lines in 0usize..5, tail in "[a-z]{0,6}") {
        let mut s = String::new();
        for _ in 0..lines {
            s.push_str("line\n");
        }
        s.push_str(&tail);
        let step = chomp_while::<(), P>(|_| true).parse(State::new(&s));
        match step {
            Step::Good { state, .. } => {
                prop_assert_eq!(state.row(), 1 + lines);
                prop_assert_eq!(state.column(), 1 + tail.chars().count());
            }
            Step::Bad { .. } => prop_assert!(false),
        }
    }
}

fn alloc_string(a: &str, b: &str) -> String {
    let mut s = String::from(a);
    s.push_str(b);
    s
}

#[test]
fn problem_never_makes_progress() {
    let step = problem::<'_, (), P, ()>(P::Bad).parse(State::new("anything"));
    assert!(!step.progress());
}

#[test]
fn map2_reports_second_parsers_bag_when_second_fails() {
    let p = map2(succeed::<'_, (), P, i32>(1), problem::<'_, (), P, i32>(P::Bad), |a, b| a + b);
    assert!(run(p, "").is_err());
}
