//! Parser execution tracing, gated behind the `debug` feature.

#[cfg(feature = "debug")]
mod internals;

use crate::parser::Parser;
use crate::state::State;
use crate::step::Step;

/// Wraps `parser` so that, when the `debug` feature is enabled, every call
/// prints its name, the slice it started on, and whether it succeeded,
/// failed-and-committed, or failed-without-progress, indented by call
/// depth. A no-op passthrough otherwise.
#[cfg_attr(not(feature = "debug"), allow(unused_variables))]
pub fn trace<'s, C, X, T>(
    name: impl crate::lib::std::fmt::Display,
    parser: impl Parser<'s, C, X, T>,
) -> impl Parser<'s, C, X, T> {
    #[cfg(feature = "debug")]
    {
        move |state: State<'s, C>| {
            let depth = internals::Depth::new();
            internals::start(*depth, &name, state.remaining());
            let step = parser.parse(state);
            let (severity, consumed) = match &step {
                Step::Good { progress, state: after, .. } => {
                    (internals::Severity::Success, if *progress { after.offset() } else { 0 })
                }
                Step::Bad { progress: true, .. } => (internals::Severity::Committed, 0),
                Step::Bad { progress: false, .. } => (internals::Severity::Backtrack, 0),
            };
            internals::end(*depth, &name, consumed, severity);
            step
        }
    }
    #[cfg(not(feature = "debug"))]
    {
        parser
    }
}
