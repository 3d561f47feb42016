//! Number literal recognition: [`NumberConfig`] and [`number`].
//!
//! Grounded in `winnow`'s `ascii::dec_uint`/`Uint` sealed-trait dispatch and
//! `ascii::float`/`recognize_float` tuple composition (`src/ascii/mod.rs`),
//! adapted to the caller-pluggable-problem-type shape the rest of this
//! crate uses instead of a single fixed numeric error type.

use crate::lib::std::fmt;
use crate::parser::Parser;
use crate::state::State;
use crate::step::Step;
use crate::stream;

/// Whether a given numeric base or the float format is accepted, and if so,
/// how to build `T` from the digits; otherwise the specific problem to
/// report if that format is encountered.
#[derive(Clone, Copy)]
pub enum Base<F, X> {
    /// This format is accepted; apply the constructor to the parsed value.
    Allow(F),
    /// This format is rejected outright with this problem, even though it
    /// is syntactically well-formed (e.g. a grammar that has no use for
    /// hex literals).
    Forbid(X),
}

/// Configuration for [`number`]: which numeric formats are accepted and how
/// to turn their digits into `T`.
pub struct NumberConfig<T, X> {
    /// Decimal integer, e.g. `42`.
    pub int: Base<fn(u64) -> T, X>,
    /// `0x`-prefixed hexadecimal integer.
    pub hex: Base<fn(u64) -> T, X>,
    /// `0o`-prefixed octal integer.
    pub octal: Base<fn(u64) -> T, X>,
    /// `0b`-prefixed binary integer.
    pub binary: Base<fn(u64) -> T, X>,
    /// Decimal float with an optional fractional part and/or exponent, e.g.
    /// `3.14`, `1e10`, `2.5e-3`.
    pub float: Base<fn(f64) -> T, X>,
    /// Reported when the digits of a recognized format overflow their
    /// target width, or a float format has no digits at all.
    pub invalid: X,
    /// Reported when nothing resembling a number starts at the current
    /// position.
    pub expecting: X,
}

/// Recognizes a number literal per `config`, dispatching on a leading `0x`/
/// `0o`/`0b` prefix, otherwise parsing decimal digits and, if followed by a
/// `.` or an exponent, a float.
///
/// Always committing: any prefix matched by digits makes `progress = true`,
/// so a malformed number (e.g. `0x` with no hex digits after it) reports
/// `invalid` rather than silently backtracking into some other alternative.
pub fn number<'s, C, X, T>(config: NumberConfig<T, X>) -> impl Parser<'s, C, X, T>
where
    C: Clone,
    X: Clone,
{
    move |state: State<'s, C>| {
        let remaining = state.remaining();
        let mut chars = remaining.chars();
        match chars.next() {
            Some('0') => match chars.next() {
                Some('x') | Some('X') => {
                    parse_prefixed(&state, 2, 16, &config.hex, &config.invalid)
                }
                Some('o') | Some('O') => {
                    parse_prefixed(&state, 2, 8, &config.octal, &config.invalid)
                }
                Some('b') | Some('B') => {
                    parse_prefixed(&state, 2, 2, &config.binary, &config.invalid)
                }
                // A bare leading zero finalizes its integer part as exactly
                // that one digit and falls through to the float path —
                // "0123" is the number 0 followed by unconsumed "123", not
                // the decimal integer 123.
                _ => parse_decimal_or_float(&state, &config, 1),
            },
            Some(c) if c.is_ascii_digit() => {
                let int_len = stream::match_while(remaining, |c: char| c.is_ascii_digit());
                parse_decimal_or_float(&state, &config, int_len)
            }
            _ => Step::Bad {
                progress: false,
                bag: crate::error::ErrorBag::one(&state, config.expecting.clone()),
            },
        }
    }
}

fn parse_prefixed<'s, C, X, T>(
    state: &State<'s, C>,
    prefix_len: usize,
    radix: u32,
    base: &Base<fn(u64) -> T, X>,
    invalid: &X,
) -> Step<'s, C, X, T>
where
    C: Clone,
    X: Clone,
{
    let ctor = match base {
        Base::Forbid(problem) => {
            return Step::Bad {
                progress: true,
                bag: crate::error::ErrorBag::one(state, problem.clone()),
            };
        }
        Base::Allow(ctor) => *ctor,
    };
    let digits_start = &state.remaining()[prefix_len..];
    let digit_len = stream::match_while(digits_start, |c: char| c.is_digit(radix));
    if digit_len == 0 {
        return Step::Bad {
            progress: true,
            bag: crate::error::ErrorBag::one(state, invalid.clone()),
        };
    }
    let digits = &digits_start[..digit_len];
    match u64::from_str_radix(digits, radix) {
        Ok(value) => {
            let next = state.advanced_to(state.offset() + prefix_len + digit_len);
            Step::Good { progress: true, value: ctor(value), state: next }
        }
        Err(_) => Step::Bad {
            progress: true,
            bag: crate::error::ErrorBag::one(state, invalid.clone()),
        },
    }
}

fn parse_decimal_or_float<'s, C, X, T>(
    state: &State<'s, C>,
    config: &NumberConfig<T, X>,
    int_len: usize,
) -> Step<'s, C, X, T>
where
    C: Clone,
    X: Clone,
{
    let remaining = state.remaining();
    let after_int = &remaining[int_len..];
    let (frac_len, has_frac) = match after_int.strip_prefix('.') {
        Some(rest) => {
            let digits = stream::match_while(rest, |c: char| c.is_ascii_digit());
            (1 + digits, true)
        }
        None => (0, false),
    };

    let after_frac = &after_int[frac_len..];
    let mut saw_exp_marker = false;
    let exp_len = match after_frac.chars().next() {
        Some('e') | Some('E') => {
            saw_exp_marker = true;
            let after_e = &after_frac[1..];
            let (sign_len, rest) = match after_e.chars().next() {
                Some('+') | Some('-') => (1, &after_e[1..]),
                _ => (0, after_e),
            };
            let digits = stream::match_while(rest, |c: char| c.is_ascii_digit());
            if digits == 0 {
                0
            } else {
                1 + sign_len + digits
            }
        }
        _ => 0,
    };

    // The marker was present but no digits followed it ("1e", "1e+"): this is
    // not "no exponent", it's a malformed one.
    if saw_exp_marker && exp_len == 0 {
        return Step::Bad {
            progress: true,
            bag: crate::error::ErrorBag::one(state, config.invalid.clone()),
        };
    }

    let is_float = has_frac || exp_len > 0;
    let total_len = int_len + frac_len + exp_len;
    let text = &remaining[..total_len];

    if is_float {
        let ctor = match &config.float {
            Base::Forbid(problem) => {
                return Step::Bad {
                    progress: true,
                    bag: crate::error::ErrorBag::one(state, problem.clone()),
                };
            }
            Base::Allow(ctor) => *ctor,
        };
        match text.parse::<f64>() {
            Ok(value) => {
                let next = state.advanced_to(state.offset() + total_len);
                Step::Good { progress: true, value: ctor(value), state: next }
            }
            Err(_) => Step::Bad {
                progress: true,
                bag: crate::error::ErrorBag::one(state, config.invalid.clone()),
            },
        }
    } else {
        let ctor = match &config.int {
            Base::Forbid(problem) => {
                return Step::Bad {
                    progress: true,
                    bag: crate::error::ErrorBag::one(state, problem.clone()),
                };
            }
            Base::Allow(ctor) => *ctor,
        };
        match text.parse::<u64>() {
            Ok(value) => {
                let next = state.advanced_to(state.offset() + total_len);
                Step::Good { progress: true, value: ctor(value), state: next }
            }
            Err(_) => Step::Bad {
                progress: true,
                bag: crate::error::ErrorBag::one(state, config.invalid.clone()),
            },
        }
    }
}

impl<F, X: fmt::Debug> fmt::Debug for Base<F, X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Base::Allow(_) => f.write_str("Base::Allow(..)"),
            Base::Forbid(x) => write!(f, "Base::Forbid({x:?})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::run::run;

    #[derive(Debug, Clone, PartialEq)]
    enum P {
        Invalid,
        Expecting,
        NoHex,
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Num {
        Int(u64),
        Float(f64),
    }

    fn config() -> NumberConfig<Num, P> {
        NumberConfig {
            int: Base::Allow(Num::Int),
            hex: Base::Allow(Num::Int),
            octal: Base::Allow(Num::Int),
            binary: Base::Allow(Num::Int),
            float: Base::Allow(Num::Float),
            invalid: P::Invalid,
            expecting: P::Expecting,
        }
    }

    #[test]
    fn parses_decimal_int() {
        assert_eq!(run(number::<(), P, Num>(config()), "42"), Ok(Num::Int(42)));
    }

    #[test]
    fn parses_hex() {
        assert_eq!(run(number::<(), P, Num>(config()), "0xFF"), Ok(Num::Int(255)));
    }

    #[test]
    fn parses_octal() {
        assert_eq!(run(number::<(), P, Num>(config()), "0o17"), Ok(Num::Int(15)));
    }

    #[test]
    fn parses_binary() {
        assert_eq!(run(number::<(), P, Num>(config()), "0b101"), Ok(Num::Int(5)));
    }

    #[test]
    fn parses_float_with_fraction_and_exponent() {
        assert_eq!(run(number::<(), P, Num>(config()), "2.5e-3"), Ok(Num::Float(2.5e-3)));
    }

    #[test]
    fn bare_leading_zero_is_decimal_zero() {
        assert_eq!(run(number::<(), P, Num>(config()), "0"), Ok(Num::Int(0)));
    }

    #[test]
    fn empty_hex_digits_is_invalid_not_expecting() {
        let errs = run(number::<(), P, Num>(config()), "0x").unwrap_err();
        assert_eq!(errs[0].problem, P::Invalid);
    }

    #[test]
    fn forbidden_base_reports_its_own_problem() {
        let mut cfg = config();
        cfg.hex = Base::Forbid(P::NoHex);
        let errs = run(number::<(), P, Num>(cfg), "0xFF").unwrap_err();
        assert_eq!(errs[0].problem, P::NoHex);
    }

    #[test]
    fn non_digit_reports_expecting_without_progress() {
        let step = number::<(), P, Num>(config()).parse(State::new("abc"));
        assert!(!step.progress());
    }

    #[test]
    fn dangling_exponent_marker_is_invalid() {
        let errs = run(number::<(), P, Num>(config()), "1e").unwrap_err();
        assert_eq!(errs[0].problem, P::Invalid);
        let errs = run(number::<(), P, Num>(config()), "1e+").unwrap_err();
        assert_eq!(errs[0].problem, P::Invalid);
    }
}
