//! # stepwise
//!
//! A parser-combinator engine built around an explicit **commit/backtrack**
//! discipline: once an alternative inside a choice set has consumed any
//! input, the choice commits to it and its failure becomes final unless the
//! alternative was explicitly marked [`backtrackable`][parser::backtrackable].
//! This forbids exponential re-parsing and, as a side effect, makes it cheap
//! to report precise, positioned errors: every failure carries a row, a
//! column, a caller-defined *problem* tag, and the stack of syntactic
//! contexts that were being parsed when it happened.
//!
//! ## Shape
//!
//! A [`Parser`] is a function from a [`State`] to a [`Step`]. A `Step` is
//! either `Good(progress, value, state)` or `Bad(progress, errors)`. The
//! `progress` flag — did this parser consume any input — is the single
//! signal threaded through [`choice::one_of`], [`parser::map2`],
//! [`parser::and_then`] and [`parser::backtrackable`] that drives the commit
//! rule described above.
//!
//! ## Example
//!
//! ```rust
//! use stepwise::prelude::*;
//! use stepwise::parser::and_then;
//! use stepwise::primitive::{spaces, token, variable};
//! use stepwise::error::Token as Lit;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum Problem {
//!     ExpectedLet,
//!     ExpectedName,
//! }
//!
//! fn let_binding<'s>() -> impl Parser<'s, (), Problem, String> {
//!     and_then(token(Lit::new("let", Problem::ExpectedLet)), |_| {
//!         and_then(spaces(), |_| {
//!             variable(
//!                 |c: char| c.is_alphabetic() || c == '_',
//!                 |c: char| c.is_alphanumeric() || c == '_',
//!                 &["let", "in"],
//!                 Problem::ExpectedName,
//!             )
//!         })
//!     })
//! }
//!
//! assert!(matches!(run(let_binding(), "let x"), Ok(_)));
//! ```
//!
//! This crate implements the parsing engine only: the literal/character/
//! number/identifier primitives, the combinators and their commit rules, and
//! the error accumulator. It deliberately stops short of a fixed,
//! batteries-included "problem enum" facade — callers supply their own `X`
//! (problem) and `C` (context) types and get a zero-cost, fully generic
//! engine in return.
#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![warn(clippy::all)]
#![warn(rust_2018_idioms)]
#![allow(clippy::should_implement_trait)]

#[cfg(feature = "alloc")]
#[macro_use]
extern crate alloc;

/// Facade re-exporting `std` or `core`/`alloc` so the rest of the crate can
/// stay agnostic of which one backs it. Mirrors the approach `serde` (and
/// this crate's teacher, `winnow`) use to stay `no_std`-friendly without
/// scattering `#[cfg]` everywhere.
#[cfg_attr(docsrs, doc(hidden))]
pub mod lib {
    #[cfg(not(feature = "std"))]
    #[doc(hidden)]
    pub mod std {
        #[cfg(feature = "alloc")]
        pub use alloc::{boxed, string, vec};
        pub use core::{cmp, convert, fmt, iter, mem, ops, option, result};
    }

    #[cfg(feature = "std")]
    #[doc(hidden)]
    pub mod std {
        pub use std::{boxed, cmp, convert, fmt, iter, mem, ops, option, result, string, vec};
    }
}

pub mod choice;
pub mod error;
pub mod number;
pub mod parser;
pub mod primitive;
pub mod run;
pub mod state;
pub mod step;
pub mod stream;
pub mod trace;

pub use crate::parser::Parser;
pub use crate::run::run;
pub use crate::state::{Located, State};
pub use crate::step::Step;

/// Glob-importable core concepts.
///
/// ```rust
/// use stepwise::prelude::*;
/// ```
pub mod prelude {
    pub use crate::parser::Parser as _;
    pub use crate::run::run;
    pub use crate::state::State;
    pub use crate::step::Step;
}
