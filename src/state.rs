//! Position-tracking input state threaded through every parser.

use crate::lib::std::fmt;

#[cfg(feature = "alloc")]
use crate::lib::std::vec::Vec;

/// A caller-defined syntactic frame, tagged with the row/column at which it
/// was pushed.
///
/// Produced by [`crate::parser::in_context`] and carried on every
/// [`crate::error::DeadEnd`] so a renderer can say "while parsing a `let`
/// binding, at line 4" rather than just "at line 4".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Located<C> {
    /// 1-based row at which the context was entered.
    pub row: usize,
    /// 1-based column at which the context was entered.
    pub column: usize,
    /// The caller-defined context value itself.
    pub context: C,
}

impl<C> Located<C> {
    /// Creates a new context frame.
    pub fn new(row: usize, column: usize, context: C) -> Self {
        Located { row, column, context }
    }
}

/// An immutable snapshot of parsing progress.
///
/// `State` is cheap to clone: the source text is borrowed, and every other
/// field is `Copy` except the context stack, which is only populated while
/// inside [`crate::parser::in_context`].
///
/// # Invariants
///
/// - `0 <= offset <= source.len()`
/// - `row >= 1`, `column >= 1`
/// - `(row, column)` is consistent with the line breaks in `source[..offset]`
#[derive(Clone, PartialEq, Eq)]
pub struct State<'s, C = ()> {
    source: &'s str,
    offset: usize,
    row: usize,
    column: usize,
    indent: i64,
    #[cfg(feature = "alloc")]
    context: Vec<Located<C>>,
    #[cfg(not(feature = "alloc"))]
    context: core::marker::PhantomData<C>,
}

impl<'s, C> State<'s, C> {
    /// Seeds a fresh state at the start of `source`: offset 0, row 1, column
    /// 1, indent 1, no context frames. This is what [`crate::run::run`] calls
    /// before invoking the root parser.
    pub fn new(source: &'s str) -> Self {
        State {
            source,
            offset: 0,
            row: 1,
            column: 1,
            indent: 1,
            #[cfg(feature = "alloc")]
            context: Vec::new(),
            #[cfg(not(feature = "alloc"))]
            context: core::marker::PhantomData,
        }
    }

    /// The full source text this state was created from.
    pub fn source(&self) -> &'s str {
        self.source
    }

    /// The byte offset into [`Self::source`] this state is positioned at.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The 1-based row (line number) this state is positioned at.
    pub fn row(&self) -> usize {
        self.row
    }

    /// The 1-based column this state is positioned at.
    pub fn column(&self) -> usize {
        self.column
    }

    /// The caller-defined indentation level currently in effect, default 1.
    pub fn indent(&self) -> i64 {
        self.indent
    }

    /// The slice of `source` not yet consumed.
    pub fn remaining(&self) -> &'s str {
        &self.source[self.offset..]
    }

    /// Whether the state is positioned at the end of the source.
    pub fn is_at_end(&self) -> bool {
        self.offset == self.source.len()
    }

    /// The context stack, outermost frame first.
    #[cfg(feature = "alloc")]
    pub fn context(&self) -> &[Located<C>] {
        &self.context
    }

    /// Returns a new state advanced to `new_offset`, recomputing row/column
    /// by counting the newlines in the consumed span. `new_offset` must be
    /// `>= self.offset()` and `<= self.source().len()`.
    pub(crate) fn advanced_to(&self, new_offset: usize) -> Self
    where
        C: Clone,
    {
        debug_assert!(new_offset >= self.offset && new_offset <= self.source.len());
        let consumed = &self.source[self.offset..new_offset];
        let (row, column) = advance_row_column(self.row, self.column, consumed);
        State {
            source: self.source,
            offset: new_offset,
            row,
            column,
            indent: self.indent,
            #[cfg(feature = "alloc")]
            context: self.context.clone(),
            #[cfg(not(feature = "alloc"))]
            context: core::marker::PhantomData,
        }
    }

    /// Returns a new state with `indent` overridden; used by
    /// [`crate::parser::with_indent`].
    pub(crate) fn with_indent(&self, indent: i64) -> Self
    where
        C: Clone,
    {
        let mut next = self.clone();
        next.indent = indent;
        next
    }

    /// Returns a new state with a context frame pushed; used by
    /// [`crate::parser::in_context`].
    #[cfg(feature = "alloc")]
    pub(crate) fn push_context(&self, context: C) -> Self
    where
        C: Clone,
    {
        let mut next = self.clone();
        next.context.push(Located::new(self.row, self.column, context));
        next
    }

    /// Returns a copy of `self` with the context stack truncated back to
    /// `len` frames; used to restore the prior context after
    /// [`crate::parser::in_context`] succeeds.
    #[cfg(feature = "alloc")]
    pub(crate) fn with_context_len(&self, len: usize) -> Self
    where
        C: Clone,
    {
        let mut next = self.clone();
        next.context.truncate(len);
        next
    }
}

/// Counts newlines in `consumed` to update `(row, column)`. A newline resets
/// the column to 1 and advances the row; any other code point advances the
/// column by one code point (not necessarily one byte).
pub(crate) fn advance_row_column(row: usize, column: usize, consumed: &str) -> (usize, usize) {
    let mut row = row;
    let mut column = column;
    for c in consumed.chars() {
        if c == '\n' {
            row += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    (row, column)
}

impl<'s, C: fmt::Debug> fmt::Debug for State<'s, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("offset", &self.offset)
            .field("row", &self.row)
            .field("column", &self.column)
            .field("indent", &self.indent)
            .finish()
    }
}
