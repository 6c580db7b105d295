// Copyright 2024 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

use core::fmt::{Debug, Formatter, Result as FmtResult};
use super::{LoopBounds, LoopPolicy};

/// Loops its window while a predicate over the stream position holds. The
/// predicate is checked before each byte inside the window and again at the
/// window end, so it may also count passes or watch outside state.
pub struct WhileCondition<F> {
	bounds: LoopBounds,
	predicate: F,
	skip_to_end: bool,
}

impl<F: FnMut(u64) -> bool> WhileCondition<F> {
	/// Creates a loop over `bounds` while `predicate` holds, skipping the rest of
	/// the window once it doesn't.
	pub fn new(bounds: impl Into<LoopBounds>, predicate: F) -> Self {
		Self::with_skip(bounds, predicate, true)
	}

	/// Creates a loop over `bounds` while `predicate` holds. If `skip_to_end` is
	/// `false`, the rest of the window is delivered once it doesn't.
	pub fn with_skip(bounds: impl Into<LoopBounds>, predicate: F, skip_to_end: bool) -> Self {
		Self { bounds: bounds.into(), predicate, skip_to_end }
	}

	pub fn skip_to_end(&self) -> bool { self.skip_to_end }
}

impl<F: FnMut(u64) -> bool> LoopPolicy for WhileCondition<F> {
	fn bounds(&self) -> LoopBounds { self.bounds }

	fn should_continue(&mut self, position: u64) -> bool {
		(self.predicate)(position)
	}

	fn should_skip_to_end(&self, _: u64) -> bool { self.skip_to_end }
}

impl<F> Debug for WhileCondition<F> {
	fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
		f.debug_struct("WhileCondition")
			.field("bounds", &self.bounds)
			.field("skip_to_end", &self.skip_to_end)
			.finish_non_exhaustive()
	}
}
