// Copyright 2024 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

use super::{LoopBounds, LoopPolicy};

/// Plays its window `count` times in total, then falls through. The first pass
/// counts as the first iteration.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct RepeatN {
	bounds: LoopBounds,
	count: u32,
	skip_to_end: bool,
	iterations: u32,
	stopped: bool,
}

impl RepeatN {
	/// Creates a loop playing `bounds` `count` times, skipping the rest of the
	/// window if the loop is exited early.
	pub fn new(bounds: impl Into<LoopBounds>, count: u32) -> Self {
		Self::with_skip(bounds, count, true)
	}

	/// Creates a loop playing `bounds` `count` times. If `skip_to_end` is `false`,
	/// the rest of the window is delivered when exiting early.
	pub fn with_skip(bounds: impl Into<LoopBounds>, count: u32, skip_to_end: bool) -> Self {
		Self {
			bounds: bounds.into(),
			count,
			skip_to_end,
			iterations: 0,
			stopped: false,
		}
	}

	/// Returns the total number of passes.
	pub fn count(&self) -> u32 { self.count }
	/// Returns the number of passes started so far.
	pub fn iterations(&self) -> u32 { self.iterations }
	/// Returns `true` once the last pass has ended.
	pub fn is_stopped(&self) -> bool { self.stopped }
	pub fn skip_to_end(&self) -> bool { self.skip_to_end }
}

impl LoopPolicy for RepeatN {
	fn bounds(&self) -> LoopBounds { self.bounds }

	fn on_loop_start(&mut self) {
		self.iterations = self.iterations.saturating_add(1);
	}

	fn on_loop_end(&mut self) {
		if self.iterations >= self.count {
			self.stopped = true;
		}
	}

	fn should_continue(&mut self, _: u64) -> bool { !self.stopped }

	fn should_skip_to_end(&self, _: u64) -> bool { self.skip_to_end }
}
