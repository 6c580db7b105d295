// Copyright 2024 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

use super::{LoopBounds, LoopPolicy};

/// Plays its window once, then falls through to the rest of the stream. The
/// window is never replayed, even if the source ends inside it.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DoOnce {
	bounds: LoopBounds,
}

impl DoOnce {
	pub fn new(bounds: impl Into<LoopBounds>) -> Self {
		Self { bounds: bounds.into() }
	}
}

impl LoopPolicy for DoOnce {
	fn bounds(&self) -> LoopBounds { self.bounds }

	fn should_continue(&mut self, _: u64) -> bool { true }

	fn should_skip_to_end(&self, _: u64) -> bool { true }

	fn should_replay(&mut self, _: u64) -> bool { false }

	fn continue_on_end_of_source(&mut self, _: u64) -> bool { false }
}
