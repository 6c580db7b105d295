// Copyright 2024 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

use super::{LoopBounds, LoopPolicy};

/// Loops the whole stream forever, replaying from the start each time the source
/// ends. A looping reader also keeps one as its permanent fallback, which it
/// passes through without replaying.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Infinite;

impl Infinite {
	pub const BOUNDS: LoopBounds = LoopBounds::unbounded(0);

	pub fn new() -> Self { Self }
}

impl LoopPolicy for Infinite {
	fn bounds(&self) -> LoopBounds { Self::BOUNDS }

	fn should_continue(&mut self, _: u64) -> bool { true }

	fn should_skip_to_end(&self, _: u64) -> bool { true }
}
