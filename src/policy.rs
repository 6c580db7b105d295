// Copyright 2024 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

mod do_once;
mod infinite;
mod repeat;
mod while_condition;

use core::ops::{Range, RangeFrom};
use crate::{Error, Result};

pub use do_once::DoOnce;
pub use infinite::Infinite;
pub use repeat::RepeatN;
pub use while_condition::WhileCondition;

/// The half-open window `start..end` of stream positions a loop replays. The end
/// may be unbounded, in which case the window extends to the end of the source.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct LoopBounds {
	start: u64,
	end: Option<u64>,
}

impl LoopBounds {
	/// Creates a bounded window.
	///
	/// # Errors
	///
	/// Returns [`Error::InvalidBounds`] if `end` is before `start`.
	pub fn new(start: u64, end: u64) -> Result<Self> {
		if end < start {
			return Err(Error::invalid_bounds(start, end))
		}

		Ok(Self { start, end: Some(end) })
	}

	/// Creates a window from `start` to the end of the source.
	pub const fn unbounded(start: u64) -> Self {
		Self { start, end: None }
	}

	/// Returns the window start.
	pub const fn start(&self) -> u64 { self.start }
	/// Returns the window end, or `None` if unbounded.
	pub const fn end(&self) -> Option<u64> { self.end }
	/// Returns the window length, or `None` if unbounded.
	pub fn len(&self) -> Option<u64> {
		self.end.map(|end| end - self.start)
	}
	/// Returns `true` if the window is bounded and contains no positions.
	pub fn is_empty(&self) -> bool {
		self.len() == Some(0)
	}
	/// Returns `true` if `position` is within the window.
	pub fn contains(&self, position: u64) -> bool {
		position >= self.start && !self.is_behind(position)
	}
	/// Returns `true` if the window ends at or before `position`.
	pub fn is_behind(&self, position: u64) -> bool {
		self.end.is_some_and(|end| end <= position)
	}
}

impl TryFrom<Range<u64>> for LoopBounds {
	type Error = Error;

	fn try_from(Range { start, end }: Range<u64>) -> Result<Self> {
		Self::new(start, end)
	}
}

impl From<RangeFrom<u64>> for LoopBounds {
	fn from(RangeFrom { start }: RangeFrom<u64>) -> Self {
		Self::unbounded(start)
	}
}

/// Decides how a [`LoopingReader`](crate::LoopingReader) replays a window of its
/// stream.
///
/// Each time the reader's position enters the window start, the source is marked
/// and [`on_loop_start`] is called. While inside the window, [`should_continue`]
/// is checked before each byte; once it returns `false`, the loop exits and
/// [`should_skip_to_end`] decides whether the rest of the window is discarded or
/// delivered. Reaching the window end calls [`on_loop_end`], then [`should_replay`]
/// decides whether the source is reset to the start.
///
/// [`on_loop_start`]: Self::on_loop_start
/// [`on_loop_end`]: Self::on_loop_end
/// [`should_continue`]: Self::should_continue
/// [`should_skip_to_end`]: Self::should_skip_to_end
/// [`should_replay`]: Self::should_replay
pub trait LoopPolicy {
	/// Returns the window replayed by this loop.
	fn bounds(&self) -> LoopBounds;
	/// Called each time the reader enters the window start.
	fn on_loop_start(&mut self) { }
	/// Called each time the reader reaches the window end, including when the
	/// source ends inside the window.
	fn on_loop_end(&mut self) { }
	/// Returns whether to keep looping at `position` inside the window.
	fn should_continue(&mut self, position: u64) -> bool;
	/// Returns whether, after exiting at `position`, the remaining bytes of the
	/// window are discarded rather than delivered.
	fn should_skip_to_end(&self, position: u64) -> bool;
	/// Returns whether to replay the window after reaching its end at `position`.
	/// Defaults to [`should_continue`](Self::should_continue).
	fn should_replay(&mut self, position: u64) -> bool {
		self.should_continue(position)
	}
	/// Returns whether to replay the window when the source ends at `position`,
	/// before the window end. Defaults to [`should_continue`](Self::should_continue).
	fn continue_on_end_of_source(&mut self, position: u64) -> bool {
		self.should_continue(position)
	}
}

impl<P: LoopPolicy + ?Sized> LoopPolicy for Box<P> {
	fn bounds(&self) -> LoopBounds { (**self).bounds() }
	fn on_loop_start(&mut self) { (**self).on_loop_start(); }
	fn on_loop_end(&mut self) { (**self).on_loop_end(); }
	fn should_continue(&mut self, position: u64) -> bool {
		(**self).should_continue(position)
	}
	fn should_skip_to_end(&self, position: u64) -> bool {
		(**self).should_skip_to_end(position)
	}
	fn should_replay(&mut self, position: u64) -> bool {
		(**self).should_replay(position)
	}
	fn continue_on_end_of_source(&mut self, position: u64) -> bool {
		(**self).continue_on_end_of_source(position)
	}
}
