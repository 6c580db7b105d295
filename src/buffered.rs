// Copyright 2024 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

use std::io::{self, Read};
use tracing::{debug, trace};
use crate::{Error, MarkSource, Result};

/// The default number of bytes [`BufferedMark`] keeps after a mark, 64MiB.
pub const DEFAULT_MARK_LIMIT: usize = 64 * 1024 * 1024;

/// Adds mark and reset to a sequential source by keeping the bytes read after the
/// mark in memory, replaying them after a reset.
///
/// At most `limit` bytes are kept. Reading past the limit drops the mark, making
/// the next reset fail.
#[derive(Debug)]
pub struct BufferedMark<R> {
	source: R,
	buffer: Vec<u8>,
	/// The index of the next byte to replay. Equal to the buffer length when not
	/// replaying.
	cursor: usize,
	marked: bool,
	limit: usize,
}

impl<R> BufferedMark<R> {
	/// Wraps a source, keeping up to [`DEFAULT_MARK_LIMIT`] bytes after a mark.
	pub fn new(source: R) -> Self {
		Self::with_limit(source, DEFAULT_MARK_LIMIT)
	}

	/// Wraps a source, keeping up to `limit` bytes after a mark.
	pub fn with_limit(source: R, limit: usize) -> Self {
		Self {
			source,
			buffer: Vec::new(),
			cursor: 0,
			marked: false,
			limit,
		}
	}

	/// Returns the maximum number of bytes kept after a mark.
	pub fn limit(&self) -> usize { self.limit }

	/// Returns whether the source has a valid mark.
	pub fn is_marked(&self) -> bool { self.marked }

	/// Returns the number of bytes waiting to be replayed.
	pub fn replay_len(&self) -> usize { self.buffer.len() - self.cursor }

	/// Unwraps the source, discarding any buffered bytes.
	pub fn into_inner(self) -> R { self.source }

	fn replay(&mut self, buf: &mut [u8]) -> usize {
		let pending = &self.buffer[self.cursor..];
		let count = pending.len().min(buf.len());
		buf[..count].copy_from_slice(&pending[..count]);
		self.cursor += count;

		if !self.marked && self.cursor == self.buffer.len() {
			self.buffer.clear();
			self.cursor = 0;
		}
		count
	}

	fn capture(&mut self, bytes: &[u8]) {
		if self.buffer.len() + bytes.len() > self.limit {
			debug!(limit = self.limit, "read past the mark limit, dropping mark");
			self.marked = false;
			self.buffer.clear();
		} else {
			self.buffer.extend_from_slice(bytes);
		}
		self.cursor = self.buffer.len();
	}
}

impl<R: Read> Read for BufferedMark<R> {
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		if buf.is_empty() {
			return Ok(0)
		}

		if self.replay_len() > 0 {
			return Ok(self.replay(buf))
		}

		let count = self.source.read(buf)?;
		if self.marked {
			self.capture(&buf[..count]);
		}
		Ok(count)
	}
}

impl<R: Read> MarkSource for BufferedMark<R> {
	fn mark(&mut self) {
		// Keep bytes which haven't been replayed yet; they're after the new mark.
		self.buffer.drain(..self.cursor);
		self.cursor = 0;
		self.marked = true;
		trace!(pending = self.buffer.len(), "marked buffered source");
	}

	fn reset(&mut self) -> Result {
		if !self.marked {
			return Err(Error::ResetWithoutMark)
		}

		self.cursor = 0;
		self.marked = false;
		trace!(replay = self.buffer.len(), "reset buffered source to mark");
		Ok(())
	}
}
