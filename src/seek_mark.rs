// Copyright 2024 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

use std::io::{self, Read, Seek, SeekFrom};
use parking_lot::Mutex;
use tracing::{trace, warn};
use crate::{Error, MarkSource, Result};

/// Adds mark and reset to a seekable source, such as a [`File`](std::fs::File), by
/// recording the absolute offset at the mark and seeking back to it on reset.
///
/// Reads, seeks, marks, and resets are serialized by an internal lock, so they can
/// be called through a shared reference.
#[derive(Debug)]
pub struct SeekMark<R> {
	state: Mutex<State<R>>,
}

#[derive(Debug)]
struct State<R> {
	source: R,
	mark: Option<u64>,
}

impl<R> SeekMark<R> {
	/// Wraps a seekable source.
	pub fn new(source: R) -> Self {
		Self {
			state: Mutex::new(State { source, mark: None }),
		}
	}

	/// Returns the marked offset, or `None` if there is no valid mark.
	pub fn marked_offset(&self) -> Option<u64> {
		self.state.lock().mark
	}

	/// Unwraps the source.
	pub fn into_inner(self) -> R {
		self.state.into_inner().source
	}
}

impl<R: Seek> SeekMark<R> {
	/// Moves the source to an absolute `offset`, returning the new offset. The mark
	/// is left as is.
	pub fn seek(&self, offset: u64) -> Result<u64> {
		Ok(self.state.lock().source.seek(SeekFrom::Start(offset))?)
	}

	/// Returns the current offset of the source.
	pub fn position(&self) -> Result<u64> {
		Ok(self.state.lock().source.stream_position()?)
	}

	/// Records the current offset as the reset target. If the offset can't be
	/// queried, the mark is invalidated and the next reset fails.
	pub fn mark(&self) {
		self.state.lock().mark();
	}

	/// Seeks back to the marked offset, consuming the mark.
	///
	/// # Errors
	///
	/// Returns [`Error::ResetWithoutMark`] if there is no valid mark. If seeking
	/// fails, the IO error is returned and the mark is kept.
	pub fn reset(&self) -> Result {
		self.state.lock().reset()
	}
}

impl<R: Seek> State<R> {
	fn mark(&mut self) {
		self.mark = match self.source.stream_position() {
			Ok(offset) => {
				trace!(offset, "marked source");
				Some(offset)
			}
			Err(error) => {
				warn!(%error, "could not query source position, mark is invalid");
				None
			}
		};
	}

	fn reset(&mut self) -> Result {
		let offset = self.mark.ok_or(Error::ResetWithoutMark)?;
		self.source.seek(SeekFrom::Start(offset))?;
		self.mark = None;
		trace!(offset, "reset source to mark");
		Ok(())
	}
}

impl<R: Read + Seek> MarkSource for SeekMark<R> {
	fn mark(&mut self) {
		self.state.get_mut().mark();
	}

	fn reset(&mut self) -> Result {
		self.state.get_mut().reset()
	}
}

impl<R: Read> Read for SeekMark<R> {
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		self.state.get_mut().source.read(buf)
	}
}

impl<R: Read> Read for &SeekMark<R> {
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		self.state.lock().source.read(buf)
	}
}

impl<R: Seek> Seek for SeekMark<R> {
	fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
		self.state.get_mut().source.seek(pos)
	}
}

impl<R: Seek> Seek for &SeekMark<R> {
	fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
		self.state.lock().source.seek(pos)
	}
}
