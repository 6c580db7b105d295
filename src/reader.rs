// Copyright 2024 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

use std::fs::File;
use std::io::{self, Read, Seek};
use parking_lot::Mutex;
use tracing::{debug, trace, warn};
use crate::{BufferedMark, DataSource, Error, Infinite, LoopBounds, LoopPolicy, MarkSource, Result, SeekMark, DEFAULT_MARK_LIMIT};

/// A readable and seekable source.
pub trait ReadSeek: Read + Seek { }

impl<T: Read + Seek + ?Sized> ReadSeek for T { }

/// A boxed source with mark and reset, as built by [`LoopingReader::open`].
pub type DynSource<'a> = Box<dyn MarkSource + Send + 'a>;

/// A source to loop over, by the way it can return to a previous position.
pub enum Input<'a> {
	/// A source with its own mark and reset.
	Markable(DynSource<'a>),
	/// A source which can seek to absolute offsets, wrapped with [`SeekMark`].
	Seekable(Box<dyn ReadSeek + Send + 'a>),
	/// A source which can only be read sequentially, wrapped with [`BufferedMark`]
	/// if buffering is allowed.
	Sequential(Box<dyn Read + Send + 'a>),
}

impl<'a> Input<'a> {
	pub fn markable(source: impl MarkSource + Send + 'a) -> Self {
		Self::Markable(Box::new(source))
	}

	pub fn seekable(source: impl Read + Seek + Send + 'a) -> Self {
		Self::Seekable(Box::new(source))
	}

	pub fn sequential(source: impl Read + Send + 'a) -> Self {
		Self::Sequential(Box::new(source))
	}
}

impl From<File> for Input<'_> {
	fn from(value: File) -> Self {
		Self::seekable(value)
	}
}

/// Options for [`LoopingReader::open_with`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Options {
	/// Whether a sequential source may be wrapped with [`BufferedMark`]. If not,
	/// opening a sequential source fails. Defaults to `true`.
	pub allow_buffering: bool,
	/// The byte limit of the [`BufferedMark`] wrapper. Loop windows longer than this
	/// can't be replayed from a sequential source. Defaults to [`DEFAULT_MARK_LIMIT`].
	pub mark_limit: usize,
}

impl Default for Options {
	fn default() -> Self {
		Self {
			allow_buffering: true,
			mark_limit: DEFAULT_MARK_LIMIT,
		}
	}
}

impl Options {
	#[must_use]
	pub fn allow_buffering(mut self, allow_buffering: bool) -> Self {
		self.allow_buffering = allow_buffering;
		self
	}

	#[must_use]
	pub fn mark_limit(mut self, mark_limit: usize) -> Self {
		self.mark_limit = mark_limit;
		self
	}
}

type BoxedPolicy = Box<dyn LoopPolicy + Send>;

/// A reader which replays a window of its source according to a [`LoopPolicy`].
///
/// Without a policy set, or once a policy's loop has finished, bytes are passed
/// through from the source unchanged. [`position`](Self::position) is the offset
/// of the next byte in the source, rewinding each time the window is replayed.
///
/// Reads lock the reader for their duration, so a shared reference implements
/// [`Read`]. The policy may be swapped between reads; the next read only depends
/// on the position and the new policy.
pub struct LoopingReader<S> {
	state: Mutex<State<S>>,
}

struct State<S> {
	source: S,
	main_loop: Infinite,
	current: Option<BoxedPolicy>,
	position: u64,
	/// The position of the last mark, if it hasn't been consumed by a reset.
	loop_start: Option<u64>,
	/// An error hit by a bulk read after it had already filled some bytes.
	pending: Option<Error>,
}

impl<S: MarkSource> LoopingReader<S> {
	/// Creates a reader over a source with mark and reset.
	pub fn new(source: S) -> Self {
		Self {
			state: Mutex::new(State {
				source,
				main_loop: Infinite,
				current: None,
				position: 0,
				loop_start: None,
				pending: None,
			}),
		}
	}
}

impl<R: Read + Seek> LoopingReader<SeekMark<R>> {
	/// Creates a reader over a seekable source, marking it by offset.
	pub fn seekable(source: R) -> Self {
		Self::new(SeekMark::new(source))
	}
}

impl<R: Read> LoopingReader<BufferedMark<R>> {
	/// Creates a reader over a sequential source, buffering up to
	/// [`DEFAULT_MARK_LIMIT`] bytes of each loop window.
	pub fn buffered(source: R) -> Self {
		Self::new(BufferedMark::new(source))
	}

	/// Creates a reader over a sequential source, buffering up to `limit` bytes of
	/// each loop window.
	pub fn buffered_with_limit(source: R, limit: usize) -> Self {
		Self::new(BufferedMark::with_limit(source, limit))
	}
}

impl<'a> LoopingReader<DynSource<'a>> {
	/// Creates a reader over any source, working around a missing mark and reset
	/// by seeking or, if `allow_buffering` is `true`, by buffering.
	///
	/// # Errors
	///
	/// Returns [`Error::Unmarkable`] if the source is sequential and buffering is
	/// disallowed.
	pub fn open(input: Input<'a>, allow_buffering: bool) -> Result<Self> {
		Self::open_with(input, Options::default().allow_buffering(allow_buffering))
	}

	/// Creates a reader over any source with the given [`Options`].
	///
	/// # Errors
	///
	/// Returns [`Error::Unmarkable`] if the source is sequential and buffering is
	/// disallowed.
	pub fn open_with(input: Input<'a>, options: Options) -> Result<Self> {
		let source: DynSource<'a> = match input {
			Input::Markable(source) => source,
			Input::Seekable(source) => Box::new(SeekMark::new(source)),
			Input::Sequential(source) if options.allow_buffering => {
				debug!(limit = options.mark_limit, "source can't be marked, buffering instead");
				Box::new(BufferedMark::with_limit(source, options.mark_limit))
			}
			Input::Sequential(_) => return Err(Error::Unmarkable)
		};
		Ok(Self::new(source))
	}
}

impl<S> LoopingReader<S> {
	/// Returns the position of the next byte in the source.
	pub fn position(&self) -> u64 {
		self.state.lock().position
	}

	/// Replaces the active loop. The new loop takes effect from the current
	/// position.
	pub fn set_loop_policy(&self, policy: impl LoopPolicy + Send + 'static) {
		let mut state = self.state.lock();
		state.current = Some(Box::new(policy));
		state.loop_start = None;
	}

	/// Removes the active loop, returning it. The reader passes the rest of the
	/// source through.
	pub fn take_loop_policy(&self) -> Option<Box<dyn LoopPolicy + Send>> {
		let mut state = self.state.lock();
		state.loop_start = None;
		state.current.take()
	}

	/// Removes the active loop, passing the rest of the source through.
	pub fn pass_through(&self) {
		self.take_loop_policy();
	}

	/// Returns `true` if no loop is active.
	pub fn is_pass_through(&self) -> bool {
		self.state.lock().current.is_none()
	}

	/// Returns the bounds of the active loop, or of the fallback loop covering the
	/// whole stream if none is active.
	pub fn loop_bounds(&self) -> LoopBounds {
		self.with_loop_policy(|policy| policy.bounds())
	}

	/// Calls `f` with the active loop, or the fallback loop if none is active.
	pub fn with_loop_policy<T>(&self, f: impl FnOnce(&mut dyn LoopPolicy) -> T) -> T {
		let mut state = self.state.lock();
		let State { main_loop, current, .. } = &mut *state;
		match current {
			Some(policy) => f(&mut **policy),
			None => f(main_loop)
		}
	}

	/// Unwraps the source. Its position is [`position`](Self::position).
	pub fn into_inner(self) -> S {
		self.state.into_inner().source
	}
}

impl<S: MarkSource> LoopingReader<S> {
	/// Reads the next byte, returning `None` at the end of the stream.
	pub fn read_byte(&self) -> Result<Option<u8>> {
		self.state.lock().next_byte()
	}

	/// Reads up to `len` bytes into `buf` starting at `offset`, returning the number
	/// of bytes read. Zero is returned only at the end of the stream, or if `len` is
	/// zero.
	///
	/// # Errors
	///
	/// Returns [`Error::OutOfBounds`] without reading if `offset..offset + len` is
	/// outside `buf`. If reading fails after some bytes were read, those bytes are
	/// returned and the error is returned by the next read.
	pub fn read_into(&self, buf: &mut [u8], offset: usize, len: usize) -> Result<usize> {
		let capacity = buf.len();
		let Some(buf) = offset.checked_add(len).and_then(|end| buf.get_mut(offset..end)) else {
			return Err(Error::out_of_bounds(offset, len, capacity))
		};

		if buf.is_empty() {
			return Ok(0)
		}

		let mut state = self.state.lock();
		let mut count = 0;
		for slot in buf {
			match state.next_byte() {
				Ok(Some(byte)) => *slot = byte,
				Ok(None) => break,
				Err(error) if count == 0 => return Err(error),
				Err(error) => {
					warn!(%error, count, "read failed, returning bytes read so far");
					state.pending = Some(error);
					break
				}
			}
			count += 1;
		}
		Ok(count)
	}
}

impl<S: MarkSource> State<S> {
	/// Reads the next byte through the active loop. An error deferred by an earlier
	/// read is returned first.
	///
	/// The loop is entered, and its start hook called, once the byte at its start
	/// is read; a read failing there leaves the loop unentered. A failed replay at
	/// the end of the window still delivers the window's last byte, deferring the
	/// error to the next read and passing the rest of the source through.
	fn next_byte(&mut self) -> Result<Option<u8>> {
		if let Some(error) = self.pending.take() {
			return Err(error)
		}

		loop {
			let Some(policy) = self.current.as_deref_mut() else {
				return self.read_through()
			};

			let bounds = policy.bounds();
			let position = self.position;
			if bounds.is_behind(position) {
				self.demote();
				continue
			}

			if position < bounds.start() {
				return self.read_through()
			}

			if !policy.should_continue(position) {
				if policy.should_skip_to_end(position) {
					let Some(end) = bounds.end() else {
						return Ok(None)
					};

					let skipped = self.source.skip(end - position)?;
					debug!(from = position, to = end, skipped, "skipped rest of loop window");
					self.position += skipped;
				}

				self.demote();
				continue
			}

			let entering = position == bounds.start();
			if entering {
				self.source.mark();
			}

			let Some(byte) = self.source.read_byte()? else {
				match self.loop_start {
					Some(start) if start < position => { }
					_ => return Ok(None)
				}

				policy.on_loop_end();
				if policy.continue_on_end_of_source(position) {
					if let Err(error) = self.rewind() {
						self.demote();
						return Err(error)
					}
					continue
				}

				self.demote();
				return Ok(None)
			};

			if entering {
				policy.on_loop_start();
				self.loop_start = Some(position);
				trace!(position, "entered loop window");
			}

			self.position += 1;
			if bounds.end() == Some(self.position) {
				policy.on_loop_end();
				if !policy.should_replay(self.position) || self.loop_start.is_none() {
					self.demote();
				} else if let Err(error) = self.rewind() {
					warn!(%error, position = self.position, "loop replay failed, passing through");
					self.pending = Some(error);
					self.demote();
				}
			}
			return Ok(Some(byte))
		}
	}

	fn read_through(&mut self) -> Result<Option<u8>> {
		let byte = self.source.read_byte()?;
		if byte.is_some() {
			self.position += 1;
		}
		Ok(byte)
	}

	fn rewind(&mut self) -> Result {
		let Some(start) = self.loop_start else {
			return Err(Error::ResetWithoutMark)
		};

		self.source.reset()?;
		self.loop_start = None;
		trace!(from = self.position, to = start, "replaying loop window");
		self.position = start;
		Ok(())
	}

	/// Falls back to passing bytes through.
	fn demote(&mut self) {
		if self.current.take().is_some() {
			debug!(position = self.position, "loop finished, passing through");
		}
		self.loop_start = None;
	}
}

impl<S: MarkSource> Read for LoopingReader<S> {
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		(&*self).read(buf)
	}
}

impl<S: MarkSource> Read for &LoopingReader<S> {
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		let len = buf.len();
		Ok(self.read_into(buf, 0, len)?)
	}
}
