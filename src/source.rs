// Copyright 2024 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

use std::io::{ErrorKind, Read};
use bytemuck::{bytes_of_mut, Pod};
use num_traits::PrimInt;
use crate::{Error, Result};

/// A source stream of data. This is implemented for every [`Read`] type, adding
/// single byte reads, reads which return the filled slice, skipping, and reads of
/// integers or other plain data.
pub trait DataSource: Read {
	/// Reads a single byte, returning `None` at the end of the stream.
	fn read_byte(&mut self) -> Result<Option<u8>> {
		let mut byte = [0];
		Ok(self.read_bytes(&mut byte)?.first().copied())
	}
	/// Reads bytes into a slice, returning the bytes read. Fewer bytes than the slice
	/// length are only returned at the end of the stream.
	fn read_bytes<'a>(&mut self, buf: &'a mut [u8]) -> Result<&'a [u8]> {
		let mut count = 0;
		while count < buf.len() {
			match self.read(&mut buf[count..]) {
				Ok(0) => break,
				Ok(cur_count) => count += cur_count,
				Err(err) if err.kind() == ErrorKind::Interrupted => { }
				Err(err) => return Err(err.into())
			}
		}
		Ok(&buf[..count])
	}
	/// Reads the exact length of bytes into a slice, returning the bytes read if
	/// successful, or an end-of-stream error if not. Bytes read before the end of
	/// the stream are consumed either way.
	fn read_exact_bytes<'a>(&mut self, buf: &'a mut [u8]) -> Result<&'a [u8]> {
		let len = buf.len();
		if self.read_bytes(buf)?.len() < len {
			return Err(Error::end(len))
		}
		Ok(buf)
	}
	/// Reads an array with a size of `N` bytes.
	fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> where Self: Sized {
		let mut array = [0; N];
		self.read_exact_bytes(&mut array)?;
		Ok(array)
	}
	/// Consumes up to `count` bytes in the stream, returning the number of bytes
	/// consumed.
	fn skip(&mut self, count: u64) -> Result<u64> {
		let mut scratch = [0; 4096];
		let mut skipped = 0;
		while skipped < count {
			let len = (count - skipped).min(scratch.len() as u64) as usize;
			let read = self.read_bytes(&mut scratch[..len])?.len();
			skipped += read as u64;
			if read < len {
				break
			}
		}
		Ok(skipped)
	}

	/// Reads a big-endian integer, such as a sample of a looped PCM stream.
	fn read_int<T: PrimInt + Pod>(&mut self) -> Result<T> where Self: Sized {
		self.read_data().map(T::from_be)
	}
	/// Reads a little-endian integer.
	fn read_int_le<T: PrimInt + Pod>(&mut self) -> Result<T> where Self: Sized {
		self.read_data().map(T::from_le)
	}
	/// Reads a value of any plain-data type `T` in native byte order, such as a
	/// whole frame of samples. See [`Pod`].
	fn read_data<T: Pod>(&mut self) -> Result<T> where Self: Sized {
		let mut value = T::zeroed();
		self.read_exact_bytes(bytes_of_mut(&mut value))?;
		Ok(value)
	}
}

impl<R: Read + ?Sized> DataSource for R { }

/// A source which can return to a previously recorded position.
///
/// Only one mark exists at a time; marking again replaces it. A successful reset
/// consumes the mark, so resetting twice requires marking in between.
pub trait MarkSource: Read {
	/// Records the current position as the reset target. Marking never fails: if
	/// the position can't be recorded, the mark is left invalid and the next
	/// [`reset`](Self::reset) fails instead.
	fn mark(&mut self);
	/// Returns to the marked position, consuming the mark.
	///
	/// # Errors
	///
	/// Returns [`Error::ResetWithoutMark`] if there is no valid mark, or an IO
	/// error if repositioning fails.
	fn reset(&mut self) -> Result;
}
