// Copyright 2024 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

use core::fmt::{Display, Formatter, Result as FmtResult};
use std::io::ErrorKind;

/// A stream error.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
	/// An IO error from the underlying source, passed through unchanged.
	Io(std::io::Error),
	/// A reset was attempted with no valid mark. Either the source was never marked,
	/// the last mark was consumed by a previous reset, or its position couldn't be
	/// recorded.
	ResetWithoutMark,
	/// The source supports neither marking nor seeking, and buffering was disallowed.
	Unmarkable,
	/// A loop window was given an end before its start.
	InvalidBounds {
		/// The window start.
		start: u64,
		/// The window end.
		end: u64,
	},
	/// A bulk read was given a range outside its buffer.
	OutOfBounds {
		/// The offset into the buffer.
		offset: usize,
		/// The requested byte count.
		len: usize,
		/// The buffer length.
		capacity: usize,
	},
	/// Premature end-of-stream.
	End {
		/// The total required byte count.
		required_count: usize
	},
}

impl Error {
	/// Creates an invalid loop bounds error.
	#[inline]
	pub const fn invalid_bounds(start: u64, end: u64) -> Self {
		Self::InvalidBounds { start, end }
	}
	/// Creates an out-of-bounds bulk read error.
	#[inline]
	pub const fn out_of_bounds(offset: usize, len: usize, capacity: usize) -> Self {
		Self::OutOfBounds { offset, len, capacity }
	}
	/// Creates an end-of-stream error.
	#[inline]
	pub const fn end(required_count: usize) -> Self {
		Self::End { required_count }
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::Io(error) => Some(error),
			Self::ResetWithoutMark |
			Self::Unmarkable |
			Self::InvalidBounds { .. } |
			Self::OutOfBounds { .. } |
			Self::End { .. } => None,
		}
	}
}

impl Display for Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
		match self {
			Self::Io(error) => Display::fmt(error, f),
			Self::ResetWithoutMark => write!(f, "cannot reset a stream which is not marked"),
			Self::Unmarkable => write!(
				f,
				"source supports neither marking nor seeking, and buffering was disallowed"
			),
			Self::InvalidBounds { start, end } => write!(f, "loop end {end} is before its start {start}"),
			Self::OutOfBounds {
				offset, len, capacity
			} => write!(f, "cannot read {len} bytes at offset {offset} into a buffer of {capacity} bytes"),
			Self::End { required_count } => write!(f, "premature end-of-stream when reading {required_count} bytes"),
		}
	}
}

impl From<std::io::Error> for Error {
	#[inline]
	fn from(value: std::io::Error) -> Self {
		Self::Io(value)
	}
}

impl From<Error> for std::io::Error {
	fn from(value: Error) -> Self {
		let kind = match value {
			Error::Io(error) => return error,
			Error::InvalidBounds { .. } |
			Error::OutOfBounds { .. } => ErrorKind::InvalidInput,
			Error::End { .. } => ErrorKind::UnexpectedEof,
			Error::ResetWithoutMark |
			Error::Unmarkable => ErrorKind::Unsupported,
		};
		Self::new(kind, value)
	}
}
