// Copyright 2024 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

//! This crate provides a reader which loops over a section of a byte stream, for example to
//! repeat part of an audio file while streaming it. [`LoopingReader`] delivers bytes from a
//! source, replaying the window described by its active [`LoopPolicy`]:
//!
//! ```
//! # use data_loops::{LoopBounds, LoopingReader, RepeatN};
//! # use std::io::{Cursor, Read};
//! let reader = LoopingReader::seekable(Cursor::new((0..10).collect::<Vec<u8>>()));
//! reader.set_loop_policy(RepeatN::new(LoopBounds::new(2, 5)?, 2));
//!
//! let mut output = Vec::new();
//! (&reader).read_to_end(&mut output)?;
//! assert_eq!(output, [0, 1, 2, 3, 4, 2, 3, 4, 5, 6, 7, 8, 9]);
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! Looping needs a source which can return to a previous position. Sources with their own
//! mark/reset implement [`MarkSource`]; seekable sources are wrapped with [`SeekMark`], and
//! plain sequential sources can be wrapped with [`BufferedMark`], which keeps the bytes read
//! after a mark in memory.
//!
//! Any [`Read`](std::io::Read) implementation, the looping reader included, is also a
//! [`DataSource`], reading bytes, big or little-endian integers, and plain data.

#![deny(clippy::pedantic)]
#![allow(
	clippy::cast_sign_loss, // I know
	clippy::cast_possible_truncation, // Yes, and?
	clippy::module_name_repetitions,
	clippy::must_use_candidate,
	clippy::missing_errors_doc,
)]

mod buffered;
mod error;
mod policy;
mod reader;
mod seek_mark;
mod source;
mod wrappers;

pub use buffered::{BufferedMark, DEFAULT_MARK_LIMIT};
pub use error::Error;
pub use policy::{DoOnce, Infinite, LoopBounds, LoopPolicy, RepeatN, WhileCondition};
pub use reader::{DynSource, Input, LoopingReader, Options, ReadSeek};
pub use seek_mark::SeekMark;
pub use source::{DataSource, MarkSource};

pub type Result<T = (), E = Error> = core::result::Result<T, E>;
