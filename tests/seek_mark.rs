// Copyright 2024 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

use std::io::{self, Cursor, ErrorKind, Read, Seek, SeekFrom};
use data_loops::{DataSource, Error, LoopBounds, LoopingReader, MarkSource, RepeatN, SeekMark};

fn adapter() -> SeekMark<Cursor<Vec<u8>>> {
	SeekMark::new(Cursor::new((0..10).collect()))
}

#[test]
fn reset_returns_to_mark() -> data_loops::Result {
	let adapter = adapter();
	let mut source = &adapter;
	assert_eq!(source.read_array::<2>()?, [0, 1]);
	adapter.mark();
	assert_eq!(adapter.marked_offset(), Some(2));
	assert_eq!(source.read_array::<3>()?, [2, 3, 4]);
	adapter.reset()?;
	assert_eq!(adapter.position()?, 2);
	assert_eq!(source.read_byte()?, Some(2));
	Ok(())
}

#[test]
fn last_mark_wins() -> data_loops::Result {
	let mut adapter = adapter();
	adapter.read_byte()?;
	MarkSource::mark(&mut adapter);
	adapter.read_array::<2>()?;
	MarkSource::mark(&mut adapter);
	adapter.read_array::<4>()?;
	MarkSource::reset(&mut adapter)?;
	assert_eq!(adapter.read_byte()?, Some(3));
	Ok(())
}

#[test]
fn reset_without_mark() -> data_loops::Result {
	let adapter = adapter();
	assert!(matches!(adapter.reset(), Err(Error::ResetWithoutMark)));

	adapter.mark();
	adapter.reset()?;
	assert!(matches!(adapter.reset(), Err(Error::ResetWithoutMark)));
	assert_eq!(adapter.marked_offset(), None);

	adapter.seek(4)?;
	adapter.mark();
	adapter.reset()?;
	assert_eq!(adapter.position()?, 4);
	Ok(())
}

#[test]
fn seek_keeps_mark() -> data_loops::Result {
	let adapter = adapter();
	adapter.seek(1)?;
	adapter.mark();
	assert_eq!(adapter.seek(7)?, 7);
	assert_eq!((&adapter).read_byte()?, Some(7));
	assert_eq!(adapter.marked_offset(), Some(1));
	adapter.reset()?;
	assert_eq!((&adapter).read_byte()?, Some(1));
	Ok(())
}

#[test]
fn seek_delegates() -> io::Result<()> {
	let mut adapter = adapter();
	assert_eq!(Seek::seek(&mut adapter, SeekFrom::End(-2))?, 8);
	let mut rest = Vec::new();
	adapter.read_to_end(&mut rest)?;
	assert_eq!(rest, [8, 9]);
	assert_eq!(adapter.into_inner().position(), 10);
	Ok(())
}

/// A source which can't report its position.
struct Unpositioned(Cursor<Vec<u8>>);

impl Read for Unpositioned {
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		self.0.read(buf)
	}
}

impl Seek for Unpositioned {
	fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
		match pos {
			SeekFrom::Current(0) => Err(io::Error::new(ErrorKind::Unsupported, "position unknown")),
			pos => self.0.seek(pos)
		}
	}
}

#[test]
fn mark_failure_is_deferred() -> data_loops::Result {
	let adapter = SeekMark::new(Unpositioned(Cursor::new(vec![1, 2, 3])));
	adapter.mark();
	assert_eq!(adapter.marked_offset(), None);
	assert!(matches!(adapter.reset(), Err(Error::ResetWithoutMark)));
	assert_eq!((&adapter).read_byte()?, Some(1));
	Ok(())
}

#[test]
fn looping_over_unpositioned_source_fails_on_replay() -> data_loops::Result {
	let reader = LoopingReader::seekable(Unpositioned(Cursor::new((0..10).collect())));
	reader.set_loop_policy(RepeatN::new(LoopBounds::new(0, 3)?, 2));
	assert_eq!(reader.read_byte()?, Some(0));
	assert_eq!(reader.read_byte()?, Some(1));
	assert_eq!(reader.read_byte()?, Some(2));
	assert!(matches!(reader.read_byte(), Err(Error::ResetWithoutMark)));
	assert_eq!(reader.read_byte()?, Some(3));
	Ok(())
}
