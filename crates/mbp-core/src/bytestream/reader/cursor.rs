/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use crate::bytestream::{ByteIoError, ByteReaderTrait, ByteSeekFrom};

/// A cursor over an in memory buffer
///
/// Seeking past the end is allowed, subsequent reads
/// simply return no bytes.
pub struct ByteCursor<T: AsRef<[u8]>> {
    stream:   T,
    position: usize
}

impl<T: AsRef<[u8]>> ByteCursor<T> {
    pub fn new(buffer: T) -> ByteCursor<T> {
        ByteCursor {
            stream:   buffer,
            position: 0
        }
    }

    fn remaining(&self) -> &[u8] {
        let data = self.stream.as_ref();
        let start = self.position.min(data.len());
        &data[start..]
    }
}

impl<T: AsRef<[u8]>> ByteReaderTrait for ByteCursor<T> {
    #[inline(always)]
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError> {
        let remaining = self.remaining();

        if remaining.len() < buf.len() {
            // not all bytes can be read, consume what is left
            let found = remaining.len();
            self.position = self.position.saturating_add(found);
            return Err(ByteIoError::NotEnoughBytes(buf.len(), found));
        }
        buf.copy_from_slice(&remaining[..buf.len()]);
        self.position += buf.len();

        Ok(())
    }

    #[inline(always)]
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ByteIoError> {
        let remaining = self.remaining();
        let count = remaining.len().min(buf.len());

        buf[..count].copy_from_slice(&remaining[..count]);
        self.position += count;

        Ok(count)
    }

    fn z_seek(&mut self, from: ByteSeekFrom) -> Result<u64, ByteIoError> {
        let (base, offset) = match from {
            ByteSeekFrom::Start(position) => {
                self.position = usize::try_from(position)?;
                return Ok(position);
            }
            ByteSeekFrom::End(offset) => (self.stream.as_ref().len(), offset),
            ByteSeekFrom::Current(offset) => (self.position, offset)
        };
        let base = i64::try_from(base)?;
        let new_position = base
            .checked_add(offset)
            .ok_or(ByteIoError::SeekError("Seek position overflowed"))?;

        if new_position < 0 {
            return Err(ByteIoError::SeekError("Cannot seek before the start of the stream"));
        }
        self.position = usize::try_from(new_position)?;

        Ok(self.position as u64)
    }

    #[inline(always)]
    fn is_eof(&mut self) -> Result<bool, ByteIoError> {
        Ok(self.position >= self.stream.as_ref().len())
    }

    fn z_position(&mut self) -> Result<u64, ByteIoError> {
        Ok(self.position as u64)
    }

    fn z_size(&mut self) -> Result<u64, ByteIoError> {
        Ok(self.stream.as_ref().len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use crate::bytestream::{ByteCursor, ByteIoError, ByteReader, ByteSeekFrom};

    #[test]
    fn big_endian_reads() {
        let mut reader = ByteReader::new(ByteCursor::new([0x12_u8, 0x34, 0x56, 0x78, 0x9a, 0xbc]));

        assert_eq!(reader.get_u16_be_err().unwrap(), 0x1234);
        assert_eq!(reader.get_u32_be_err().unwrap(), 0x5678_9abc);
        assert!(reader.eof().unwrap());
    }

    #[test]
    fn short_read_is_eof() {
        let mut reader = ByteReader::new(ByteCursor::new([0x00_u8, 0x01]));
        let err = reader.get_u32_be_err().unwrap_err();

        assert!(err.is_eof());
        assert!(matches!(err, ByteIoError::NotEnoughBytes(4, 2)));
    }

    #[test]
    fn skipping_past_end_then_reading_fails() {
        let mut reader = ByteReader::new(ByteCursor::new([0_u8; 4]));

        assert_eq!(reader.skip(10).unwrap(), 10);
        assert!(reader.eof().unwrap());
        assert!(reader.get_u8_err().unwrap_err().is_eof());
    }

    #[test]
    fn seek_to_end_reports_size_and_rewind() {
        let mut reader = ByteReader::new(ByteCursor::new(vec![1_u8; 37]));

        reader.skip(3).unwrap();
        assert_eq!(reader.stream_size().unwrap(), 37);
        assert_eq!(reader.position().unwrap(), 3);
        assert_eq!(reader.seek_to_end().unwrap(), 37);
        assert!(reader.seek(ByteSeekFrom::Current(-38)).is_err());
    }

    #[test]
    fn read_up_to_stops_at_end() {
        let mut reader = ByteReader::new(ByteCursor::new([7_u8; 5]));
        let mut sink: Vec<u8> = vec![];
        let outcome = reader.read_up_to(8, &mut sink);

        assert_eq!(outcome.bytes_read, 5);
        assert!(outcome.error.is_none());
        assert_eq!(sink, [7; 5]);
    }

    #[test]
    fn read_exact_vec_requires_every_byte() {
        let mut reader = ByteReader::new(ByteCursor::new(b"abc"));

        assert!(reader.read_exact_vec(4).unwrap_err().is_eof());

        let mut reader = ByteReader::new(ByteCursor::new(b"abc"));
        assert_eq!(reader.read_exact_vec(2).unwrap(), b"ab");
    }
}
