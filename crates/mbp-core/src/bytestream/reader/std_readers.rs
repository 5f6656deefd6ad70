/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::io;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};

use crate::bytestream::reader::{ByteIoError, ByteSeekFrom};
use crate::bytestream::ByteReaderTrait;

impl<T> ByteReaderTrait for std::io::Cursor<T>
where
    T: AsRef<[u8]>
{
    #[inline(always)]
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError> {
        self.read_exact(buf).map_err(ByteIoError::from)
    }

    #[inline(always)]
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ByteIoError> {
        self.read(buf).map_err(ByteIoError::from)
    }

    #[inline(always)]
    fn z_seek(&mut self, from: ByteSeekFrom) -> Result<u64, ByteIoError> {
        self.seek(from.to_std_seek()).map_err(ByteIoError::from)
    }

    #[inline(always)]
    fn is_eof(&mut self) -> Result<bool, ByteIoError> {
        Ok(self.position() >= self.get_ref().as_ref().len() as u64)
    }

    fn z_position(&mut self) -> Result<u64, ByteIoError> {
        Ok(self.position())
    }

    fn z_size(&mut self) -> Result<u64, ByteIoError> {
        Ok(self.get_ref().as_ref().len() as u64)
    }
}

impl<T: io::Read + io::Seek> ByteReaderTrait for BufReader<T> {
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError> {
        self.read_exact(buf).map_err(ByteIoError::from)
    }

    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ByteIoError> {
        self.read(buf).map_err(ByteIoError::from)
    }

    fn z_seek(&mut self, from: ByteSeekFrom) -> Result<u64, ByteIoError> {
        self.seek(from.to_std_seek()).map_err(ByteIoError::from)
    }

    fn is_eof(&mut self) -> Result<bool, ByteIoError> {
        self.fill_buf()
            .map(|b| b.is_empty())
            .map_err(ByteIoError::from)
    }

    fn z_position(&mut self) -> Result<u64, ByteIoError> {
        self.stream_position().map_err(ByteIoError::from)
    }

    fn z_size(&mut self) -> Result<u64, ByteIoError> {
        let old_pos = self.stream_position()?;
        let len = self.seek(SeekFrom::End(0))?;

        // Avoid seeking a third time when we were already at the end of the
        // stream. The branch is usually way cheaper than a seek operation.
        if old_pos != len {
            self.seek(SeekFrom::Start(old_pos))?;
        }

        Ok(len)
    }
}
