/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fmt::{Debug, Display, Formatter};

pub(crate) mod cursor;
pub(crate) mod std_readers;
use crate::bytestream::ByteReaderTrait;

/// Size of the scratch buffer used when reading lengths taken from the stream
const CHUNK_SIZE: usize = 1 << 16;

/// Enumeration of possible methods to seek within an I/O object.
///
/// It is analogous to the [SeekFrom](std::io::SeekFrom) in the std library
#[derive(Copy, PartialEq, Eq, Clone, Debug)]
pub enum ByteSeekFrom {
    /// Sets the offset to the provided number of bytes.
    Start(u64),

    /// Sets the offset to the size of this object plus the specified number of
    /// bytes.
    End(i64),

    /// Sets the offset to the current position plus the specified number of
    /// bytes.
    ///
    /// It is possible to seek beyond the end of an object, but it's an error to
    /// seek before byte 0.
    Current(i64)
}

impl ByteSeekFrom {
    /// Convert to [SeekFrom](std::io::SeekFrom) from the `std::io` library
    pub(crate) fn to_std_seek(self) -> std::io::SeekFrom {
        match self {
            ByteSeekFrom::Start(pos) => std::io::SeekFrom::Start(pos),
            ByteSeekFrom::End(pos) => std::io::SeekFrom::End(pos),
            ByteSeekFrom::Current(pos) => std::io::SeekFrom::Current(pos)
        }
    }
}

pub enum ByteIoError {
    StdIoError(std::io::Error),
    TryFromIntError(std::num::TryFromIntError),
    // requested, read
    NotEnoughBytes(usize, usize),
    Generic(&'static str),
    SeekError(&'static str)
}

impl ByteIoError {
    /// Returns true if this error was caused by the stream
    /// ending before a read could be satisfied
    pub fn is_eof(&self) -> bool {
        match self {
            ByteIoError::NotEnoughBytes(_, _) => true,
            ByteIoError::StdIoError(err) => err.kind() == std::io::ErrorKind::UnexpectedEof,
            _ => false
        }
    }
}

impl Debug for ByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ByteIoError::StdIoError(err) => {
                writeln!(f, "Underlying I/O error {}", err)
            }
            ByteIoError::TryFromIntError(err) => {
                writeln!(f, "Cannot convert to int {}", err)
            }
            ByteIoError::NotEnoughBytes(expected, found) => {
                writeln!(f, "Not enough bytes, expected {expected} but found {found}")
            }
            ByteIoError::Generic(err) => {
                writeln!(f, "Generic I/O error: {err}")
            }
            ByteIoError::SeekError(err) => {
                writeln!(f, "Seek error: {err}")
            }
        }
    }
}

impl Display for ByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for ByteIoError {}

impl From<std::io::Error> for ByteIoError {
    fn from(value: std::io::Error) -> Self {
        ByteIoError::StdIoError(value)
    }
}

impl From<std::num::TryFromIntError> for ByteIoError {
    fn from(value: std::num::TryFromIntError) -> Self {
        ByteIoError::TryFromIntError(value)
    }
}

impl From<&'static str> for ByteIoError {
    fn from(value: &'static str) -> Self {
        ByteIoError::Generic(value)
    }
}

/// Result of a read that is allowed to come up short
///
/// See [`ByteReader::read_up_to`]
pub struct PartialRead {
    /// Number of bytes appended to the sink
    pub bytes_read: usize,
    /// The error that stopped the read early, if any.
    ///
    /// Reaching the end of the stream is not an error, it shows
    /// up as `bytes_read` being less than requested
    pub error:      Option<ByteIoError>
}

/// An endian aware reader wrapping anything
/// that implements [`ByteReaderTrait`]
pub struct ByteReader<T: ByteReaderTrait> {
    inner: T
}

impl<T: ByteReaderTrait> ByteReader<T> {
    pub fn new(source: T) -> ByteReader<T> {
        ByteReader { inner: source }
    }
    #[inline(always)]
    pub fn skip(&mut self, num: usize) -> Result<u64, ByteIoError> {
        let num = i64::try_from(num)?;
        self.inner.z_seek(ByteSeekFrom::Current(num))
    }

    #[inline(always)]
    pub fn seek(&mut self, from: ByteSeekFrom) -> Result<u64, ByteIoError> {
        self.inner.z_seek(from)
    }

    #[inline(always)]
    pub fn get_u8_err(&mut self) -> Result<u8, ByteIoError> {
        let mut buf = [0];
        self.inner.read_const_bytes(&mut buf)?;
        Ok(buf[0])
    }

    /// Read exactly `num` bytes into a new vector
    ///
    /// The vector grows as data arrives so a corrupt length
    /// does not translate into a huge up front allocation.
    pub fn read_exact_vec(&mut self, num: usize) -> Result<Vec<u8>, ByteIoError> {
        let mut sink = Vec::new();
        let outcome = self.read_up_to(num, &mut sink);

        if let Some(err) = outcome.error {
            return Err(err);
        }
        if outcome.bytes_read != num {
            return Err(ByteIoError::NotEnoughBytes(num, outcome.bytes_read));
        }
        Ok(sink)
    }

    /// Append at most `num` bytes to `sink`, stopping early at the
    /// end of the stream or on the first I/O error.
    ///
    /// Bytes read before a failure are kept in `sink`.
    pub fn read_up_to(&mut self, num: usize, sink: &mut Vec<u8>) -> PartialRead {
        let mut scratch = vec![0; num.min(CHUNK_SIZE)];
        let mut bytes_read = 0;

        sink.reserve(num.min(CHUNK_SIZE));

        while bytes_read < num {
            let wanted = (num - bytes_read).min(scratch.len());

            match self.inner.read_bytes(&mut scratch[..wanted]) {
                Ok(0) => break,
                Ok(count) => {
                    sink.extend_from_slice(&scratch[..count]);
                    bytes_read += count;
                }
                Err(ByteIoError::StdIoError(err))
                    if err.kind() == std::io::ErrorKind::Interrupted =>
                {
                    continue
                }
                Err(err) => {
                    return PartialRead {
                        bytes_read,
                        error: Some(err)
                    }
                }
            }
        }
        PartialRead {
            bytes_read,
            error: None
        }
    }

    #[inline(always)]
    pub fn eof(&mut self) -> Result<bool, ByteIoError> {
        self.inner.is_eof()
    }

    #[inline(always)]
    pub fn position(&mut self) -> Result<u64, ByteIoError> {
        self.inner.z_position()
    }

    /// Total size of the underlying stream, the position is left untouched
    #[inline]
    pub fn stream_size(&mut self) -> Result<u64, ByteIoError> {
        self.inner.z_size()
    }

    /// Move to the end of the stream returning the new position,
    /// which is the size of the stream
    pub fn seek_to_end(&mut self) -> Result<u64, ByteIoError> {
        self.seek(ByteSeekFrom::End(0))
    }

    pub fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError> {
        self.inner.read_exact_bytes(buf)
    }
}

macro_rules! get_single_type {
    ($name:tt,$int_type:tt) => {
        impl<T: ByteReaderTrait> ByteReader<T> {
            #[doc=concat!("Read ",stringify!($int_type)," as a big endian integer")]
            #[doc=concat!("Returning an error if the underlying buffer cannot support a ",stringify!($int_type)," read.")]
            #[inline]
            pub fn $name(&mut self) -> Result<$int_type, ByteIoError> {
                const SIZE_OF_VAL: usize = core::mem::size_of::<$int_type>();

                let mut space = [0; SIZE_OF_VAL];

                self.inner.read_const_bytes(&mut space)?;

                Ok($int_type::from_be_bytes(space))
            }
        }
    };
}

get_single_type!(get_u16_be_err, u16);
get_single_type!(get_u32_be_err, u32);
