/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Traits for reading and writing byte streams
//!
//! This exposes the traits and implementations for readers
//! and writers used by the picture block codec and the image sniffers.

use crate::bytestream::reader::{ByteIoError, ByteSeekFrom};

/// The de-facto Input trait implemented for readers.
///
/// This provides the basic functions needed for endian aware reads
/// with easy support for extending it to multiple implementations.
///
/// # Considerations
///
/// If you have an in memory buffer, prefer [`ByteCursor`](crate::bytestream::ByteCursor) over [`Cursor`](std::io::Cursor).
/// We implement this trait for three types, `ByteCursor`, `Cursor` and `BufReader` over anything that is `Read`+`Seek`,
/// which covers named files.
pub trait ByteReaderTrait {
    /// Read exact bytes required to fill `buf` or return an error if that isn't possible
    ///
    /// ## Arguments
    ///  - `buf`: Buffer to fill with bytes from the underlying reader
    ///  ## Errors
    /// In case of an error, the contents of `buf` are unspecified
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError>;

    /// Read exact bytes required to fill `buf` or return an error if that isn't possible
    ///
    /// This is the same as [`read_exact_bytes`](Self::read_exact_bytes) but implemented as a separate
    /// method to allow some implementations to optimize it to cost fewer instructions
    fn read_const_bytes<const N: usize>(&mut self, buf: &mut [u8; N]) -> Result<(), ByteIoError> {
        self.read_exact_bytes(buf)
    }

    /// Read bytes into `buf` returning how many bytes you have read or an error if one occurred
    ///
    /// This doesn't guarantee that buf will be filled with bytes for such a guarantee see
    /// [`read_exact_bytes`](Self::read_exact_bytes)
    ///
    /// ## Returns
    ///  - `Ok(usize)` - Actual bytes read into the buffer, `0` means end of stream
    ///  - `Err()` - The error encountered when reading bytes for which we couldn't recover
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ByteIoError>;

    /// Seek into a new position from the buffer
    ///
    /// This is similar to the [seek](std::io::Seek::seek) function in the [Seek](std::io::Seek) trait
    fn z_seek(&mut self, from: ByteSeekFrom) -> Result<u64, ByteIoError>;

    /// Report whether we are at the end of a stream.
    ///
    /// ## Warning
    /// This may cause an additional syscall e.g when we are reading from a file
    fn is_eof(&mut self) -> Result<bool, ByteIoError>;

    /// Return the current position of the inner cursor.
    fn z_position(&mut self) -> Result<u64, ByteIoError>;

    /// Return the total size of the stream in bytes.
    ///
    /// Implementations must leave the cursor where it was.
    fn z_size(&mut self) -> Result<u64, ByteIoError>;
}

/// The writer trait implemented for picture block sinks
///
/// Anything that implements [`Write`](std::io::Write) can be used as a sink
pub trait ByteWriterTrait {
    /// Write all bytes to the sink or return an error if something occurred
    ///
    /// This will always write all bytes, if it can't fully write all bytes, it will
    /// error out
    fn write_all_bytes(&mut self, buf: &[u8]) -> Result<(), ByteIoError>;

    /// Write a fixed number of bytes and error out if we can't write the bytes
    fn write_const_bytes<const N: usize>(&mut self, buf: &[u8; N]) -> Result<(), ByteIoError> {
        self.write_all_bytes(buf)
    }

    /// Ensure bytes are written to the sink.
    fn flush_bytes(&mut self) -> Result<(), ByteIoError>;

    /// A hint to tell the implementation how many bytes we expect to write
    ///
    /// An implementation like in memory `Vec` can use this to reserve additional memory to
    /// prevent reallocation when encoding
    fn reserve_capacity(&mut self, _size: usize) -> Result<(), ByteIoError> {
        Ok(())
    }
}
