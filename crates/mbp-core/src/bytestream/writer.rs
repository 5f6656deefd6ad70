/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::io::Write;

use crate::bytestream::{ByteIoError, ByteWriterTrait};

impl<W: Write> ByteWriterTrait for W {
    fn write_all_bytes(&mut self, buf: &[u8]) -> Result<(), ByteIoError> {
        self.write_all(buf).map_err(ByteIoError::StdIoError)
    }

    fn flush_bytes(&mut self) -> Result<(), ByteIoError> {
        self.flush().map_err(ByteIoError::StdIoError)
    }
}

/// Encapsulates a simple Byte writer with
/// support for Endian aware writes
pub struct ByteWriter<T: ByteWriterTrait> {
    inner:         T,
    bytes_written: usize
}

impl<T: ByteWriterTrait> ByteWriter<T> {
    /// Create a new writer for the stream
    pub fn new(data: T) -> ByteWriter<T> {
        ByteWriter {
            inner:         data,
            bytes_written: 0
        }
    }

    /// Return the number of bytes the writer has written
    ///
    /// ```
    /// use mbp_core::bytestream::ByteWriter;
    /// let mut sink: Vec<u8> = vec![];
    /// let stream = ByteWriter::new(&mut sink);
    /// assert_eq!(stream.bytes_written(),0);
    /// ```
    pub const fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    /// Write all of `buf` or return an error
    pub fn write_all(&mut self, buf: &[u8]) -> Result<(), ByteIoError> {
        self.inner.write_all_bytes(buf)?;
        self.bytes_written += buf.len();
        Ok(())
    }

    pub fn reserve(&mut self, additional: usize) -> Result<(), ByteIoError> {
        self.inner.reserve_capacity(additional)
    }

    pub fn flush(&mut self) -> Result<(), ByteIoError> {
        self.inner.flush_bytes()
    }
}

macro_rules! write_single_type {
    ($name:tt,$int_type:tt) => {
        impl<T: ByteWriterTrait> ByteWriter<T> {
            #[doc=concat!("Write ",stringify!($int_type)," as a big endian integer")]
            #[doc=concat!("Returning an error if the underlying sink cannot support a ",stringify!($int_type)," write.")]
            #[inline]
            pub fn $name(&mut self, value: $int_type) -> Result<(), ByteIoError> {
                const SIZE: usize = core::mem::size_of::<$int_type>();

                self.inner.write_const_bytes(&value.to_be_bytes())?;
                self.bytes_written += SIZE;
                Ok(())
            }
        }
    };
}

write_single_type!(write_u32_be_err, u32);
