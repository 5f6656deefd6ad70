/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible when reading picture blocks or sniffing images
use std::fmt::{Debug, Display, Formatter};

use mbp_core::bytestream::ByteIoError;

/// Possible errors that may occur when decoding a picture block
/// or inspecting an image file
pub enum PictureErrors {
    /// The underlying stream failed for a reason unrelated to
    /// its contents
    IoError(ByteIoError),
    /// The stream ended while reading a mandatory field
    ///
    /// The argument names the field being read
    UnexpectedEof(&'static str),
    /// Picture type index outside `0..=20`
    InvalidPictureType(u32),
    /// The image is neither a JPEG nor a PNG, or its
    /// PNG signature/IHDR chunk is malformed
    UnsupportedImageFormat(&'static str),
    /// JPEG sample precision is not 8 bits
    InvalidSamplePrecision(u8),
    /// The JPEG marker walk stopped at a marker that is
    /// neither a baseline nor a progressive start of frame
    UnsupportedJpegFormat(u16),
    /// PNG color type is not one of 0, 2, 3, 4 or 6
    InvalidPngColorType(u8),
    /// A JPEG segment declared a length too small to hold its own length field
    ///
    /// # Arguments
    /// - 1st argument is the marker of the segment
    /// - 2nd argument is the declared length
    InvalidSegmentLength(u16, u16),
    /// The image file is too big for the 32 bit data length field
    TooLarge(u64),
    /// The payload was shorter than its declared length and strict
    /// decoding was requested
    ///
    /// # Arguments
    /// - 1st argument is the declared length
    /// - 2nd argument is the number of bytes actually present
    TruncatedPayload(u32, usize),
    /// The image data handed to the encoder does not match the
    /// file size recorded in its properties
    ///
    /// # Arguments
    /// - 1st argument is the recorded file size
    /// - 2nd argument is the length of the data
    LengthMismatch(u32, usize)
}

impl PictureErrors {
    /// Returns true if this error was caused by an input that ended too early
    pub const fn is_eof(&self) -> bool {
        matches!(
            self,
            PictureErrors::UnexpectedEof(_) | PictureErrors::TruncatedPayload(_, _)
        )
    }
}

impl Debug for PictureErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PictureErrors::IoError(err) => {
                writeln!(f, "I/O error {:?}", err)
            }
            PictureErrors::UnexpectedEof(field) => {
                writeln!(f, "Unexpected end of file while reading {field}")
            }
            PictureErrors::InvalidPictureType(index) => {
                writeln!(
                    f,
                    "Invalid picture type index {index}, expected a value between 0 and 20"
                )
            }
            PictureErrors::UnsupportedImageFormat(reason) => {
                writeln!(f, "Unsupported image format: {reason}")
            }
            PictureErrors::InvalidSamplePrecision(precision) => {
                writeln!(
                    f,
                    "Invalid sample precision {precision}, only 8 bit JPEG images are supported"
                )
            }
            PictureErrors::UnsupportedJpegFormat(marker) => {
                writeln!(
                    f,
                    "Unsupported JPEG file format, expected a baseline or progressive start of frame but found marker {marker:#06X}"
                )
            }
            PictureErrors::InvalidPngColorType(color) => {
                writeln!(f, "Invalid PNG color type {color}")
            }
            PictureErrors::InvalidSegmentLength(marker, length) => {
                writeln!(
                    f,
                    "Invalid length {length} for segment {marker:#06X}, length should be at least 2"
                )
            }
            PictureErrors::TooLarge(size) => {
                writeln!(
                    f,
                    "Image file is {size} bytes, picture blocks can only hold {} bytes",
                    u32::MAX
                )
            }
            PictureErrors::TruncatedPayload(expected, found) => {
                writeln!(
                    f,
                    "Truncated picture data, expected {expected} bytes but found {found}"
                )
            }
            PictureErrors::LengthMismatch(expected, found) => {
                writeln!(
                    f,
                    "Image data is {found} bytes but the image properties record {expected} bytes"
                )
            }
        }
    }
}

impl Display for PictureErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for PictureErrors {}

impl From<ByteIoError> for PictureErrors {
    fn from(value: ByteIoError) -> Self {
        if value.is_eof() {
            return PictureErrors::UnexpectedEof("header");
        }
        PictureErrors::IoError(value)
    }
}

impl From<std::io::Error> for PictureErrors {
    fn from(value: std::io::Error) -> Self {
        PictureErrors::from(ByteIoError::from(value))
    }
}

/// Attach the name of the field being read to a stream error
pub(crate) trait FieldContext<T> {
    fn field(self, name: &'static str) -> Result<T, PictureErrors>;
}

impl<T> FieldContext<T> for Result<T, ByteIoError> {
    #[inline]
    fn field(self, name: &'static str) -> Result<T, PictureErrors> {
        self.map_err(|err| {
            if err.is_eof() {
                PictureErrors::UnexpectedEof(name)
            } else {
                PictureErrors::IoError(err)
            }
        })
    }
}
