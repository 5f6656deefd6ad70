/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Image format detection and header sniffing
//!
//! Only JPEG and PNG files can be embedded. Detection looks at the first
//! two bytes of the stream, then the format specific reader continues from
//! there, the stream is never rewound while sniffing.
use log::info;
use mbp_core::bytestream::{ByteReader, ByteReaderTrait, ByteSeekFrom};

use crate::errors::{FieldContext, PictureErrors};

pub mod jpeg;
pub mod png;

/// Image formats that can be stored inside a picture block
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[allow(clippy::upper_case_acronyms)]
pub enum ImageFormat {
    JPEG,
    PNG
}

impl ImageFormat {
    /// Detect a format from its two byte magic number
    pub const fn from_magic(magic: u16) -> Option<ImageFormat> {
        match magic {
            jpeg::START_OF_IMAGE => Some(ImageFormat::JPEG),
            0x8950 => Some(ImageFormat::PNG),
            _ => None
        }
    }

    pub const fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::JPEG => "image/jpeg",
            ImageFormat::PNG => "image/png"
        }
    }

    /// Read the rest of the headers, the stream must point right after
    /// the magic number
    pub fn sniff_headers<T: ByteReaderTrait>(
        self, stream: &mut ByteReader<T>
    ) -> Result<ImageProperties, PictureErrors> {
        match self {
            ImageFormat::JPEG => jpeg::sniff_jpeg(stream),
            ImageFormat::PNG => png::sniff_png(stream)
        }
    }
}

/// Intrinsic properties of an image file, as stored in a picture block
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ImageProperties {
    pub format:         ImageFormat,
    pub mime:           &'static str,
    pub width:          u32,
    pub height:         u32,
    /// Sample precision or bit depth times the number of components
    pub bits_per_pixel: u32,
    pub palette_size:   u32,
    /// Size of the whole image file
    pub file_size:      u32
}

impl ImageProperties {
    /// Create properties for a stream whose headers have been read,
    /// moving the stream to its end to learn the file size.
    pub(crate) fn new<T: ByteReaderTrait>(
        format: ImageFormat, width: u32, height: u32, bits_per_pixel: u32, palette_size: u32,
        stream: &mut ByteReader<T>
    ) -> Result<ImageProperties, PictureErrors> {
        let size = stream.seek_to_end()?;
        let file_size = u32::try_from(size).map_err(|_| PictureErrors::TooLarge(size))?;

        info!("Image resolution: {width}x{height} pixels");
        info!("Bits per pixel: {bits_per_pixel}, palette size: {palette_size}");
        info!("File size: {file_size} bytes");

        Ok(ImageProperties {
            format,
            mime: format.mime_type(),
            width,
            height,
            bits_per_pixel,
            palette_size,
            file_size
        })
    }
}

/// Detect the format of an image and extract its properties
///
/// The stream must be positioned at the start of the image. On success the
/// stream is left at its end.
///
/// # Errors
/// - [`PictureErrors::UnsupportedImageFormat`] if the stream is neither JPEG nor PNG
/// - Any format specific error, see [`jpeg::read_frame_header`] and [`png::read_png_header`]
pub fn sniff<T: ByteReaderTrait>(stream: &mut ByteReader<T>) -> Result<ImageProperties, PictureErrors> {
    let magic = stream.get_u16_be_err().field("image magic bytes")?;

    let format = ImageFormat::from_magic(magic).ok_or(PictureErrors::UnsupportedImageFormat(
        "Not a JPEG or PNG file"
    ))?;

    info!("{:?} file detected ({})", format, format.mime_type());

    format.sniff_headers(stream)
}

/// Rewind `stream` and read the whole image file described by `properties`
///
/// # Errors
/// [`PictureErrors::UnexpectedEof`] if the stream holds fewer than
/// `properties.file_size` bytes.
pub fn read_image_data<T: ByteReaderTrait>(
    stream: &mut ByteReader<T>, properties: &ImageProperties
) -> Result<Vec<u8>, PictureErrors> {
    stream.seek(ByteSeekFrom::Start(0))?;

    let size = usize::try_from(properties.file_size)
        .map_err(|_| PictureErrors::TooLarge(u64::from(properties.file_size)))?;

    stream.read_exact_vec(size).field("image data")
}
