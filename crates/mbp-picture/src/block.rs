/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The `METADATA_BLOCK_PICTURE` structure
//!
//! All integers are big endian `u32`, strings are length prefixed
//! and carry no terminator.
//!
//! ```text
//! picture type | mime length | mime | description length | description
//! width | height | color depth | palette size | data length | data
//! ```
use log::{info, warn};
use mbp_core::bytestream::{ByteReader, ByteReaderTrait, ByteWriter, ByteWriterTrait};

use crate::codecs::ImageProperties;
use crate::errors::{FieldContext, PictureErrors};
use crate::options::DecodeOptions;
use crate::picture_type::PictureType;

/// Size of all fixed width fields of a picture block
const FIXED_FIELDS_SIZE: usize = 8 * 4;

/// A decoded picture block
#[derive(Clone, Eq, PartialEq)]
pub struct PictureBlock {
    pub picture_type: PictureType,
    /// MIME type, conventionally ASCII
    pub mime:         Vec<u8>,
    /// Free text description, no encoding is enforced
    pub description:  Vec<u8>,
    pub width:        u32,
    pub height:       u32,
    pub color_depth:  u32,
    pub palette_size: u32,
    /// Number of payload bytes the block declared
    pub data_length:  u32,
    /// Payload bytes actually present, may be shorter than `data_length`
    pub data:         Vec<u8>
}

impl std::fmt::Debug for PictureBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PictureBlock")
            .field("picture_type", &self.picture_type)
            .field("mime", &String::from_utf8_lossy(&self.mime))
            .field("description", &String::from_utf8_lossy(&self.description))
            .field("width", &self.width)
            .field("height", &self.height)
            .field("color_depth", &self.color_depth)
            .field("palette_size", &self.palette_size)
            .field("data_length", &self.data_length)
            .field("data", &format!("<{} bytes>", self.data.len()))
            .finish()
    }
}

fn read_length_prefixed<T: ByteReaderTrait>(
    stream: &mut ByteReader<T>, length_field: &'static str, field: &'static str
) -> Result<Vec<u8>, PictureErrors> {
    let length = stream.get_u32_be_err().field(length_field)?;
    let length = usize::try_from(length).map_err(|e| PictureErrors::IoError(e.into()))?;

    stream.read_exact_vec(length).field(field)
}

impl PictureBlock {
    /// Decode a picture block with default options
    ///
    /// See [`decode_with_options`](Self::decode_with_options)
    pub fn decode<T: ByteReaderTrait>(stream: &mut ByteReader<T>) -> Result<PictureBlock, PictureErrors> {
        Self::decode_with_options(stream, DecodeOptions::default())
    }

    /// Decode a picture block
    ///
    /// A short read in any header field is an error. A short read in
    /// the trailing payload is only logged, the block keeps the bytes
    /// that were read, unless strict mode is enabled in `options`.
    ///
    /// # Errors
    /// - [`PictureErrors::UnexpectedEof`] if the stream ends inside the header
    /// - [`PictureErrors::InvalidPictureType`] for a type index above 20
    /// - [`PictureErrors::TruncatedPayload`] for a short payload in strict mode
    pub fn decode_with_options<T: ByteReaderTrait>(
        stream: &mut ByteReader<T>, options: DecodeOptions
    ) -> Result<PictureBlock, PictureErrors> {
        let type_index = stream.get_u32_be_err().field("picture type")?;
        let picture_type = PictureType::from_index(type_index)?;

        info!("Picture type: {} ({})", type_index, picture_type.description());

        let mime = read_length_prefixed(stream, "MIME type length", "MIME type")?;
        info!("MIME type: {}", String::from_utf8_lossy(&mime));

        let description = read_length_prefixed(stream, "description length", "description")?;
        info!("Description: {}", String::from_utf8_lossy(&description));

        let width = stream.get_u32_be_err().field("width")?;
        let height = stream.get_u32_be_err().field("height")?;
        info!("Reported size: {width}x{height}");

        let color_depth = stream.get_u32_be_err().field("color depth")?;
        info!("Color depth: {color_depth}");

        let palette_size = stream.get_u32_be_err().field("palette size")?;
        info!("Palette size: {palette_size}");

        let data_length = stream.get_u32_be_err().field("data length")?;
        info!("Data size: {data_length} bytes");

        let data = read_payload(stream, data_length, options)?;

        Ok(PictureBlock {
            picture_type,
            mime,
            description,
            width,
            height,
            color_depth,
            palette_size,
            data_length,
            data
        })
    }

    /// True when fewer payload bytes were present than declared
    pub fn is_truncated(&self) -> bool {
        self.data.len() < self.data_length as usize
    }

    pub fn mime_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.mime)
    }

    pub fn description_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.description)
    }

    /// Serialize this block
    ///
    /// The payload actually held is written and its real length
    /// is used as the data length.
    pub fn write_to<T: ByteWriterTrait>(&self, sink: T) -> Result<usize, PictureErrors> {
        let header = BlockHeader {
            type_index:   self.picture_type.index(),
            mime:         &self.mime,
            description:  &self.description,
            width:        self.width,
            height:       self.height,
            color_depth:  self.color_depth,
            palette_size: self.palette_size
        };
        header.write(sink, &self.data)
    }
}

/// Why a payload holds fewer bytes than its declared length
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Shortfall {
    /// The stream ended first
    EndOfStream,
    /// The read stopped at the configured payload limit
    PayloadLimit
}

fn payload_shortfall(data_length: usize, wanted: usize, read: usize) -> Option<Shortfall> {
    if read < wanted {
        Some(Shortfall::EndOfStream)
    } else if read < data_length {
        Some(Shortfall::PayloadLimit)
    } else {
        None
    }
}

/// Read the trailing payload, never failing on a short read unless strict
fn read_payload<T: ByteReaderTrait>(
    stream: &mut ByteReader<T>, data_length: u32, options: DecodeOptions
) -> Result<Vec<u8>, PictureErrors> {
    let limit = options.get_max_payload_size();
    let wanted = usize::try_from(data_length.min(limit))
        .map_err(|e| PictureErrors::IoError(e.into()))?;
    let declared =
        usize::try_from(data_length).map_err(|e| PictureErrors::IoError(e.into()))?;

    let mut data = Vec::new();
    let outcome = stream.read_up_to(wanted, &mut data);

    if let Some(err) = outcome.error {
        if options.get_strict_mode() {
            return Err(PictureErrors::IoError(err));
        }
        warn!("Read error while reading image data: {:?}", err);
    }

    if let Some(shortfall) = payload_shortfall(declared, wanted, data.len()) {
        if options.get_strict_mode() {
            return Err(PictureErrors::TruncatedPayload(data_length, data.len()));
        }
        match shortfall {
            Shortfall::EndOfStream => warn!(
                "Unexpected end of file while reading image data, expected {} bytes but found {}",
                data_length,
                data.len()
            ),
            Shortfall::PayloadLimit => warn!(
                "Data length {} exceeds the configured limit of {} bytes, kept only {}",
                data_length,
                limit,
                data.len()
            )
        }
    }
    Ok(data)
}

/// Every field of a picture block except the payload
struct BlockHeader<'a> {
    type_index:   u32,
    mime:         &'a [u8],
    description:  &'a [u8],
    width:        u32,
    height:       u32,
    color_depth:  u32,
    palette_size: u32
}

impl BlockHeader<'_> {
    fn write<T: ByteWriterTrait>(&self, sink: T, data: &[u8]) -> Result<usize, PictureErrors> {
        let mut writer = ByteWriter::new(sink);

        let mime_length = u32::try_from(self.mime.len())
            .map_err(|_| PictureErrors::TooLarge(self.mime.len() as u64))?;
        let description_length = u32::try_from(self.description.len())
            .map_err(|_| PictureErrors::TooLarge(self.description.len() as u64))?;
        let data_length =
            u32::try_from(data.len()).map_err(|_| PictureErrors::TooLarge(data.len() as u64))?;

        writer.reserve(FIXED_FIELDS_SIZE + self.mime.len() + self.description.len() + data.len())?;

        writer.write_u32_be_err(self.type_index)?;
        writer.write_u32_be_err(mime_length)?;
        writer.write_all(self.mime)?;
        writer.write_u32_be_err(description_length)?;
        writer.write_all(self.description)?;
        writer.write_u32_be_err(self.width)?;
        writer.write_u32_be_err(self.height)?;
        writer.write_u32_be_err(self.color_depth)?;
        writer.write_u32_be_err(self.palette_size)?;
        writer.write_u32_be_err(data_length)?;
        writer.write_all(data)?;
        writer.flush()?;

        Ok(writer.bytes_written())
    }
}

/// Write a picture block embedding an image file
///
/// `type_index` is written as is, values above 20 are not rejected here.
/// `description` is copied verbatim.
/// The data length is taken from `properties.file_size`, which must match
/// the length of `image_data`.
///
/// Returns the number of bytes written.
pub fn encode_picture<T: ByteWriterTrait>(
    sink: T, type_index: u32, description: &[u8], properties: &ImageProperties,
    image_data: &[u8]
) -> Result<usize, PictureErrors> {
    if image_data.len() != properties.file_size as usize {
        return Err(PictureErrors::LengthMismatch(
            properties.file_size,
            image_data.len()
        ));
    }
    let header = BlockHeader {
        type_index,
        mime: properties.mime.as_bytes(),
        description,
        width: properties.width,
        height: properties.height,
        color_depth: properties.bits_per_pixel,
        palette_size: properties.palette_size
    };
    header.write(sink, image_data)
}

/// Same as [`encode_picture`] but returns the block as a vector
pub fn encode_picture_to_vec(
    type_index: u32, description: &[u8], properties: &ImageProperties, image_data: &[u8]
) -> Result<Vec<u8>, PictureErrors> {
    let mut sink = Vec::new();
    encode_picture(&mut sink, type_index, description, properties, image_data)?;
    Ok(sink)
}
