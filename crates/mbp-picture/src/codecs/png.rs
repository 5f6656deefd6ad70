/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! PNG signature and `IHDR` chunk reading
//!
//! [`PngChunkState`] says how many bytes each step needs and validates
//! them, [`read_png_header`] pulls the bytes from a stream and feeds them in.
use log::trace;
use mbp_core::bytestream::{ByteReader, ByteReaderTrait};

use crate::codecs::{ImageFormat, ImageProperties};
use crate::errors::{FieldContext, PictureErrors};

/// The eight byte PNG signature
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Declared length of every valid `IHDR` chunk
pub const IHDR_LENGTH: u32 = 13;

/// Color types allowed in the `IHDR` chunk
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[allow(clippy::upper_case_acronyms)]
pub enum PngColor {
    Luma,
    RGB,
    Palette,
    LumaA,
    RGBA
}

impl PngColor {
    pub const fn from_int(int: u8) -> Option<PngColor> {
        match int {
            0 => Some(Self::Luma),
            2 => Some(Self::RGB),
            3 => Some(Self::Palette),
            4 => Some(Self::LumaA),
            6 => Some(Self::RGBA),
            _ => None
        }
    }

    /// Number of components stored in a picture block
    ///
    /// Indexed images report zero components.
    pub const fn num_components(self) -> u8 {
        match self {
            Self::Luma => 1,
            Self::RGB => 3,
            Self::Palette => 0,
            Self::LumaA => 2,
            Self::RGBA => 4
        }
    }

    /// Palette size stored in a picture block
    ///
    /// For indexed images this is the bit depth, not the number
    /// of `PLTE` entries. Other tools reading these blocks expect
    /// that value so it is kept as is.
    pub const fn palette_size(self, depth: u8) -> u32 {
        match self {
            Self::Palette => depth as u32,
            _ => 0
        }
    }
}

/// Fields of the `IHDR` chunk used for picture blocks
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct PngInfo {
    pub width:  u32,
    pub height: u32,
    pub depth:  u8,
    pub color:  Option<PngColor>
}

/// States of the PNG header reader
///
/// The first two signature bytes are consumed by format detection, so
/// the machine starts with the remaining six.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PngChunkState {
    /// Remainder of the signature
    Signature,
    /// Length of the first chunk, must be 13
    IhdrLength,
    /// Type of the first chunk, must be `IHDR`
    IhdrType,
    /// Width, height, bit depth and color type
    IhdrFields,
    /// Terminal
    Done
}

impl PngChunkState {
    /// Number of bytes [`consume`](Self::consume) expects in this state
    pub const fn bytes_needed(self) -> usize {
        match self {
            PngChunkState::Signature => PNG_SIGNATURE.len() - 2,
            PngChunkState::IhdrLength | PngChunkState::IhdrType => 4,
            PngChunkState::IhdrFields => 10,
            PngChunkState::Done => 0
        }
    }

    /// Validate `bytes` for this state, filling `info`, and return the next state
    ///
    /// `bytes` must be exactly [`bytes_needed`](Self::bytes_needed) long,
    /// a shorter or longer slice is reported as [`PictureErrors::UnexpectedEof`].
    pub fn consume(self, bytes: &[u8], info: &mut PngInfo) -> Result<PngChunkState, PictureErrors> {
        if bytes.len() != self.bytes_needed() {
            return Err(PictureErrors::UnexpectedEof("PNG header"));
        }

        match self {
            PngChunkState::Signature => {
                if bytes != &PNG_SIGNATURE[2..] {
                    return Err(PictureErrors::UnsupportedImageFormat("Bad PNG signature"));
                }
                Ok(PngChunkState::IhdrLength)
            }
            PngChunkState::IhdrLength => {
                let length = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);

                if length != IHDR_LENGTH {
                    return Err(PictureErrors::UnsupportedImageFormat(
                        "First PNG chunk does not have the IHDR length"
                    ));
                }
                Ok(PngChunkState::IhdrType)
            }
            PngChunkState::IhdrType => {
                if bytes != b"IHDR" {
                    return Err(PictureErrors::UnsupportedImageFormat(
                        "First PNG chunk is not IHDR"
                    ));
                }
                Ok(PngChunkState::IhdrFields)
            }
            PngChunkState::IhdrFields => {
                info.width = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
                info.height = u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
                info.depth = bytes[8];

                let color = bytes[9];

                info.color =
                    Some(PngColor::from_int(color).ok_or(PictureErrors::InvalidPngColorType(color))?);

                Ok(PngChunkState::Done)
            }
            PngChunkState::Done => Ok(PngChunkState::Done)
        }
    }
}

/// Read the PNG signature and `IHDR` fields
///
/// The stream must point right after the first two signature bytes.
pub fn read_png_header<T: ByteReaderTrait>(
    stream: &mut ByteReader<T>
) -> Result<PngInfo, PictureErrors> {
    let mut state = PngChunkState::Signature;
    let mut info = PngInfo::default();
    let mut buffer = [0_u8; 10];

    while state != PngChunkState::Done {
        let needed = state.bytes_needed();

        stream
            .read_exact_bytes(&mut buffer[..needed])
            .field("PNG header")?;

        trace!("PNG reader in state {state:?}");

        state = state.consume(&buffer[..needed], &mut info)?;
    }
    Ok(info)
}

/// Extract image properties from a PNG stream whose first
/// two signature bytes have already been consumed
pub(crate) fn sniff_png<T: ByteReaderTrait>(
    stream: &mut ByteReader<T>
) -> Result<ImageProperties, PictureErrors> {
    let info = read_png_header(stream)?;
    let color = info
        .color
        .ok_or(PictureErrors::UnsupportedImageFormat("PNG color type missing"))?;

    trace!("Image width  :{}", info.width);
    trace!("Image height :{}", info.height);
    trace!("Bit depth {} color {:?}", info.depth, color);

    ImageProperties::new(
        ImageFormat::PNG,
        info.width,
        info.height,
        u32::from(info.depth) * u32::from(color.num_components()),
        color.palette_size(info.depth),
        stream
    )
}

#[cfg(test)]
mod tests {
    use crate::codecs::png::{PngChunkState, PngColor, PngInfo, PNG_SIGNATURE};
    use crate::PictureErrors;

    #[test]
    fn signature_state_checks_remaining_bytes() {
        let mut info = PngInfo::default();

        assert_eq!(
            PngChunkState::Signature
                .consume(&PNG_SIGNATURE[2..], &mut info)
                .unwrap(),
            PngChunkState::IhdrLength
        );
        assert!(matches!(
            PngChunkState::Signature.consume(b"NG\r\n\x1a\x00", &mut info),
            Err(PictureErrors::UnsupportedImageFormat(_))
        ));
    }

    #[test]
    fn ihdr_length_must_be_thirteen() {
        let mut info = PngInfo::default();

        assert!(PngChunkState::IhdrLength
            .consume(&13_u32.to_be_bytes(), &mut info)
            .is_ok());
        assert!(matches!(
            PngChunkState::IhdrLength.consume(&14_u32.to_be_bytes(), &mut info),
            Err(PictureErrors::UnsupportedImageFormat(_))
        ));
        assert!(PngChunkState::IhdrType.consume(b"IDAT", &mut info).is_err());
    }

    #[test]
    fn fields_are_filled() {
        let mut info = PngInfo::default();
        let fields = [0, 0, 1, 0, 0, 0, 0, 64, 16, 2];

        let next = PngChunkState::IhdrFields.consume(&fields, &mut info).unwrap();

        assert_eq!(next, PngChunkState::Done);
        assert_eq!(info.width, 256);
        assert_eq!(info.height, 64);
        assert_eq!(info.depth, 16);
        assert_eq!(info.color, Some(PngColor::RGB));
    }

    #[test]
    fn unknown_color_type_is_rejected() {
        let mut info = PngInfo::default();

        for color in [1, 5, 7, 255] {
            let fields = [0, 0, 0, 1, 0, 0, 0, 1, 8, color];
            assert!(matches!(
                PngChunkState::IhdrFields.consume(&fields, &mut info),
                Err(PictureErrors::InvalidPngColorType(c)) if c == color
            ));
        }
    }

    #[test]
    fn wrongly_sized_input_is_an_error() {
        let mut info = PngInfo::default();

        // nine bytes, the color type is missing
        let fields = [0, 0, 0, 1, 0, 0, 0, 1, 8];
        assert!(matches!(
            PngChunkState::IhdrFields.consume(&fields, &mut info),
            Err(PictureErrors::UnexpectedEof(_))
        ));
        assert!(matches!(
            PngChunkState::IhdrType.consume(b"IHDR\0", &mut info),
            Err(PictureErrors::UnexpectedEof(_))
        ));
        assert!(PngChunkState::Signature.consume(&[], &mut info).is_err());
        assert_eq!(info, PngInfo::default());
    }

    #[test]
    fn indexed_color_reports_depth_as_palette_size() {
        assert_eq!(PngColor::Palette.num_components(), 0);
        assert_eq!(PngColor::Palette.palette_size(4), 4);
        assert_eq!(PngColor::RGBA.palette_size(8), 0);
    }
}
