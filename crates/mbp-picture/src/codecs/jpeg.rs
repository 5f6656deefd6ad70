/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! JPEG marker scanning
//!
//! We only need the start of frame header, so the scan walks the
//! segments that may legally precede it and stops there.
//!
//! The walk is expressed as a small state machine, [`JpegScanState`],
//! whose transitions only look at marker values. Reading and skipping
//! bytes is done by [`sniff_jpeg`] which drives the machine.
use log::{debug, trace};
use mbp_core::bytestream::{ByteReader, ByteReaderTrait};

use crate::codecs::{ImageFormat, ImageProperties};
use crate::errors::{FieldContext, PictureErrors};

/// Start of image
pub const START_OF_IMAGE: u16 = 0xffd8;

/// First application segment marker, `APP0`
pub const APP0: u16 = 0xffe0;

/// Last application segment marker, `APP15`
pub const APP15: u16 = 0xffef;

/// Comment segment
pub const COMMENT: u16 = 0xfffe;

/// Define quantization table
pub const DEFINE_QUANTIZATION_TABLE: u16 = 0xffdb;

/// Start of baseline DCT Huffman coding
pub const START_OF_FRAME_BASE: u16 = 0xffc0;

/// Start of progressive DCT encoding
pub const START_OF_FRAME_PROG_DCT: u16 = 0xffc2;

/// The only sample precision we accept
const SUPPORTED_PRECISION: u8 = 8;

/// Start of frame markers we know how to read
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SOFMarkers {
    /// Baseline DCT markers
    BaselineDct,
    /// Progressive DCT, Huffman coding
    ProgressiveDctHuffman
}

impl SOFMarkers {
    /// Create a marker from an integer
    pub const fn from_int(int: u16) -> Option<SOFMarkers> {
        match int {
            START_OF_FRAME_BASE => Some(Self::BaselineDct),
            START_OF_FRAME_PROG_DCT => Some(Self::ProgressiveDctHuffman),
            _ => None
        }
    }
}

/// States of the marker walk, in order.
///
/// There are no backward transitions, once a state has been
/// left it is never entered again.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum JpegScanState {
    /// Skipping `APPn` and `COM` segments
    ScanPrefix,
    /// Skipping `DQT` segments
    ScanDqt,
    /// The current marker has to be a supported start of frame
    ExpectSof,
    /// Terminal, the frame header follows
    Extract(SOFMarkers)
}

/// What the driver does with the current marker after a transition
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MarkerAction {
    /// Skip the marker's segment and read the next marker
    SkipSegment,
    /// Hand the same marker to the next state
    Keep
}

#[inline]
const fn is_app_or_comment(marker: u16) -> bool {
    matches!(marker, APP0..=APP15 | COMMENT)
}

impl JpegScanState {
    /// Advance the machine given the current marker
    ///
    /// # Errors
    /// [`PictureErrors::UnsupportedJpegFormat`] when a marker that is not a supported
    /// start of frame reaches [`JpegScanState::ExpectSof`]
    pub fn step(self, marker: u16) -> Result<(JpegScanState, MarkerAction), PictureErrors> {
        match self {
            JpegScanState::ScanPrefix => {
                if is_app_or_comment(marker) {
                    Ok((JpegScanState::ScanPrefix, MarkerAction::SkipSegment))
                } else {
                    Ok((JpegScanState::ScanDqt, MarkerAction::Keep))
                }
            }
            JpegScanState::ScanDqt => {
                if marker == DEFINE_QUANTIZATION_TABLE {
                    Ok((JpegScanState::ScanDqt, MarkerAction::SkipSegment))
                } else {
                    Ok((JpegScanState::ExpectSof, MarkerAction::Keep))
                }
            }
            JpegScanState::ExpectSof => match SOFMarkers::from_int(marker) {
                Some(sof) => Ok((JpegScanState::Extract(sof), MarkerAction::Keep)),
                None => Err(PictureErrors::UnsupportedJpegFormat(marker))
            },
            JpegScanState::Extract(sof) => Ok((JpegScanState::Extract(sof), MarkerAction::Keep))
        }
    }
}

/// Frame header fields we care about
///
/// Section:`B.2.2 Frame header syntax`
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct FrameHeader {
    pub sof:        SOFMarkers,
    pub precision:  u8,
    pub height:     u16,
    pub width:      u16,
    pub components: u8
}

/// Skip the segment introduced by `marker`, the stream
/// must point to the segment length.
fn skip_segment<T: ByteReaderTrait>(
    stream: &mut ByteReader<T>, marker: u16
) -> Result<(), PictureErrors> {
    // length includes the two length bytes
    let length = stream.get_u16_be_err().field("JPEG segment length")?;
    let remaining = length
        .checked_sub(2)
        .ok_or(PictureErrors::InvalidSegmentLength(marker, length))?;

    trace!("Found {marker:#06X} segment ({length} bytes). Skipping");

    stream.skip(usize::from(remaining))?;

    Ok(())
}

/// Walk the markers following `SOI` up to and including
/// the start of frame header.
///
/// The stream must point right after the `SOI` marker.
pub fn read_frame_header<T: ByteReaderTrait>(
    stream: &mut ByteReader<T>
) -> Result<FrameHeader, PictureErrors> {
    let mut state = JpegScanState::ScanPrefix;
    let mut marker = stream.get_u16_be_err().field("JPEG marker")?;

    let sof = loop {
        if let JpegScanState::Extract(sof) = state {
            break sof;
        }
        let (next, action) = state.step(marker)?;

        if action == MarkerAction::SkipSegment {
            skip_segment(stream, marker)?;
            marker = stream.get_u16_be_err().field("JPEG marker")?;
        }
        state = next;
    };

    debug!("Found start of frame marker {sof:?}");

    // frame header length, not needed
    stream.get_u16_be_err().field("JPEG frame header length")?;

    let precision = stream.get_u8_err().field("JPEG sample precision")?;

    if precision != SUPPORTED_PRECISION {
        return Err(PictureErrors::InvalidSamplePrecision(precision));
    }
    let height = stream.get_u16_be_err().field("JPEG image height")?;
    let width = stream.get_u16_be_err().field("JPEG image width")?;
    let components = stream.get_u8_err().field("JPEG component count")?;

    trace!("Image width  :{}", width);
    trace!("Image height :{}", height);
    trace!("Image components : {}", components);

    Ok(FrameHeader {
        sof,
        precision,
        height,
        width,
        components
    })
}

/// Extract image properties from a JPEG stream whose `SOI`
/// marker has already been consumed
pub(crate) fn sniff_jpeg<T: ByteReaderTrait>(
    stream: &mut ByteReader<T>
) -> Result<ImageProperties, PictureErrors> {
    let header = read_frame_header(stream)?;

    ImageProperties::new(
        ImageFormat::JPEG,
        u32::from(header.width),
        u32::from(header.height),
        u32::from(header.precision) * u32::from(header.components),
        0,
        stream
    )
}

#[cfg(test)]
mod tests {
    use mbp_core::bytestream::{ByteCursor, ByteReader};

    use crate::codecs::jpeg::{
        read_frame_header, JpegScanState, MarkerAction, SOFMarkers, APP0, APP15, COMMENT,
        DEFINE_QUANTIZATION_TABLE, START_OF_FRAME_BASE, START_OF_FRAME_PROG_DCT
    };
    use crate::PictureErrors;

    #[test]
    fn prefix_skips_app_and_comment_segments() {
        for marker in [APP0, 0xffe1, APP15, COMMENT] {
            assert_eq!(
                JpegScanState::ScanPrefix.step(marker).unwrap(),
                (JpegScanState::ScanPrefix, MarkerAction::SkipSegment)
            );
        }
        assert_eq!(
            JpegScanState::ScanPrefix.step(START_OF_FRAME_BASE).unwrap(),
            (JpegScanState::ScanDqt, MarkerAction::Keep)
        );
    }

    #[test]
    fn dqt_state_does_not_go_back_to_app_segments() {
        assert_eq!(
            JpegScanState::ScanDqt
                .step(DEFINE_QUANTIZATION_TABLE)
                .unwrap(),
            (JpegScanState::ScanDqt, MarkerAction::SkipSegment)
        );
        // an APP segment after a DQT is not skipped, it ends the scan
        let (next, action) = JpegScanState::ScanDqt.step(APP0).unwrap();
        assert_eq!((next, action), (JpegScanState::ExpectSof, MarkerAction::Keep));
        assert!(matches!(
            next.step(APP0),
            Err(PictureErrors::UnsupportedJpegFormat(APP0))
        ));
    }

    #[test]
    fn only_baseline_and_progressive_frames_are_accepted() {
        assert_eq!(
            JpegScanState::ExpectSof.step(START_OF_FRAME_PROG_DCT).unwrap().0,
            JpegScanState::Extract(SOFMarkers::ProgressiveDctHuffman)
        );
        // extended sequential
        assert!(JpegScanState::ExpectSof.step(0xffc1).is_err());
        // define huffman table
        assert!(JpegScanState::ExpectSof.step(0xffc4).is_err());
    }

    #[test]
    fn frame_header_after_segments() {
        #[rustfmt::skip]
        let data = [
            // APP0, 4 bytes long
            0xff, 0xe0, 0x00, 0x04, 0xaa, 0xbb,
            // COM, empty
            0xff, 0xfe, 0x00, 0x02,
            // two DQT segments
            0xff, 0xdb, 0x00, 0x03, 0x00,
            0xff, 0xdb, 0x00, 0x02,
            // SOF0
            0xff, 0xc0, 0x00, 0x11, 0x08, 0x01, 0x00, 0x02, 0x00, 0x01,
        ];
        let mut stream = ByteReader::new(ByteCursor::new(data));
        let header = read_frame_header(&mut stream).unwrap();

        assert_eq!(header.sof, SOFMarkers::BaselineDct);
        assert_eq!(header.height, 256);
        assert_eq!(header.width, 512);
        assert_eq!(header.components, 1);
    }

    #[test]
    fn segment_length_below_two_is_rejected() {
        let data = [0xff, 0xe1, 0x00, 0x01];
        let mut stream = ByteReader::new(ByteCursor::new(data));

        assert!(matches!(
            read_frame_header(&mut stream),
            Err(PictureErrors::InvalidSegmentLength(0xffe1, 1))
        ));
    }

    #[test]
    fn truncated_segment_is_eof() {
        // APP1 claims 100 bytes but the stream ends
        let data = [0xff, 0xe1, 0x00, 0x64, 0x00];
        let mut stream = ByteReader::new(ByteCursor::new(data));

        assert!(matches!(
            read_frame_header(&mut stream),
            Err(PictureErrors::UnexpectedEof(_))
        ));
    }

    #[test]
    fn twelve_bit_precision_is_rejected() {
        let data = [0xff, 0xc2, 0x00, 0x11, 0x0c, 0x00, 0x10, 0x00, 0x10, 0x03];
        let mut stream = ByteReader::new(ByteCursor::new(data));

        assert!(matches!(
            read_frame_header(&mut stream),
            Err(PictureErrors::InvalidSamplePrecision(12))
        ));
    }
}
