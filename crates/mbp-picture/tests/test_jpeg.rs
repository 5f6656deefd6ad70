/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::io::Cursor;

use mbp_core::bytestream::{ByteCursor, ByteReader};
use mbp_picture::{sniff, ImageFormat, PictureErrors};

/// SOF segment with the given precision, dimensions and component count
fn sof(marker: u8, precision: u8, height: u16, width: u16, components: u8) -> Vec<u8> {
    let length = 8 + 3 * u16::from(components);
    let mut out = vec![0xff, marker];

    out.extend_from_slice(&length.to_be_bytes());
    out.push(precision);
    out.extend_from_slice(&height.to_be_bytes());
    out.extend_from_slice(&width.to_be_bytes());
    out.push(components);

    for id in 1..=components {
        out.extend_from_slice(&[id, 0x11, 0x00]);
    }
    out
}

fn segment(marker: u8, body: &[u8]) -> Vec<u8> {
    let length = (body.len() + 2) as u16;
    let mut out = vec![0xff, marker];
    out.extend_from_slice(&length.to_be_bytes());
    out.extend_from_slice(body);
    out
}

#[test]
fn minimal_baseline_jpeg() {
    let mut data = vec![0xff, 0xd8];
    data.extend(sof(0xc0, 8, 10, 20, 3));
    data.extend_from_slice(&[0xff, 0xd9]);

    let properties = sniff(&mut ByteReader::new(ByteCursor::new(&data))).unwrap();

    assert_eq!(properties.format, ImageFormat::JPEG);
    assert_eq!(properties.mime, "image/jpeg");
    assert_eq!(properties.width, 20);
    assert_eq!(properties.height, 10);
    assert_eq!(properties.bits_per_pixel, 24);
    assert_eq!(properties.palette_size, 0);
    assert_eq!(properties.file_size as usize, data.len());
}

#[test]
fn jfif_exif_comment_and_tables_are_skipped() {
    let mut data = vec![0xff, 0xd8];
    data.extend(segment(0xe0, b"JFIF\0\x01\x01\0\0\x01\0\x01\0\0"));
    data.extend(segment(0xe1, &[0x45; 300]));
    data.extend(segment(0xfe, b"made by hand"));
    data.extend(segment(0xdb, &[0x00; 65]));
    data.extend(segment(0xdb, &[0x01; 65]));
    data.extend(sof(0xc2, 8, 480, 640, 1));
    // scan data is never looked at
    data.extend_from_slice(&[0x12; 1000]);

    let properties = sniff(&mut ByteReader::new(Cursor::new(&data))).unwrap();

    assert_eq!((properties.width, properties.height), (640, 480));
    assert_eq!(properties.bits_per_pixel, 8);
    // the payload is the whole file, not only the scan
    assert_eq!(properties.file_size as usize, data.len());
}

#[test]
fn huffman_table_before_frame_is_unsupported() {
    let mut data = vec![0xff, 0xd8];
    data.extend(segment(0xc4, &[0x00; 20]));
    data.extend(sof(0xc0, 8, 1, 1, 3));

    let err = sniff(&mut ByteReader::new(ByteCursor::new(&data))).unwrap_err();

    assert!(matches!(err, PictureErrors::UnsupportedJpegFormat(0xffc4)));
}

#[test]
fn app_segment_after_quantization_table_is_unsupported() {
    let mut data = vec![0xff, 0xd8];
    data.extend(segment(0xdb, &[0x00; 65]));
    data.extend(segment(0xe0, b"JFIF"));
    data.extend(sof(0xc0, 8, 1, 1, 3));

    let err = sniff(&mut ByteReader::new(ByteCursor::new(&data))).unwrap_err();

    assert!(matches!(err, PictureErrors::UnsupportedJpegFormat(0xffe0)));
}

#[test]
fn lossless_frame_is_unsupported() {
    let mut data = vec![0xff, 0xd8];
    data.extend(sof(0xc3, 8, 1, 1, 3));

    let err = sniff(&mut ByteReader::new(ByteCursor::new(&data))).unwrap_err();

    assert!(matches!(err, PictureErrors::UnsupportedJpegFormat(0xffc3)));
}

#[test]
fn sixteen_bit_precision_is_rejected() {
    let mut data = vec![0xff, 0xd8];
    data.extend(sof(0xc0, 16, 1, 1, 3));

    let err = sniff(&mut ByteReader::new(ByteCursor::new(&data))).unwrap_err();

    assert!(matches!(err, PictureErrors::InvalidSamplePrecision(16)));
}

#[test]
fn stream_ending_inside_frame_header_is_eof() {
    let mut data = vec![0xff, 0xd8];
    data.extend(sof(0xc0, 8, 10, 20, 3));
    // cut right after the width
    data.truncate(2 + 2 + 2 + 1 + 2 + 2);

    let err = sniff(&mut ByteReader::new(ByteCursor::new(&data))).unwrap_err();

    assert!(matches!(err, PictureErrors::UnexpectedEof(_)));
}

#[test]
fn soi_only_is_eof() {
    let err = sniff(&mut ByteReader::new(ByteCursor::new([0xff_u8, 0xd8]))).unwrap_err();

    assert!(err.is_eof());
}
