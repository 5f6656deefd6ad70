/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Read and write FLAC `METADATA_BLOCK_PICTURE` structures
//!
//! A picture block wraps a JPEG or PNG file together with its type, MIME
//! type, a description and a few image properties.
//!
//! # Decoding a block
//!```no_run
//! use mbp_core::bytestream::{ByteCursor, ByteReader};
//! use mbp_picture::{OutputMode, PictureBlock};
//!
//! let data = std::fs::read("cover.mbp").unwrap();
//! let block = PictureBlock::decode(&mut ByteReader::new(ByteCursor::new(data))).unwrap();
//! let mime = OutputMode::MimeType.project(&block);
//! ```
//!
//! # Encoding a block
//!```no_run
//! use std::fs::File;
//! use std::io::BufReader;
//!
//! use mbp_core::bytestream::ByteReader;
//! use mbp_picture::{encode_picture_to_vec, read_image_data, sniff, PictureType};
//!
//! let mut stream = ByteReader::new(BufReader::new(File::open("cover.jpg").unwrap()));
//! let properties = sniff(&mut stream).unwrap();
//! let image = read_image_data(&mut stream, &properties).unwrap();
//! let block = encode_picture_to_vec(PictureType::CoverFront.index(), b"", &properties, &image);
//! ```
//!
//! # Features
//!  - `serde`: Enables serializing block headers and image properties
#![warn(
    clippy::correctness,
    clippy::perf,
    clippy::inline_always,
    clippy::panic
)]
#![allow(
    clippy::needless_return,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc
)]

pub use crate::block::{encode_picture, encode_picture_to_vec, PictureBlock};
pub use crate::codecs::{read_image_data, sniff, ImageFormat, ImageProperties};
pub use crate::errors::PictureErrors;
pub use crate::options::DecodeOptions;
pub use crate::output::{Output, OutputMode};
pub use crate::picture_type::{describe, PictureType, PICTURE_TYPES};

mod block;
pub mod codecs;
pub mod errors;
mod options;
mod output;
mod picture_type;
mod serde;
