/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Selecting a single field of a decoded picture block
use mbp_core::bytestream::{ByteWriter, ByteWriterTrait};

use crate::block::PictureBlock;
use crate::errors::PictureErrors;

/// The field of a picture block to output
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OutputMode {
    /// Binary picture data
    RawData,
    /// Picture type index
    NumericType,
    /// Picture type description
    DescriptiveType,
    MimeType,
    Description
}

/// A projected field, borrowed from the block it came from
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Output<'a> {
    /// Raw bytes, written without a trailing newline
    Bytes(&'a [u8]),
    /// A number, written in decimal followed by a newline
    Number(u32),
    /// Text, written verbatim followed by a newline
    Text(&'a [u8])
}

impl OutputMode {
    /// Pick the field selected by this mode from `block`
    pub fn project(self, block: &PictureBlock) -> Output<'_> {
        match self {
            OutputMode::RawData => Output::Bytes(&block.data),
            OutputMode::NumericType => Output::Number(block.picture_type.index()),
            OutputMode::DescriptiveType => {
                Output::Text(block.picture_type.description().as_bytes())
            }
            OutputMode::MimeType => Output::Text(&block.mime),
            OutputMode::Description => Output::Text(&block.description)
        }
    }
}

impl Output<'_> {
    pub fn write_to<T: ByteWriterTrait>(&self, sink: T) -> Result<(), PictureErrors> {
        let mut writer = ByteWriter::new(sink);

        match self {
            Output::Bytes(bytes) => writer.write_all(bytes)?,
            Output::Number(number) => writer.write_all(format!("{number}\n").as_bytes())?,
            Output::Text(text) => {
                writer.write_all(text)?;
                writer.write_all(b"\n")?;
            }
        }
        writer.flush()?;

        Ok(())
    }

    pub fn to_vec(&self) -> Vec<u8> {
        match self {
            Output::Bytes(bytes) => bytes.to_vec(),
            Output::Number(number) => format!("{number}\n").into_bytes(),
            Output::Text(text) => [*text, &b"\n"[..]].concat()
        }
    }
}
