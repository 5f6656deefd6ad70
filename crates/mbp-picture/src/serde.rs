/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![cfg(feature = "serde")]
//! Serialization of picture block headers and image properties
//!
//! Payload bytes are never serialized, only their length.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::block::PictureBlock;
use crate::codecs::{ImageFormat, ImageProperties};
use crate::picture_type::PictureType;

impl Serialize for PictureType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut state = serializer.serialize_struct("PictureType", 2)?;

        state.serialize_field("index", &self.index())?;
        state.serialize_field("description", self.description())?;

        state.end()
    }
}

impl Serialize for ImageFormat {
    #[allow(clippy::uninlined_format_args)]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        // format serialization is simply it's debug value
        serializer.serialize_str(&format!("{:?}", self))
    }
}

impl Serialize for ImageProperties {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut state = serializer.serialize_struct("ImageProperties", 7)?;

        state.serialize_field("format", &self.format)?;
        state.serialize_field("mime", self.mime)?;
        state.serialize_field("width", &self.width)?;
        state.serialize_field("height", &self.height)?;
        state.serialize_field("bits_per_pixel", &self.bits_per_pixel)?;
        state.serialize_field("palette_size", &self.palette_size)?;
        state.serialize_field("file_size", &self.file_size)?;

        state.end()
    }
}

impl Serialize for PictureBlock {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut state = serializer.serialize_struct("PictureBlock", 10)?;

        state.serialize_field("picture_type", &self.picture_type)?;
        state.serialize_field("mime", &self.mime_lossy())?;
        state.serialize_field("description", &self.description_lossy())?;
        state.serialize_field("width", &self.width)?;
        state.serialize_field("height", &self.height)?;
        state.serialize_field("color_depth", &self.color_depth)?;
        state.serialize_field("palette_size", &self.palette_size)?;
        state.serialize_field("data_length", &self.data_length)?;
        state.serialize_field("data_present", &self.data.len())?;
        state.serialize_field("truncated", &self.is_truncated())?;

        state.end()
    }
}
