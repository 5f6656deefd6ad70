/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::Path;

use mbp_picture::ImageProperties;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Properties of an image file together with its name
pub struct Metadata<'a> {
    file:       &'a Path,
    properties: &'a ImageProperties
}

impl<'a> Metadata<'a> {
    pub fn new(file: &'a Path, properties: &'a ImageProperties) -> Metadata<'a> {
        Metadata { file, properties }
    }
}

impl Serialize for Metadata<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut state = serializer.serialize_struct("ImageMetadata", 2)?;

        state.serialize_field("file", &self.file.to_string_lossy())?;
        state.serialize_field("metadata", &self.properties)?;

        state.end()
    }
}
