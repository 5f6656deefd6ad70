/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Picture block decoder options

/// Options influencing how picture blocks are decoded
///
/// The defaults match the behaviour of other picture block readers,
/// a truncated payload only produces a warning.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DecodeOptions {
    strict_mode:      bool,
    max_payload_size: u32
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            strict_mode:      false,
            max_payload_size: u32::MAX
        }
    }
}

impl DecodeOptions {
    /// Options that refuse truncated payloads
    pub fn new_strict() -> DecodeOptions {
        DecodeOptions::default().set_strict_mode(true)
    }

    pub const fn get_strict_mode(&self) -> bool {
        self.strict_mode
    }

    pub const fn get_max_payload_size(&self) -> u32 {
        self.max_payload_size
    }

    /// Set whether a payload shorter than its declared length is an error
    ///
    /// When false, the decoder logs a warning and keeps the bytes it could read.
    pub fn set_strict_mode(mut self, yes: bool) -> Self {
        self.strict_mode = yes;
        self
    }

    /// Set the maximum number of payload bytes the decoder will buffer
    ///
    /// A declared length above this limit is read only up to the limit
    /// and then treated like a truncated payload.
    pub fn set_max_payload_size(mut self, size: u32) -> Self {
        self.max_payload_size = size;
        self
    }
}
