/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Picture types as defined by the ID3v2 APIC frame,
//! which FLAC reuses for its picture blocks
use crate::errors::PictureErrors;

/// The type of a picture stored in a picture block
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PictureType {
    Other,
    PngIcon,
    OtherIcon,
    CoverFront,
    CoverBack,
    Leaflet,
    Media,
    LeadArtist,
    Artist,
    Conductor,
    Band,
    Composer,
    Lyricist,
    RecordingLocation,
    DuringRecording,
    DuringPerformance,
    ScreenCapture,
    BrightFish,
    Illustration,
    BandLogo,
    PublisherLogo
}

/// Every picture type paired with its description, ordered by index.
#[rustfmt::skip]
pub const PICTURE_TYPES: [(PictureType, &str); 21] = [
    (PictureType::Other,             "Other"),
    (PictureType::PngIcon,           "32x32 pixel PNG file icon"),
    (PictureType::OtherIcon,         "Other file icon"),
    (PictureType::CoverFront,        "Cover (front)"),
    (PictureType::CoverBack,         "Cover (back)"),
    (PictureType::Leaflet,           "Leaflet page"),
    (PictureType::Media,             "Media (e.g. label side of CD)"),
    (PictureType::LeadArtist,        "Lead artist/lead performer/soloist"),
    (PictureType::Artist,            "Artist/performer"),
    (PictureType::Conductor,         "Conductor"),
    (PictureType::Band,              "Band/Orchestra"),
    (PictureType::Composer,          "Composer"),
    (PictureType::Lyricist,          "Lyricist/text writer"),
    (PictureType::RecordingLocation, "Recording Location"),
    (PictureType::DuringRecording,   "During recording"),
    (PictureType::DuringPerformance, "During performance"),
    (PictureType::ScreenCapture,     "Movie/video screen capture"),
    (PictureType::BrightFish,        "A bright coloured fish"),
    (PictureType::Illustration,      "Illustration"),
    (PictureType::BandLogo,          "Band/artist logotype"),
    (PictureType::PublisherLogo,     "Publisher/Studio logotype"),
];

impl PictureType {
    /// Largest valid picture type index
    pub const MAX_INDEX: u32 = 20;

    /// Look up a picture type by its index
    ///
    /// # Errors
    /// [`PictureErrors::InvalidPictureType`] if `index` is greater than 20
    pub fn from_index(index: u32) -> Result<PictureType, PictureErrors> {
        usize::try_from(index)
            .ok()
            .and_then(|i| PICTURE_TYPES.get(i))
            .map(|(pic_type, _)| *pic_type)
            .ok_or(PictureErrors::InvalidPictureType(index))
    }

    /// The index stored in a picture block
    pub const fn index(self) -> u32 {
        self as u32
    }

    pub const fn description(self) -> &'static str {
        PICTURE_TYPES[self as usize].1
    }
}

/// Return the description of the picture type at `index`
///
/// # Errors
/// [`PictureErrors::InvalidPictureType`] if `index` is greater than 20
pub fn describe(index: u32) -> Result<&'static str, PictureErrors> {
    PictureType::from_index(index).map(PictureType::description)
}
