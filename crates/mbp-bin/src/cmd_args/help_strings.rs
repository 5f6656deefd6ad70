/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fmt::Write;

use mbp_picture::PICTURE_TYPES;

pub static ENCODE_HELP: &str = "Wrap a JPEG or PNG file in a picture block

Width, height, color depth and palette size are read from the image
headers. Only baseline and progressive 8 bit JPEG files and PNG files
are accepted. The whole file is stored as the picture data.";

pub static STRICT_HELP: &str = "Treat a truncated picture payload as an error

By default a picture block whose data is shorter than its declared
length is accepted with a warning and the bytes present are used.";

pub static MAX_PAYLOAD_HELP: &str = "Maximum number of payload bytes to read

Blocks declaring a longer payload are read up to this limit and
reported as truncated.";

/// Help for the picture type option, listing every type
pub fn picture_type_help() -> String {
    let mut help = String::from("Picture type index\n\nPossible values:\n");

    for (pic_type, description) in PICTURE_TYPES {
        // writing to a string cannot fail
        let _ = writeln!(help, "  {:>2}: {}", pic_type.index(), description);
    }
    help
}
