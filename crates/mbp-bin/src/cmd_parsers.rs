/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::ArgMatches;
use mbp_picture::OutputMode;

use crate::cmd_args::DECODE_MODES;

pub mod global_options;

/// What `decode` prints
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DecodeOutput {
    /// A single field of the block
    Field(OutputMode),
    /// Every header field as JSON
    Json
}

/// Pick the output mode given on the command line
///
/// Mode flags override each other so at most one is set, the
/// default is raw picture data.
pub fn get_decode_output(options: &ArgMatches) -> DecodeOutput {
    let selected = DECODE_MODES
        .iter()
        .find(|mode| options.get_flag(mode))
        .copied();

    match selected {
        Some("numeric") => DecodeOutput::Field(OutputMode::NumericType),
        Some("descriptive") => DecodeOutput::Field(OutputMode::DescriptiveType),
        Some("mime") => DecodeOutput::Field(OutputMode::MimeType),
        Some("description") => DecodeOutput::Field(OutputMode::Description),
        Some("json") => DecodeOutput::Json,
        _ => DecodeOutput::Field(OutputMode::RawData)
    }
}

#[cfg(test)]
mod tests {
    use mbp_picture::OutputMode;

    use crate::cmd_args::create_cmd_args;
    use crate::cmd_parsers::{get_decode_output, DecodeOutput};

    fn decode_output(args: &[&str]) -> DecodeOutput {
        let matches = create_cmd_args()
            .try_get_matches_from(["mbp", "decode"].iter().chain(args))
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();

        get_decode_output(sub)
    }

    #[test]
    fn each_flag_selects_its_mode() {
        assert_eq!(decode_output(&["-p"]), DecodeOutput::Field(OutputMode::RawData));
        assert_eq!(decode_output(&["-n"]), DecodeOutput::Field(OutputMode::NumericType));
        assert_eq!(decode_output(&["-t"]), DecodeOutput::Field(OutputMode::DescriptiveType));
        assert_eq!(decode_output(&["-m"]), DecodeOutput::Field(OutputMode::MimeType));
        assert_eq!(decode_output(&["-d"]), DecodeOutput::Field(OutputMode::Description));
        assert_eq!(decode_output(&["-j"]), DecodeOutput::Json);
    }

    #[test]
    fn last_mode_wins() {
        assert_eq!(
            decode_output(&["-p", "-n", "in.bin"]),
            DecodeOutput::Field(OutputMode::NumericType)
        );
        assert_eq!(
            decode_output(&["-t", "-p"]),
            DecodeOutput::Field(OutputMode::RawData)
        );
        assert_eq!(
            decode_output(&["-m", "-d", "-m"]),
            DecodeOutput::Field(OutputMode::MimeType)
        );
    }
}
