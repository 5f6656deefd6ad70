/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::ArgMatches;
use log::{info, Level};
use mbp_picture::DecodeOptions;

#[derive(Debug, Copy, Clone)]
pub struct CmdOptions {
    pub strict_mode:      bool,
    pub max_payload_size: u32
}

impl CmdOptions {
    pub fn new() -> CmdOptions {
        CmdOptions {
            strict_mode:      false,
            max_payload_size: u32::MAX
        }
    }

    pub fn to_decode_options(self) -> DecodeOptions {
        DecodeOptions::default()
            .set_strict_mode(self.strict_mode)
            .set_max_payload_size(self.max_payload_size)
    }
}

/// Read decoding options from the `decode` subcommand arguments
pub fn parse_options(options: &ArgMatches) -> CmdOptions {
    let mut cmd_options = CmdOptions::new();

    if options.get_flag("strict") {
        info!("Strict mode enabled, truncated payloads are errors");
        cmd_options.strict_mode = true;
    }
    if let Some(size) = options.get_one::<u32>("max-payload-size") {
        cmd_options.max_payload_size = *size;
    }
    cmd_options
}

/// Set up logging options
pub fn setup_logger(options: &ArgMatches) {
    let log_level = if options.get_flag("debug") {
        Level::Debug
    } else if options.get_flag("trace") {
        Level::Trace
    } else if options.get_flag("warn") {
        Level::Warn
    } else if options.get_flag("info") {
        Level::Info
    } else {
        Level::Warn
    };

    if let Err(err) = simple_logger::init_with_level(log_level) {
        eprintln!("Could not initialize logger: {err}");
        return;
    }

    info!("Initialized logger");
    info!("Log level :{}", log_level);
}

#[cfg(test)]
mod tests {
    use crate::cmd_args::create_cmd_args;
    use crate::cmd_parsers::global_options::parse_options;

    #[test]
    fn decode_options_from_flags() {
        let matches = create_cmd_args()
            .try_get_matches_from([
                "mbp",
                "decode",
                "-p",
                "--strict",
                "--max-payload-size",
                "1024"
            ])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        let options = parse_options(sub).to_decode_options();

        assert!(options.get_strict_mode());
        assert_eq!(options.get_max_payload_size(), 1024);
    }

    #[test]
    fn decode_defaults() {
        let matches = create_cmd_args()
            .try_get_matches_from(["mbp", "decode", "-m"])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        let options = parse_options(sub);

        assert!(!options.strict_mode);
        assert_eq!(options.max_payload_size, u32::MAX);
    }
}
