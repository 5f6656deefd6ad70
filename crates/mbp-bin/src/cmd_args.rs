/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, ArgGroup, Command};

use crate::cmd_args::help_strings::{picture_type_help, ENCODE_HELP, MAX_PAYLOAD_HELP, STRICT_HELP};

pub mod help_strings;

/// Decode output modes, when more than one is given the last one wins
pub static DECODE_MODES: [&str; 6] = ["raw", "numeric", "descriptive", "mime", "description", "json"];

fn mode_arg(name: &'static str, short: char, long: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .short(short)
        .long(long)
        .action(ArgAction::SetTrue)
        .help_heading("OUTPUT")
        .help(help)
        .overrides_with_all(DECODE_MODES.iter().filter(|mode| **mode != name).copied())
}

fn output_arg() -> Arg {
    Arg::new("out")
        .short('o')
        .long("output")
        .help("Write to this file instead of standard output")
        .value_parser(value_parser!(PathBuf))
}

#[rustfmt::skip]
fn decode_cmd() -> Command {
    Command::new("decode")
        .about("Extract one field of a picture block")
        .arg(Arg::new("in")
            .help("Picture block to read, standard input if absent or '-'")
            .value_parser(value_parser!(PathBuf)))
        .arg(mode_arg("raw", 'p', "picture", "Output the binary picture data"))
        .arg(mode_arg("numeric", 'n', "numeric-type", "Output the picture type as a number"))
        .arg(mode_arg("descriptive", 't', "type", "Output the picture type as text"))
        .arg(mode_arg("mime", 'm', "mime", "Output the MIME type"))
        .arg(mode_arg("description", 'd', "description", "Output the picture description"))
        .arg(mode_arg("json", 'j', "json", "Output every header field as JSON"))
        .group(ArgGroup::new("mode")
            .args(DECODE_MODES)
            .required(true))
        .arg(output_arg())
        .arg(Arg::new("strict")
            .long("strict")
            .action(ArgAction::SetTrue)
            .help_heading("ADVANCED")
            .help("Treat a truncated picture payload as an error")
            .long_help(STRICT_HELP))
        .arg(Arg::new("max-payload-size")
            .long("max-payload-size")
            .help_heading("ADVANCED")
            .help("Maximum number of payload bytes to read")
            .long_help(MAX_PAYLOAD_HELP)
            .value_parser(value_parser!(u32))
            .default_value("4294967295"))
}

#[rustfmt::skip]
fn encode_cmd() -> Command {
    Command::new("encode")
        .about("Wrap a JPEG or PNG file in a picture block")
        .long_about(ENCODE_HELP)
        .arg(Arg::new("in")
            .help("JPEG or PNG file to embed")
            .required(true)
            .value_parser(value_parser!(PathBuf)))
        .arg(Arg::new("type")
            .short('t')
            .long("type")
            .help("Picture type index")
            .long_help(picture_type_help())
            .value_parser(value_parser!(u32))
            .default_value("0"))
        .arg(Arg::new("comment")
            .short('c')
            .long("comment")
            .help("Picture description")
            .value_parser(value_parser!(OsString)))
        .arg(output_arg())
}

#[rustfmt::skip]
fn probe_cmd() -> Command {
    Command::new("probe")
        .about("Print the properties of JPEG or PNG files as JSON")
        .arg(Arg::new("in")
            .help("Image files to inspect")
            .required(true)
            .action(ArgAction::Append)
            .value_parser(value_parser!(PathBuf)))
}

#[rustfmt::skip]
pub fn create_cmd_args() -> Command {
    Command::new("mbp")
        .about("Read and write FLAC METADATA_BLOCK_PICTURE structures")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(decode_cmd())
        .subcommand(encode_cmd())
        .subcommand(probe_cmd())
        .arg(Arg::new("debug")
            .long("debug")
            .global(true)
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display debug information and higher"))
        .arg(Arg::new("trace")
            .long("trace")
            .global(true)
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display very verbose information"))
        .arg(Arg::new("warn")
            .long("warn")
            .global(true)
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display warnings and errors"))
        .arg(Arg::new("info")
            .long("info")
            .global(true)
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display information about the fields being read"))
}
