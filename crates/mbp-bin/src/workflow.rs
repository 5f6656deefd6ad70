/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::ffi::OsString;
use std::path::PathBuf;

use clap::ArgMatches;
use log::{info, warn};
use mbp_core::bytestream::{ByteReader, ByteReaderTrait};
use mbp_picture::{
    encode_picture_to_vec, read_image_data, sniff, DecodeOptions, PictureBlock, PictureErrors,
    PictureType
};

use crate::cmd_parsers::global_options::parse_options;
use crate::cmd_parsers::{get_decode_output, DecodeOutput};
use crate::file_io::{named_file, open_file, read_stdin, write_output};
use crate::probe_files::probe_input_files;

pub(crate) fn create_and_exec_workflow_from_cmd(args: &ArgMatches) -> Result<(), PictureErrors> {
    match args.subcommand() {
        Some(("decode", sub_args)) => decode_block(sub_args),
        Some(("encode", sub_args)) => encode_image(sub_args),
        Some(("probe", sub_args)) => probe_input_files(sub_args),
        _ => Ok(())
    }
}

fn decode_from<T: ByteReaderTrait>(
    mut stream: ByteReader<T>, options: DecodeOptions
) -> Result<PictureBlock, PictureErrors> {
    PictureBlock::decode_with_options(&mut stream, options)
}

fn decode_block(args: &ArgMatches) -> Result<(), PictureErrors> {
    let options = parse_options(args).to_decode_options();

    let block = match named_file(args.get_one::<PathBuf>("in")) {
        Some(path) => decode_from(open_file(path)?, options)?,
        None => decode_from(read_stdin()?, options)?
    };

    let bytes = match get_decode_output(args) {
        DecodeOutput::Field(mode) => {
            info!("Selecting {:?}", mode);
            mode.project(&block).to_vec()
        }
        DecodeOutput::Json => {
            let json = serde_json::to_string_pretty(&block).map_err(std::io::Error::from)?;
            format!("{json}\n").into_bytes()
        }
    };

    write_output(args.get_one::<PathBuf>("out"), &bytes)
}

fn encode_image(args: &ArgMatches) -> Result<(), PictureErrors> {
    let type_index = args.get_one::<u32>("type").copied().unwrap_or(0);

    if type_index > PictureType::MAX_INDEX {
        warn!(
            "Picture type {} is not a known type, decoders will reject this block",
            type_index
        );
    }
    let description = args
        .get_one::<OsString>("comment")
        .map(|comment| comment.clone().into_encoded_bytes())
        .unwrap_or_default();

    let Some(in_file) = args.get_one::<PathBuf>("in") else {
        return Ok(());
    };
    let mut stream = open_file(in_file)?;
    let properties = sniff(&mut stream)?;
    let image_data = read_image_data(&mut stream, &properties)?;

    let block = encode_picture_to_vec(type_index, &description, &properties, &image_data)?;

    info!("Encoded picture block of {} bytes", block.len());

    write_output(args.get_one::<PathBuf>("out"), &block)
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;
    use std::path::{Path, PathBuf};

    use mbp_picture::PictureErrors;

    use crate::cmd_args::create_cmd_args;
    use crate::workflow::create_and_exec_workflow_from_cmd;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("mbp_workflow_{}_{}", std::process::id(), name))
    }

    /// A front cover block declaring `data_length` bytes of payload
    fn block_bytes(data_length: u32, data: &[u8]) -> Vec<u8> {
        let mut out = 3_u32.to_be_bytes().to_vec();

        out.extend_from_slice(&9_u32.to_be_bytes());
        out.extend_from_slice(b"image/png");
        out.extend_from_slice(&5_u32.to_be_bytes());
        out.extend_from_slice(b"front");
        for field in [640_u32, 480, 24, 0, data_length] {
            out.extend_from_slice(&field.to_be_bytes());
        }
        out.extend_from_slice(data);
        out
    }

    fn run_decode(flags: &[&str], input: &Path, out: &Path) -> Result<(), PictureErrors> {
        let mut args: Vec<OsString> = vec!["mbp".into(), "decode".into()];

        args.extend(flags.iter().map(OsString::from));
        args.push("-o".into());
        args.push(out.as_os_str().to_owned());
        args.push(input.as_os_str().to_owned());

        let matches = create_cmd_args().try_get_matches_from(args).unwrap();

        create_and_exec_workflow_from_cmd(&matches)
    }

    #[test]
    fn header_error_creates_no_output_file() {
        let input = temp_path("cut.bin");
        let out = temp_path("cut.out");
        // cut inside the description length
        std::fs::write(&input, &block_bytes(3, b"abc")[..19]).unwrap();

        let result = run_decode(&["-p"], &input, &out);
        std::fs::remove_file(&input).unwrap();

        assert!(result.unwrap_err().is_eof());
        assert!(!out.exists());
    }

    #[test]
    fn strict_truncation_creates_no_output_file() {
        let input = temp_path("strict.bin");
        let out = temp_path("strict.out");
        std::fs::write(&input, block_bytes(6, b"abc")).unwrap();

        let result = run_decode(&["-p", "--strict"], &input, &out);
        std::fs::remove_file(&input).unwrap();

        assert!(result.is_err());
        assert!(!out.exists());
    }

    #[test]
    fn raw_output_file_holds_payload_only() {
        let input = temp_path("raw.bin");
        let out = temp_path("raw.out");
        std::fs::write(&input, block_bytes(6, b"abc")).unwrap();

        run_decode(&["-p"], &input, &out).unwrap();
        let written = std::fs::read(&out).unwrap();

        std::fs::remove_file(&input).unwrap();
        std::fs::remove_file(&out).unwrap();

        assert_eq!(written, b"abc");
    }

    #[test]
    fn json_header_of_truncated_block() {
        let input = temp_path("json.bin");
        let out = temp_path("json.out");
        std::fs::write(&input, block_bytes(6, b"abc")).unwrap();

        run_decode(&["-j"], &input, &out).unwrap();
        let written = std::fs::read_to_string(&out).unwrap();

        std::fs::remove_file(&input).unwrap();
        std::fs::remove_file(&out).unwrap();

        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        let object = value.as_object().unwrap();
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();

        // the payload itself is never serialized
        assert_eq!(
            keys,
            [
                "color_depth",
                "data_length",
                "data_present",
                "description",
                "height",
                "mime",
                "palette_size",
                "picture_type",
                "truncated",
                "width"
            ]
        );
        assert_eq!(value["picture_type"]["index"], 3);
        assert_eq!(value["picture_type"]["description"], "Cover (front)");
        assert_eq!(value["mime"], "image/png");
        assert_eq!(value["description"], "front");
        assert_eq!(value["data_length"], 6);
        assert_eq!(value["data_present"], 3);
        assert_eq!(value["truncated"], true);
    }
}
