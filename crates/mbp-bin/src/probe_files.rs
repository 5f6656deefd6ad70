/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::{Path, PathBuf};

use clap::ArgMatches;
use log::warn;
use mbp_picture::{sniff, PictureErrors};

use crate::file_io::open_file;
use crate::serde::Metadata;

/// Sniff one image and render its properties as pretty JSON
pub fn probe_file(in_file: &Path) -> Result<String, PictureErrors> {
    let mut stream = open_file(in_file)?;
    let properties = sniff(&mut stream)?;
    let metadata = Metadata::new(in_file, &properties);

    Ok(serde_json::to_string_pretty(&metadata).map_err(std::io::Error::from)?)
}

/// Probe input files, extract their properties, and print them to standard output.
///
/// Files that cannot be read or are not JPEG or PNG are skipped with a warning,
/// the last such error is returned once every file has been tried.
pub fn probe_input_files(args: &ArgMatches) -> Result<(), PictureErrors> {
    let mut last_error = None;

    for in_file in args.get_many::<PathBuf>("in").into_iter().flatten() {
        match probe_file(in_file) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                warn!("Skipping {:?}: {:?}", in_file, err);
                last_error = Some(err);
            }
        }
    }
    match last_error {
        Some(err) => Err(err),
        None => Ok(())
    }
}
