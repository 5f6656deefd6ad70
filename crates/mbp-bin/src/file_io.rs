/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fs::{File, OpenOptions};
use std::io::{stdin, stdout, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use log::info;
use mbp_core::bytestream::{ByteCursor, ByteReader};
use mbp_picture::PictureErrors;

/// Open a file for header sniffing and reading
pub fn open_file(path: &Path) -> Result<ByteReader<BufReader<File>>, PictureErrors> {
    info!("Reading {:?}", path);

    Ok(ByteReader::new(BufReader::new(File::open(path)?)))
}

/// Read all of standard input into memory
///
/// Standard input cannot seek, so it is buffered whole.
pub fn read_stdin() -> Result<ByteReader<ByteCursor<Vec<u8>>>, PictureErrors> {
    info!("Reading from standard input");

    let mut data = Vec::new();
    stdin().lock().read_to_end(&mut data)?;

    Ok(ByteReader::new(ByteCursor::new(data)))
}

/// The file named on the command line, `None` for standard input
///
/// A missing path and `-` both mean standard input.
pub fn named_file(path: Option<&PathBuf>) -> Option<&Path> {
    path.filter(|p| p.as_os_str() != "-").map(PathBuf::as_path)
}

/// Write `bytes` to `out`, or to standard output if absent
///
/// The file is only created here, so nothing is written when
/// an earlier step failed.
pub fn write_output(out: Option<&PathBuf>, bytes: &[u8]) -> Result<(), PictureErrors> {
    match out {
        Some(path) => {
            info!("Writing {} bytes to {:?}", bytes.len(), path);

            let file = OpenOptions::new()
                .write(true)
                .truncate(true)
                .create(true)
                .open(path)?;

            let mut writer = BufWriter::new(file);
            writer.write_all(bytes)?;
            writer.flush()?;
        }
        None => {
            let mut writer = stdout().lock();
            writer.write_all(bytes)?;
            writer.flush()?;
        }
    }
    Ok(())
}
