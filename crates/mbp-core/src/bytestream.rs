/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A simple implementation of a bytestream reader
//! and writer.
//!
//! This module contains two main structs that help in
//! byte reading and byte writing
//!
//! Useful for a lot of binary container formats, it provides
//! endian aware reads for integer sizes the picture block and
//! the image headers need.
pub use reader::{ByteIoError, ByteReader, ByteSeekFrom, PartialRead};
pub use reader::cursor::ByteCursor;
pub use traits::*;
pub use writer::ByteWriter;

mod reader;
mod traits;
mod writer;
