/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core routines shared by the picture block tools
//!
//! This crate currently contains a bytestream reader and writer
//! with endian aware reads and writes.
//!
//! Readers and writers are always passed explicitly to the routines
//! that need them, nothing here holds global stream state.
pub mod bytestream;
