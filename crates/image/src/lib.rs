// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::fmt::Display;

pub mod bytecode_reader;
pub mod bytecode_writer;
pub mod program_image;
pub mod utils;

#[derive(Debug, PartialEq)]
pub enum ImageErrorType {
    // the first four bytes are not the expected magic number
    InvalidMagicNumber,

    // the image ends before the fixed 16-byte header does
    TruncatedHeader,

    // the image declares more data bytes than it carries
    DataSegmentTruncated,

    // the type tag segment is shorter than 'ceil(memory_size / 2)' bytes
    TypeSegmentTruncated,
}

#[derive(Debug)]
pub struct ImageError {
    pub error_type: ImageErrorType,
}

impl ImageError {
    pub fn new(error_type: ImageErrorType) -> Self {
        Self { error_type }
    }
}

impl Display for ImageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.error_type {
            ImageErrorType::InvalidMagicNumber => {
                write!(f, "Not a program image, the magic number does not match.")
            }
            ImageErrorType::TruncatedHeader => {
                write!(f, "The program image is shorter than its header.")
            }
            ImageErrorType::DataSegmentTruncated => {
                write!(
                    f,
                    "The program image declares more memory than the data segment carries."
                )
            }
            ImageErrorType::TypeSegmentTruncated => {
                write!(f, "The type tag segment of the program image is truncated.")
            }
        }
    }
}

impl std::error::Error for ImageError {}
