// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

// the binary layout of a program image
// ------------------------------------
//
// |--------------------------------------------------------------|
// | magic number (u32) "AQBC"                                    |
// | reserved (u32)                                               |
// | memory size M (u64, big endian)                              |
// |--------------------------------------------------------------|
// | data segment, M bytes                                        |
// |--------------------------------------------------------------|
// | type tag segment, ceil(M / 2) bytes, two 4-bit tags per byte |
// |--------------------------------------------------------------|
// | code segment, all remaining bytes                            |
// |--------------------------------------------------------------|
//
// the data and type tag segments become the initial contents of the
// typed memory, the code segment is executed from its first byte to
// its last. there is no entry point field and no section table, the
// image is a memory snapshot followed by code.

use crate::{ImageError, ImageErrorType};

const IMAGE_HEADER_LENGTH: usize = 16;
const OFFSET_MEMORY_SIZE: usize = 8;

#[derive(Debug, PartialEq)]
pub struct ProgramImage {
    pub memory_size: usize,
    pub data: Vec<u8>,
    pub type_tags: Vec<u8>,
    pub code: Vec<u8>,
}

impl ProgramImage {
    /// split a raw image into its segments.
    ///
    /// the magic number is checked before anything else so that a
    /// rejected image allocates nothing.
    pub fn load(image_binary: &[u8]) -> Result<Self, ImageError> {
        let magic_length = aqvm_isa::IMAGE_FILE_MAGIC_NUMBER.len();
        if image_binary.len() < magic_length
            || image_binary[..magic_length] != *aqvm_isa::IMAGE_FILE_MAGIC_NUMBER
        {
            return Err(ImageError::new(ImageErrorType::InvalidMagicNumber));
        }

        if image_binary.len() < IMAGE_HEADER_LENGTH {
            return Err(ImageError::new(ImageErrorType::TruncatedHeader));
        }

        let memory_size = u64::from_be_bytes(
            image_binary[OFFSET_MEMORY_SIZE..IMAGE_HEADER_LENGTH]
                .try_into()
                .unwrap(),
        ) as usize;

        let body = &image_binary[IMAGE_HEADER_LENGTH..];
        if body.len() < memory_size {
            return Err(ImageError::new(ImageErrorType::DataSegmentTruncated));
        }

        let type_tags_length = memory_size.div_ceil(2);
        let (data, rest) = body.split_at(memory_size);
        if rest.len() < type_tags_length {
            return Err(ImageError::new(ImageErrorType::TypeSegmentTruncated));
        }

        let (type_tags, code) = rest.split_at(type_tags_length);

        log::debug!(
            "program image: {} bytes of memory, {} bytes of code",
            memory_size,
            code.len()
        );

        Ok(Self {
            memory_size,
            data: data.to_vec(),
            type_tags: type_tags.to_vec(),
            code: code.to_vec(),
        })
    }
}
