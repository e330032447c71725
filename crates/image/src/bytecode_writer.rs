// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::io::Write;

use aqvm_isa::{opcode::Opcode, MemoryTag};

/// encode an operand index: 'value / 255' bytes of 0xFF followed by
/// the terminator 'value % 255'.
pub fn encode_operand_index(value: usize) -> Vec<u8> {
    let mut bytes = vec![0xFFu8; value / 255];
    bytes.push((value % 255) as u8);
    bytes
}

/// builds an instruction stream for the code segment of a program image.
pub struct BytecodeWriter {
    buffer: Vec<u8>, // trait std::io::Write
}

impl BytecodeWriter {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            buffer: Vec::<u8>::new(),
        }
    }

    pub fn append_opcode(mut self, opcode: Opcode) -> Self {
        self.buffer.write_all(&[opcode as u8]).unwrap();
        self
    }

    pub fn append_operand(mut self, index: usize) -> Self {
        self.buffer.write_all(&encode_operand_index(index)).unwrap();
        self
    }

    pub fn append_opcode_with_operands(mut self, opcode: Opcode, indices: &[usize]) -> Self {
        self = self.append_opcode(opcode);
        for index in indices {
            self = self.append_operand(*index);
        }
        self
    }

    /// raw bytes, for assembling deliberately malformed streams in tests.
    pub fn append_bytes(mut self, bytes: &[u8]) -> Self {
        self.buffer.write_all(bytes).unwrap();
        self
    }

    pub fn to_bytes(self) -> Vec<u8> {
        self.buffer
    }
}

/// builds a complete program image: header, data segment, nibble-packed
/// type tag segment and code segment.
///
/// the scalar 'put_*' functions write the value in native byte order and
/// tag the starting index, which is how the compiler toolchain lays out
/// initialized cells.
pub struct ImageWriter {
    data: Vec<u8>,
    type_tags: Vec<u8>,
    code: Vec<u8>,
}

impl ImageWriter {
    pub fn new(memory_size: usize) -> Self {
        Self {
            data: vec![0u8; memory_size],
            type_tags: vec![0u8; memory_size.div_ceil(2)],
            code: Vec::new(),
        }
    }

    pub fn set_tag(mut self, index: usize, tag: MemoryTag) -> Self {
        let packed = &mut self.type_tags[index / 2];
        if index % 2 == 0 {
            *packed = (*packed & 0x0F) | ((tag as u8) << 4);
        } else {
            *packed = (*packed & 0xF0) | (tag as u8);
        }
        self
    }

    pub fn write_data(mut self, offset: usize, bytes: &[u8]) -> Self {
        self.data[offset..(offset + bytes.len())].copy_from_slice(bytes);
        self
    }

    pub fn put_i8(self, offset: usize, value: i8) -> Self {
        self.write_data(offset, &value.to_ne_bytes())
            .set_tag(offset, MemoryTag::I8)
    }

    pub fn put_i32(self, offset: usize, value: i32) -> Self {
        self.write_data(offset, &value.to_ne_bytes())
            .set_tag(offset, MemoryTag::I32)
    }

    pub fn put_i64(self, offset: usize, value: i64) -> Self {
        self.write_data(offset, &value.to_ne_bytes())
            .set_tag(offset, MemoryTag::I64)
    }

    pub fn put_f32(self, offset: usize, value: f32) -> Self {
        self.write_data(offset, &value.to_ne_bytes())
            .set_tag(offset, MemoryTag::F32)
    }

    pub fn put_f64(self, offset: usize, value: f64) -> Self {
        self.write_data(offset, &value.to_ne_bytes())
            .set_tag(offset, MemoryTag::F64)
    }

    /// tag a cell as a pointer slot without initializing its bytes.
    pub fn put_ptr_slot(self, offset: usize) -> Self {
        self.set_tag(offset, MemoryTag::Ptr)
    }

    pub fn set_code(mut self, code: Vec<u8>) -> Self {
        self.code = code;
        self
    }

    pub fn to_bytes(self) -> Vec<u8> {
        let mut image_binary = Vec::with_capacity(
            16 + self.data.len() + self.type_tags.len() + self.code.len(),
        );

        image_binary.write_all(aqvm_isa::IMAGE_FILE_MAGIC_NUMBER).unwrap();
        image_binary.write_all(&[0u8; 4]).unwrap(); // reserved
        image_binary
            .write_all(&(self.data.len() as u64).to_be_bytes())
            .unwrap();
        image_binary.write_all(&self.data).unwrap();
        image_binary.write_all(&self.type_tags).unwrap();
        image_binary.write_all(&self.code).unwrap();

        image_binary
    }
}
