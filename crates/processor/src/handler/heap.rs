// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use aqvm_context::vm_context::VmContext;

use crate::{
    handler::{read_operands, HandleResult},
    ProcessorError, ProcessorErrorType,
};

// 'new' and 'free' manage the program's own allocation pool. the
// program is responsible for pairing them, the pool only guarantees
// that a mispaired 'free' is reported instead of corrupting the host
// heap.

pub fn new(context: &mut VmContext) -> Result<HandleResult, ProcessorError> {
    let ([dst, size_idx], next) = read_operands::<2>(context)?;

    let size_in_bytes = context.memory.read_value(size_idx)?.to_i64()?;
    if size_in_bytes < 0 {
        return Err(ProcessorError::new(
            ProcessorErrorType::InvalidAllocationSize(size_in_bytes),
        ));
    }

    let address = context.allocator.allocate(size_in_bytes as usize);
    context.memory.store_ptr(dst, address)?;

    Ok(HandleResult::Move(next))
}

pub fn free(context: &mut VmContext) -> Result<HandleResult, ProcessorError> {
    let ([ptr_idx], next) = read_operands::<1>(context)?;

    let address = context.memory.load_ptr(ptr_idx)?;
    context.allocator.free(address)?;

    Ok(HandleResult::Move(next))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use aqvm_image::{
        bytecode_writer::{BytecodeWriter, ImageWriter},
        program_image::ProgramImage,
    };
    use aqvm_isa::opcode::Opcode;

    use crate::{
        handler::Handler,
        process::{create_vm_context, process_program},
        ProcessorErrorType,
    };

    #[test]
    fn test_handler_new_and_free() {
        // new 0, 8   ; cell 0 <- address of a fresh 16-byte block
        // free 0     ; release it again
        let code = BytecodeWriter::new()
            .append_opcode_with_operands(Opcode::new, &[0, 8])
            .append_opcode_with_operands(Opcode::free, &[0])
            .to_bytes();

        let image_binary = ImageWriter::new(16)
            .put_ptr_slot(0)
            .put_i64(8, 16)
            .set_code(code)
            .to_bytes();

        let handler = Handler::new();
        let mut context = create_vm_context(ProgramImage::load(&image_binary).unwrap());
        process_program(&handler, &mut context).unwrap();

        assert_eq!(context.allocator.count(), 0);
    }

    #[test]
    fn test_handler_new_store_free_round_trip() {
        // new 0, 8     ; allocate 16 bytes, address in cell 0
        // store 0, 16  ; copy the i32 at 16 into the block
        // free 0
        let code = BytecodeWriter::new()
            .append_opcode_with_operands(Opcode::new, &[0, 8])
            .append_opcode_with_operands(Opcode::store, &[0, 16])
            .append_opcode_with_operands(Opcode::free, &[0])
            .to_bytes();

        let image_binary = ImageWriter::new(20)
            .put_ptr_slot(0)
            .put_i64(8, 16)
            .put_i32(16, 0x600D600D)
            .set_code(code)
            .to_bytes();

        let handler = Handler::new();
        let mut context = create_vm_context(ProgramImage::load(&image_binary).unwrap());
        process_program(&handler, &mut context).unwrap();

        assert_eq!(context.allocator.count(), 0);
    }

    #[test]
    fn test_handler_new_leaves_block_alive() {
        let code = BytecodeWriter::new()
            .append_opcode_with_operands(Opcode::new, &[0, 8])
            .to_bytes();

        let image_binary = ImageWriter::new(16)
            .put_ptr_slot(0)
            .put_i64(8, 4)
            .set_code(code)
            .to_bytes();

        let handler = Handler::new();
        let mut context = create_vm_context(ProgramImage::load(&image_binary).unwrap());
        process_program(&handler, &mut context).unwrap();

        let address = context.memory.load_ptr(0).unwrap();
        assert!(context.allocator.contains(address));
        assert_eq!(context.allocator.count(), 1);
    }

    #[test]
    fn test_handler_double_free() {
        let code = BytecodeWriter::new()
            .append_opcode_with_operands(Opcode::new, &[0, 8])
            .append_opcode_with_operands(Opcode::free, &[0])
            .append_opcode_with_operands(Opcode::free, &[0])
            .to_bytes();

        let image_binary = ImageWriter::new(16)
            .put_ptr_slot(0)
            .put_i64(8, 8)
            .set_code(code)
            .to_bytes();

        let handler = Handler::new();
        let mut context = create_vm_context(ProgramImage::load(&image_binary).unwrap());
        let error = process_program(&handler, &mut context).unwrap_err();

        assert!(matches!(error.error_type, ProcessorErrorType::Context(_)));
    }

    #[test]
    fn test_handler_new_with_negative_size() {
        let code = BytecodeWriter::new()
            .append_opcode_with_operands(Opcode::new, &[0, 8])
            .to_bytes();

        let image_binary = ImageWriter::new(16)
            .put_ptr_slot(0)
            .put_i64(8, -1)
            .set_code(code)
            .to_bytes();

        let handler = Handler::new();
        let mut context = create_vm_context(ProgramImage::load(&image_binary).unwrap());
        let error = process_program(&handler, &mut context).unwrap_err();

        assert!(matches!(
            error.error_type,
            ProcessorErrorType::InvalidAllocationSize(-1)
        ));
    }
}
