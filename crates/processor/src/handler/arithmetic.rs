// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use aqvm_context::vm_context::VmContext;

use crate::{
    handler::{
        kernel::{binary_arithmetic, binary_integer, unary_negate, ArithmeticOp, IntegerOp},
        read_operands, HandleResult,
    },
    ProcessorError,
};

pub fn add(context: &mut VmContext) -> Result<HandleResult, ProcessorError> {
    let ([result, operand1, operand2], next) = read_operands::<3>(context)?;
    binary_arithmetic(&mut context.memory, result, operand1, operand2, ArithmeticOp::Add)?;
    Ok(HandleResult::Move(next))
}

pub fn sub(context: &mut VmContext) -> Result<HandleResult, ProcessorError> {
    let ([result, operand1, operand2], next) = read_operands::<3>(context)?;
    binary_arithmetic(&mut context.memory, result, operand1, operand2, ArithmeticOp::Sub)?;
    Ok(HandleResult::Move(next))
}

pub fn mul(context: &mut VmContext) -> Result<HandleResult, ProcessorError> {
    let ([result, operand1, operand2], next) = read_operands::<3>(context)?;
    binary_arithmetic(&mut context.memory, result, operand1, operand2, ArithmeticOp::Mul)?;
    Ok(HandleResult::Move(next))
}

pub fn div(context: &mut VmContext) -> Result<HandleResult, ProcessorError> {
    let ([result, operand1, operand2], next) = read_operands::<3>(context)?;
    binary_arithmetic(&mut context.memory, result, operand1, operand2, ArithmeticOp::Div)?;
    Ok(HandleResult::Move(next))
}

pub fn rem(context: &mut VmContext) -> Result<HandleResult, ProcessorError> {
    let ([result, operand1, operand2], next) = read_operands::<3>(context)?;
    binary_integer(&mut context.memory, result, operand1, operand2, IntegerOp::Rem)?;
    Ok(HandleResult::Move(next))
}

pub fn neg(context: &mut VmContext) -> Result<HandleResult, ProcessorError> {
    let ([result, operand1], next) = read_operands::<2>(context)?;
    unary_negate(&mut context.memory, result, operand1)?;
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
    fn test_handler_add_i32() {
        // cells: 0 -> result (i32), 4 -> 7 (i32), 8 -> 5 (i32)
        let code = BytecodeWriter::new()
            .append_opcode_with_operands(Opcode::add, &[0, 4, 8])
            .to_bytes();

        let image_binary = ImageWriter::new(12)
            .put_i32(0, 0)
            .put_i32(4, 7)
            .put_i32(8, 5)
            .set_code(code)
            .to_bytes();

        let handler = Handler::new();
        let mut context = create_vm_context(ProgramImage::load(&image_binary).unwrap());
        process_program(&handler, &mut context).unwrap();

        assert_eq!(context.memory.read_i32(0).unwrap(), 12);
    }

    #[test]
    fn test_handler_add_promotes_to_dominant_tag() {
        // result i32, operands i8 and i64: the addition runs as i64
        // and the result cell keeps the low 32 bits.
        //
        // 0x1_0000_0003 + 2 = 0x1_0000_0005, truncated to 5
        let code = BytecodeWriter::new()
            .append_opcode_with_operands(Opcode::add, &[0, 8, 16])
            .to_bytes();

        let image_binary = ImageWriter::new(17)
            .put_i32(0, 0)
            .put_i64(8, 0x1_0000_0003)
            .put_i8(16, 2)
            .set_code(code)
            .to_bytes();

        let handler = Handler::new();
        let mut context = create_vm_context(ProgramImage::load(&image_binary).unwrap());
        process_program(&handler, &mut context).unwrap();

        assert_eq!(context.memory.read_i32(0).unwrap(), 5);
    }

    #[test]
    fn test_handler_add_float_dominates_integers() {
        // one f64 operand pulls the whole operation into the f64
        // domain, the i32 result cell receives the truncated value
        let code = BytecodeWriter::new()
            .append_opcode_with_operands(Opcode::add, &[0, 8, 16])
            .to_bytes();

        let image_binary = ImageWriter::new(20)
            .put_i32(0, 0)
            .put_f64(8, 2.5)
            .put_i32(16, 4)
            .set_code(code)
            .to_bytes();

        let handler = Handler::new();
        let mut context = create_vm_context(ProgramImage::load(&image_binary).unwrap());
        process_program(&handler, &mut context).unwrap();

        // 2.5 + 4.0 = 6.5, into an i32 cell -> 6
        assert_eq!(context.memory.read_i32(0).unwrap(), 6);
    }

    #[test]
    fn test_handler_sub_mul_div() {
        // 0: result (i64), 8: 211 (i64), 16: -13 (i64)
        let code = BytecodeWriter::new()
            .append_opcode_with_operands(Opcode::sub, &[0, 8, 16])
            .to_bytes();

        let image_binary = ImageWriter::new(24)
            .put_i64(0, 0)
            .put_i64(8, 211)
            .put_i64(16, -13)
            .set_code(code)
            .to_bytes();

        let handler = Handler::new();
        let mut context = create_vm_context(ProgramImage::load(&image_binary).unwrap());
        process_program(&handler, &mut context).unwrap();
        assert_eq!(context.memory.read_i64(0).unwrap(), 224);

        let code = BytecodeWriter::new()
            .append_opcode_with_operands(Opcode::mul, &[0, 8, 16])
            .to_bytes();

        let image_binary = ImageWriter::new(24)
            .put_i64(0, 0)
            .put_i64(8, 211)
            .put_i64(16, -13)
            .set_code(code)
            .to_bytes();

        let mut context = create_vm_context(ProgramImage::load(&image_binary).unwrap());
        process_program(&handler, &mut context).unwrap();
        assert_eq!(context.memory.read_i64(0).unwrap(), -2743);

        let code = BytecodeWriter::new()
            .append_opcode_with_operands(Opcode::div, &[0, 8, 16])
            .to_bytes();

        let image_binary = ImageWriter::new(24)
            .put_i64(0, 0)
            .put_i64(8, 211)
            .put_i64(16, -13)
            .set_code(code)
            .to_bytes();

        let mut context = create_vm_context(ProgramImage::load(&image_binary).unwrap());
        process_program(&handler, &mut context).unwrap();
        assert_eq!(context.memory.read_i64(0).unwrap(), -16);
    }

    #[test]
    fn test_handler_div_by_zero() {
        let code = BytecodeWriter::new()
            .append_opcode_with_operands(Opcode::div, &[0, 4, 8])
            .to_bytes();

        let image_binary = ImageWriter::new(12)
            .put_i32(0, 0)
            .put_i32(4, 7)
            .put_i32(8, 0)
            .set_code(code)
            .to_bytes();

        let handler = Handler::new();
        let mut context = create_vm_context(ProgramImage::load(&image_binary).unwrap());
        let error = process_program(&handler, &mut context).unwrap_err();

        assert!(matches!(
            error.error_type,
            ProcessorErrorType::IntegerDivisionByZero
        ));
    }

    #[test]
    fn test_handler_float_div_by_zero_is_not_fatal() {
        let code = BytecodeWriter::new()
            .append_opcode_with_operands(Opcode::div, &[0, 8, 16])
            .to_bytes();

        let image_binary = ImageWriter::new(24)
            .put_f64(0, 0.0)
            .put_f64(8, 1.0)
            .put_f64(16, 0.0)
            .set_code(code)
            .to_bytes();

        let handler = Handler::new();
        let mut context = create_vm_context(ProgramImage::load(&image_binary).unwrap());
        process_program(&handler, &mut context).unwrap();

        assert_eq!(context.memory.read_f64(0).unwrap(), f64::INFINITY);
    }

    #[test]
    fn test_handler_rem() {
        let code = BytecodeWriter::new()
            .append_opcode_with_operands(Opcode::rem, &[0, 8, 16])
            .to_bytes();

        let image_binary = ImageWriter::new(24)
            .put_i64(0, 0)
            .put_i64(8, 211)
            .put_i64(16, -13)
            .set_code(code)
            .to_bytes();

        let handler = Handler::new();
        let mut context = create_vm_context(ProgramImage::load(&image_binary).unwrap());
        process_program(&handler, &mut context).unwrap();

        // the remainder takes the sign of the dividend
        assert_eq!(context.memory.read_i64(0).unwrap(), 3);
    }

    #[test]
    fn test_handler_rem_rejects_float_operands() {
        let code = BytecodeWriter::new()
            .append_opcode_with_operands(Opcode::rem, &[0, 8, 16])
            .to_bytes();

        let image_binary = ImageWriter::new(24)
            .put_i64(0, 0)
            .put_f64(8, 7.0)
            .put_i64(16, 2)
            .set_code(code)
            .to_bytes();

        let handler = Handler::new();
        let mut context = create_vm_context(ProgramImage::load(&image_binary).unwrap());
        let error = process_program(&handler, &mut context).unwrap_err();

        assert!(matches!(
            error.error_type,
            ProcessorErrorType::UnsupportedOperandTypes("rem")
        ));
    }

    #[test]
    fn test_handler_arithmetic_rejects_untyped_cells() {
        let code = BytecodeWriter::new()
            .append_opcode_with_operands(Opcode::add, &[0, 8, 16])
            .to_bytes();

        // cell 8 keeps the default untyped tag
        let image_binary = ImageWriter::new(24)
            .put_i64(0, 0)
            .put_i64(16, 2)
            .set_code(code)
            .to_bytes();

        let handler = Handler::new();
        let mut context = create_vm_context(ProgramImage::load(&image_binary).unwrap());
        let error = process_program(&handler, &mut context).unwrap_err();

        assert!(matches!(
            error.error_type,
            ProcessorErrorType::UnsupportedOperandTypes("add")
        ));
    }

    #[test]
    fn test_handler_neg() {
        let code = BytecodeWriter::new()
            .append_opcode_with_operands(Opcode::neg, &[0, 8])
            .to_bytes();

        let image_binary = ImageWriter::new(16)
            .put_i64(0, 0)
            .put_i64(8, -42)
            .set_code(code)
            .to_bytes();

        let handler = Handler::new();
        let mut context = create_vm_context(ProgramImage::load(&image_binary).unwrap());
        process_program(&handler, &mut context).unwrap();

        assert_eq!(context.memory.read_i64(0).unwrap(), 42);
    }

    #[test]
    fn test_handler_neg_f32() {
        let code = BytecodeWriter::new()
            .append_opcode_with_operands(Opcode::neg, &[0, 4])
            .to_bytes();

        let image_binary = ImageWriter::new(8)
            .put_f32(0, 0.0)
            .put_f32(4, 2.5)
            .set_code(code)
            .to_bytes();

        let handler = Handler::new();
        let mut context = create_vm_context(ProgramImage::load(&image_binary).unwrap());
        process_program(&handler, &mut context).unwrap();

        assert_eq!(context.memory.read_f32(0).unwrap(), -2.5);
    }
}
