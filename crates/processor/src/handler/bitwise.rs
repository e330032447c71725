// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use aqvm_context::vm_context::VmContext;

use crate::{
    handler::{
        kernel::{binary_integer, IntegerOp},
        read_operands, HandleResult,
    },
    ProcessorError,
};

pub fn shl(context: &mut VmContext) -> Result<HandleResult, ProcessorError> {
    let ([result, operand1, operand2], next) = read_operands::<3>(context)?;
    binary_integer(&mut context.memory, result, operand1, operand2, IntegerOp::Shl)?;
    Ok(HandleResult::Move(next))
}

pub fn shr(context: &mut VmContext) -> Result<HandleResult, ProcessorError> {
    let ([result, operand1, operand2], next) = read_operands::<3>(context)?;
    binary_integer(&mut context.memory, result, operand1, operand2, IntegerOp::Shr)?;
    Ok(HandleResult::Move(next))
}

pub fn sar(context: &mut VmContext) -> Result<HandleResult, ProcessorError> {
    let ([result, operand1, operand2], next) = read_operands::<3>(context)?;
    binary_integer(&mut context.memory, result, operand1, operand2, IntegerOp::Sar)?;
    Ok(HandleResult::Move(next))
}

pub fn and(context: &mut VmContext) -> Result<HandleResult, ProcessorError> {
    let ([result, operand1, operand2], next) = read_operands::<3>(context)?;
    binary_integer(&mut context.memory, result, operand1, operand2, IntegerOp::And)?;
    Ok(HandleResult::Move(next))
}

pub fn or(context: &mut VmContext) -> Result<HandleResult, ProcessorError> {
    let ([result, operand1, operand2], next) = read_operands::<3>(context)?;
    binary_integer(&mut context.memory, result, operand1, operand2, IntegerOp::Or)?;
    Ok(HandleResult::Move(next))
}

pub fn xor(context: &mut VmContext) -> Result<HandleResult, ProcessorError> {
    let ([result, operand1, operand2], next) = read_operands::<3>(context)?;
    binary_integer(&mut context.memory, result, operand1, operand2, IntegerOp::Xor)?;
    Ok(HandleResult::Move(next))
}
