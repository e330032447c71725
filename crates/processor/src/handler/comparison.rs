// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use aqvm_context::vm_context::VmContext;
use aqvm_isa::{ComparisonOperator, MemoryTag};
use aqvm_memory::typed_memory::TypedValue;

use crate::{
    handler::{kernel::dominant_tag, read_operands, HandleResult},
    ProcessorError, ProcessorErrorType,
};

fn compare<T: PartialOrd>(operator: ComparisonOperator, left: T, right: T) -> bool {
    match operator {
        ComparisonOperator::Equal => left == right,
        ComparisonOperator::NotEqual => left != right,
        ComparisonOperator::LessThan => left < right,
        ComparisonOperator::LessThanOrEqual => left <= right,
        ComparisonOperator::GreaterThan => left > right,
        ComparisonOperator::GreaterThanOrEqual => left >= right,
    }
}

/// the fused comparator.
///
/// the comparison code lives in a memory cell like every other
/// operand. the operands promote exactly like the arithmetic
/// instructions, and the truth value 0/1 is stored converted into the
/// result cell's domain.
pub fn cmp(context: &mut VmContext) -> Result<HandleResult, ProcessorError> {
    let ([result, operator_idx, operand1, operand2], next) = read_operands::<4>(context)?;

    let code = context.memory.read_value(operator_idx)?.to_i8()?;
    let operator = ComparisonOperator::from_u8(code as u8)
        .ok_or_else(|| ProcessorError::new(ProcessorErrorType::UnknownComparison(code)))?;

    let memory = &mut context.memory;
    let truth = match dominant_tag(memory, &[result, operand1, operand2], "cmp")? {
        MemoryTag::I8 => compare(
            operator,
            memory.read_value(operand1)?.to_i8()?,
            memory.read_value(operand2)?.to_i8()?,
        ),
        MemoryTag::I32 => compare(
            operator,
            memory.read_value(operand1)?.to_i32()?,
            memory.read_value(operand2)?.to_i32()?,
        ),
        MemoryTag::I64 => compare(
            operator,
            memory.read_value(operand1)?.to_i64()?,
            memory.read_value(operand2)?.to_i64()?,
        ),
        MemoryTag::F32 => compare(
            operator,
            memory.read_value(operand1)?.to_f32()?,
            memory.read_value(operand2)?.to_f32()?,
        ),
        MemoryTag::F64 => compare(
            operator,
            memory.read_value(operand1)?.to_f64()?,
            memory.read_value(operand2)?.to_f64()?,
        ),
        MemoryTag::Ptr => unreachable!(),
    };

    memory.write_value(result, TypedValue::I64(truth as i64))?;
    Ok(HandleResult::Move(next))
}
