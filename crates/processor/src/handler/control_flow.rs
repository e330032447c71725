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

// branch targets are 64-bit values read from memory cells and are
// ABSOLUTE offsets within the code region. a target at or past the end
// of the code ends the program, a negative target is a fault.

fn jump_to(target: i64) -> Result<HandleResult, ProcessorError> {
    let offset = usize::try_from(target)
        .map_err(|_| ProcessorError::new(ProcessorErrorType::InvalidJumpTarget(target)))?;
    Ok(HandleResult::Jump(offset))
}

pub fn if_(context: &mut VmContext) -> Result<HandleResult, ProcessorError> {
    let ([cond, true_idx, false_idx], _next) = read_operands::<3>(context)?;

    let truth = context.memory.read_value(cond)?.to_i8()?;
    let target_idx = if truth != 0 { true_idx } else { false_idx };
    let target = context.memory.read_value(target_idx)?.to_i64()?;

    jump_to(target)
}

pub fn goto(context: &mut VmContext) -> Result<HandleResult, ProcessorError> {
    let ([offset_idx], _next) = read_operands::<1>(context)?;

    let target = context.memory.read_value(offset_idx)?.to_i64()?;
    jump_to(target)
}
