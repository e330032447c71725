// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

// the host bridge
// ---------------
//
//  bytecode                                    native
// /--------------------------\                /------------------\
// | invoke                   |                |                  |
// |   func  -> cell with a   | --(name)-----> | registry lookup  |
// |            pointer to    |                |                  |
// |            "print\0"     |                | fn(memory,       |
// |   ret   -> return cell   | --(indices)--> |    args,         |
// |   argc  -> cell with n   |                |    results)      |
// |   arg 0..n               | <--(writes)--- |                  |
// \--------------------------/                \------------------/
//
// the callee works directly on the typed memory with the indices it
// receives, there is no marshalling of values across the boundary.

use aqvm_context::vm_context::VmContext;
use aqvm_image::bytecode_reader::read_operand_index;

use crate::{handler::HandleResult, ProcessorError, ProcessorErrorType};

/// collect the bytes of a NUL-terminated string living at a host
/// address (the name a 'invoke' resolves was placed into the program's
/// address domain with 'ptr' or 'new'/'store').
pub(crate) fn read_zero_terminated(address: usize) -> Vec<u8> {
    let mut bytes = Vec::new();
    let mut cursor = address as *const u8;

    unsafe {
        while *cursor != 0 {
            bytes.push(*cursor);
            cursor = cursor.add(1);
        }
    }

    bytes
}

pub fn invoke(context: &mut VmContext) -> Result<HandleResult, ProcessorError> {
    let mut position = context.pc + 1;
    let mut next_operand = |code: &[u8]| -> Result<usize, ProcessorError> {
        let (value, next) = read_operand_index(code, position)
            .ok_or_else(|| ProcessorError::new(ProcessorErrorType::UnexpectedEndOfCode))?;
        position = next;
        Ok(value)
    };

    let func_idx = next_operand(&context.code)?;
    let return_idx = next_operand(&context.code)?;
    let argc_idx = next_operand(&context.code)?;

    let argument_count = context.memory.read_value(argc_idx)?.to_i64()?;
    if argument_count < 0 {
        return Err(ProcessorError::new(
            ProcessorErrorType::InvalidArgumentCount(argument_count),
        ));
    }

    let mut arg_indices = Vec::with_capacity(argument_count as usize);
    for _ in 0..argument_count {
        arg_indices.push(next_operand(&context.code)?);
    }

    let name_address = context.memory.load_ptr(func_idx)?;
    let name = read_zero_terminated(name_address);

    log::debug!(
        "invoke \"{}\" with {} arguments",
        String::from_utf8_lossy(&name),
        argument_count
    );

    let function = context.host_functions.find(&name).ok_or_else(|| {
        ProcessorError::new(ProcessorErrorType::HostFunctionNotFound(
            String::from_utf8_lossy(&name).into_owned(),
        ))
    })?;

    function(&mut context.memory, &arg_indices, &[return_idx])
        .map_err(|error| ProcessorError::new(ProcessorErrorType::HostFunctionFailed(error)))?;

    Ok(HandleResult::Move(position))
}
