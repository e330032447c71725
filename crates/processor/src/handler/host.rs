// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use aqvm_context::vm_context::VmContext;

use crate::{
    handler::{read_operands, HandleResult},
    ProcessorError,
};

/// store the host address of a memory cell into another cell.
///
/// this is how a program builds the pointers that 'store', 'free' and
/// host functions consume, the addresses are only meaningful within
/// the current run.
pub fn ptr(context: &mut VmContext) -> Result<HandleResult, ProcessorError> {
    let ([index, dst], next) = read_operands::<2>(context)?;

    let address = context.memory.get_mut_ptr(index)? as usize;
    context.memory.store_ptr(dst, address)?;

    Ok(HandleResult::Move(next))
}
