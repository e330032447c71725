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

// 'load' and 'store' size their copies by a tag the image names, not
// by the amount of initialized data: 'load' moves as many bytes as the
// DESTINATION cell's tag is wide, 'store' as many as the SOURCE cell's
// tag is wide. untyped cells size as pointers.

pub fn load(context: &mut VmContext) -> Result<HandleResult, ProcessorError> {
    let ([src, dst], next) = read_operands::<2>(context)?;

    let length_in_bytes = context.memory.tag(dst)?.size_in_bytes();
    let bytes = context.memory.read_bytes(src, length_in_bytes)?.to_vec();
    context.memory.write_bytes(dst, &bytes)?;

    Ok(HandleResult::Move(next))
}

pub fn store(context: &mut VmContext) -> Result<HandleResult, ProcessorError> {
    let ([ptr_idx, src], next) = read_operands::<2>(context)?;

    let destination = context.memory.load_ptr(ptr_idx)?;
    let length_in_bytes = context.memory.tag(src)?.size_in_bytes();
    let bytes = context.memory.read_bytes(src, length_in_bytes)?.to_vec();

    // the destination is an address in the program's domain (a 'new'
    // block or a 'ptr' result). the VM trusts it, exactly as it trusts
    // the image's type layout.
    unsafe {
        std::ptr::copy(bytes.as_ptr(), destination as *mut u8, length_in_bytes);
    }

    Ok(HandleResult::Move(next))
}
