// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use aqvm_context::vm_context::VmContext;
use aqvm_image::program_image::ProgramImage;

use crate::{
    builtins,
    handler::{HandleResult, Handler},
    ProcessorError,
};

/// build a VM context from a loaded image and populate its registry
/// with the built-in host functions.
pub fn create_vm_context(image: ProgramImage) -> VmContext {
    let mut context = VmContext::new(image);
    builtins::install_builtin_functions(&mut context.host_functions);
    context
}

/// the fetch-decode-execute loop.
///
/// runs from the current program counter until the counter reaches the
/// end of the code region or an instruction faults. control transfers
/// land wherever their target says, a target at or past the end simply
/// ends the program.
pub fn process_program(handler: &Handler, context: &mut VmContext) -> Result<(), ProcessorError> {
    log::info!(
        "program started, {} bytes of memory, {} bytes of code",
        context.memory.size_in_bytes(),
        context.code.len()
    );

    while context.pc < context.code.len() {
        let opcode_num = context.code[context.pc];
        log::trace!("opcode {:#04x} at {:#06x}", opcode_num, context.pc);

        let function = handler.handlers[opcode_num as usize];
        match function(context)? {
            HandleResult::Move(next) => context.pc = next,
            HandleResult::Jump(target) => context.pc = target,
        }
    }

    log::info!("program finished");
    Ok(())
}
