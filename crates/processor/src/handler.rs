// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use aqvm_context::vm_context::VmContext;
use aqvm_image::bytecode_reader::read_operand_index;
use aqvm_isa::opcode::{Opcode, MAX_OPCODE_NUMBER};

use crate::{ProcessorError, ProcessorErrorType};

pub type HandleFunc = fn(&mut VmContext) -> Result<HandleResult, ProcessorError>;

mod arithmetic;
mod bitwise;
mod calling;
mod comparison;
mod control_flow;
mod data;
mod fundamental;
mod heap;
mod host;
mod kernel;

pub(crate) use calling::read_zero_terminated;

pub enum HandleResult {
    // continue at the given code offset, i.e. the byte after the
    // instruction's last operand
    Move(usize),

    // control transfer to an absolute offset within the code region.
    // an offset at or past the end of the code ends the program, that
    // is how the loop condition reads it.
    Jump(usize),
}

// a handler is entered with the program counter still at its opcode
// byte, the operands start one byte later.
pub(crate) fn read_operands<const COUNT: usize>(
    context: &VmContext,
) -> Result<([usize; COUNT], usize), ProcessorError> {
    let mut values = [0usize; COUNT];
    let mut position = context.pc + 1;

    for value in &mut values {
        let (decoded, next) = read_operand_index(&context.code, position)
            .ok_or_else(|| ProcessorError::new(ProcessorErrorType::UnexpectedEndOfCode))?;
        *value = decoded;
        position = next;
    }

    Ok((values, position))
}

fn unknown_opcode_handler(context: &mut VmContext) -> Result<HandleResult, ProcessorError> {
    let opcode = context.code[context.pc];

    log::error!(
        "undefined opcode {:#04x} at code offset {:#06x}:\n{}",
        opcode,
        context.pc,
        aqvm_image::utils::format_bytecode_as_binary(&context.code[context.pc..])
    );

    Err(ProcessorError::new(ProcessorErrorType::UnknownOpcode {
        opcode,
        address: context.pc,
    }))
}

pub struct Handler {
    pub handlers: [HandleFunc; MAX_OPCODE_NUMBER],
}

impl Handler {
    pub fn new() -> Self {
        let mut handlers: [HandleFunc; MAX_OPCODE_NUMBER] =
            [unknown_opcode_handler; MAX_OPCODE_NUMBER];

        // fundamental
        handlers[Opcode::nop as usize] = fundamental::nop;

        // data movement
        handlers[Opcode::load as usize] = data::load;
        handlers[Opcode::store as usize] = data::store;

        // program allocations
        handlers[Opcode::new as usize] = heap::new;
        handlers[Opcode::free as usize] = heap::free;

        // host address
        handlers[Opcode::ptr as usize] = host::ptr;

        // arithmetic
        handlers[Opcode::add as usize] = arithmetic::add;
        handlers[Opcode::sub as usize] = arithmetic::sub;
        handlers[Opcode::mul as usize] = arithmetic::mul;
        handlers[Opcode::div as usize] = arithmetic::div;
        handlers[Opcode::rem as usize] = arithmetic::rem;
        handlers[Opcode::neg as usize] = arithmetic::neg;

        // bitwise
        handlers[Opcode::shl as usize] = bitwise::shl;
        handlers[Opcode::shr as usize] = bitwise::shr;
        handlers[Opcode::sar as usize] = bitwise::sar;
        handlers[Opcode::and as usize] = bitwise::and;
        handlers[Opcode::or as usize] = bitwise::or;
        handlers[Opcode::xor as usize] = bitwise::xor;

        // comparison
        handlers[Opcode::cmp as usize] = comparison::cmp;

        // control flow
        handlers[Opcode::if_ as usize] = control_flow::if_;
        handlers[Opcode::goto as usize] = control_flow::goto;

        // host bridge
        handlers[Opcode::invoke as usize] = calling::invoke;

        // reserved
        handlers[Opcode::return_ as usize] = fundamental::return_;
        handlers[Opcode::throw as usize] = fundamental::throw;
        handlers[Opcode::wide as usize] = fundamental::wide;

        Handler { handlers }
    }
}

impl Default for Handler {
    fn default() -> Self {
        Self::new()
    }
}
