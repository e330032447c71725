// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::fmt::Display;

use aqvm_context::ContextError;
use aqvm_isa::GenericError;
use aqvm_memory::MemoryError;

pub mod builtins;
pub mod handler;
pub mod process;

// every fault that can occur while the processor runs. none of them is
// recoverable, the processing loop stops at the first one and hands it
// to the embedder, which releases the context and reports.
#[derive(Debug)]
pub enum ProcessorErrorType {
    // the opcode byte is not part of the instruction set
    UnknownOpcode { opcode: u8, address: usize },

    // the code region ended in the middle of an operand
    UnexpectedEndOfCode,

    // the operand cells carry type tags the operation is not defined
    // for, e.g. a bitwise operation on a float cell or arithmetic on an
    // untyped cell
    UnsupportedOperandTypes(&'static str),

    IntegerDivisionByZero,

    // the branch target read from memory is negative or not
    // representable as a code offset
    InvalidJumpTarget(i64),

    // the comparison code cell holds a value outside 0..=5
    UnknownComparison(i8),

    // 'new' with a negative size
    InvalidAllocationSize(i64),

    // 'invoke' with a negative argument count
    InvalidArgumentCount(i64),

    HostFunctionNotFound(String),

    // a host function reported a failure
    HostFunctionFailed(GenericError),

    Memory(MemoryError),

    Context(ContextError),
}

#[derive(Debug)]
pub struct ProcessorError {
    pub error_type: ProcessorErrorType,
}

impl ProcessorError {
    pub fn new(error_type: ProcessorErrorType) -> Self {
        Self { error_type }
    }
}

impl Display for ProcessorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.error_type {
            ProcessorErrorType::UnknownOpcode { opcode, address } => {
                write!(
                    f,
                    "Undefined opcode {:#04x} at code offset {:#06x}.",
                    opcode, address
                )
            }
            ProcessorErrorType::UnexpectedEndOfCode => {
                write!(f, "The code region ends in the middle of an operand.")
            }
            ProcessorErrorType::UnsupportedOperandTypes(name) => {
                write!(
                    f,
                    "The operand types are not supported by instruction \"{}\".",
                    name
                )
            }
            ProcessorErrorType::IntegerDivisionByZero => {
                write!(f, "Integer division by zero.")
            }
            ProcessorErrorType::InvalidJumpTarget(target) => {
                write!(f, "Invalid branch target {}.", target)
            }
            ProcessorErrorType::UnknownComparison(code) => {
                write!(f, "Undefined comparison code {}.", code)
            }
            ProcessorErrorType::InvalidAllocationSize(size) => {
                write!(f, "Invalid allocation size {}.", size)
            }
            ProcessorErrorType::InvalidArgumentCount(count) => {
                write!(f, "Invalid argument count {}.", count)
            }
            ProcessorErrorType::HostFunctionNotFound(name) => {
                write!(f, "Host function \"{}\" is not registered.", name)
            }
            ProcessorErrorType::HostFunctionFailed(error) => {
                write!(f, "Host function failed: {}", error)
            }
            ProcessorErrorType::Memory(error) => write!(f, "{}", error),
            ProcessorErrorType::Context(error) => write!(f, "{}", error),
        }
    }
}

impl std::error::Error for ProcessorError {}

impl From<MemoryError> for ProcessorError {
    fn from(error: MemoryError) -> Self {
        Self::new(ProcessorErrorType::Memory(error))
    }
}

impl From<ContextError> for ProcessorError {
    fn from(error: ContextError) -> Self {
        Self::new(ProcessorErrorType::Context(error))
    }
}
