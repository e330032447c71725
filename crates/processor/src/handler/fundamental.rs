// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use aqvm_context::vm_context::VmContext;

use crate::{handler::HandleResult, ProcessorError};

pub fn nop(context: &mut VmContext) -> Result<HandleResult, ProcessorError> {
    Ok(HandleResult::Move(context.pc + 1))
}

// 'return', 'throw' and 'wide' are reserved until the language
// front-end defines their semantics. they take no operands and do
// nothing, but they leave a warning in the log so that images relying
// on them are noticed.

pub fn return_(context: &mut VmContext) -> Result<HandleResult, ProcessorError> {
    log::warn!("'return' is reserved and does nothing yet");
    Ok(HandleResult::Move(context.pc + 1))
}

pub fn throw(context: &mut VmContext) -> Result<HandleResult, ProcessorError> {
    log::warn!("'throw' is reserved and does nothing yet");
    Ok(HandleResult::Move(context.pc + 1))
}

pub fn wide(context: &mut VmContext) -> Result<HandleResult, ProcessorError> {
    log::warn!("'wide' is reserved and does nothing yet");
    Ok(HandleResult::Move(context.pc + 1))
}
