// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::io::Write;

use aqvm_context::host_function_table::HostFunctionTable;
use aqvm_isa::GenericError;
use aqvm_memory::typed_memory::{TypedMemory, TypedValue};

use crate::handler::read_zero_terminated;

/// the host functions every VM instance starts with. an embedder can
/// register more (or replace these) before the program runs.
pub fn install_builtin_functions(table: &mut HostFunctionTable) {
    table.register("print", print);
}

/// print a NUL-terminated string.
///
/// the single argument cell holds a pointer to the string (typically
/// produced with 'ptr' or placed into a 'new' block). the number of
/// bytes written goes into the return cell as a 32-bit integer.
pub fn print(
    memory: &mut TypedMemory,
    args: &[usize],
    results: &[usize],
) -> Result<(), GenericError> {
    let [string_idx] = args else {
        return Err("'print' takes exactly one argument".into());
    };

    let string_address = memory.load_ptr(*string_idx)?;
    let bytes = read_zero_terminated(string_address);

    let mut stdout = std::io::stdout();
    stdout.write_all(&bytes)?;
    stdout.flush()?;

    memory.write_value(results[0], TypedValue::I32(bytes.len() as i32))?;
    Ok(())
}
