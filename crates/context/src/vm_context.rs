// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use aqvm_image::program_image::ProgramImage;
use aqvm_memory::typed_memory::TypedMemory;

use crate::{allocator::ProgramAllocator, host_function_table::HostFunctionTable};

/// the complete state of one VM instance.
///
/// everything the instructions touch lives here, there is no global
/// state, so several VMs can run side by side in one process. the
/// members drop together when the context goes out of scope: the typed
/// memory, the registry chains and whatever program allocations the
/// bytecode failed to pair with a 'free'.
pub struct VmContext {
    pub memory: TypedMemory,
    pub allocator: ProgramAllocator,
    pub host_functions: HostFunctionTable,

    // the code region is read-only for the whole run
    pub code: Vec<u8>,

    // byte offset of the next opcode within the code region
    pub pc: usize,
}

impl VmContext {
    pub fn new(image: ProgramImage) -> Self {
        let ProgramImage {
            data,
            type_tags,
            code,
            ..
        } = image;

        Self {
            memory: TypedMemory::new(data, type_tags),
            allocator: ProgramAllocator::new(),
            host_functions: HostFunctionTable::new(),
            code,
            pc: 0,
        }
    }
}
