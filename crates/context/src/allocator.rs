// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

// the pool of program-issued allocations
// --------------------------------------
//
// the 'new' instruction hands raw host addresses into the program's
// address domain and the program is expected to pair each of them with
// a 'free'. there is no garbage collector, so the pool keeps every
// live block keyed by its address:
//
// - 'free' with an address that is not a key is reported as an error
//   instead of corrupting the host heap (this covers double frees)
// - blocks still live at shutdown are reclaimed when the pool drops
//
// the blocks are boxed slices, their addresses are stable for the
// lifetime of the block.

use std::collections::HashMap;

use crate::{ContextError, ContextErrorType};

pub struct ProgramAllocator {
    allocations: HashMap<usize, Box<[u8]>>,
}

impl ProgramAllocator {
    pub fn new() -> Self {
        Self {
            allocations: HashMap::new(),
        }
    }

    /// allocate a zero-filled block and return its host address.
    ///
    /// zero-sized requests are rounded up to one byte so that every
    /// allocation has a distinct address.
    pub fn allocate(&mut self, size_in_bytes: usize) -> usize {
        let block = vec![0u8; size_in_bytes.max(1)].into_boxed_slice();
        let address = block.as_ptr() as usize;
        self.allocations.insert(address, block);

        log::debug!("allocated {} bytes at {:#x}", size_in_bytes, address);
        address
    }

    pub fn free(&mut self, address: usize) -> Result<(), ContextError> {
        match self.allocations.remove(&address) {
            Some(_) => Ok(()),
            None => Err(ContextError::new(ContextErrorType::InvalidFreePointer(
                address,
            ))),
        }
    }

    pub fn contains(&self, address: usize) -> bool {
        self.allocations.contains_key(&address)
    }

    pub fn count(&self) -> usize {
        self.allocations.len()
    }
}

impl Default for ProgramAllocator {
    fn default() -> Self {
        Self::new()
    }
}
