// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

// the host function registry
// --------------------------
//
//                       buckets (1024)
//                      /--------------\
//  "print" --(djb2)--> | 0            |
//                      | 1   -> [ ("print", fn), ("rand", fn) ]
//                      | ...          |
//                      | 1023         |
//                      \--------------/
//
// a fixed array of 1024 buckets, each bucket a chain of (name,
// function) pairs. names hash with DJB2 and compare as exact byte
// strings, so the table never confuses distinct names that collide on
// the hash. the bytecode side addresses host functions exclusively by
// these names (see the 'invoke' instruction).

use aqvm_isa::GenericError;
use aqvm_memory::typed_memory::TypedMemory;

/// the signature of a host function.
///
/// 'args' and 'results' are memory indices naming the actual parameter
/// cells and the (single) return cell. the function performs all of its
/// data traffic through the typed memory with these indices.
pub type HostFunction =
    fn(memory: &mut TypedMemory, args: &[usize], results: &[usize]) -> Result<(), GenericError>;

pub const BUCKET_COUNT: usize = 1024;

struct NameEntry {
    name: Vec<u8>,
    function: HostFunction,
}

pub struct HostFunctionTable {
    buckets: Vec<Vec<NameEntry>>,
}

/// DJB2 over the name bytes.
pub fn hash_name(name: &[u8]) -> usize {
    let mut hash: u64 = 5381;
    for byte in name {
        hash = (hash << 5).wrapping_add(hash).wrapping_add(*byte as u64);
    }
    (hash % BUCKET_COUNT as u64) as usize
}

impl HostFunctionTable {
    pub fn new() -> Self {
        let mut buckets = Vec::with_capacity(BUCKET_COUNT);
        buckets.resize_with(BUCKET_COUNT, Vec::new);
        Self { buckets }
    }

    /// registering a name that already exists replaces its function.
    pub fn register(&mut self, name: &str, function: HostFunction) {
        let chain = &mut self.buckets[hash_name(name.as_bytes())];
        match chain
            .iter_mut()
            .find(|entry| entry.name == name.as_bytes())
        {
            Some(entry) => entry.function = function,
            None => chain.push(NameEntry {
                name: name.as_bytes().to_vec(),
                function,
            }),
        }
    }

    pub fn find(&self, name: &[u8]) -> Option<HostFunction> {
        self.buckets[hash_name(name)]
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.function)
    }
}

impl Default for HostFunctionTable {
    fn default() -> Self {
        Self::new()
    }
}
