// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use aqvm_isa::opcode::Opcode;

use crate::bytecode_reader::read_operand_index;

// format the bytecode with fixed length hex:
//
// 0x0000  00 11 22 33  44 55 66 77
// 0x0008  88 99 aa bb  cc dd ee ff
pub fn format_bytecode_as_binary(codes: &[u8]) -> String {
    codes
        .chunks(8)
        .enumerate()
        .map(|(chunk_addr, chunk)| {
            let binary = chunk
                .iter()
                .enumerate()
                .map(|(idx, byte)| {
                    if idx == 4 {
                        format!("  {:02x}", byte)
                    } else if idx == 0 {
                        format!("{:02x}", byte)
                    } else {
                        format!(" {:02x}", byte)
                    }
                })
                .collect::<Vec<String>>()
                .join("");

            format!("0x{:04x}  {}", chunk_addr * 8, binary)
        })
        .collect::<Vec<String>>()
        .join("\n")
}

// format the bytecode one instruction per line:
//
// 0x0000  add       0, 4, 8
// 0x0004  goto      16
//
// the operand count of 'invoke' depends on an argument count that is
// only available in memory at run time, so formatting stops at the
// first 'invoke' (and at the first undefined opcode) and the rest is
// shown as a hex dump.
pub fn format_bytecode_as_text(codes: &[u8]) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut offset = 0;

    while offset < codes.len() {
        let opcode_num = codes[offset];

        let (opcode, operand_count) = match Opcode::from_u8(opcode_num) {
            Some(opcode) => {
                let operand_count = match opcode {
                    Opcode::nop | Opcode::return_ | Opcode::throw | Opcode::wide => 0,
                    Opcode::free | Opcode::goto => 1,
                    Opcode::load
                    | Opcode::store
                    | Opcode::new
                    | Opcode::ptr
                    | Opcode::neg => 2,
                    Opcode::add
                    | Opcode::sub
                    | Opcode::mul
                    | Opcode::div
                    | Opcode::rem
                    | Opcode::shl
                    | Opcode::shr
                    | Opcode::sar
                    | Opcode::if_
                    | Opcode::and
                    | Opcode::or
                    | Opcode::xor => 3,
                    Opcode::cmp => 4,
                    Opcode::invoke => {
                        lines.push(format!("0x{:04x}  invoke    ...", offset));
                        lines.push(format_bytecode_as_binary(&codes[offset + 1..]));
                        break;
                    }
                };
                (opcode, operand_count)
            }
            None => {
                lines.push(format!("0x{:04x}  ({:#04x}?)", offset, opcode_num));
                lines.push(format_bytecode_as_binary(&codes[offset + 1..]));
                break;
            }
        };

        let mut operands: Vec<String> = Vec::with_capacity(operand_count);
        let mut position = offset + 1;
        let mut complete = true;

        for _ in 0..operand_count {
            match read_operand_index(codes, position) {
                Some((value, next)) => {
                    operands.push(value.to_string());
                    position = next;
                }
                None => {
                    complete = false;
                    break;
                }
            }
        }

        if !complete {
            lines.push(format!(
                "0x{:04x}  {:<8}  (truncated operand)",
                offset,
                opcode.get_name()
            ));
            break;
        }

        lines.push(
            format!(
                "0x{:04x}  {:<8}  {}",
                offset,
                opcode.get_name(),
                operands.join(", ")
            )
            .trim_end()
            .to_string(),
        );
        offset = position;
    }

    lines.join("\n")
}
