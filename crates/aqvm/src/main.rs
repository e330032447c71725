// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

// the VM launcher
//
// usage:
//   `$ aqvm /path/to/program.aqbc`
//
// the file is a program image ("AQBC" magic, see the image crate for
// the exact layout), typically produced by the compiler front-end that
// is being built alongside this runtime.
//
// exit codes:
//   0   the program ran to the end of its code region
//   -1  no image path was given (the usage line goes to stdout)
//   -2  the image file could not be opened or mapped
//   -3  the image is malformed (wrong magic or truncated)
//   1   the program faulted while running
//
// progress and per-instruction traces go to stderr and are off by
// default, select them with RUST_LOG, e.g.
//   `$ RUST_LOG=debug aqvm program.aqbc`

use std::process::exit;

use aqvm_image::program_image::ProgramImage;
use aqvm_processor::{
    handler::Handler,
    process::{create_vm_context, process_program},
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        println!("Usage: {} <filename>", args[0]);
        exit(-1);
    }

    let file = match std::fs::File::open(&args[1]) {
        Ok(file) => file,
        Err(error) => {
            eprintln!("Error: Could not open file {}: {}", args[1], error);
            exit(-2);
        }
    };

    // the image is read-only for the whole run, mapping it avoids
    // copying the code region
    let image_binary = match unsafe { memmap2::Mmap::map(&file) } {
        Ok(mmap) => mmap,
        Err(error) => {
            eprintln!("Error: Could not map file {}: {}", args[1], error);
            exit(-2);
        }
    };

    let image = match ProgramImage::load(&image_binary) {
        Ok(image) => image,
        Err(error) => {
            eprintln!("Error: {}", error);
            exit(-3);
        }
    };

    log::info!("memory size: {}", image.memory_size);

    let handler = Handler::new();
    let mut context = create_vm_context(image);

    if let Err(error) = process_program(&handler, &mut context) {
        eprintln!("Error: {}", error);
        exit(1);
    }
}
