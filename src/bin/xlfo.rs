//! CLI for xlfo - converts one XLSX sheet to an XSL-FO document
//!
//! Usage:
//!   xlfo <input.xlsx> <output.fo>           # Convert the first sheet
//!   xlfo -s 2 <input.xlsx> <output.fo>      # Convert sheet index 2

#![allow(clippy::exit)]

use std::env;
use std::process;

use xlfo::Converter;

fn print_usage() {
    eprintln!("Usage: xlfo [-s sheetIndex] <input.xlsx> <output.fo>");
    eprintln!("  -s sheetIndex   0-based sheet to convert (default 0)");
}

struct Args {
    sheet_index: usize,
    input: String,
    output: String,
}

fn parse_args(argv: &[String]) -> Option<Args> {
    let mut sheet_index = 0usize;
    let mut positionals = Vec::new();

    let mut iter = argv.iter();
    while let Some(arg) = iter.next() {
        if arg == "-s" {
            sheet_index = iter.next()?.parse().ok()?;
        } else if arg.starts_with('-') {
            return None;
        } else {
            positionals.push(arg.clone());
        }
    }

    let mut positionals = positionals.into_iter();
    let (Some(input), Some(output), None) =
        (positionals.next(), positionals.next(), positionals.next())
    else {
        return None;
    };

    Some(Args {
        sheet_index,
        input,
        output,
    })
}

fn main() {
    env_logger::init();

    let argv: Vec<String> = env::args().skip(1).collect();
    let Some(args) = parse_args(&argv) else {
        print_usage();
        process::exit(2);
    };

    let converter = Converter::new(args.sheet_index);
    if let Err(e) = converter.convert_file(&args.input, &args.output) {
        eprintln!("Error converting {}: {}", args.input, e);
        process::exit(1);
    }
}
