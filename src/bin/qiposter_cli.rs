//! CLI tool for qiposter - writes the static poster document or chart geometry
//!
//! Usage:
//!   qiposter_cli                         # Screen document to stdout
//!   qiposter_cli --print -o poster.html  # Print document to a file
//!   qiposter_cli --json                  # Chart layout JSON
//!   qiposter_cli --config options.json   # Override export/page/logo options

#![allow(clippy::exit)]

use std::env;
use std::fs;
use std::io::{self, Write};

use qiposter::config::PosterOptions;
use qiposter::document::{context_layout, render_static_document};
use qiposter::error::Result;
use qiposter::telemetry::init_default_tracing;
use qiposter::types::ViewContext;

const USAGE: &str = "Usage: qiposter_cli [--print] [--json] [--config <file>] [-o <output>]";

struct Args {
    print: bool,
    json: bool,
    config: Option<String>,
    output: Option<String>,
}

fn parse_args(args: &[String]) -> std::result::Result<Args, String> {
    let mut parsed = Args {
        print: false,
        json: false,
        config: None,
        output: None,
    };
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--print" => parsed.print = true,
            "--json" => parsed.json = true,
            "--config" => {
                parsed.config = Some(iter.next().ok_or("--config needs a file")?.clone());
            }
            "-o" | "--output" => {
                parsed.output = Some(iter.next().ok_or("-o needs a file")?.clone());
            }
            "-h" | "--help" => return Err(String::new()),
            other => return Err(format!("Unknown argument: {other}")),
        }
    }
    Ok(parsed)
}

fn run(args: &Args) -> Result<()> {
    let options = match &args.config {
        Some(path) => PosterOptions::from_file(path)?,
        None => PosterOptions::default(),
    };
    let context = ViewContext::from_print_mode(args.print);

    let out = if args.json {
        serde_json::to_string_pretty(&context_layout(context))?
    } else {
        render_static_document(&options, context)?
    };

    match &args.output {
        Some(path) => {
            fs::write(path, &out)?;
            eprintln!("Written: {path}");
        }
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(out.as_bytes())?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

fn main() {
    let _ = init_default_tracing();
    let argv: Vec<String> = env::args().skip(1).collect();

    let args = match parse_args(&argv) {
        Ok(args) => args,
        Err(message) => {
            if !message.is_empty() {
                eprintln!("{message}");
            }
            eprintln!("{USAGE}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
