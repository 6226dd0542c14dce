//! CLI entry point for the Hack assembler binary.

use std::env;
use std::ffi::OsString;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use hack_assembler::assembler::assemble;
use hack_core as _;
#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
use tempfile as _;
use thiserror as _;

const PROMPT_TEXT: &str =
    "Please enter the ABSOLUTE file path for your Hack assembly language file.";

const USAGE_TEXT: &str = "\
Usage: hack-asm [<input.asm>]

Translates Hack assembly into a .hack file written next to the input.
With no input path, the path is read from standard input.

Options:
  -h, --help  Show this help message

Examples:
  hack-asm /home/user/add/Add.asm
  echo /home/user/add/Add.asm | hack-asm
";

#[derive(Debug, PartialEq, Eq)]
enum Invocation {
    Prompt,
    Path(PathBuf),
    Help,
}

fn parse_args(args: impl Iterator<Item = OsString>) -> Result<Invocation, String> {
    let mut input: Option<PathBuf> = None;

    for arg in args {
        if arg == "--help" || arg == "-h" {
            return Ok(Invocation::Help);
        }

        if arg.to_string_lossy().starts_with('-') {
            return Err(format!("unknown option: {}", arg.to_string_lossy()));
        }

        if input.is_some() {
            return Err("multiple input paths provided".to_string());
        }
        input = Some(PathBuf::from(arg));
    }

    Ok(input.map_or(Invocation::Prompt, Invocation::Path))
}

fn prompt_for_path<R: BufRead, W: Write>(mut input: R, output: &mut W) -> Result<PathBuf, String> {
    writeln!(output, "{PROMPT_TEXT}")
        .and_then(|()| output.flush())
        .map_err(|e| format!("failed to write prompt: {e}"))?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .map_err(|e| format!("failed to read input path: {e}"))?;

    let path = line.trim();
    if path.is_empty() {
        return Err("missing input path".to_string());
    }
    Ok(PathBuf::from(path))
}

fn run(input: &Path) -> Result<(), i32> {
    let result = match assemble(input) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{}", e.format_for_stderr());
            return Err(1);
        }
    };

    for warning in &result.warnings {
        eprintln!("{}", warning.format_for_stderr());
    }

    println!("Success! Binary file written to: {}", result.output.display());

    Ok(())
}

fn main() {
    let input = match parse_args(env::args_os().skip(1)) {
        Ok(Invocation::Help) => {
            println!("{USAGE_TEXT}");
            std::process::exit(0);
        }
        Ok(Invocation::Path(path)) => Ok(path),
        Ok(Invocation::Prompt) => prompt_for_path(io::stdin().lock(), &mut io::stdout()),
        Err(error) => {
            eprintln!("error: {error}");
            eprintln!("{USAGE_TEXT}");
            std::process::exit(1);
        }
    };

    let exit_code = match input {
        Ok(path) => match run(&path) {
            Ok(()) => 0,
            Err(code) => code,
        },
        Err(error) => {
            eprintln!("error: {error}");
            1
        }
    };

    std::process::exit(exit_code);
}
