//! Top-level translation pipeline.
//!
//! Every non-blank source line is cleaned, classified, and, for address and
//! compute instructions, encoded into one 16-character output line. Labels
//! and comments produce no output. The first encoding failure aborts the run.
//!
//! [`assemble`] writes through a temporary file next to the target and only
//! moves it into place once every line has been translated, so a failed run
//! never leaves partial output behind.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use hack_core::{EncodeError, MachineWord};
use tempfile::{Builder, NamedTempFile};

use crate::encoder::encode_line;
use crate::errors::{
    AssembleError, AssembleErrorKind, AssembleWarning, AssembleWarningKind, SourceLocation,
};
use crate::parser::{parse_line, ParsedLine};
use crate::source::source_lines;

/// Extension of generated binary files.
pub const OUTPUT_EXTENSION: &str = "hack";

/// Terminator written after every output word.
pub const LINE_TERMINATOR: &str = "\r\n";

/// Outcome of translating one input stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslateSummary {
    /// Number of machine words written.
    pub words: usize,
    /// Non-fatal diagnostics in source order.
    pub warnings: Vec<AssembleWarning>,
}

/// Result of assembling a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembleResult {
    /// Where the binary text was written.
    pub output: PathBuf,
    /// Number of machine words written.
    pub words: usize,
    /// Non-fatal diagnostics in source order.
    pub warnings: Vec<AssembleWarning>,
}

/// Translates a single cleaned line.
///
/// Returns `None` for labels and comments.
///
/// # Errors
///
/// Returns `EncodeError` for unknown mnemonics or bad address literals.
pub fn translate_line(text: &str) -> Result<Option<MachineWord>, EncodeError> {
    encode_line(&parse_line(text))
}

/// Translates assembly from `input`, writing one word per line to `output`.
///
/// `file` names the input in diagnostics.
///
/// # Errors
///
/// Returns `AssembleError` on the first line that cannot be encoded, with its
/// location attached, or on any read/write failure.
#[allow(clippy::result_large_err)]
pub fn translate<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    file: &str,
) -> Result<TranslateSummary, AssembleError> {
    let mut summary = TranslateSummary::default();

    for line in source_lines(input) {
        let line = line?;
        let located = || SourceLocation {
            file: file.to_string(),
            line: line.original_line,
            text: line.text.clone(),
        };

        let parsed = parse_line(&line.text);
        if let ParsedLine::Label { name } = parsed {
            summary.warnings.push(AssembleWarning {
                kind: AssembleWarningKind::UnresolvedLabel {
                    name: name.to_string(),
                },
                location: located(),
            });
            continue;
        }

        let word = encode_line(&parsed).map_err(|e| {
            AssembleError::new(AssembleErrorKind::Encode(e)).with_location(located())
        })?;

        if let Some(word) = word {
            write!(output, "{word}{LINE_TERMINATOR}")?;
            summary.words += 1;
        }
    }

    Ok(summary)
}

/// Returns the sibling output path: same directory and stem, `.hack` extension.
#[must_use]
pub fn output_path_for(input: &Path) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("out");
    let parent = input.parent().unwrap_or_else(|| Path::new(""));
    parent.join(format!("{stem}.{OUTPUT_EXTENSION}"))
}

/// Assembles `input` into its sibling `.hack` file.
///
/// # Errors
///
/// See [`assemble_to`].
#[allow(clippy::result_large_err)]
pub fn assemble(input: &Path) -> Result<AssembleResult, AssembleError> {
    assemble_to(input, &output_path_for(input))
}

/// Assembles `input` into `output`.
///
/// A missing input is reported before anything is created. Output is staged
/// in a temporary file in the target directory and persisted only after the
/// whole input translated; on failure the staged file is removed and any
/// existing `output` is left untouched.
///
/// # Errors
///
/// - [`AssembleErrorKind::FileNotFound`] when `input` does not exist.
/// - [`AssembleErrorKind::Encode`] for the first untranslatable line.
/// - [`AssembleErrorKind::Io`] for read, write or rename failures.
#[allow(clippy::result_large_err)]
pub fn assemble_to(input: &Path, output: &Path) -> Result<AssembleResult, AssembleError> {
    let source = File::open(input).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            AssembleError::new(AssembleErrorKind::FileNotFound(input.to_path_buf()))
        } else {
            AssembleError::from(e)
        }
    })?;

    let staging_dir = output
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let existing_permissions = fs::metadata(output).ok().map(|m| m.permissions());
    let mut writer = BufWriter::new(staging_file(staging_dir)?);

    let summary = translate(
        BufReader::new(source),
        &mut writer,
        &input.display().to_string(),
    )?;

    let staged = writer
        .into_inner()
        .map_err(|e| AssembleError::from(e.into_error()))?;
    if let Some(permissions) = existing_permissions {
        staged.as_file().set_permissions(permissions)?;
    }
    staged
        .persist(output)
        .map_err(|e| AssembleError::from(e.error))?;

    Ok(AssembleResult {
        output: output.to_path_buf(),
        words: summary.words,
        warnings: summary.warnings,
    })
}

/// Creates the staging file with the mode a plain `File::create` would use.
fn staging_file(dir: &Path) -> io::Result<NamedTempFile> {
    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    builder.tempfile_in(dir)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use hack_core::Field;

    use super::*;

    const ADD_ASM: &str = "\
// This file is part of www.nand2tetris.org
// Computes R0 = 2 + 3  (R0 refers to RAM[0])

@2
D=A
@3
D=D+A
@0
M=D
";

    const ADD_HACK: &str = "\
0000000000000010\r
1110110000010000\r
0000000000000011\r
1110000010010000\r
0000000000000000\r
1110001100001000\r
";

    fn create_temp_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn translate_str(content: &str) -> Result<(String, TranslateSummary), AssembleError> {
        let mut out = Vec::new();
        let summary = translate(content.as_bytes(), &mut out, "test.asm")?;
        Ok((String::from_utf8(out).unwrap(), summary))
    }

    fn translate_str_bytes(content: &[u8]) -> Result<(String, TranslateSummary), AssembleError> {
        let mut out = Vec::new();
        let summary = translate(content, &mut out, "test.asm")?;
        Ok((String::from_utf8(out).unwrap(), summary))
    }

    #[test]
    fn translate_line_examples() {
        assert_eq!(
            translate_line("@443").unwrap().unwrap().to_string(),
            "0000000110111011"
        );
        assert_eq!(
            translate_line("D=D+A").unwrap().unwrap().to_string(),
            "1110000010010000"
        );
        assert_eq!(
            translate_line("D=M").unwrap().unwrap().to_string(),
            "1111110000010000"
        );
        assert_eq!(translate_line("(LOOP)"), Ok(None));
        assert_eq!(translate_line("//"), Ok(None));
    }

    #[test]
    fn translate_add_program() {
        let (out, summary) = translate_str(ADD_ASM).unwrap();
        assert_eq!(out, ADD_HACK);
        assert_eq!(summary.words, 6);
        assert!(summary.warnings.is_empty());
    }

    #[test]
    fn trailing_comments_and_indentation_are_ignored() {
        let (out, _) = translate_str("   @7   // seven\n\tD=A\t// load\n").unwrap();
        assert_eq!(out, "0000000000000111\r\n1110110000010000\r\n");
    }

    #[test]
    fn labels_and_comments_emit_nothing() {
        let (out, summary) = translate_str("(LOOP)\n// note\n/ odd\n@5\n0;JMP\n").unwrap();
        assert_eq!(out.lines().count(), 2);
        assert_eq!(summary.words, 2);
        assert_eq!(summary.warnings.len(), 1);
        assert_eq!(
            summary.warnings[0].kind,
            AssembleWarningKind::UnresolvedLabel {
                name: "LOOP".into()
            }
        );
        assert_eq!(summary.warnings[0].location.line, 1);
    }

    #[test]
    fn unknown_mnemonic_reports_line_and_text() {
        let error = translate_str("@1\n\nD=D*A\n@2\n").unwrap_err();
        assert_eq!(
            error.kind,
            AssembleErrorKind::Encode(EncodeError::UnknownMnemonic {
                field: Field::Comp,
                mnemonic: "D*A".into(),
            })
        );
        let location = error.location.unwrap();
        assert_eq!(location.file, "test.asm");
        assert_eq!(location.line, 3);
        assert_eq!(location.text, "D=D*A");
    }

    #[test]
    fn address_out_of_range_aborts() {
        let error = translate_str("@32768\n").unwrap_err();
        assert!(matches!(
            error.kind,
            AssembleErrorKind::Encode(EncodeError::AddressOutOfRange { .. })
        ));
    }

    #[test]
    fn output_path_replaces_extension() {
        assert_eq!(
            output_path_for(Path::new("/home/user/add/Add.asm")),
            PathBuf::from("/home/user/add/Add.hack")
        );
        assert_eq!(output_path_for(Path::new("Prog")), PathBuf::from("Prog.hack"));
    }

    #[test]
    fn assemble_writes_sibling_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let input = create_temp_file(temp_dir.path(), "Add.asm", ADD_ASM);

        let result = assemble(&input).unwrap();

        assert_eq!(result.output, temp_dir.path().join("Add.hack"));
        assert_eq!(result.words, 6);
        assert_eq!(fs::read_to_string(&result.output).unwrap(), ADD_HACK);
    }

    #[test]
    fn assemble_twice_is_byte_identical() {
        let temp_dir = tempfile::tempdir().unwrap();
        let input = create_temp_file(temp_dir.path(), "Add.asm", ADD_ASM);

        let first = fs::read(assemble(&input).unwrap().output).unwrap();
        let second = fs::read(assemble(&input).unwrap().output).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn missing_input_creates_nothing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let input = temp_dir.path().join("Missing.asm");

        let error = assemble(&input).unwrap_err();

        assert_eq!(error.kind, AssembleErrorKind::FileNotFound(input));
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn failed_run_leaves_no_output() {
        let temp_dir = tempfile::tempdir().unwrap();
        let input = create_temp_file(temp_dir.path(), "Bad.asm", "@1\nD=X\n");

        assert!(assemble(&input).is_err());

        let entries: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("Bad.asm")]);
    }

    #[test]
    fn failed_run_keeps_previous_output() {
        let temp_dir = tempfile::tempdir().unwrap();
        let input = create_temp_file(temp_dir.path(), "Prog.asm", "@1\nD=X\n");
        let output = create_temp_file(temp_dir.path(), "Prog.hack", "previous\n");

        assert!(assemble_to(&input, &output).is_err());
        assert_eq!(fs::read_to_string(&output).unwrap(), "previous\n");
    }

    #[test]
    fn non_utf8_comment_does_not_abort() {
        let (out, summary) = translate_str_bytes(b"@2 // caf\xE9\nD=A\n").unwrap();
        assert_eq!(out, "0000000000000010\r\n1110110000010000\r\n");
        assert_eq!(summary.words, 2);
    }

    #[test]
    fn non_utf8_instruction_reports_its_line() {
        let error = translate_str_bytes(b"@1\nD=\xFF\n").unwrap_err();
        assert!(matches!(
            error.kind,
            AssembleErrorKind::Encode(EncodeError::UnknownMnemonic {
                field: Field::Comp,
                ..
            })
        ));
        assert_eq!(error.location.unwrap().line, 2);
    }

    #[cfg(unix)]
    #[test]
    fn output_mode_matches_plain_file_creation() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = tempfile::tempdir().unwrap();
        let input = create_temp_file(temp_dir.path(), "Add.asm", ADD_ASM);
        let reference = temp_dir.path().join("reference.txt");
        File::create(&reference).unwrap();

        let result = assemble(&input).unwrap();

        let mode = |path: &Path| fs::metadata(path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&result.output), mode(&reference));
        assert_ne!(mode(&result.output) & 0o044, 0);
    }

    #[cfg(unix)]
    #[test]
    fn existing_output_keeps_its_mode() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = tempfile::tempdir().unwrap();
        let input = create_temp_file(temp_dir.path(), "Add.asm", ADD_ASM);
        let output = create_temp_file(temp_dir.path(), "Add.hack", "old\n");
        fs::set_permissions(&output, fs::Permissions::from_mode(0o640)).unwrap();

        assemble(&input).unwrap();

        let mode = fs::metadata(&output).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
        assert_eq!(fs::read_to_string(&output).unwrap(), ADD_HACK);
    }
}
