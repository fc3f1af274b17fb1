//! Driver: resolves the CLI path argument into single-file or
//! directory-mode translation, and owns the program's one real side effect
//! — writing the assembly output.
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::TranslateError;
use crate::{extract_vm_name, is_vm_file, linker};

/// Where translation output is written, derived from the resolved input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPath(pub PathBuf);

/// Translates the VM program at `path` (or the current directory, if
/// `path` is `None`) and returns the assembled output alongside the path it
/// should be written to. Building the whole output in memory first is what
/// lets the caller guarantee no partial `.asm` file is ever left on disk.
pub fn translate(path: Option<&Path>) -> Result<(OutputPath, String), TranslateError> {
    let cwd;
    let path = match path {
        Some(p) => p,
        None => {
            cwd = std::env::current_dir()?;
            &cwd
        }
    };

    if path.is_dir() {
        translate_directory(path)
    } else {
        translate_single_file(path)
    }
}

fn translate_single_file(path: &Path) -> Result<(OutputPath, String), TranslateError> {
    let file_name = extract_vm_name(path)?.to_string();
    let source = fs::read_to_string(path)?;

    let mut buf = Vec::new();
    linker::translate_unit(&mut buf, &file_name, &source)?;

    let output = OutputPath(path.with_extension("asm"));
    Ok((output, String::from_utf8(buf).expect("emitter only writes valid UTF-8 assembly text")))
}

fn translate_directory(dir: &Path) -> Result<(OutputPath, String), TranslateError> {
    let mut paths: Vec<PathBuf> = dir
        .read_dir()?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| is_vm_file(p))
        .collect();
    // `read_dir` order isn't guaranteed; sort for run-to-run stability.
    paths.sort();

    let mut units = Vec::with_capacity(paths.len());
    for path in &paths {
        let file_name = extract_vm_name(path)?.to_string();
        let source = fs::read_to_string(path)?;
        units.push((file_name, source));
    }

    let mut buf = Vec::new();
    linker::link_directory(&mut buf, &units)?;

    let dir_name = dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("out")
        .to_string();
    let output = OutputPath(dir.join(format!("{dir_name}.asm")));

    Ok((output, String::from_utf8(buf).expect("emitter only writes valid UTF-8 assembly text")))
}

/// Writes `content` to `output` atomically: the whole file is staged in a
/// temp file alongside the destination and persisted only once fully
/// written, so a crash or an earlier error never leaves a truncated file at
/// the final path.
pub fn write_output(output: &OutputPath, content: &str) -> Result<(), TranslateError> {
    let dir = output.0.parent().filter(|p| !p.as_os_str().is_empty());
    let mut tmp = match dir {
        Some(dir) => NamedTempFile::new_in(dir)?,
        None => NamedTempFile::new()?,
    };

    use std::io::Write as _;
    tmp.write_all(content.as_bytes())?;
    tmp.persist(&output.0)
        .map_err(|e| TranslateError::Io(e.error))?;

    Ok(())
}

/// Translates and writes the result, the full end-to-end pipeline the CLI
/// binary drives.
pub fn run(path: Option<&Path>) -> Result<PathBuf, TranslateError> {
    let (output, content) = translate(path)?;
    write_output(&output, &content)?;
    Ok(output.0)
}
