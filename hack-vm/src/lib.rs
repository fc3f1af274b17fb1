#![forbid(unsafe_code)]
//! Translates Nand2Tetris VM language source into Hack assembly.
//!
//! The pipeline, leaves first: [`lexer`] tokenizes source lines, [`insn`]
//! classifies tokens into a tagged [`insn::Instruction`], [`label`] vends
//! unique label names, [`emitter`] is the code generator proper (stack
//! segment conventions and the function-calling convention), [`linker`]
//! stitches multiple files together behind an optional bootstrap, and
//! [`driver`] resolves a CLI path argument into single-file or
//! directory-mode translation.

pub mod context;
pub mod driver;
pub mod emitter;
pub mod error;
pub mod insn;
pub mod label;
pub mod lexer;
pub mod linker;
pub mod segment;

pub use context::TranslationUnit;
pub use emitter::Emitter;
pub use error::TranslateError;
pub use insn::{ArithmeticOp, InsnKind, Instruction};
pub use segment::Segment;

use std::path::Path;

pub fn is_vm_file<P: AsRef<Path>>(p: P) -> bool {
    let path = p.as_ref();
    path.is_file()
        && path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("vm"))
}

/// The VM file's name without its `.vm` extension, used as `fileName` in a
/// [`TranslationUnit`].
pub fn extract_vm_name(path: &Path) -> Result<&str, TranslateError> {
    path.file_stem().and_then(|name| name.to_str()).ok_or_else(|| {
        TranslateError::parse(
            &path.display().to_string(),
            0,
            "",
            "could not determine the file stem",
        )
    })
}
