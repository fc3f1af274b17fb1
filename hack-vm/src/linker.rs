//! Linker / Bootstrap: prepends the bootstrap preamble for directory-mode
//! links and stitches together the per-file translations.
use std::io::{self, Write};

use crate::context::TranslationUnit;
use crate::emitter::Emitter;
use crate::error::TranslateError;
use crate::insn::Instruction;
use crate::lexer::Lexer;

/// `fileName` reserved for the bootstrap's own (synthetic) translation unit.
/// `Sys.init` never returns, so its return label is dead code, but it still
/// has to be syntactically unique like every other label in the link.
const BOOTSTRAP_UNIT: &str = "bootstrap";

/// Sets `SP` to 256 and calls `Sys.init 0`. Emitted exactly once, always at
/// the very top of a directory-mode link, regardless of whether the linked
/// sources actually define `Sys.init` — §4.6 makes this unconditional.
pub fn emit_bootstrap<W: Write>(w: &mut W) -> io::Result<()> {
    writeln!(w, "@256\nD=A\n@SP\nM=D")?;

    let mut ctx = TranslationUnit::new(BOOTSTRAP_UNIT);
    Emitter::new(w).call(&mut ctx, "Sys.init", 0)
}

/// Translates one VM file's source text into assembly, appended to `w`. A
/// fresh [`TranslationUnit`] is used so label counters and `current_function`
/// never leak across files.
pub fn translate_unit<W: Write>(w: &mut W, file_name: &str, source: &str) -> Result<(), TranslateError> {
    let mut ctx = TranslationUnit::new(file_name);
    let mut emitter = Emitter::new(w);

    for line in Lexer::new(source) {
        let insn = Instruction::parse(file_name, &line)?;
        emitter.emit(&mut ctx, &insn)?;
    }

    Ok(())
}

/// Directory-mode link: bootstrap, then each `(file_name, source)` pair in
/// the order given. Callers are responsible for producing a stable file
/// order (the driver sorts by path).
pub fn link_directory<W: Write>(
    w: &mut W,
    units: &[(String, String)],
) -> Result<(), TranslateError> {
    emit_bootstrap(w)?;

    for (file_name, source) in units {
        writeln!(w, "// Translating {file_name}")?;
        translate_unit(w, file_name, source)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bootstrap_initializes_sp_and_calls_sys_init_once() {
        let mut buf = Vec::new();
        emit_bootstrap(&mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();

        assert!(out.starts_with("@256\nD=A\n@SP\nM=D\n"));
        assert_eq!(out.matches("@Sys.init\n0;JMP").count(), 1);
    }

    #[test]
    fn directory_link_namespaces_statics_per_file() {
        let units = vec![
            ("A".to_string(), "push static 0\n".to_string()),
            ("B".to_string(), "push static 0\n".to_string()),
        ];
        let mut buf = Vec::new();
        link_directory(&mut buf, &units).unwrap();
        let out = String::from_utf8(buf).unwrap();

        assert!(out.contains("@A.0"));
        assert!(out.contains("@B.0"));
        assert!(out.starts_with("@256\nD=A\n@SP\nM=D\n"));
    }

    #[test]
    fn bootstrap_is_unconditional_even_without_sys_init_defined() {
        let units = vec![("Main".to_string(), "push constant 1\n".to_string())];
        let mut buf = Vec::new();
        link_directory(&mut buf, &units).unwrap();
        let out = String::from_utf8(buf).unwrap();

        assert!(out.contains("@Sys.init"));
    }
}
