//! A minimal Hack CPU interpreter, just enough to execute this crate's own
//! emitted assembly and check the runtime effects the spec's testable
//! properties are actually stated in terms of (RAM contents, SP, the four
//! segment pointers) — not just the shape of the generated text.
//!
//! Covers only the instruction subset this crate emits: `@number`,
//! `@SYMBOL` (the five predefined pointers, `R0..R15`, and jump-target
//! labels defined by `(LABEL)`), and C-instructions built from the usual
//! dest/comp/jump fields. No user variable symbols are ever emitted, so
//! none are supported here.

use std::collections::HashMap;

pub struct Cpu {
    mem: HashMap<i64, i64>,
    a: i64,
    d: i64,
}

impl Cpu {
    pub fn get(&self, addr: i64) -> i64 {
        *self.mem.get(&addr).unwrap_or(&0)
    }

    fn set(&mut self, addr: i64, value: i64) {
        self.mem.insert(addr, value);
    }
}

fn predefined_address(symbol: &str) -> Option<i64> {
    match symbol {
        "SP" => Some(0),
        "LCL" => Some(1),
        "ARG" => Some(2),
        "THIS" => Some(3),
        "THAT" => Some(4),
        "SCREEN" => Some(16384),
        "KBD" => Some(24576),
        _ => symbol
            .strip_prefix('R')
            .filter(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
            .and_then(|n| n.parse().ok()),
    }
}

fn comp(expr: &str, a: i64, d: i64, m: i64) -> i64 {
    match expr {
        "0" => 0,
        "1" => 1,
        "-1" => -1,
        "D" => d,
        "A" => a,
        "M" => m,
        "!D" => !d,
        "!A" => !a,
        "!M" => !m,
        "-D" => -d,
        "-A" => -a,
        "-M" => -m,
        "D+1" => d + 1,
        "A+1" => a + 1,
        "M+1" => m + 1,
        "D-1" => d - 1,
        "A-1" => a - 1,
        "M-1" => m - 1,
        "D+A" => d + a,
        "D+M" => d + m,
        "D-A" => d - a,
        "D-M" => d - m,
        "A-D" => a - d,
        "M-D" => m - d,
        "D&A" => d & a,
        "D&M" => d & m,
        "D|A" => d | a,
        "D|M" => d | m,
        other => panic!("sim: unsupported comp expression `{other}`"),
    }
}

fn jump_taken(jump: &str, value: i64) -> bool {
    match jump {
        "JGT" => value > 0,
        "JEQ" => value == 0,
        "JGE" => value >= 0,
        "JLT" => value < 0,
        "JNE" => value != 0,
        "JLE" => value <= 0,
        "JMP" => true,
        other => panic!("sim: unsupported jump `{other}`"),
    }
}

/// Runs `source`, seeding the predefined registers named in `init` (e.g.
/// `("LCL", 1000)`) before execution, starting at `entry` (`(FUNC)`'s
/// resolved address, or the first instruction if `None`), and halting once
/// the program counter runs past the last instruction.
///
/// Entry point is a label, not always index `0`, because when a test links
/// a caller and callee as two translation units the caller must run first
/// even though — to make `return`'s final jump land past the end of the
/// buffer and halt cleanly rather than falling into whatever was
/// concatenated afterward — the callee has to be placed earlier in the
/// source text than the caller.
pub fn run(source: &str, init: &[(&str, i64)], entry: Option<&str>) -> Cpu {
    let lines: Vec<&str> = source.lines().map(str::trim).filter(|l| !l.is_empty()).collect();

    let mut labels = HashMap::new();
    let mut instructions = Vec::new();
    for line in &lines {
        match line.strip_prefix('(').and_then(|l| l.strip_suffix(')')) {
            Some(name) => {
                labels.insert(name.to_string(), instructions.len() as i64);
            }
            None => instructions.push(*line),
        }
    }

    let mut cpu = Cpu { mem: HashMap::new(), a: 0, d: 0 };
    cpu.set(0, 256); // SP
    for (symbol, value) in init {
        let addr = predefined_address(symbol).unwrap_or_else(|| panic!("sim: unknown register `{symbol}`"));
        cpu.set(addr, *value);
    }

    let mut pc: i64 = match entry {
        Some(label) => *labels.get(label).unwrap_or_else(|| panic!("sim: unknown label `{label}`")),
        None => 0,
    };
    while (pc as usize) < instructions.len() {
        let insn = instructions[pc as usize];

        if let Some(symbol) = insn.strip_prefix('@') {
            cpu.a = symbol
                .parse()
                .ok()
                .or_else(|| predefined_address(symbol))
                .or_else(|| labels.get(symbol).copied())
                .unwrap_or_else(|| panic!("sim: unresolved symbol `{symbol}`"));
            pc += 1;
            continue;
        }

        let (dest, rest) = match insn.split_once('=') {
            Some((d, r)) => (Some(d), r),
            None => (None, insn),
        };
        let (expr, jump) = match rest.split_once(';') {
            Some((e, j)) => (e, Some(j)),
            None => (rest, None),
        };

        let old_a = cpu.a;
        let m = cpu.get(old_a);
        let value = comp(expr, old_a, cpu.d, m);

        if let Some(dest) = dest {
            if dest.contains('M') {
                cpu.set(old_a, value);
            }
            if dest.contains('A') {
                cpu.a = value;
            }
            if dest.contains('D') {
                cpu.d = value;
            }
        }

        pc = match jump {
            Some(j) if jump_taken(j, value) => cpu.a,
            _ => pc + 1,
        };
    }

    cpu
}
