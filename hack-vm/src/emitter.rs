//! Code Emitter — maps each tagged [`Instruction`] to Hack assembly.
//!
//! This is the heart of the translator: the stack/segment conventions in
//! §4.4 and the function-calling convention in §4.5. Every method writes a
//! deterministic, self-contained block of assembly lines and leaves the
//! stack in the state the spec promises.
use std::io::{self, Write};

use crate::context::TranslationUnit;
use crate::insn::{ArithmeticOp, InsnKind, Instruction};
use crate::label::CompareKind;
use crate::segment::Segment;

/// Push the value currently in `D` to the top of the stack and advance `SP`.
const PUSH: &str = "@SP\nA=M\nM=D\n@SP\nM=M+1";

/// Pop the top of the stack into `D`, leaving `A` pointing at the freed slot.
const POP: &str = "@SP\nAM=M-1\nD=M";

pub struct Emitter<'w, W: Write> {
    w: &'w mut W,
}

impl<'w, W: Write> Emitter<'w, W> {
    pub fn new(w: &'w mut W) -> Self {
        Emitter { w }
    }

    /// Translates one instruction under the given context, advancing the
    /// context's mutable state (`current_function`, label counters) as a
    /// side effect where the instruction calls for it.
    pub fn emit(&mut self, ctx: &mut TranslationUnit, insn: &Instruction<'_>) -> io::Result<()> {
        match insn.kind {
            InsnKind::Arithmetic(op) => self.arithmetic(ctx, op),
            InsnKind::Push(segment, index) => self.push(ctx, segment, index),
            InsnKind::Pop(segment, index) => self.pop(ctx, segment, index),
            InsnKind::Label(name) => self.label(ctx, name),
            InsnKind::Goto(name) => self.goto(ctx, name),
            InsnKind::IfGoto(name) => self.if_goto(ctx, name),
            InsnKind::Function(name, n_vars) => self.define_function(ctx, name, n_vars),
            InsnKind::Call(name, n_args) => self.call(ctx, name, n_args),
            InsnKind::Return => self.ret(),
        }
    }

    pub fn push(&mut self, ctx: &TranslationUnit, segment: Segment, index: u16) -> io::Result<()> {
        use Segment::*;

        match segment {
            Constant => writeln!(self.w, "@{index}\nD=A\n{PUSH}"),
            Static => writeln!(self.w, "@{}\nD=M\n{PUSH}", ctx.static_symbol(index)),
            Temp => writeln!(self.w, "@{}\nD=M\n{PUSH}", 5 + index),
            Pointer => writeln!(self.w, "@{}\nD=M\n{PUSH}", pointer_symbol(index)),
            Local | Argument | This | That => {
                writeln!(
                    self.w,
                    "@{base}\nD=M\n@{index}\nA=D+A\nD=M\n{PUSH}",
                    base = base_symbol(segment)
                )
            }
        }
    }

    pub fn pop(&mut self, ctx: &TranslationUnit, segment: Segment, index: u16) -> io::Result<()> {
        use Segment::*;

        match segment {
            // the parser rejects `pop constant` before it ever reaches here.
            Constant => unreachable!("pop constant is rejected at parse time"),
            Static => writeln!(self.w, "{POP}\n@{}\nM=D", ctx.static_symbol(index)),
            Temp => writeln!(self.w, "{POP}\n@{}\nM=D", 5 + index),
            Pointer => writeln!(self.w, "{POP}\n@{}\nM=D", pointer_symbol(index)),
            Local | Argument | This | That => {
                writeln!(
                    self.w,
                    "@{base}\nD=M\n@{index}\nD=D+A\n@R13\nM=D\n{POP}\n@R13\nA=M\nM=D",
                    base = base_symbol(segment)
                )
            }
        }
    }

    fn arithmetic(&mut self, ctx: &mut TranslationUnit, op: ArithmeticOp) -> io::Result<()> {
        use ArithmeticOp::*;

        match op {
            Add => self.binary("D+M"),
            Sub => self.binary("M-D"),
            And => self.binary("D&M"),
            Or => self.binary("D|M"),
            Neg => self.unary("-M"),
            Not => self.unary("!M"),
            Eq | Gt | Lt => self.compare(ctx, op.jump_mnemonic().unwrap()),
        }
    }

    /// Pops the right operand into `D`, combines it with the (now) top of
    /// stack in place. `expr` must read `D` as the right operand and `M` as
    /// the left — e.g. `"M-D"` for `sub`, the commutative-safe `"D+M"` for
    /// `add`.
    fn binary(&mut self, expr: &str) -> io::Result<()> {
        writeln!(self.w, "{POP}\n@SP\nA=M-1\nM={expr}")
    }

    fn unary(&mut self, expr: &str) -> io::Result<()> {
        writeln!(self.w, "@SP\nA=M-1\nM={expr}")
    }

    /// `left - right`, branch on `jump` to a fresh true-label, default to
    /// `0` (false) and jump past the true-label to a fresh continue label,
    /// true-label writes `-1`.
    fn compare(&mut self, ctx: &mut TranslationUnit, jump: &str) -> io::Result<()> {
        let true_label = ctx.fresh_compare_label(CompareKind::True);
        let false_label = ctx.fresh_compare_label(CompareKind::False);

        writeln!(
            self.w,
            "{POP}\n\
             @SP\n\
             A=M-1\n\
             D=M-D\n\
             @{true_label}\n\
             D;{jump}\n\
             @SP\n\
             A=M-1\n\
             M=0\n\
             @{false_label}\n\
             0;JMP\n\
             ({true_label})\n\
             @SP\n\
             A=M-1\n\
             M=-1\n\
             ({false_label})"
        )
    }

    pub fn label(&mut self, ctx: &TranslationUnit, name: &str) -> io::Result<()> {
        writeln!(self.w, "({})", ctx.scoped_label(name))
    }

    pub fn goto(&mut self, ctx: &TranslationUnit, name: &str) -> io::Result<()> {
        writeln!(self.w, "@{}\n0;JMP", ctx.scoped_label(name))
    }

    pub fn if_goto(&mut self, ctx: &TranslationUnit, name: &str) -> io::Result<()> {
        writeln!(self.w, "{POP}\n@{}\nD;JNE", ctx.scoped_label(name))
    }

    /// Entry symbol, then `n_vars` zero-pushes to allocate local slots.
    pub fn define_function(
        &mut self,
        ctx: &mut TranslationUnit,
        name: &str,
        n_vars: u16,
    ) -> io::Result<()> {
        ctx.enter_function(name);
        writeln!(self.w, "({name})")?;
        for _ in 0..n_vars {
            writeln!(self.w, "D=0\n{PUSH}")?;
        }
        Ok(())
    }

    /// See §4.5: pushes the return address and the caller's four segment
    /// pointers, rebases `ARG`/`LCL`, then jumps into the callee.
    pub fn call(&mut self, ctx: &mut TranslationUnit, name: &str, n_args: u16) -> io::Result<()> {
        let ret = ctx.fresh_return_label(name);

        writeln!(self.w, "@{ret}\nD=A\n{PUSH}")?;
        for base in ["LCL", "ARG", "THIS", "THAT"] {
            writeln!(self.w, "@{base}\nD=M\n{PUSH}")?;
        }

        // ARG = SP - 5 - n_args
        writeln!(
            self.w,
            "@{offset}\nD=A\n@SP\nD=M-D\n@ARG\nM=D",
            offset = u32::from(n_args) + 5
        )?;
        // LCL = SP
        writeln!(self.w, "@SP\nD=M\n@LCL\nM=D")?;

        writeln!(self.w, "@{name}\n0;JMP")?;
        writeln!(self.w, "({ret})")
    }

    /// See §4.5: caches `frame` (`R13`), `retAddr` (`R14`), and the return
    /// value (`R15`) before `SP` is rebased to `ARG + 1` — rebasing first
    /// means the return value is written through the freshly computed
    /// `SP - 1` rather than through `ARG` itself, so `ARG`'s own stored
    /// pointer is never clobbered ahead of being restored below. Restores
    /// the caller's four segment pointers and jumps indirectly through `R14`.
    pub fn ret(&mut self) -> io::Result<()> {
        writeln!(
            self.w,
            "@LCL\n\
             D=M\n\
             @R13\n\
             M=D\n\
             @5\n\
             A=D-A\n\
             D=M\n\
             @R14\n\
             M=D\n\
             @SP\n\
             A=M-1\n\
             D=M\n\
             @R15\n\
             M=D\n\
             @ARG\n\
             D=M+1\n\
             @SP\n\
             M=D\n\
             @R15\n\
             D=M\n\
             @SP\n\
             A=M-1\n\
             M=D\n\
             @R13\n\
             AM=M-1\n\
             D=M\n\
             @THAT\n\
             M=D\n\
             @R13\n\
             AM=M-1\n\
             D=M\n\
             @THIS\n\
             M=D\n\
             @R13\n\
             AM=M-1\n\
             D=M\n\
             @ARG\n\
             M=D\n\
             @R13\n\
             AM=M-1\n\
             D=M\n\
             @LCL\n\
             M=D\n\
             @R14\n\
             A=M\n\
             0;JMP"
        )
    }
}

fn base_symbol(segment: Segment) -> &'static str {
    match segment {
        Segment::Local => "LCL",
        Segment::Argument => "ARG",
        Segment::This => "THIS",
        Segment::That => "THAT",
        _ => unreachable!("base_symbol only called for LCL/ARG/THIS/THAT segments"),
    }
}

fn pointer_symbol(index: u16) -> &'static str {
    if index == 0 {
        "THIS"
    } else {
        "THAT"
    }
}
