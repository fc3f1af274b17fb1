//! Parser / dispatcher: classifies a tokenized line into a tagged
//! [`Instruction`], validating operand arity and shape.
use crate::error::TranslateError;
use crate::lexer::Line;
use crate::segment::Segment;

pub type Symbol<'a> = &'a str;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOp {
    Add,
    Sub,
    Neg,
    Eq,
    Gt,
    Lt,
    And,
    Or,
    Not,
}

impl ArithmeticOp {
    /// The Hack jump mnemonic for the three comparison ops; `None` for the
    /// rest, which don't branch.
    pub fn jump_mnemonic(self) -> Option<&'static str> {
        match self {
            ArithmeticOp::Eq => Some("JEQ"),
            ArithmeticOp::Gt => Some("JGT"),
            ArithmeticOp::Lt => Some("JLT"),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct Instruction<'source> {
    pub kind: InsnKind<'source>,
    pub line: usize,
    // hold original code, handy when threading diagnostics further downstream
    #[cfg(debug_assertions)]
    pub lexeme: &'source str,
}

#[derive(Debug)]
pub enum InsnKind<'source> {
    Arithmetic(ArithmeticOp),
    Push(Segment, u16),
    Pop(Segment, u16),
    Label(Symbol<'source>),
    Goto(Symbol<'source>),
    IfGoto(Symbol<'source>),
    /// `function name nVars`
    Function(Symbol<'source>, u16),
    /// `call name nArgs`
    Call(Symbol<'source>, u16),
    Return,
}

impl<'s> Instruction<'s> {
    pub fn parse(file: &str, line: &Line<'s>) -> Result<Self, TranslateError> {
        use InsnKind::*;

        let err = |message: &str| TranslateError::parse(file, line.line, line.text, message);

        let mut ops = line.tokens.iter().copied();
        let kind = ops.next().ok_or_else(|| err("empty instruction"))?;

        let kind = match kind {
            "add" => Arithmetic(ArithmeticOp::Add),
            "sub" => Arithmetic(ArithmeticOp::Sub),
            "neg" => Arithmetic(ArithmeticOp::Neg),
            "eq" => Arithmetic(ArithmeticOp::Eq),
            "gt" => Arithmetic(ArithmeticOp::Gt),
            "lt" => Arithmetic(ArithmeticOp::Lt),
            "and" => Arithmetic(ArithmeticOp::And),
            "or" => Arithmetic(ArithmeticOp::Or),
            "not" => Arithmetic(ArithmeticOp::Not),
            "push" | "pop" => {
                let segment_tok = ops
                    .next()
                    .ok_or_else(|| err("expected a segment to push or pop"))?;
                let segment = Segment::try_from(segment_tok)
                    .map_err(|_| err(&format!("unknown segment `{segment_tok}`")))?;
                let index_tok = ops
                    .next()
                    .ok_or_else(|| err("expected an index for the segment"))?;
                let index = parse_index(file, line, index_tok)?;

                match kind {
                    "push" => Push(segment, index),
                    "pop" if segment == Segment::Constant => {
                        return Err(err("cannot pop into the constant segment"))
                    }
                    "pop" => Pop(segment, index),
                    _ => unreachable!(),
                }
            }
            "label" | "goto" | "if-goto" => {
                let name = ops.next().ok_or_else(|| err("expected a label symbol"))?;
                validate_symbol(file, line, name)?;

                match kind {
                    "label" => Label(name),
                    "goto" => Goto(name),
                    "if-goto" => IfGoto(name),
                    _ => unreachable!(),
                }
            }
            "function" => {
                let name = ops.next().ok_or_else(|| err("expected a function name"))?;
                validate_symbol(file, line, name)?;
                let n_vars_tok = ops
                    .next()
                    .ok_or_else(|| err("expected a local-variable count"))?;
                let n_vars = parse_index(file, line, n_vars_tok)?;

                Function(name, n_vars)
            }
            "call" => {
                let name = ops.next().ok_or_else(|| err("expected a function name"))?;
                validate_symbol(file, line, name)?;
                let n_args_tok = ops.next().ok_or_else(|| err("expected an argument count"))?;
                let n_args = parse_index(file, line, n_args_tok)?;

                Call(name, n_args)
            }
            "return" => Return,
            other => return Err(err(&format!("unknown vm instruction `{other}`"))),
        };

        Ok(Instruction {
            kind,
            line: line.line,
            #[cfg(debug_assertions)]
            lexeme: line.text,
        })
    }
}

/// Parses a non-negative 16-bit index, distinguishing "not a number"
/// (`ParseError`) from "negative or too large" (`OperandRangeError`).
fn parse_index(file: &str, line: &Line<'_>, raw: &str) -> Result<u16, TranslateError> {
    let value: i64 = raw.parse().map_err(|_| {
        TranslateError::parse(
            file,
            line.line,
            line.text,
            format!("expected an integer, found `{raw}`"),
        )
    })?;

    u16::try_from(value).map_err(|_| {
        TranslateError::operand_range(
            file,
            line.line,
            line.text,
            format!("index {value} is out of range (must fit in a non-negative 16-bit value)"),
        )
    })
}

fn validate_symbol(file: &str, line: &Line<'_>, symbol: &str) -> Result<(), TranslateError> {
    let valid = !symbol.is_empty()
        && !symbol.starts_with(|c: char| c.is_ascii_digit())
        && symbol
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '.' | '_' | '$' | ':'));

    if !valid {
        return Err(TranslateError::parse(
            file,
            line.line,
            line.text,
            format!("invalid symbol name `{symbol}`"),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn parse_one(file: &str, source: &str) -> Result<InsnKind<'_>, TranslateError> {
        let line = Lexer::new(source).next().unwrap();
        Instruction::parse(file, &line).map(|i| i.kind)
    }

    #[test]
    fn parses_push_constant() {
        match parse_one("Foo", "push constant 7").unwrap() {
            InsnKind::Push(Segment::Constant, 7) => {}
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn rejects_pop_constant() {
        assert!(matches!(
            parse_one("Foo", "pop constant 0"),
            Err(TranslateError::Parse { .. })
        ));
    }

    #[test]
    fn rejects_negative_index_as_operand_range_error() {
        assert!(matches!(
            parse_one("Foo", "push local -1"),
            Err(TranslateError::OperandRange { .. })
        ));
    }

    #[test]
    fn rejects_non_integer_index_as_parse_error() {
        assert!(matches!(
            parse_one("Foo", "push local abc"),
            Err(TranslateError::Parse { .. })
        ));
    }

    #[test]
    fn rejects_unknown_instruction() {
        assert!(matches!(
            parse_one("Foo", "frobnicate"),
            Err(TranslateError::Parse { .. })
        ));
    }

    #[test]
    fn parses_function_and_call() {
        match parse_one("Foo", "function Bar.mul 2").unwrap() {
            InsnKind::Function("Bar.mul", 2) => {}
            other => panic!("unexpected: {other:?}"),
        }
        match parse_one("Foo", "call Bar.mul 2").unwrap() {
            InsnKind::Call("Bar.mul", 2) => {}
            other => panic!("unexpected: {other:?}"),
        }
    }
}
