use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    // base address of `local` segment in the current function
    // RAM[1]
    Local,
    // base address of `argument` segment in the current function
    // RAM[2]
    Argument,
    Static,
    // no-mapping
    Constant,
    // RAM[3]
    This,
    // RAM[4]
    That,
    // RAM[3, 4]
    Pointer,
    // RAM[5 - 12]
    Temp,
}

/// Unrecognized segment name; the caller attaches file/line context and
/// turns this into a [`crate::error::TranslateError::Parse`].
impl TryFrom<&str> for Segment {
    type Error = ();

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        use Segment::*;

        let segment = match s {
            "local" => Local,
            "argument" => Argument,
            "static" => Static,
            "constant" => Constant,
            "this" => This,
            "that" => That,
            "pointer" => Pointer,
            "temp" => Temp,
            _ => return Err(()),
        };

        Ok(segment)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Segment::*;

        let seg = match self {
            Local => "local",
            Argument => "argument",
            Static => "static",
            Constant => "constant",
            This => "this",
            That => "that",
            Pointer => "pointer",
            Temp => "temp",
        };

        write!(f, "{seg}")
    }
}
