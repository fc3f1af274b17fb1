//! Vends the two families of unique labels the emitter needs.
use std::fmt;

/// Which side of a comparison branch a label names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareKind {
    True,
    False,
}

impl fmt::Display for CompareKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CompareKind::True => "TRUE",
            CompareKind::False => "FALSE",
        };
        write!(f, "{s}")
    }
}

/// Two independent monotonic counters, owned by a single [`crate::TranslationUnit`]:
/// one for comparison landing pads, one for call return sites. Neither is
/// ever reset or decremented within the lifetime of the translation unit.
#[derive(Debug, Default)]
pub struct LabelAllocator {
    label_counter: u32,
    call_counter: u32,
}

impl LabelAllocator {
    /// `"<file_name>.<kind>.<n>"`. Called once per side of a comparison, so a
    /// single `eq`/`gt`/`lt` consumes two successive counter values — one for
    /// the `True` label, one for the `False` label.
    pub fn fresh_compare_label(&mut self, file_name: &str, kind: CompareKind) -> String {
        self.label_counter += 1;
        format!("{file_name}.{kind}.{}", self.label_counter)
    }

    /// `"<current_function>$<callee>$ret.<n>"`.
    pub fn fresh_return_label(&mut self, current_function: &str, callee: &str) -> String {
        self.call_counter += 1;
        format!("{current_function}${callee}$ret.{}", self.call_counter)
    }
}
