//! Per-file translation state: the data a single VM file's translation
//! carries from the first instruction to the last.
use crate::label::{CompareKind, LabelAllocator};

/// Created when a VM file is opened, threaded through every instruction in
/// that file, and discarded at EOF. Counters and `current_function` never
/// cross file boundaries — a directory-mode link creates one fresh
/// `TranslationUnit` per `.vm` file, plus one for the bootstrap preamble.
#[derive(Debug)]
pub struct TranslationUnit {
    pub file_name: String,
    /// Set by the most recent `function` instruction; starts empty for code
    /// that appears before any `function` declaration (e.g. the bootstrap).
    pub current_function: String,
    labels: LabelAllocator,
}

impl TranslationUnit {
    pub fn new(file_name: impl Into<String>) -> Self {
        TranslationUnit {
            file_name: file_name.into(),
            current_function: String::new(),
            labels: LabelAllocator::default(),
        }
    }

    /// The linker symbol a `static i` reference in this file resolves to.
    pub fn static_symbol(&self, index: u16) -> String {
        format!("{}.{index}", self.file_name)
    }

    /// Scopes a `label`/`goto`/`if-goto` operand to the enclosing function.
    pub fn scoped_label(&self, name: &str) -> String {
        format!("{}${name}", self.current_function)
    }

    pub fn enter_function(&mut self, name: &str) {
        self.current_function = name.to_string();
    }

    pub fn fresh_compare_label(&mut self, kind: CompareKind) -> String {
        self.labels.fresh_compare_label(&self.file_name, kind)
    }

    pub fn fresh_return_label(&mut self, callee: &str) -> String {
        self.labels.fresh_return_label(&self.current_function, callee)
    }
}
