#![no_main]

use hack_vm::insn::Instruction;
use hack_vm::lexer::Lexer;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(source) = std::str::from_utf8(data) {
        for line in Lexer::new(source) {
            let _ = Instruction::parse("Fuzz", &line);
        }
    }
});
