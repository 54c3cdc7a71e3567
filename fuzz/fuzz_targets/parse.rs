#![no_main]

use libfuzzer_sys::fuzz_target;
use quartz_syntax::{lexer, parser};

fuzz_target!(|data: &[u8]| {
    // Declaration files are UTF-8; other inputs are not interesting.
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(tokens) = lexer::lex(s) {
            let _ = parser::parse(&tokens);
        }
    }
});
