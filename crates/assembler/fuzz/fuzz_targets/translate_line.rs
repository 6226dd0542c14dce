#![no_main]

use hack_assembler::assembler::{translate, translate_line};
use hack_assembler::source::clean_line;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Some(line) = clean_line(text) {
        if let Ok(Some(word)) = translate_line(line) {
            assert_eq!(word.to_string().len(), 16);
        }
    }

    let mut sink = Vec::new();
    if let Ok(summary) = translate(data, &mut sink, "fuzz.asm") {
        assert_eq!(sink.len(), summary.words * 18);
    }
});
