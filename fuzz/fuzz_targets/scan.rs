#![no_main]
use libfuzzer_sys::fuzz_target;

extern crate ki2_extract;

// Arbitrary bytes must never panic the scanner/extractor/classifier chain,
// no matter how malformed (unterminated control sequences, lone lead bytes,
// truncated SJIS pairs at EOF).
fuzz_target!(|data: &[u8]| {
    let _ = ki2_extract::extract_file(data);
});
