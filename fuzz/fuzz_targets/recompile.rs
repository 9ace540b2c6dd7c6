#![no_main]
use libfuzzer_sys::fuzz_target;

extern crate ki2_extract;

use ki2_extract::recompiler::{recompile, Mode, Patch};

// Arbitrary (offset, length, translation) tuples must never panic the
// recompiler, even when offset/length fall outside the original file or the
// translation contains code points with no Shift-JIS encoding.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let offset = data[0] as usize;
    let len = data[1] as usize;
    let original = &data[2..];
    let translation = String::from_utf8_lossy(original).into_owned();

    let patches = vec![Patch {
        offset,
        original_len: len,
        translation,
    }];

    let _ = recompile(original, &patches, Mode::Strict);
    let _ = recompile(original, &patches, Mode::Expand);
});
