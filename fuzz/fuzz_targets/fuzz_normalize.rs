#![no_main]

use libfuzzer_sys::fuzz_target;

use stsrun_core::{normalize, ProblemSize, RawRun};

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    // First byte picks the size (2..=256) and the timed-out flag.
    let n = ProblemSize::new((u32::from(data[0] & 0x7f) + 1) * 2).unwrap();
    let raw = RawRun {
        stdout: String::from_utf8_lossy(&data[1..]).into_owned(),
        elapsed_secs: 1,
        timed_out: data[0] & 0x80 != 0,
        ..RawRun::default()
    };

    // Should not panic, and every accepted stream yields a consistent result.
    if let Ok(result) = normalize(&raw, n, 300) {
        assert_eq!(result.n, n.get());
        if raw.timed_out {
            assert!(result.solution.is_empty());
            assert_eq!(result.time, 300);
        }
    }
});
