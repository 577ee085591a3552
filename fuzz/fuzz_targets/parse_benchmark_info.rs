#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(info) = serde_json::from_slice::<crossbench_types::CriterionBenchmark>(data) {
        // Absent value and throughput always resolve.
        let _ = info.test_case();
        let _ = info.throughput_bytes();
    }
});
