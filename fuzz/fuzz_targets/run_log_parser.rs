#![no_main]

use amdahl_scaling::analysis::ScalingAnalysis;
use amdahl_scaling::config::AnalysisConfig;
use amdahl_scaling::record::RunRecord;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Decoding and analysis must reject bad logs with an error, never panic
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(records) = RunRecord::from_json_str(input) {
            // Curves hold one point per process count; keep them small
            if records.iter().any(|r| r.processor_count > 4096) {
                return;
            }
            if let Ok(analysis) = ScalingAnalysis::new(AnalysisConfig::default()) {
                let _ = analysis.run(&records);
            }
        }
    }
});
