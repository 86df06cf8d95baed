use tracing::info;

/// Step for periodic gate progress logs.
pub const GATE_LOG_STEP: usize = 1_000_000;

/// Format a gate count with compact suffixes: k, m, b.
#[inline]
pub fn format_gate_count(n: u64) -> String {
    const THOUSAND: u64 = 1_000;
    const MILLION: u64 = 1_000_000;
    const BILLION: u64 = 1_000_000_000;

    match n {
        v if v >= BILLION => format!("{:.2}b", v as f64 / BILLION as f64),
        v if v >= MILLION => format!("{:.1}m", v as f64 / MILLION as f64),
        v if v >= THOUSAND => format!("{:.1}k", v as f64 / THOUSAND as f64),
        _ => format!("{}", n),
    }
}

/// Log progress every `GATE_LOG_STEP` gates.
#[inline]
pub fn maybe_log_progress(label: &str, gate_index: usize) {
    if gate_index != 0 && gate_index.is_multiple_of(GATE_LOG_STEP) {
        info!("{}: {}", label, format_gate_count(gate_index as u64));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_suffixes() {
        assert_eq!(format_gate_count(999), "999");
        assert_eq!(format_gate_count(1_500), "1.5k");
        assert_eq!(format_gate_count(2_000_000), "2.0m");
        assert_eq!(format_gate_count(3_250_000_000), "3.25b");
    }
}
