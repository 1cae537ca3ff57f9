use regex::Regex;
use std::sync::OnceLock;

/// Coverage total pulled from pytest-cov's terminal summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverageReport {
    pub percent: u32,
}

fn total_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // `TOTAL   1520   212   86%`, optionally with branch columns or a decimal
        Regex::new(r"(?m)^TOTAL\b.*\s(\d+)(?:\.\d+)?%\s*$").expect("coverage pattern is valid")
    })
}

impl CoverageReport {
    /// Extract the total from combined test output.
    ///
    /// The last `TOTAL` line wins. Decimal percentages are truncated.
    /// Returns `None` when no summary line is present.
    pub fn parse(output: &str) -> Option<Self> {
        total_line()
            .captures_iter(output)
            .last()
            .and_then(|captures| captures.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .map(|percent| CoverageReport { percent })
    }

    /// Strictly below the threshold; equal passes.
    pub fn is_below(&self, threshold: u32) -> bool {
        self.percent < threshold
    }
}
