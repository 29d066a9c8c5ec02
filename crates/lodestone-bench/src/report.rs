use std::path::Path;

use crate::runner::RunResult;

/// A saved run, as written by `--output`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Report {
    pub timestamp: String,
    pub result: RunResult,
}

/// Save a report to a JSON file, creating parent directories as needed.
pub fn save_report(path: &Path, report: &Report) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(report).map_err(std::io::Error::other)?;
    std::fs::write(path, json)
}

/// Format a run as a markdown summary.
pub fn format_markdown(r: &RunResult) -> String {
    let mut out = String::new();
    out.push_str("| Chunks | Spawning | Veins | Created | Voxels | Mean (ms) | Median (ms) | P95 (ms) | Max (ms) |\n");
    out.push_str("|--------|----------|-------|---------|--------|-----------|-------------|----------|----------|\n");
    out.push_str(&format!(
        "| {} | {} | {} | {} | {} | {:.2} | {:.2} | {:.2} | {:.2} |\n",
        r.chunks,
        r.spawning_chunks,
        r.veins_attempted,
        r.veins_created,
        r.voxels_placed,
        r.timings.mean_ms,
        r.timings.median_ms,
        r.timings.p95_ms,
        r.timings.max_ms,
    ));

    if is_clean(r) {
        out.push_str("\nAll ore inside its chunk and elevation band. Seeding is deterministic.\n");
    } else {
        out.push_str("\nCHECKS FAILED:\n");
        if r.containment_violations > 0 {
            out.push_str(&format!(
                "  - {} chunks with unexpected ore counts\n",
                r.containment_violations
            ));
        }
        if r.elevation_violations > 0 {
            out.push_str(&format!(
                "  - {} ore voxels outside the elevation band\n",
                r.elevation_violations
            ));
        }
        if !r.deterministic {
            out.push_str("  - regenerated chunk differs from the first run\n");
        }
    }
    out
}

/// Whether every check in `r` passed.
pub fn is_clean(r: &RunResult) -> bool {
    r.containment_violations == 0 && r.elevation_violations == 0 && r.deterministic
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::TimingSeries;

    fn result() -> RunResult {
        RunResult {
            world_seed: 1,
            radius: 1,
            chunks: 9,
            spawning_chunks: 4,
            veins_attempted: 10,
            veins_created: 9,
            voxels_placed: 180,
            containment_violations: 0,
            elevation_violations: 0,
            deterministic: true,
            timings: TimingSeries {
                mean_ms: 1.5,
                median_ms: 1.25,
                p95_ms: 3.0,
                min_ms: 0.5,
                max_ms: 3.0,
            },
        }
    }

    #[test]
    fn test_markdown_clean_run() {
        let r = result();
        let md = format_markdown(&r);
        assert!(md.contains("| 9 | 4 | 10 | 9 | 180 | 1.50 | 1.25 | 3.00 | 3.00 |"));
        assert!(md.contains("deterministic"));
        assert!(is_clean(&r));
    }

    #[test]
    fn test_markdown_lists_failures() {
        let mut r = result();
        r.elevation_violations = 3;
        r.deterministic = false;
        let md = format_markdown(&r);
        assert!(md.contains("CHECKS FAILED"));
        assert!(md.contains("3 ore voxels outside"));
        assert!(md.contains("regenerated chunk differs"));
        assert!(!md.contains("unexpected ore counts"));
        assert!(!is_clean(&r));
    }
}
