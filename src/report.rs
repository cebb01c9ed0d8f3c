use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

use crate::error::ContractError;

#[derive(Debug, Serialize)]
pub struct CheckOutcome {
    pub endpoint: String,
    pub plugin: Option<String>,
    pub passed: bool,
    pub error: Option<String>,
    /// Number of source records in the response; `None` for body-less checks.
    pub records: Option<usize>,
    pub attempts: u32,
    pub latency_ms: u64,
}

impl CheckOutcome {
    pub fn from_result(
        endpoint: String,
        plugin: Option<String>,
        result: Result<Option<usize>, ContractError>,
        attempts: u32,
        elapsed: Duration,
    ) -> Self {
        let latency_ms = elapsed.as_millis() as u64;
        match result {
            Ok(records) => CheckOutcome {
                endpoint,
                plugin,
                passed: true,
                error: None,
                records,
                attempts,
                latency_ms,
            },
            Err(e) => CheckOutcome {
                endpoint,
                plugin,
                passed: false,
                error: Some(e.to_string()),
                records: None,
                attempts,
                latency_ms,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SuiteReport {
    pub started_at: String,
    pub base_url: String,
    pub status: String,
    pub passed: usize,
    pub failed: usize,
    pub checks: Vec<CheckOutcome>,
}

/// Overall suite status string. Pure so it is testable without a run.
pub fn determine_overall_status(failed: usize) -> &'static str {
    if failed == 0 {
        "passed"
    } else {
        "failed"
    }
}

impl SuiteReport {
    pub fn new(started_at: DateTime<Utc>, base_url: &str, checks: Vec<CheckOutcome>) -> Self {
        let passed = checks.iter().filter(|c| c.passed).count();
        let failed = checks.len() - passed;

        SuiteReport {
            started_at: started_at.to_rfc3339(),
            base_url: base_url.to_string(),
            status: determine_overall_status(failed).to_string(),
            passed,
            failed,
            checks,
        }
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Plain-text rendering for terminal output.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "Contract probe against {} ({})\n",
            self.base_url, self.started_at
        ));

        for check in &self.checks {
            let verdict = if check.passed { "PASS" } else { "FAIL" };
            let target = match &check.plugin {
                Some(plugin) => format!("{} [{}]", check.endpoint, plugin),
                None => check.endpoint.clone(),
            };

            out.push_str(&format!("  {}  {} ({} ms", verdict, target, check.latency_ms));
            if check.attempts > 1 {
                out.push_str(&format!(", {} attempts", check.attempts));
            }
            if let Some(records) = check.records {
                out.push_str(&format!(", {} records", records));
            }
            out.push(')');
            if let Some(error) = &check.error {
                out.push_str(&format!(": {}", error));
            }
            out.push('\n');
        }

        out.push_str(&format!(
            "{}: {} passed, {} failed\n",
            self.status, self.passed, self.failed
        ));
        out
    }
}
