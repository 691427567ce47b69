//! Validation for finished batch input files.
//!
//! [`BatchFileValidator`] re-reads a JSONL file line by line and checks it
//! against the Batch API upload constraints without mutating the file. The
//! outcome is a [`ValidationReport`] that separates hard errors (the upload
//! would be rejected) from warnings (the upload would work but something
//! looks off), plus summary statistics about the file.
//!
//! ```no_run
//! use openbatch_openai::{BatchFileValidator, validate_batch_file};
//!
//! # fn main() -> openbatch_core::Result<()> {
//! let report = validate_batch_file("batch.jsonl")?;
//! if !report.is_valid {
//!     eprintln!("{report}");
//! }
//!
//! // Or with individual checks toggled:
//! let report = BatchFileValidator::new()
//!     .with_mixed_endpoints(true)
//!     .validate("batch.jsonl")?;
//! # Ok(())
//! # }
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde_json::{Map, Value};

#[cfg(feature = "tracing")]
use tracing::{debug, warn};

use openbatch_core::error::Result;

use crate::endpoint::Endpoint;

/// Upper bound on requests per batch input file.
pub const MAX_REQUESTS_PER_FILE: usize = 50_000;

/// Upper bound on batch input file size in bytes (200 MB).
pub const MAX_FILE_SIZE_BYTES: u64 = 200 * 1024 * 1024;

const REQUIRED_FIELDS: [&str; 4] = ["custom_id", "method", "url", "body"];

/// Checks a JSONL batch input file against the Batch API constraints.
///
/// Every check that depends on a limit or a policy can be toggled. The
/// defaults match what the upload endpoint enforces: unique `custom_id`s,
/// the size and request-count limits, and a single endpoint per file.
#[derive(Debug, Clone)]
pub struct BatchFileValidator {
    check_unique_custom_ids: bool,
    check_file_size: bool,
    check_request_count: bool,
    allow_mixed_endpoints: bool,
}

impl Default for BatchFileValidator {
    fn default() -> Self {
        Self {
            check_unique_custom_ids: true,
            check_file_size: true,
            check_request_count: true,
            allow_mixed_endpoints: false,
        }
    }
}

impl BatchFileValidator {
    /// Create a validator with all checks at their defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle the duplicate `custom_id` check.
    pub fn with_unique_custom_ids(mut self, check: bool) -> Self {
        self.check_unique_custom_ids = check;
        self
    }

    /// Toggle the file size limit check.
    pub fn with_file_size_limit(mut self, check: bool) -> Self {
        self.check_file_size = check;
        self
    }

    /// Toggle the request count limit check.
    pub fn with_request_count_limit(mut self, check: bool) -> Self {
        self.check_request_count = check;
        self
    }

    /// Allow several endpoints in one file without a warning.
    pub fn with_mixed_endpoints(mut self, allow: bool) -> Self {
        self.allow_mixed_endpoints = allow;
        self
    }

    /// Validate the file at `path` and collect every finding into a report.
    ///
    /// Returns `Err` only when the file itself cannot be read. Everything
    /// found *inside* the file, including unparseable lines, lands in the
    /// report instead.
    pub fn validate(&self, path: impl AsRef<Path>) -> Result<ValidationReport> {
        let path = path.as_ref();
        let mut report = ValidationReport::new();

        if path.extension().and_then(|extension| extension.to_str()) != Some("jsonl") {
            report
                .warnings
                .push("file does not use the `.jsonl` extension".to_string());
        }

        let metadata = std::fs::metadata(path)?;
        report.stats.file_size_bytes = metadata.len();
        if self.check_file_size && metadata.len() > MAX_FILE_SIZE_BYTES {
            report.fail(format!(
                "file size ({} bytes) exceeds the limit ({MAX_FILE_SIZE_BYTES} bytes)",
                metadata.len()
            ));
        }

        let reader = BufReader::new(File::open(path)?);
        let mut seen_ids: BTreeSet<String> = BTreeSet::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let number = index + 1;
            report.stats.total_lines += 1;

            let trimmed = line.trim();
            if trimmed.is_empty() {
                report.stats.empty_lines += 1;
                report
                    .warnings
                    .push(format!("line {number}: empty line is ignored"));
                continue;
            }

            report.stats.request_count += 1;
            match serde_json::from_str::<Value>(trimmed) {
                Ok(request) => self.check_request(&request, number, &mut seen_ids, &mut report),
                Err(error) => report.fail(format!("line {number}: invalid JSON: {error}")),
            }
        }

        report.stats.unique_custom_ids = seen_ids.len();

        if self.check_request_count && report.stats.request_count > MAX_REQUESTS_PER_FILE {
            report.fail(format!(
                "request count ({}) exceeds the limit ({MAX_REQUESTS_PER_FILE})",
                report.stats.request_count
            ));
        }

        if !self.allow_mixed_endpoints && report.stats.endpoints.len() > 1 {
            let used: Vec<&str> = report.stats.endpoints.keys().map(String::as_str).collect();
            report.warnings.push(format!(
                "file mixes several endpoints ({}), batches run best with one endpoint per file",
                used.join(", ")
            ));
        }

        #[cfg(feature = "tracing")]
        {
            if report.is_valid {
                debug!(
                    path = %path.display(),
                    requests = report.stats.request_count,
                    warnings = report.warnings.len(),
                    "batch file validated"
                );
            } else {
                warn!(
                    path = %path.display(),
                    errors = report.errors.len(),
                    "batch file failed validation"
                );
            }
        }

        Ok(report)
    }

    fn check_request(
        &self,
        request: &Value,
        line: usize,
        seen_ids: &mut BTreeSet<String>,
        report: &mut ValidationReport,
    ) {
        let Some(object) = request.as_object() else {
            report.fail(format!("line {line}: request must be a JSON object"));
            return;
        };

        let missing: Vec<&str> = REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|field| !object.contains_key(*field))
            .collect();
        if !missing.is_empty() {
            report.fail(format!(
                "line {line}: missing required fields: {}",
                missing.join(", ")
            ));
            return;
        }

        match object.get("custom_id").and_then(Value::as_str) {
            Some(id) if !id.is_empty() => {
                if self.check_unique_custom_ids && !seen_ids.insert(id.to_string()) {
                    report.fail(format!("line {line}: duplicate custom_id `{id}`"));
                }
            }
            _ => report.fail(format!("line {line}: custom_id must be a non-empty string")),
        }

        if object.get("method").and_then(Value::as_str) != Some("POST") {
            report.fail(format!(
                "line {line}: method must be `POST`, got {}",
                object["method"]
            ));
        }

        let endpoint = object
            .get("url")
            .and_then(Value::as_str)
            .and_then(Endpoint::from_path);
        match endpoint {
            Some(endpoint) => {
                *report
                    .stats
                    .endpoints
                    .entry(endpoint.path().to_string())
                    .or_insert(0) += 1;
            }
            None => report.fail(format!("line {line}: unknown endpoint {}", object["url"])),
        }

        match object.get("body").and_then(Value::as_object) {
            Some(body) => check_body(body, endpoint, line, report),
            None => report.fail(format!("line {line}: body must be a JSON object")),
        }
    }
}

fn check_body(
    body: &Map<String, Value>,
    endpoint: Option<Endpoint>,
    line: usize,
    report: &mut ValidationReport,
) {
    if !body.contains_key("model") {
        report.fail(format!("line {line}: body is missing required field `model`"));
    }

    match endpoint {
        Some(Endpoint::Responses) => {
            if !body.contains_key("input") && !body.contains_key("prompt") {
                report.fail(format!(
                    "line {line}: a Responses body needs either `input` or `prompt`"
                ));
            }
        }
        Some(Endpoint::ChatCompletions) => match body.get("messages").and_then(Value::as_array) {
            Some(messages) if messages.is_empty() => {
                report.fail(format!("line {line}: `messages` must not be empty"));
            }
            Some(_) => {}
            None => report.fail(format!(
                "line {line}: a Chat Completions body needs a `messages` array"
            )),
        },
        Some(Endpoint::Embeddings) => {
            if !body.contains_key("input") {
                report.fail(format!("line {line}: an Embeddings body needs `input`"));
            }
        }
        // Unknown endpoint was already reported, nothing endpoint-specific to check.
        None => {}
    }
}

/// Outcome of validating one batch input file.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    /// `false` as soon as a single error was found.
    pub is_valid: bool,
    /// Findings that would make the Batch API reject the file.
    pub errors: Vec<String>,
    /// Findings worth fixing that do not block an upload.
    pub warnings: Vec<String>,
    /// Counters collected while scanning the file.
    pub stats: ValidationStats,
}

impl ValidationReport {
    fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            stats: ValidationStats::default(),
        }
    }

    fn fail(&mut self, message: String) {
        self.errors.push(message);
        self.is_valid = false;
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = Vec::new();
        lines.push(format!(
            "validation {}",
            if self.is_valid { "passed" } else { "failed" }
        ));
        lines.push(format!(
            "  lines: {} ({} requests, {} empty)",
            self.stats.total_lines, self.stats.request_count, self.stats.empty_lines
        ));
        lines.push(format!("  file size: {} bytes", self.stats.file_size_bytes));
        for (path, count) in &self.stats.endpoints {
            lines.push(format!("  {path}: {count}"));
        }
        if !self.errors.is_empty() {
            lines.push(format!("errors ({}):", self.errors.len()));
            for error in &self.errors {
                lines.push(format!("  - {error}"));
            }
        }
        if !self.warnings.is_empty() {
            lines.push(format!("warnings ({}):", self.warnings.len()));
            for warning in &self.warnings {
                lines.push(format!("  - {warning}"));
            }
        }
        f.write_str(&lines.join("\n"))
    }
}

/// Counters collected while scanning a batch input file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationStats {
    /// Number of lines in the file, empty ones included.
    pub total_lines: usize,
    /// Number of non-empty lines, parseable or not.
    pub request_count: usize,
    /// Number of empty lines.
    pub empty_lines: usize,
    /// Number of distinct `custom_id` values seen.
    pub unique_custom_ids: usize,
    /// Requests per endpoint path.
    pub endpoints: BTreeMap<String, usize>,
    /// File size on disk in bytes.
    pub file_size_bytes: u64,
}

/// Validate `path` with the default checks.
pub fn validate_batch_file(path: impl AsRef<Path>) -> Result<ValidationReport> {
    BatchFileValidator::new().validate(path)
}

/// `true` when `path` exists and passes the default checks.
pub fn quick_validate(path: impl AsRef<Path>) -> bool {
    validate_batch_file(path).is_ok_and(|report| report.is_valid)
}
