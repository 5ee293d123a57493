//! Line-delimited JSON loader.

use bzip2::read::MultiBzDecoder;
use flate2::read::MultiGzDecoder;
use serde::Serialize;
use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

use crate::error::LoadError;
use crate::models::Record;

/// How to treat lines that are not admissible records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadPolicy {
    /// Skip bad lines and keep going
    #[default]
    Tolerant,
    /// Fail on the first bad line
    Strict,
}

/// Per-load line accounting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub admitted: usize,
    pub blank: usize,
    pub skipped_malformed: usize,
    pub skipped_not_object: usize,
    pub skipped_missing_code: usize,
}

impl LoadReport {
    pub fn skipped(&self) -> usize {
        self.skipped_malformed + self.skipped_not_object + self.skipped_missing_code
    }
}

/// Open a dataset file, transparently decompressing `.gz` and `.bz2` files.
///
/// Both decoders read every concatenated member/stream, not just the first.
pub fn open_resource(path: &Path) -> Result<Box<dyn Read>, LoadError> {
    let file = File::open(path).map_err(|e| LoadError::io(path, e))?;
    let reader: Box<dyn Read> = match path.extension().and_then(|e| e.to_str()) {
        Some("gz") => Box::new(MultiGzDecoder::new(file)),
        Some("bz2") => Box::new(MultiBzDecoder::new(file)),
        _ => Box::new(file),
    };
    Ok(reader)
}

/// Read records from a line-delimited JSON source, in source order.
///
/// `origin` only labels I/O errors.
pub fn read_records<R: Read>(
    reader: R,
    policy: LoadPolicy,
    origin: &Path,
) -> Result<(Vec<Record>, LoadReport), LoadError> {
    let mut records = Vec::new();
    let mut report = LoadReport::default();

    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    let mut line_no = 0;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| LoadError::io(origin, e))?;
        if read == 0 {
            break;
        }
        line_no += 1;

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.trim(),
            Err(e) => {
                if policy == LoadPolicy::Strict {
                    return Err(LoadError::Malformed {
                        line: line_no,
                        message: e.to_string(),
                    });
                }
                debug!("Skipping non-UTF-8 line {}: {}", line_no, e);
                report.skipped_malformed += 1;
                continue;
            }
        };
        if line.is_empty() {
            report.blank += 1;
            continue;
        }

        let value: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                if policy == LoadPolicy::Strict {
                    return Err(LoadError::Malformed {
                        line: line_no,
                        message: e.to_string(),
                    });
                }
                debug!("Skipping malformed line {}: {}", line_no, e);
                report.skipped_malformed += 1;
                continue;
            }
        };

        let fields = match value {
            Value::Object(fields) => fields,
            _ => {
                if policy == LoadPolicy::Strict {
                    return Err(LoadError::NotAnObject { line: line_no });
                }
                debug!("Skipping non-object line {}", line_no);
                report.skipped_not_object += 1;
                continue;
            }
        };

        match Record::from_object(fields) {
            Some(record) => {
                records.push(record);
                report.admitted += 1;
            }
            None => {
                if policy == LoadPolicy::Strict {
                    return Err(LoadError::MissingPincode { line: line_no });
                }
                debug!("Skipping line {} without Pincode", line_no);
                report.skipped_missing_code += 1;
            }
        }
    }

    Ok((records, report))
}

/// Load every admissible record from a dataset file.
pub fn load_records(path: &Path, policy: LoadPolicy) -> Result<(Vec<Record>, LoadReport), LoadError> {
    info!("Loading pincode data from {}", path.display());

    let reader = open_resource(path)?;
    let (records, report) = read_records(reader, policy, path)?;

    info!(
        "Loaded {} records ({} skipped)",
        report.admitted,
        report.skipped()
    );
    Ok((records, report))
}
