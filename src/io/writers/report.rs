use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::error::Result;

/// Provenance wrapper written around every report.
#[derive(Serialize)]
struct ReportEnvelope<'a, T: Serialize> {
    tool: &'static str,
    version: &'static str,
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    report: &'a T,
}

/// Write `report` as a pretty-printed JSON sidecar at `path`, stamped with the
/// tool name, version and the current UTC time.
pub fn write_json_sidecar<T: Serialize>(report: &T, path: &Path) -> Result<()> {
    let envelope = ReportEnvelope {
        tool: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        generated_at: Utc::now(),
        report,
    };

    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, &envelope)?;
    info!("JSON report written to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Counts {
        generated: usize,
    }

    #[test]
    fn sidecar_is_flattened_with_provenance() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        write_json_sidecar(&Counts { generated: 3 }, &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["generated"], 3);
        assert_eq!(value["tool"], "stepcrop");
        assert!(value["generated_at"].is_string());
    }
}
