use crate::core::metrics::RunMetrics;
use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::time::Instant;
use tracing::debug;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputKind {
    Plain,
    Gzip,
}

pub fn detect_input_kind(path: &Path) -> Result<InputKind> {
    if let Some(ext) = path.extension().and_then(|s| s.to_str()) {
        if ext.eq_ignore_ascii_case("gz") {
            return Ok(InputKind::Gzip);
        }
    }
    let mut file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut magic = [0u8; 2];
    let n = file
        .read(&mut magic)
        .with_context(|| "failed to read magic bytes")?;
    if n == 2 && magic == [0x1f, 0x8b] {
        Ok(InputKind::Gzip)
    } else {
        Ok(InputKind::Plain)
    }
}

/// Load a run's materialized metrics from a JSON document, gzip or plain.
pub fn load_run_metrics(path: &Path) -> Result<RunMetrics> {
    let started = Instant::now();
    let kind = detect_input_kind(path)?;
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let reader: Box<dyn Read> = match kind {
        InputKind::Plain => Box::new(BufReader::new(file)),
        InputKind::Gzip => Box::new(BufReader::new(MultiGzDecoder::new(file))),
    };
    let metrics: RunMetrics = serde_json::from_reader(reader)
        .with_context(|| format!("failed to parse run metrics from {}", path.display()))?;
    debug!(
        path = %path.display(),
        ?kind,
        tiles = metrics.tile.len(),
        extraction = metrics.extraction.len(),
        corrected_intensity = metrics.corrected_intensity.len(),
        q = metrics.q_metrics().len(),
        error = metrics.error.len(),
        elapsed = ?started.elapsed(),
        "loaded run metrics"
    );
    Ok(metrics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    const DOC: &str = r#"{
        "run_info": {
            "flowcell": {"lane_count": 2, "tile_count": 14, "swath_count": 2,
                         "naming_method": "FourDigit", "barcode": "FC1"},
            "reads": [{"number": 1, "cycle_count": 151, "is_index": false}],
            "channels": ["Red", "Green"]
        },
        "error": [{"lane": 1, "tile": 1101, "cycle": 1, "error_rate": 0.25}]
    }"#;

    #[test]
    fn test_load_plain_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(DOC.as_bytes()).unwrap();
        assert_eq!(detect_input_kind(file.path()).unwrap(), InputKind::Plain);
        let metrics = load_run_metrics(file.path()).unwrap();
        assert_eq!(metrics.run_info.flowcell.barcode, "FC1");
        assert_eq!(metrics.run_info.flowcell.surface_count, 1);
        assert_eq!(metrics.error.len(), 1);
        assert!(metrics.tile.is_empty());
    }

    #[test]
    fn test_gzip_detected_by_magic_bytes() {
        let mut file = tempfile::Builder::new().suffix(".bin").tempfile().unwrap();
        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(DOC.as_bytes()).unwrap();
        file.write_all(&enc.finish().unwrap()).unwrap();
        assert_eq!(detect_input_kind(file.path()).unwrap(), InputKind::Gzip);
        let metrics = load_run_metrics(file.path()).unwrap();
        assert_eq!(metrics.error[0].error_rate, 0.25);
    }

    #[test]
    fn test_parse_error_names_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        let err = load_run_metrics(file.path()).unwrap_err();
        assert!(format!("{}", err).contains("failed to parse run metrics"));
    }
}
