use crate::core::summary::QSummary;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub fn write(path: &Path, rows: &[QSummary]) -> Result<()> {
    let mut w = BufWriter::new(File::create(path).with_context(|| "create summary.txt failed")?);

    writeln!(w, "Lane\tRecords\tTotal\t%>=Q20\t%>=Q30\tMedian")?;
    for row in rows {
        let lane = row
            .lane
            .map_or_else(|| "Total".to_string(), |l| l.to_string());
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}",
            lane,
            row.records,
            row.total,
            fmt_percent(row.percent_q20),
            fmt_percent(row.percent_q30),
            row.median
        )?;
    }
    w.flush()?;
    Ok(())
}

fn fmt_percent(v: f32) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else {
        format!("{:.2}", v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_summary_rows() {
        let rows = vec![
            QSummary {
                lane: Some(1),
                records: 2,
                total: 20,
                percent_q20: 75.0,
                percent_q30: 75.0,
                median: 35,
            },
            QSummary {
                lane: None,
                records: 2,
                total: 20,
                percent_q20: f32::NAN,
                percent_q30: 12.5,
                median: 35,
            },
        ];
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.txt");
        write(&path, &rows).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "1\t2\t20\t75.00\t75.00\t35");
        assert_eq!(lines[2], "Total\t2\t20\tNaN\t12.50\t35");
    }
}
