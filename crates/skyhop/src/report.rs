//! Markdown timing report

use std::path::Path;

use chrono::{DateTime, Local};
use skyhop_cloud::TimingRecord;

pub struct ReportContext<'a> {
    pub base_instance: &'a str,
    pub zone: &'a str,
    pub machine_type: &'a str,
}

fn render(context: &ReportContext<'_>, records: &[TimingRecord], measured: DateTime<Local>) -> String {
    let mut out = String::new();
    out.push_str("# Clone Timing\n\n");
    out.push_str(&format!("- Base instance: `{}`\n", context.base_instance));
    out.push_str(&format!("- Zone: `{}`\n", context.zone));
    out.push_str(&format!("- Machine type: `{}`\n", context.machine_type));
    out.push_str(&format!(
        "- Measured: `{}`\n\n",
        measured.format("%Y-%m-%d %H:%M:%S")
    ));
    out.push_str("| Instance | Create time (s) |\n");
    out.push_str("|---|---:|\n");
    for record in records {
        out.push_str(&format!(
            "| `{}` | {:.2} |\n",
            record.instance,
            record.elapsed.as_secs_f64()
        ));
    }
    out
}

pub async fn write_timing_report(
    path: &Path,
    context: &ReportContext<'_>,
    records: &[TimingRecord],
) -> anyhow::Result<()> {
    let content = render(context, records, Local::now());
    tokio::fs::write(path, content).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn context() -> ReportContext<'static> {
        ReportContext {
            base_instance: "base-vm",
            zone: "us-west1-b",
            machine_type: "e2-medium",
        }
    }

    fn records() -> Vec<TimingRecord> {
        vec![
            TimingRecord {
                instance: "base-vm-clone-1".to_string(),
                elapsed: Duration::from_secs_f64(23.517),
            },
            TimingRecord {
                instance: "base-vm-clone-2".to_string(),
                elapsed: Duration::ZERO,
            },
        ]
    }

    #[test]
    fn renders_one_table_row_per_record() {
        let report = render(&context(), &records(), Local::now());

        assert!(report.starts_with("# Clone Timing"));
        assert!(report.contains("- Base instance: `base-vm`"));
        assert!(report.contains("| `base-vm-clone-1` | 23.52 |"));
        assert!(report.contains("| `base-vm-clone-2` | 0.00 |"));
    }

    #[tokio::test]
    async fn writes_the_report_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("TIMING.md");

        write_timing_report(&path, &context(), &records())
            .await
            .unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("| Instance | Create time (s) |"));
    }
}
