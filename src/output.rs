use std::fs;
use std::path::Path;
use csv::Writer;

use crate::config::Config;
use crate::errors::Result;
use crate::pipeline::BatchReport;

/// Write one row per image to `<output>/images.csv`
pub fn write_images_csv<P: AsRef<Path>>(report: &BatchReport, output_dir: P) -> Result<()> {
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)?;

    let mut writer = Writer::from_path(output_dir.join("images.csv"))?;

    writer.write_record(&[
        "Image",
        "Cardboard_Percent",
        "Newsprint_Percent",
        "ROI_Pixels",
        "Cardboard_Pixels",
        "Newsprint_Pixels",
    ])?;

    for image in &report.images {
        writer.write_record(&[
            image.label.clone(),
            format!("{:.6}", image.sample.cardboard_percent),
            format!("{:.6}", image.sample.newsprint_percent),
            image.counts.roi.to_string(),
            image.counts.cardboard.to_string(),
            image.counts.newsprint.to_string(),
        ])?;
    }

    writer.flush()?;

    Ok(())
}

/// Append the batch decision to `<output>/summary.csv`, writing the header for a new file
pub fn append_batch_summary<P: AsRef<Path>>(
    report: &BatchReport,
    config: &Config,
    output_dir: P,
    batch_label: &str,
) -> Result<()> {
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)?;

    let summary_path = output_dir.join("summary.csv");
    let file_exists = summary_path.exists();

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&summary_path)?;
    let mut writer = Writer::from_writer(file);

    if !file_exists {
        writer.write_record(&[
            "Batch",
            "Image_Count",
            "Average_Cardboard_Percent",
            "Average_Newsprint_Percent",
            "Recommendation",
            "Threshold",
            "Threshold_Inclusive",
        ])?;
    }

    writer.write_record(&[
        batch_label.to_string(),
        report.images.len().to_string(),
        format!("{:.6}", report.result.average_cardboard_percent),
        format!("{:.6}", report.result.average_newsprint_percent),
        report.result.recommendation.to_string(),
        format!("{:.1}", config.threshold),
        config.threshold_inclusive.to_string(),
    ])?;

    writer.flush()?;

    Ok(())
}

/// Write the full report as pretty JSON to `<output>/report.json`
pub fn write_report_json<P: AsRef<Path>>(report: &BatchReport, output_dir: P) -> Result<()> {
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)?;

    let content = serde_json::to_string_pretty(report)?;
    fs::write(output_dir.join("report.json"), content)?;

    Ok(())
}

/// Human-readable report lines for the console
pub fn format_report(report: &BatchReport) -> Vec<String> {
    let mut lines: Vec<String> = report
        .images
        .iter()
        .map(|image| {
            format!(
                "{} -> Cardboard: {:.1} %, Newsprint: {:.1} %",
                image.label, image.sample.cardboard_percent, image.sample.newsprint_percent
            )
        })
        .collect();

    let result = &report.result;
    lines.push(format!(
        "Average: Cardboard: {:.1} %, Newsprint: {:.1} %",
        result.average_cardboard_percent, result.average_newsprint_percent
    ));
    lines.push(format!(
        "Recommendation: {} ({})",
        result.recommendation,
        result.recommendation.german_label()
    ));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::BatchResult;
    use crate::decision::Recommendation;
    use crate::percentage::MaterialSample;
    use crate::pipeline::{ImageReport, PixelCounts};
    use std::path::PathBuf;

    fn sample_report() -> BatchReport {
        BatchReport {
            images: vec![
                ImageReport {
                    label: "a.jpg".to_string(),
                    sample: MaterialSample::new(75.0, 25.0),
                    counts: PixelCounts { roi: 10, cardboard: 6, newsprint: 2 },
                },
                ImageReport {
                    label: "b.jpg".to_string(),
                    sample: MaterialSample::new(0.0, 0.0),
                    counts: PixelCounts::default(),
                },
            ],
            result: BatchResult {
                average_cardboard_percent: 37.5,
                average_newsprint_percent: 12.5,
                recommendation: Recommendation::Sort,
            },
        }
    }

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("paper_mix_out_{}_{}", name, std::process::id()))
    }

    #[test]
    fn test_format_report() {
        let lines = format_report(&sample_report());
        assert_eq!(lines[0], "a.jpg -> Cardboard: 75.0 %, Newsprint: 25.0 %");
        assert_eq!(lines[2], "Average: Cardboard: 37.5 %, Newsprint: 12.5 %");
        assert_eq!(lines[3], "Recommendation: Sort (Sortieren)");
    }

    #[test]
    fn test_images_csv() {
        let dir = scratch_dir("images");
        write_images_csv(&sample_report(), &dir).unwrap();

        let content = fs::read_to_string(dir.join("images.csv")).unwrap();
        let rows: Vec<&str> = content.lines().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], "a.jpg,75.000000,25.000000,10,6,2");

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_summary_appends() {
        let dir = scratch_dir("summary");
        let config = Config::default();
        append_batch_summary(&sample_report(), &config, &dir, "first").unwrap();
        append_batch_summary(&sample_report(), &config, &dir, "second").unwrap();

        let content = fs::read_to_string(dir.join("summary.csv")).unwrap();
        let rows: Vec<&str> = content.lines().collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].starts_with("Batch,"));
        assert_eq!(rows[2], "second,2,37.500000,12.500000,Sort,60.0,true");

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_report_json() {
        let dir = scratch_dir("json");
        write_report_json(&sample_report(), &dir).unwrap();

        let content = fs::read_to_string(dir.join("report.json")).unwrap();
        let parsed: BatchReport = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, sample_report());
        assert!(content.contains("\"recommendation\": \"sort\""));

        fs::remove_dir_all(dir).ok();
    }
}
