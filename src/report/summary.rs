//! Scoring run summary report generation

use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

/// Summary of a batch scoring run.
#[derive(Debug, Default)]
pub struct ScoringSummary {
    pub rows_scored: usize,
    pub schema_width: usize,
    pub positive_predictions: Option<usize>,
    pub mean_prediction: Option<f64>,
    pub drift_warnings: Vec<String>,
    load_time: Duration,
    drift_time: Duration,
    score_time: Duration,
}

impl ScoringSummary {
    pub fn new(schema_width: usize) -> Self {
        Self {
            schema_width,
            ..Default::default()
        }
    }

    pub fn set_rows_scored(&mut self, rows: usize) {
        self.rows_scored = rows;
    }

    /// Record the prediction breakdown. Classifiers report a positive count,
    /// regressors a mean.
    pub fn set_predictions(&mut self, predictions: &[f64], classifier: bool) {
        if classifier {
            self.positive_predictions = Some(predictions.iter().filter(|p| **p >= 1.0).count());
        } else if !predictions.is_empty() {
            let mean = predictions.iter().sum::<f64>() / predictions.len() as f64;
            self.mean_prediction = Some(mean);
        }
    }

    pub fn add_drift_warning(&mut self, warning: String) {
        self.drift_warnings.push(warning);
    }

    pub fn set_load_time(&mut self, elapsed: Duration) {
        self.load_time = elapsed;
    }

    pub fn set_drift_time(&mut self, elapsed: Duration) {
        self.drift_time = elapsed;
    }

    pub fn set_score_time(&mut self, elapsed: Duration) {
        self.score_time = elapsed;
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("SCORING SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("📁 Rows scored"),
            Cell::new(self.rows_scored)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("🧮 Model features"),
            Cell::new(self.schema_width),
        ]);

        if let Some(positives) = self.positive_predictions {
            table.add_row(vec![
                Cell::new("🚩 Positive predictions"),
                Cell::new(positives).fg(if positives == 0 {
                    Color::White
                } else {
                    Color::Yellow
                }),
            ]);
        }

        if let Some(mean) = self.mean_prediction {
            table.add_row(vec![
                Cell::new("📈 Mean prediction"),
                Cell::new(format!("{:.4}", mean)),
            ]);
        }

        table.add_row(vec![
            Cell::new("🌊 Drift warnings"),
            Cell::new(self.drift_warnings.len()).fg(if self.drift_warnings.is_empty() {
                Color::Green
            } else {
                Color::Red
            }),
        ]);

        table.add_row(vec![
            Cell::new("⏱️  Load / drift / score"),
            Cell::new(format!(
                "{:.2?} / {:.2?} / {:.2?}",
                self.load_time, self.drift_time, self.score_time
            )),
        ]);

        // Indent the table
        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        if !self.drift_warnings.is_empty() {
            println!();
            println!(
                "    {} {}",
                style("⚠️").yellow(),
                style("DRIFT WARNINGS").white().bold()
            );
            println!("    {}", style("─".repeat(50)).dim());
            println!();
            for warning in &self.drift_warnings {
                println!("      {} {}", style("•").dim(), warning);
            }
        }
    }
}
