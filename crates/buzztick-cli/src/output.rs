use buzztick_core::TickerSentiment;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::cli::OutputFormat;
use crate::error::CliError;

#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Occurrences")]
    occurrences: usize,
    #[tabled(rename = "Sentiment")]
    sentiment: String,
}

impl From<&TickerSentiment> for ReportRow {
    fn from(row: &TickerSentiment) -> Self {
        Self {
            ticker: row.ticker.as_str().to_owned(),
            name: row.name.clone(),
            occurrences: row.occurrences,
            sentiment: row.sentiment.to_string(),
        }
    }
}

pub fn render(report: &[TickerSentiment], format: OutputFormat) -> Result<(), CliError> {
    match format {
        OutputFormat::Table => {
            if report.is_empty() {
                println!("no ticker mentions found");
                return Ok(());
            }
            let mut table = Table::new(report.iter().map(ReportRow::from));
            table.with(Style::modern());
            println!("{table}");
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
    }

    Ok(())
}
