//! Report builder: turns a set of ledger records into an income-vs-expense
//! time-series chart, delivered as an inline base64 PNG.

use std::collections::BTreeMap;
use std::io::Cursor;

use anyhow::anyhow;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{Duration, NaiveDate};
use image::{ImageFormat, RgbImage};
use plotters::prelude::*;
use shared::Record;
use tracing::warn;

use crate::storage::csv::DATE_FORMAT;

const CHART_WIDTH: u32 = 800;
const CHART_HEIGHT: u32 = 400;

/// Category labels that participate in the chart; records with any other
/// category are stored and queried but never plotted.
const INCOME_CATEGORY: &str = "Income";
const EXPENSE_CATEGORY: &str = "Expense";

/// Builds the income-vs-expense chart for a set of ledger records.
#[derive(Clone, Default)]
pub struct ReportService;

impl ReportService {
    pub fn new() -> Self {
        Self
    }

    /// Render the chart as an inline `data:image/png;base64,...` payload.
    ///
    /// Returns `None` when no chartable series can be built from the input
    /// or when rendering fails; failures never propagate to the caller.
    pub fn build_chart(&self, records: &[Record]) -> Option<String> {
        let income = resample_daily(records, INCOME_CATEGORY);
        let expense = resample_daily(records, EXPENSE_CATEGORY);

        if income.is_empty() && expense.is_empty() {
            return None;
        }

        match render_png(&income, &expense) {
            Ok(png) => Some(format!("data:image/png;base64,{}", STANDARD.encode(png))),
            Err(err) => {
                warn!("Error generating plot: {}", err);
                None
            }
        }
    }
}

/// Sum a category's amounts per calendar day, then reindex the subset onto
/// a daily grid spanning its own observed date range, zero-filling days
/// without records.
fn resample_daily(records: &[Record], category: &str) -> Vec<(NaiveDate, f64)> {
    let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for record in records.iter().filter(|r| r.category == category) {
        if let Ok(date) = NaiveDate::parse_from_str(&record.date, DATE_FORMAT) {
            *by_day.entry(date).or_insert(0.0) += record.amount;
        }
    }

    let (first, last) = match (by_day.keys().next(), by_day.keys().next_back()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => return Vec::new(),
    };

    let mut series = Vec::new();
    let mut day = first;
    while day <= last {
        series.push((day, by_day.get(&day).copied().unwrap_or(0.0)));
        day += Duration::days(1);
    }

    series
}

fn render_png(
    income: &[(NaiveDate, f64)],
    expense: &[(NaiveDate, f64)],
) -> anyhow::Result<Vec<u8>> {
    let dates = income.iter().chain(expense).map(|&(d, _)| d);
    let min_date = dates
        .clone()
        .min()
        .ok_or_else(|| anyhow!("no data points to plot"))?;
    let max_date = dates.max().unwrap_or(min_date);

    // A single-day span still needs a non-degenerate x axis.
    let axis_end = if max_date > min_date {
        max_date
    } else {
        min_date + Duration::days(1)
    };

    let max_amount = income
        .iter()
        .chain(expense)
        .map(|&(_, a)| a)
        .fold(0.0f64, f64::max);
    let y_max = if max_amount > 0.0 { max_amount * 1.1 } else { 1.0 };

    let mut buffer = vec![0u8; (CHART_WIDTH * CHART_HEIGHT * 3) as usize];
    {
        // The drawing area borrows the buffer; this scope releases it
        // before encoding, on every exit path.
        let root =
            BitMapBackend::with_buffer(&mut buffer, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Income and Expenses Over Time", ("sans-serif", 22))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(min_date..axis_end, 0.0..y_max)?;

        chart
            .configure_mesh()
            .x_desc("Date")
            .y_desc("Amount")
            .x_label_formatter(&|d| d.format("%d-%m-%Y").to_string())
            .x_labels(6)
            .draw()?;

        if !income.is_empty() {
            chart
                .draw_series(LineSeries::new(income.iter().copied(), &GREEN))?
                .label("Income")
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GREEN));
            chart.draw_series(
                income
                    .iter()
                    .map(|&(d, a)| Circle::new((d, a), 3, GREEN.filled())),
            )?;
        }

        if !expense.is_empty() {
            chart
                .draw_series(LineSeries::new(expense.iter().copied(), &RED))?
                .label("Expense")
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));
            chart.draw_series(
                expense
                    .iter()
                    .map(|&(d, a)| Circle::new((d, a), 3, RED.filled())),
            )?;
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        root.present()?;
    }

    let img = RgbImage::from_raw(CHART_WIDTH, CHART_HEIGHT, buffer)
        .ok_or_else(|| anyhow!("chart buffer has unexpected size"))?;
    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

    Ok(png)
}
