//! Line-chart input derived from a set of data points.

use std::collections::BTreeSet;

use crate::models::{Point, PointId};

/// Colour-blind friendly series colours, cycled by series index.
pub const PALETTE: [&str; 11] = [
    "#0072B2", "#D55E00", "#009E73", "#F0E442", "#56B4E9", "#CC79A7", "#E69F00", "#882255",
    "#44AA99", "#117733", "#999933",
];

/// Series that is always listed first.
pub const PRIMARY_SIGNAL: &str = "MAIN";

pub const Y_MIN: f64 = -102.0;
pub const Y_MAX: f64 = -20.0;

pub const FULL_CHART_TITLE: &str = "Signal Strength Across All Plates";
/// Sheet heading while every plate is charted.
pub const FULL_SHEET_HEADING: &str = "Full Network Data - All Plates";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Every chartable point.
    Full,
    /// The manual selection.
    Selection,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub label: String,
    /// One value per category; `None` where the point lacks this signal.
    pub values: Vec<Option<f64>>,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub kind: ChartKind,
    pub title: String,
    /// Category labels (point ordinals), ascending.
    pub labels: Vec<String>,
    /// Point behind each category, parallel to `labels`.
    pub points: Vec<PointId>,
    pub datasets: Vec<Dataset>,
    pub y_range: (f64, f64),
}

impl ChartData {
    /// Build the chart for `points`. Only points with signal readings are charted.
    pub fn build<'a>(kind: ChartKind, points: impl IntoIterator<Item = &'a Point>) -> Self {
        let mut charted: Vec<&Point> = points.into_iter().filter(|p| p.is_chartable()).collect();
        // Vec::sort_by_key is stable: equal ordinals keep their input order
        charted.sort_by_key(|p| p.ordinal());

        let names = series_names(&charted);
        let datasets = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| Dataset {
                values: charted
                    .iter()
                    .map(|p| p.signals().and_then(|s| s.get(&name)))
                    .collect(),
                label: name,
                color: PALETTE[i % PALETTE.len()],
            })
            .collect();

        let title = match kind {
            ChartKind::Full => FULL_CHART_TITLE.to_string(),
            ChartKind::Selection => format!("Selected Plates ({} points)", charted.len()),
        };

        ChartData {
            kind,
            title,
            labels: charted.iter().map(|p| p.ordinal_label()).collect(),
            points: charted.iter().map(|p| p.id.clone()).collect(),
            datasets,
            y_range: (Y_MIN, Y_MAX),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Union of signal names, `MAIN` first and the rest in lexicographic order.
fn series_names(points: &[&Point]) -> Vec<String> {
    let mut names: BTreeSet<&str> = BTreeSet::new();
    for p in points {
        if let Some(signals) = p.signals() {
            names.extend(signals.names());
        }
    }
    let primary = names.remove(PRIMARY_SIGNAL);
    primary
        .then_some(PRIMARY_SIGNAL)
        .into_iter()
        .chain(names)
        .map(str::to_string)
        .collect()
}

/// Heading of the comparison sheet.
pub fn sheet_heading(selected: &[&Point]) -> String {
    match selected {
        [only] => only.plate().unwrap_or("Signal Analysis").to_string(),
        [] => "Signal Analysis".to_string(),
        many => format!("Comparing {} Points", many.len()),
    }
}

/// Quality band of a reading in dBm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalLevel {
    Good,
    Fair,
    Poor,
}

impl SignalLevel {
    pub fn classify(value: f64) -> Self {
        if value > -50.0 {
            SignalLevel::Good
        } else if value > -80.0 {
            SignalLevel::Fair
        } else {
            SignalLevel::Poor
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            SignalLevel::Good => "val-green",
            SignalLevel::Fair => "val-yellow",
            SignalLevel::Poor => "val-red",
        }
    }
}
