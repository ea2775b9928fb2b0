//! Chart specifications built from the cleaned title table.
//!
//! A [`ChartSpec`] is plain data: the UI layer draws it, the export writes it
//! as JSON. Only the country bar chart and the scatter chart follow the type
//! filter; the other four always describe the whole catalogue.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::data::aggregate::{self, ScatterPoint};
use crate::data::error::PrepError;
use crate::data::filter::{filter_by_type, TitleType};
use crate::data::model::{columns, TitleTable};

// ---------------------------------------------------------------------------
// Chart specification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub label: String,
    pub value: f64,
}

/// Titles of one `type` on the scatter chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub name: String,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartData {
    /// Bars in display order, first bar at the top when horizontal.
    Bar { bars: Vec<Slice>, horizontal: bool },
    Line { points: Vec<[f64; 2]> },
    Scatter { series: Vec<ScatterSeries> },
    Pie { slices: Vec<Slice> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    /// Stable identifier, also used as the egui plot id.
    pub id: &'static str,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub data: ChartData,
}

impl ChartSpec {
    /// Whether the chart has nothing to draw.
    pub fn is_empty(&self) -> bool {
        match &self.data {
            ChartData::Bar { bars, .. } => bars.is_empty(),
            ChartData::Line { points } => points.is_empty(),
            ChartData::Scatter { series } => series.iter().all(|s| s.points.is_empty()),
            ChartData::Pie { slices } => slices.is_empty(),
        }
    }
}

fn slices(counts: Vec<(String, usize)>) -> Vec<Slice> {
    counts
        .into_iter()
        .map(|(label, count)| Slice {
            label,
            value: count as f64,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Individual charts
// ---------------------------------------------------------------------------

pub fn genre_chart(table: &TitleTable, top_n: usize) -> Result<ChartSpec, PrepError> {
    Ok(ChartSpec {
        id: "genres",
        title: format!("Top {top_n} Movie Genres"),
        x_label: "Number of Titles".into(),
        y_label: "Genre".into(),
        data: ChartData::Bar {
            bars: slices(aggregate::top_n_counts(table, columns::LISTED_IN, top_n)?),
            horizontal: true,
        },
    })
}

pub fn release_year_chart(table: &TitleTable) -> Result<ChartSpec, PrepError> {
    let points = aggregate::year_series_counts(table)?
        .into_iter()
        .map(|(year, count)| [year as f64, count as f64])
        .collect();
    Ok(ChartSpec {
        id: "release_years",
        title: "Distribution of Release Years".into(),
        x_label: "Release Year".into(),
        y_label: "Number of Titles".into(),
        data: ChartData::Line { points },
    })
}

pub fn rating_chart(table: &TitleTable) -> Result<ChartSpec, PrepError> {
    Ok(ChartSpec {
        id: "ratings",
        title: "Distribution of Ratings".into(),
        x_label: "Number of Titles".into(),
        y_label: "Rating".into(),
        data: ChartData::Bar {
            bars: slices(aggregate::value_counts(table, columns::RATING)?),
            horizontal: true,
        },
    })
}

pub fn rating_pie(table: &TitleTable) -> Result<ChartSpec, PrepError> {
    Ok(ChartSpec {
        id: "rating_pie",
        title: "Distribution of Ratings".into(),
        x_label: String::new(),
        y_label: String::new(),
        data: ChartData::Pie {
            slices: slices(aggregate::value_counts(table, columns::RATING)?),
        },
    })
}

pub fn country_chart(table: &TitleTable, top_n: usize) -> Result<ChartSpec, PrepError> {
    Ok(ChartSpec {
        id: "countries",
        title: format!("Top {top_n} Countries with Most Titles"),
        x_label: "Number of Titles".into(),
        y_label: "Country".into(),
        data: ChartData::Bar {
            bars: slices(aggregate::top_n_counts(table, columns::COUNTRY, top_n)?),
            horizontal: true,
        },
    })
}

/// Release year vs. duration, one series per `type` in first-seen order.
pub fn scatter_chart(table: &TitleTable) -> Result<ChartSpec, PrepError> {
    let mut series: Vec<ScatterSeries> = Vec::new();
    for point in aggregate::scatter_points(table)? {
        match series.iter_mut().find(|s| s.name == point.kind) {
            Some(s) => s.points.push(point),
            None => series.push(ScatterSeries {
                name: point.kind.clone(),
                points: vec![point],
            }),
        }
    }
    Ok(ChartSpec {
        id: "scatter",
        title: "Release Year vs. Duration".into(),
        x_label: "Release Year".into(),
        y_label: "Duration".into(),
        data: ChartData::Scatter { series },
    })
}

/// Rebuild the two filter-dependent charts for `filter`.
///
/// Returns `(country bar chart, scatter chart)`. A filter with no matching
/// rows yields two empty charts.
pub fn recompute(
    table: &TitleTable,
    filter: TitleType,
    top_n: usize,
) -> Result<(ChartSpec, ChartSpec), PrepError> {
    let subset = filter_by_type(table, filter.as_str())?;
    log::debug!("filter {filter}: {} of {} titles", subset.len(), table.len());
    Ok((country_chart(&subset, top_n)?, scatter_chart(&subset)?))
}

// ---------------------------------------------------------------------------
// Dashboard – the six panels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub filter: TitleType,
    pub top_n: usize,
    pub genres: ChartSpec,
    pub release_years: ChartSpec,
    pub ratings: ChartSpec,
    pub scatter: ChartSpec,
    pub countries: ChartSpec,
    pub rating_pie: ChartSpec,
}

impl Dashboard {
    /// Build all six charts. The static four use the whole table.
    pub fn build(table: &TitleTable, filter: TitleType, top_n: usize) -> Result<Self, PrepError> {
        let (countries, scatter) = recompute(table, filter, top_n)?;
        Ok(Dashboard {
            filter,
            top_n,
            genres: genre_chart(table, top_n)?,
            release_years: release_year_chart(table)?,
            ratings: rating_chart(table)?,
            scatter,
            countries,
            rating_pie: rating_pie(table)?,
        })
    }

    /// Switch the filter, replacing only the country and scatter charts.
    /// On error the dashboard is left as it was.
    pub fn apply_filter(&mut self, table: &TitleTable, filter: TitleType) -> Result<(), PrepError> {
        let (countries, scatter) = recompute(table, filter, self.top_n)?;
        self.countries = countries;
        self.scatter = scatter;
        self.filter = filter;
        Ok(())
    }

    /// Panels in display order.
    pub fn charts(&self) -> [&ChartSpec; 6] {
        [
            &self.scatter,
            &self.countries,
            &self.release_years,
            &self.rating_pie,
            &self.genres,
            &self.ratings,
        ]
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("serializing charts")?;
        std::fs::write(path, json)
            .with_context(|| format!("writing charts to {}", path.display()))?;
        log::info!("exported charts to {}", path.display());
        Ok(())
    }
}
