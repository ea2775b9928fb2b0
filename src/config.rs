use std::path::PathBuf;

use clap::Parser;

use crate::data::filter::TitleType;

/// Explore a catalogue of movies and TV shows.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Args {
    /// Title table to load (.csv, .json or .parquet)
    #[arg(env = "MARQUEE_DATA", default_value = "netflix.csv")]
    pub data: PathBuf,

    /// Type shown by the filter-dependent charts at startup
    #[arg(long, value_enum, default_value_t = TitleType::Movie)]
    pub filter: TitleType,

    /// Entries in the top-N bar charts
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u16).range(1..))]
    pub top_n: u16,

    /// Write the chart specifications as JSON to this file and exit
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,
}
