//! Command-line surface.
//!
//! Each subcommand drives one browser. The shared flags mirror the view's
//! controls: search box, select boxes, sliders, sortable columns, pager,
//! facet tabs and compare checkboxes.

use std::path::PathBuf;

use ahara_seeker::{Dir, Dosha, Query, RangeBounds};
use clap::{Args, Parser, Subcommand};

use crate::dataset::Dataset;

#[derive(Debug, Parser)]
#[command(name = "ahara")]
#[command(about = "Browse the clinic food database and patient registry", long_about = None)]
pub struct Cli {
    /// JSON array of records to browse instead of the bundled sample.
    #[arg(long, global = true, env = "AHARA_DATA", value_name = "PATH")]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse the food database.
    Foods(QueryArgs),
    /// Browse the patient registry.
    Patients(QueryArgs),
}

impl Command {
    pub fn dataset(&self) -> Dataset {
        match self {
            Command::Foods(_) => Dataset::Foods,
            Command::Patients(_) => Dataset::Patients,
        }
    }

    pub fn args(&self) -> &QueryArgs {
        match self {
            Command::Foods(args) | Command::Patients(args) => args,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct QueryArgs {
    /// Case-insensitive search term.
    #[arg(short, long, default_value = "")]
    pub term: String,

    /// Exact-match facet, e.g. `category=Grains`. `FIELD=all` is ignored.
    #[arg(long = "only", value_name = "FIELD=VALUE", value_parser = parse_facet)]
    pub only: Vec<(String, String)>,

    /// Inclusive numeric range, e.g. `calories=0..500` or `age=40..`.
    #[arg(long = "range", value_name = "FIELD=MIN..MAX", value_parser = parse_range)]
    pub ranges: Vec<(String, RangeBounds)>,

    /// Keep only foods that aggravate this dosha.
    #[arg(long, value_name = "DOSHA", value_parser = parse_dosha)]
    pub aggravates: Option<Dosha>,

    /// Field to sort by.
    #[arg(short, long, value_name = "FIELD")]
    pub sort: Option<String>,

    /// Sort descending.
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Page number, starting at 1.
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    pub page: u64,

    /// Items per page.
    #[arg(long, default_value_t = ahara_seeker::DEFAULT_PAGE_SIZE)]
    pub size: usize,

    /// Show value counts for a field over the filtered records.
    #[arg(long = "facet", value_name = "FIELD")]
    pub facets: Vec<String>,

    /// Add a record to the comparison panel (at most three).
    #[arg(long = "compare", value_name = "ID")]
    pub compare: Vec<String>,

    /// Print one JSON document instead of a table.
    #[arg(long)]
    pub json: bool,
}

impl QueryArgs {
    /// Builds the engine query these flags describe.
    pub fn to_query(&self) -> Query {
        let mut query = Query::new().term(self.term.as_str());

        for (field, value) in &self.only {
            query = query.only(field.as_str(), value.as_str());
        }
        for (field, bounds) in &self.ranges {
            query = query.within(field.as_str(), *bounds);
        }
        if let Some(dosha) = self.aggravates {
            query = query.aggravates(dosha);
        }
        if let Some(field) = &self.sort {
            let dir = if self.desc { Dir::Desc } else { Dir::Asc };
            query = query.order_by(field.as_str(), dir);
        }

        let index = usize::try_from(self.page - 1).unwrap_or(usize::MAX);
        query.page(index, self.size)
    }
}

fn split_assignment(s: &str) -> Result<(&str, &str), String> {
    let (field, value) = s
        .split_once('=')
        .ok_or_else(|| format!("'{}' must look like FIELD=VALUE", s))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(format!("'{}' has an empty field name", s));
    }
    Ok((field, value))
}

fn parse_facet(s: &str) -> Result<(String, String), String> {
    let (field, value) = split_assignment(s)?;
    Ok((field.to_string(), value.to_string()))
}

fn parse_range(s: &str) -> Result<(String, RangeBounds), String> {
    let (field, bounds) = split_assignment(s)?;
    let bounds = bounds.parse::<RangeBounds>().map_err(|e| e.to_string())?;
    Ok((field.to_string(), bounds))
}

fn parse_dosha(s: &str) -> Result<Dosha, String> {
    s.parse::<Dosha>().map_err(|e| e.to_string())
}
