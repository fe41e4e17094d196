//! Command-line Adapter
//!
//! Drives the dinner finder from the command line and renders each
//! response payload as JSON.

use crate::application::DinnerFinder;
use crate::domain::entities::{DinnerEvent, JsonDinner, Page};
use clap::{Parser, Subcommand};
use serde::Serialize;

/// dinner-search - find dinners by location, place or popularity
#[derive(Debug, Parser)]
#[command(name = "dinner-search")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Dinners near explicit coordinates
    #[command(alias = "loc")]
    Location {
        #[arg(long, allow_negative_numbers = true)]
        latitude: f64,
        #[arg(long, allow_negative_numbers = true)]
        longitude: f64,
    },

    /// Dinners near a place name or postal code, latest first
    #[command(alias = "zip")]
    Place {
        /// Place name or postal code; omitted means no search
        place_or_zip: Option<String>,
    },

    /// Upcoming dinners ordered by RSVP count
    Popular {
        /// Number of upcoming dinners to consider (default 40)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Answer requests read from stdin, one per line, sharing one geocode cache
    #[command(alias = "serve")]
    Batch,
}

impl Command {
    /// Run the command and render the response payload as pretty JSON.
    ///
    /// A place search without input renders `null`.
    pub async fn execute(&self, finder: &DinnerFinder) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(&self.respond(finder).await?)?)
    }

    /// Run a single request and return its response payload.
    pub async fn respond(&self, finder: &DinnerFinder) -> anyhow::Result<serde_json::Value> {
        let payload = match self {
            Self::Location {
                latitude,
                longitude,
            } => serde_json::to_value(finder.search_by_location(*latitude, *longitude).await?),
            Self::Place { place_or_zip } => {
                let page = finder.search_by_place_or_zip(place_or_zip.as_deref()).await?;
                serde_json::to_value(page.map(|p| PageView::new(finder, p)))
            }
            Self::Popular { limit } => {
                serde_json::to_value(finder.find_upcoming_popular(*limit).await?)
            }
            Self::Batch => anyhow::bail!("batch sessions cannot be nested"),
        }?;

        Ok(payload)
    }
}

/// Place search page rendered with transport records.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PageView {
    dinners: Vec<JsonDinner>,
    page_index: usize,
    page_size: usize,
    total_count: usize,
    total_pages: usize,
    has_previous_page: bool,
    has_next_page: bool,
}

impl PageView {
    fn new(finder: &DinnerFinder, page: Page<DinnerEvent>) -> Self {
        Self {
            dinners: finder.project(&page.items),
            page_index: page.page_index,
            page_size: page.page_size,
            total_count: page.total_count,
            total_pages: page.total_pages,
            has_previous_page: page.has_previous_page(),
            has_next_page: page.has_next_page(),
        }
    }
}
