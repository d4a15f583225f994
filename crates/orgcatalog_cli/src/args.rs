//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Query and maintain an organization catalog backed by SQLite
#[derive(Parser, Debug)]
#[command(name = "orgcatalog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Database file (default: ORGCATALOG_DB_PATH, else in-memory)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Insert the sample dataset
    Seed,

    /// Manage the activity hierarchy
    Activity {
        #[command(subcommand)]
        command: ActivityCommands,
    },

    /// Manage buildings
    Building {
        #[command(subcommand)]
        command: BuildingCommands,
    },

    /// Manage and query organizations
    Org {
        #[command(subcommand)]
        command: OrgCommands,
    },
}

/// Activity subcommands
#[derive(Subcommand, Debug)]
pub enum ActivityCommands {
    /// Create an activity, optionally under a parent
    Add {
        name: String,
        #[arg(long)]
        parent: Option<i64>,
    },
    /// Show one activity
    Get { id: i64 },
    /// List all activities
    List,
    /// Show a root activity and its descendants
    Tree { name: String },
}

/// Building subcommands
#[derive(Subcommand, Debug)]
pub enum BuildingCommands {
    /// Register a building
    Add {
        address: String,
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
    },
    /// Show one building
    Get { id: i64 },
    /// List all buildings
    List,
}

/// Organization subcommands
#[derive(Subcommand, Debug)]
pub enum OrgCommands {
    /// Create an organization
    Add {
        name: String,
        #[arg(long)]
        building: i64,
        #[arg(long, default_value = "")]
        inn: String,
        #[arg(long, default_value = "")]
        phones: String,
        /// Activity ids, comma separated
        #[arg(long, value_delimiter = ',')]
        activities: Vec<i64>,
    },
    /// Show one organization
    Get { id: i64 },
    /// Organizations located in a building
    ByBuilding { building_id: i64 },
    /// Organizations linked to an activity, exact name
    ByActivity { name: String },
    /// Organizations linked to an activity or any of its descendants
    ByTree { name: String },
    /// Organizations within a radius or bounding box
    Geo(GeoArgs),
    /// Case-insensitive substring search
    Search {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        activity: Option<String>,
    },
    /// Replace the activity set of an organization
    SetActivities {
        id: i64,
        /// Activity ids, comma separated
        #[arg(long, value_delimiter = ',')]
        activities: Vec<i64>,
    },
}

#[derive(Args, Debug)]
pub struct GeoArgs {
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,
    #[arg(long, allow_negative_numbers = true)]
    pub lon: f64,
    /// Radius in kilometers; takes precedence over the box
    #[arg(long)]
    pub radius_km: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub min_lat: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub max_lat: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub min_lon: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub max_lon: Option<f64>,
}
