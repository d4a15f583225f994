//! Command dispatch: one catalog call per subcommand, JSON on stdout.

use anyhow::{Context, Result};
use orgcatalog_core::db::open_configured;
use orgcatalog_core::{init_logging, BoundingBox, CatalogApi, CatalogConfig, DatabaseLocation};
use serde::Serialize;
use std::path::Path;

use crate::args::{ActivityCommands, BuildingCommands, Cli, Commands, GeoArgs, OrgCommands};
use crate::seed::seed;

/// Resolves config, opens the catalog and runs the requested command.
pub fn execute_command(cli: &Cli) -> Result<()> {
    let env_config = CatalogConfig::from_env().context("failed to load configuration")?;
    let config = with_db_override(env_config, cli.db.as_deref());
    if let Some(notice) = memory_notice(&config) {
        eprintln!("{notice}");
    }
    init_logging(&config).context("failed to initialize logging")?;

    let conn = open_configured(&config).context("failed to open catalog database")?;
    let api = CatalogApi::try_new(&conn)?;

    match &cli.command {
        Commands::Seed => print_json(&seed(&api)?),
        Commands::Activity { command } => run_activity(&api, command),
        Commands::Building { command } => run_building(&api, command),
        Commands::Org { command } => run_org(&api, command),
    }
}

/// `--db` wins over `ORGCATALOG_DB_PATH`.
fn with_db_override(mut config: CatalogConfig, db: Option<&Path>) -> CatalogConfig {
    if let Some(path) = db {
        config.database = DatabaseLocation::File(path.to_path_buf());
    }
    config
}

/// Warning for runs whose writes vanish when the process exits.
fn memory_notice(config: &CatalogConfig) -> Option<&'static str> {
    match config.database {
        DatabaseLocation::Memory => Some(
            "note: no --db or ORGCATALOG_DB_PATH given; using a temporary in-memory \
             database, nothing is kept after exit",
        ),
        DatabaseLocation::File(_) => None,
    }
}

fn run_activity(api: &CatalogApi<'_>, command: &ActivityCommands) -> Result<()> {
    match command {
        ActivityCommands::Add { name, parent } => print_json(&api.create_activity(name, *parent)?),
        ActivityCommands::Get { id } => print_json(&api.get_activity(*id)?),
        ActivityCommands::List => print_json(&api.list_activities()?),
        ActivityCommands::Tree { name } => print_json(&api.get_descendants(name)?),
    }
}

fn run_building(api: &CatalogApi<'_>, command: &BuildingCommands) -> Result<()> {
    match command {
        BuildingCommands::Add { address, lat, lon } => {
            print_json(&api.create_building(address, *lat, *lon)?)
        }
        BuildingCommands::Get { id } => print_json(&api.get_building(*id)?),
        BuildingCommands::List => print_json(&api.list_buildings()?),
    }
}

fn run_org(api: &CatalogApi<'_>, command: &OrgCommands) -> Result<()> {
    match command {
        OrgCommands::Add {
            name,
            building,
            inn,
            phones,
            activities,
        } => print_json(&api.create_organization(inn, name, phones, *building, activities)?),
        OrgCommands::Get { id } => print_json(&api.get_organization(*id)?),
        OrgCommands::ByBuilding { building_id } => {
            print_json(&api.list_organizations_by_building(*building_id)?)
        }
        OrgCommands::ByActivity { name } => print_json(&api.list_organizations_by_activity(name)?),
        OrgCommands::ByTree { name } => {
            print_json(&api.list_organizations_by_activity_tree(name)?)
        }
        OrgCommands::Geo(geo) => print_json(&run_geo(api, geo)?),
        OrgCommands::Search {
            name,
            address,
            activity,
        } => print_json(&api.search_organizations(
            name.as_deref(),
            address.as_deref(),
            activity.as_deref(),
        )?),
        OrgCommands::SetActivities { id, activities } => {
            print_json(&api.replace_organization_activities(*id, activities)?)
        }
    }
}

fn run_geo(
    api: &CatalogApi<'_>,
    geo: &GeoArgs,
) -> Result<Vec<orgcatalog_core::Organization>> {
    let bbox = BoundingBox::from_parts(geo.min_lat, geo.max_lat, geo.min_lon, geo.max_lon);
    Ok(api.list_organizations_by_geo(geo.lat, geo.lon, geo.radius_km, bbox)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
