//! Sample dataset for demos and manual checks.

use anyhow::Result;
use log::info;
use orgcatalog_core::{ActivityId, BuildingId, CatalogApi, OrganizationId};
use serde::Serialize;

/// Ids assigned to the seeded rows.
#[derive(Debug, Serialize)]
pub struct SeedReport {
    pub buildings: Vec<BuildingId>,
    pub activities: Vec<ActivityId>,
    pub organizations: Vec<OrganizationId>,
}

/// Inserts two buildings, three root activities and three organizations.
pub fn seed(api: &CatalogApi<'_>) -> Result<SeedReport> {
    let pushkina = api.create_building("Улица Пушкина, 1", 55.7558, 37.6176)?;
    let lermontova = api.create_building("Улица Лермонтова, 2", 55.7600, 37.6200)?;

    let sport = api.create_activity("Спорт", None)?;
    let education = api.create_activity("Образование", None)?;
    let art = api.create_activity("Искусство", None)?;

    let fitness = api.create_organization(
        "",
        "Фитнес Центр",
        "123-456-7890",
        pushkina.id,
        &[sport.id],
    )?;
    let school = api.create_organization(
        "",
        "Школа №1",
        "987-654-3210",
        pushkina.id,
        &[education.id],
    )?;
    let gallery = api.create_organization(
        "",
        "Галерея Искусств",
        "555-555-5555",
        lermontova.id,
        &[art.id, education.id],
    )?;

    info!("event=seed module=cli status=ok organizations=3");
    Ok(SeedReport {
        buildings: vec![pushkina.id, lermontova.id],
        activities: vec![sport.id, education.id, art.id],
        organizations: vec![fitness.id, school.id, gallery.id],
    })
}
