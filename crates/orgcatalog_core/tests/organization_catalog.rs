use orgcatalog_core::db::open_db_in_memory;
use orgcatalog_core::{CatalogApi, CatalogError, EntityKind, Organization};
use rusqlite::Connection;

fn organization_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM organizations;", [], |row| row.get(0))
        .unwrap()
}

fn association_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM organization_activities;", [], |row| {
        row.get(0)
    })
    .unwrap()
}

fn ids(organizations: Vec<Organization>) -> Vec<i64> {
    organizations.into_iter().map(|org| org.id).collect()
}

#[test]
fn create_organization_round_trips_through_storage() {
    let conn = open_db_in_memory().unwrap();
    let api = CatalogApi::try_new(&conn).unwrap();
    let building = api.create_building("Main st, 1", 55.0, 37.0).unwrap();
    let sport = api.create_activity("Sport", None).unwrap();
    let art = api.create_activity("Art", None).unwrap();

    let created = api
        .create_organization(
            "7701234567",
            "  Gym & Gallery ",
            "8-800-555-35-35, 8-495-000-00-00",
            building.id,
            &[art.id, sport.id],
        )
        .unwrap();

    assert_eq!(created.name, "Gym & Gallery");
    assert_eq!(created.phones, "8-800-555-35-35, 8-495-000-00-00");
    assert_eq!(created.building_id, building.id);
    assert_eq!(created.activity_ids, vec![sport.id, art.id]);
    assert_eq!(api.get_organization(created.id).unwrap(), created);
}

#[test]
fn create_with_missing_building_persists_nothing() {
    let conn = open_db_in_memory().unwrap();
    let api = CatalogApi::try_new(&conn).unwrap();

    let err = api.create_organization("1", "X", "000", 404, &[]).unwrap_err();
    assert!(matches!(
        err,
        CatalogError::NotFound {
            entity: EntityKind::Building,
            id: 404
        }
    ));
    assert_eq!(organization_count(&conn), 0);
}

#[test]
fn create_with_unknown_activity_persists_nothing() {
    let conn = open_db_in_memory().unwrap();
    let api = CatalogApi::try_new(&conn).unwrap();
    let building = api.create_building("Main st, 1", 55.0, 37.0).unwrap();
    let sport = api.create_activity("Sport", None).unwrap();

    let err = api
        .create_organization("1", "X", "000", building.id, &[sport.id, 99])
        .unwrap_err();
    match err {
        CatalogError::ReferentialIntegrity {
            requested,
            missing,
            duplicated,
        } => {
            assert_eq!(requested, 2);
            assert_eq!(missing, vec![99]);
            assert!(duplicated.is_empty());
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(organization_count(&conn), 0);
    assert_eq!(association_count(&conn), 0);
}

#[test]
fn create_with_repeated_activity_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let api = CatalogApi::try_new(&conn).unwrap();
    let building = api.create_building("Main st, 1", 55.0, 37.0).unwrap();
    let sport = api.create_activity("Sport", None).unwrap();

    let err = api
        .create_organization("1", "X", "000", building.id, &[sport.id, sport.id])
        .unwrap_err();
    match err {
        CatalogError::ReferentialIntegrity {
            missing, duplicated, ..
        } => {
            assert!(missing.is_empty());
            assert_eq!(duplicated, vec![sport.id]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(organization_count(&conn), 0);
}

#[test]
fn create_with_blank_name_is_a_validation_error() {
    let conn = open_db_in_memory().unwrap();
    let api = CatalogApi::try_new(&conn).unwrap();
    let building = api.create_building("Main st, 1", 55.0, 37.0).unwrap();

    let err = api
        .create_organization("1", " ", "000", building.id, &[])
        .unwrap_err();
    assert!(matches!(err, CatalogError::Validation(_)));
}

#[test]
fn get_unknown_organization_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let api = CatalogApi::try_new(&conn).unwrap();

    let err = api.get_organization(5).unwrap_err();
    assert_eq!(err.to_string(), "organization not found: 5");
}

#[test]
fn list_by_building_and_by_activity_name() {
    let conn = open_db_in_memory().unwrap();
    let api = CatalogApi::try_new(&conn).unwrap();
    let first = api.create_building("First st, 1", 55.0, 37.0).unwrap();
    let second = api.create_building("Second st, 2", 55.1, 37.1).unwrap();
    let sport = api.create_activity("Sport", None).unwrap();
    let education = api.create_activity("Education", None).unwrap();

    let gym = api
        .create_organization("1", "Gym", "", first.id, &[sport.id])
        .unwrap();
    let school = api
        .create_organization("2", "School", "", first.id, &[education.id, sport.id])
        .unwrap();
    let college = api
        .create_organization("3", "College", "", second.id, &[education.id])
        .unwrap();

    assert_eq!(
        ids(api.list_organizations_by_building(first.id).unwrap()),
        vec![gym.id, school.id]
    );
    assert!(api.list_organizations_by_building(999).unwrap().is_empty());

    assert_eq!(
        ids(api.list_organizations_by_activity("Education").unwrap()),
        vec![school.id, college.id]
    );
    assert_eq!(
        ids(api.list_organizations_by_activity("Sport").unwrap()),
        vec![gym.id, school.id]
    );
    assert!(api.list_organizations_by_activity("sport").unwrap().is_empty());
}

#[test]
fn activity_tree_covers_root_and_descendants_once() {
    let conn = open_db_in_memory().unwrap();
    let api = CatalogApi::try_new(&conn).unwrap();
    let building = api.create_building("Main st, 1", 55.0, 37.0).unwrap();
    let sport = api.create_activity("Sport", None).unwrap();
    let gym = api.create_activity("Gym", Some(sport.id)).unwrap();
    let yoga = api.create_activity("Yoga", Some(gym.id)).unwrap();
    let art = api.create_activity("Art", None).unwrap();

    let stadium = api
        .create_organization("1", "Stadium", "", building.id, &[sport.id])
        .unwrap();
    let fitness = api
        .create_organization("2", "Fitness", "", building.id, &[gym.id, yoga.id])
        .unwrap();
    let ashram = api
        .create_organization("3", "Ashram", "", building.id, &[yoga.id])
        .unwrap();
    api.create_organization("4", "Museum", "", building.id, &[art.id])
        .unwrap();

    assert_eq!(
        ids(api.list_organizations_by_activity_tree("Sport").unwrap()),
        vec![stadium.id, fitness.id, ashram.id]
    );
    assert_eq!(
        ids(api.list_organizations_by_activity_tree("Gym").unwrap()),
        vec![fitness.id, ashram.id]
    );
    assert!(api
        .list_organizations_by_activity_tree("Unknown")
        .unwrap()
        .is_empty());
}

#[test]
fn replace_activities_swaps_the_whole_set() {
    let conn = open_db_in_memory().unwrap();
    let api = CatalogApi::try_new(&conn).unwrap();
    let building = api.create_building("Main st, 1", 55.0, 37.0).unwrap();
    let sport = api.create_activity("Sport", None).unwrap();
    let art = api.create_activity("Art", None).unwrap();
    let org = api
        .create_organization("1", "Club", "", building.id, &[sport.id])
        .unwrap();

    let updated = api
        .replace_organization_activities(org.id, &[art.id])
        .unwrap();
    assert_eq!(updated.activity_ids, vec![art.id]);

    let err = api
        .replace_organization_activities(org.id, &[sport.id, 77])
        .unwrap_err();
    assert!(matches!(err, CatalogError::ReferentialIntegrity { .. }));
    assert_eq!(api.get_organization(org.id).unwrap().activity_ids, vec![art.id]);

    let err = api
        .replace_organization_activities(404, &[art.id])
        .unwrap_err();
    assert!(matches!(
        err,
        CatalogError::NotFound {
            entity: EntityKind::Organization,
            id: 404
        }
    ));

    let cleared = api.replace_organization_activities(org.id, &[]).unwrap();
    assert!(cleared.activity_ids.is_empty());
}

#[test]
fn organization_serializes_with_flat_activity_ids() {
    let conn = open_db_in_memory().unwrap();
    let api = CatalogApi::try_new(&conn).unwrap();
    let building = api.create_building("Main st, 1", 55.0, 37.0).unwrap();
    let sport = api.create_activity("Sport", None).unwrap();
    let org = api
        .create_organization("1", "Club", "000", building.id, &[sport.id])
        .unwrap();

    let value = serde_json::to_value(&org).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "id": org.id,
            "inn": "1",
            "name": "Club",
            "phones": "000",
            "building_id": building.id,
            "activity_ids": [sport.id],
        })
    );
}
