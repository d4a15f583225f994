use orgcatalog_core::db::open_db_in_memory;
use orgcatalog_core::{distance_km, BoundingBox, CatalogApi, CatalogError, Organization};
use rusqlite::Connection;

struct Fixture {
    center: i64,
    north: i64,
    far: i64,
}

fn seed(api: &CatalogApi<'_>) -> Fixture {
    let pushkina = api
        .create_building("Pushkina st, 1", 55.7558, 37.6176)
        .unwrap();
    let tverskaya = api
        .create_building("Tverskaya st, 20", 55.7700, 37.5960)
        .unwrap();
    let nevsky = api
        .create_building("Nevsky pr, 28", 59.9358, 30.3259)
        .unwrap();

    Fixture {
        center: api
            .create_organization("1", "Center", "000", pushkina.id, &[])
            .unwrap()
            .id,
        north: api
            .create_organization("2", "North", "000", tverskaya.id, &[])
            .unwrap()
            .id,
        far: api
            .create_organization("3", "Far", "000", nevsky.id, &[])
            .unwrap()
            .id,
    }
}

fn ids(organizations: Vec<Organization>) -> Vec<i64> {
    organizations.into_iter().map(|org| org.id).collect()
}

#[test]
fn radius_includes_and_excludes_by_great_circle_distance() {
    let conn = open_db_in_memory().unwrap();
    let api = CatalogApi::try_new(&conn).unwrap();
    let fixture = seed(&api);

    let distance = distance_km(55.7558, 37.6176, 55.7600, 37.6200);
    assert!(distance > 0.4 && distance < 0.6, "distance was {distance}");

    let within_five = api
        .list_organizations_by_geo(55.76, 37.62, Some(5.0), None)
        .unwrap();
    assert_eq!(ids(within_five), vec![fixture.center, fixture.north]);

    let within_hundred_meters = api
        .list_organizations_by_geo(55.76, 37.62, Some(0.1), None)
        .unwrap();
    assert!(ids(within_hundred_meters).is_empty());
}

#[test]
fn bounding_box_edges_are_inclusive() {
    let conn = open_db_in_memory().unwrap();
    let api = CatalogApi::try_new(&conn).unwrap();
    let fixture = seed(&api);

    let bbox = BoundingBox::new(55.7558, 55.7700, 37.5960, 37.6176);
    let hits = api
        .list_organizations_by_geo(0.0, 0.0, None, Some(bbox))
        .unwrap();
    assert_eq!(ids(hits), vec![fixture.center, fixture.north]);
}

#[test]
fn radius_wins_over_bounding_box() {
    let conn = open_db_in_memory().unwrap();
    let api = CatalogApi::try_new(&conn).unwrap();
    let fixture = seed(&api);

    let spb_box = BoundingBox::new(59.0, 61.0, 29.0, 31.0);
    let hits = api
        .list_organizations_by_geo(55.7558, 37.6176, Some(1.0), Some(spb_box))
        .unwrap();
    assert_eq!(ids(hits), vec![fixture.center]);
}

#[test]
fn zero_radius_is_treated_as_absent() {
    let conn = open_db_in_memory().unwrap();
    let api = CatalogApi::try_new(&conn).unwrap();
    let fixture = seed(&api);

    let everything = api
        .list_organizations_by_geo(55.7558, 37.6176, Some(0.0), None)
        .unwrap();
    assert_eq!(
        ids(everything),
        vec![fixture.center, fixture.north, fixture.far]
    );

    let spb_box = BoundingBox::new(59.0, 61.0, 29.0, 31.0);
    let boxed = api
        .list_organizations_by_geo(55.7558, 37.6176, Some(0.0), Some(spb_box))
        .unwrap();
    assert_eq!(ids(boxed), vec![fixture.far]);
}

#[test]
fn partial_bounds_apply_no_filter() {
    let conn = open_db_in_memory().unwrap();
    let api = CatalogApi::try_new(&conn).unwrap();
    seed(&api);

    let bbox = BoundingBox::from_parts(Some(59.0), Some(61.0), Some(29.0), None);
    let hits = api.list_organizations_by_geo(0.0, 0.0, None, bbox).unwrap();
    assert_eq!(hits.len(), 3);
}

#[test]
fn organization_with_unresolved_building_is_excluded() {
    let conn = open_db_in_memory().unwrap();
    let api = CatalogApi::try_new(&conn).unwrap();
    let fixture = seed(&api);
    insert_dangling_organization(&conn);

    let hits = api
        .list_organizations_by_geo(55.7558, 37.6176, None, None)
        .unwrap();
    assert_eq!(ids(hits), vec![fixture.center, fixture.north, fixture.far]);
    assert_eq!(api.list_organizations().unwrap().len(), 4);
}

#[test]
fn malformed_geo_input_is_a_validation_error() {
    let conn = open_db_in_memory().unwrap();
    let api = CatalogApi::try_new(&conn).unwrap();

    let err = api
        .list_organizations_by_geo(55.0, 37.0, Some(-2.0), None)
        .unwrap_err();
    assert!(matches!(err, CatalogError::Validation(_)));

    let inverted = BoundingBox::new(56.0, 55.0, 37.0, 38.0);
    let err = api
        .list_organizations_by_geo(55.0, 37.0, None, Some(inverted))
        .unwrap_err();
    assert!(matches!(err, CatalogError::Validation(_)));
}

fn insert_dangling_organization(conn: &Connection) {
    conn.execute_batch(
        "PRAGMA foreign_keys = OFF;
         INSERT INTO organizations (inn, name, phones, building_id)
         VALUES ('9', 'Ghost', '', 999);
         PRAGMA foreign_keys = ON;",
    )
    .unwrap();
}
