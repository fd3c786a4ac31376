use geek_catalog::*;
use geek_query::{map_row, Entity, FieldType, ProjectedField, RawRow, Value};

#[test]
fn registry_resolves_media_layout() {
    let reg = catalog_registry();
    assert_eq!(reg.len(), 6);

    let media = reg.metadata_of::<MediaModel>().unwrap();
    assert_eq!(media.table_name(), "medias");
    assert_eq!(media.id_column(), "id_media");
    assert_eq!(media.column("name").unwrap(), "name_media");
    assert_eq!(media.column("totalSeason").unwrap(), "total_season");
    assert_eq!(media.column("updateAt").unwrap(), "update_at");
    assert_eq!(
        media.join_column_or("mediaCategory", "media_category_id"),
        "id_media_category"
    );
    assert!(media.is_scalar("cover"));
    assert!(!media.is_scalar("mediaCategory"));
    assert!(!media.is_scalar("alternativeTitles"));
}

#[test]
fn alternative_titles_association_resolves() {
    let reg = catalog_registry();
    let media = reg.metadata_of::<MediaModel>().unwrap();
    let info = media.association("alternativeTitles").unwrap();
    assert_eq!(info.related_table, "alternative_titles");
    assert_eq!(info.foreign_key_column, "id_media");
    assert_eq!(info.related_id_column, "id_media");
    assert_eq!(info.display_column, "name_title");

    // External references have no `name` field, so the default applies.
    let ext = media.association("externalReferences").unwrap();
    assert_eq!(ext.display_column, "name");
}

#[test]
fn entity_without_name_field() {
    let reg = catalog_registry();
    let person = reg.metadata_of::<TypePersonModel>().unwrap();
    assert!(!person.has_field("name"));
    assert_eq!(person.column("nameTypePerson").unwrap(), "name_type_person");
}

#[test]
fn media_maps_timestamps_and_drops_bad_ones() {
    let projection = vec![
        ProjectedField {
            name: "id".into(),
            column: "id_media".into(),
            ty: FieldType::Int,
        },
        ProjectedField {
            name: "updateAt".into(),
            column: "update_at".into(),
            ty: FieldType::DateTime,
        },
    ];
    let ok: MediaModel = map_row(
        &projection,
        &RawRow::Columns(vec![
            Value::Integer(1),
            Value::Text("2024-01-02 03:04:05".into()),
        ]),
    )
    .unwrap();
    assert_eq!(
        ok.update_at.map(|t| t.to_string()),
        Some("2024-01-02 03:04:05".to_string())
    );

    let bad: MediaModel = map_row(
        &projection,
        &RawRow::Columns(vec![Value::Integer(1), Value::Text("yesterday".into())]),
    )
    .unwrap();
    assert_eq!(bad.id, Some(1));
    assert_eq!(bad.update_at, None);
}

#[test]
fn media_kind_round_trips_category_ids() {
    for kind in [MediaKind::Serie, MediaKind::Game, MediaKind::Vn, MediaKind::Movie] {
        assert_eq!(MediaKind::from_category_id(kind.category_id()), Some(kind));
    }
    assert_eq!(MediaKind::from_str_loose("Games"), Some(MediaKind::Game));
    assert_eq!(MediaKind::from_str_loose("visual novel"), Some(MediaKind::Vn));
    assert_eq!(MediaKind::from_str_loose("podcast"), None);
}

#[test]
fn decls_are_reachable_through_entity_trait() {
    assert_eq!(MediaModel::decl().type_name, "MediaModel");
    assert_eq!(AlternativeTitleModel::decl().table, Some("alternative_titles"));
}
