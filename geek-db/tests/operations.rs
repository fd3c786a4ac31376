use geek_catalog::{
    AlternativeTitleModel, CatalogSeed, CategorySeed, MediaCategoryModel, MediaModel, MediaSeed,
    GAME_ID, SERIE_ID,
};
use geek_db::*;

fn seeded() -> rusqlite::Connection {
    let conn = open_memory().unwrap();
    upsert_category(&conn, SERIE_ID, "Serie").unwrap();
    upsert_category(&conn, GAME_ID, "Game").unwrap();
    conn
}

fn media(name: &str, category: i32, titles: &[&str]) -> MediaModel {
    MediaModel {
        name: Some(name.to_string()),
        media_category: Some(MediaCategoryModel {
            id: Some(category),
            type_category: None,
        }),
        alternative_titles: titles
            .iter()
            .map(|t| AlternativeTitleModel {
                name: Some(t.to_string()),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    }
}

#[test]
fn upsert_category_renames() {
    let conn = seeded();
    upsert_category(&conn, GAME_ID, "Video Game").unwrap();
    let category = find_category_by_id(&conn, GAME_ID).unwrap().unwrap();
    assert_eq!(category.type_category.as_deref(), Some("Video Game"));
    assert!(find_category_by_id(&conn, 99).unwrap().is_none());
}

#[test]
fn insert_and_find_media() {
    let conn = seeded();
    let id = insert_media(&conn, &media("Dragon Quest", GAME_ID, &["Dragon Warrior"])).unwrap();

    let found = find_media_by_id(&conn, id).unwrap().unwrap();
    assert_eq!(found.id, Some(id));
    assert_eq!(found.name.as_deref(), Some("Dragon Quest"));
    assert_eq!(found.media_category.unwrap().type_category.as_deref(), Some("Game"));
    assert!(found.update_at.is_some());
    assert!(found.alternative_titles.is_empty());

    let eager = find_media_by_id_eager(&conn, id).unwrap().unwrap();
    assert_eq!(eager.alternative_titles.len(), 1);
    assert_eq!(eager.alternative_titles[0].name.as_deref(), Some("Dragon Warrior"));
    assert_eq!(eager.alternative_titles[0].media_id, Some(id));
}

#[test]
fn missing_media_is_none() {
    let conn = seeded();
    assert!(find_media_by_id(&conn, 42).unwrap().is_none());
    assert!(find_media_by_id_eager(&conn, 42).unwrap().is_none());
}

#[test]
fn save_media_updates_existing() {
    let conn = seeded();
    let id = insert_media(&conn, &media("Dragonbal", SERIE_ID, &["DB"])).unwrap();

    let mut fixed = media("Dragonball", SERIE_ID, &["Dragon Ball", "DB"]);
    fixed.id = Some(id);
    fixed.total_season = Some(1);
    assert_eq!(save_media(&conn, &fixed).unwrap(), id);

    let found = find_media_by_id_eager(&conn, id).unwrap().unwrap();
    assert_eq!(found.name.as_deref(), Some("Dragonball"));
    assert_eq!(found.total_season, Some(1));
    assert_eq!(found.alternative_titles.len(), 2);
}

#[test]
fn save_media_with_unknown_id_inserts() {
    let conn = seeded();
    let mut m = media("Tetris", GAME_ID, &[]);
    m.id = Some(77);
    assert_eq!(save_media(&conn, &m).unwrap(), 77);
    assert!(media_exists(&conn, 77).unwrap());
}

#[test]
fn save_all_returns_ids_in_order() {
    let conn = seeded();
    let ids = save_all(
        &conn,
        &[media("A", GAME_ID, &[]), media("B", SERIE_ID, &[]), media("C", GAME_ID, &[])],
    )
    .unwrap();
    assert_eq!(ids.len(), 3);
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(catalog_stats(&conn).unwrap().media, 3);
}

#[test]
fn deleting_media_removes_titles() {
    let conn = seeded();
    let id = insert_media(&conn, &media("Chrono Trigger", GAME_ID, &["CT"])).unwrap();
    conn.execute("DELETE FROM medias WHERE id_media = ?1", [id]).unwrap();
    assert_eq!(catalog_stats(&conn).unwrap().alternative_titles, 0);
}

#[test]
fn external_reference_lookup() {
    let conn = seeded();
    upsert_type_reference(&conn, 1, "MyAnimeList").unwrap();
    let id = insert_media(&conn, &media("Dragonball", SERIE_ID, &[])).unwrap();
    add_external_reference(&conn, id, "223", 1).unwrap();

    let found = find_media_by_external_reference(&conn, "223", 1).unwrap().unwrap();
    assert_eq!(found.id, Some(id));
    assert!(find_media_by_external_reference(&conn, "223", 2).unwrap().is_none());

    let eager = find_media_by_id_eager(&conn, id).unwrap().unwrap();
    assert_eq!(eager.external_references.len(), 1);
    let provider = eager.external_references[0].type_reference.as_ref().unwrap();
    assert_eq!(provider.name_reference.as_deref(), Some("MyAnimeList"));
}

#[test]
fn random_banner_skips_empty() {
    let conn = seeded();
    assert!(random_banner(&conn).unwrap().is_none());

    let mut blank = media("No Art", GAME_ID, &[]);
    blank.banner = Some(String::new());
    insert_media(&conn, &blank).unwrap();
    assert!(random_banner(&conn).unwrap().is_none());

    let mut art = media("Art", GAME_ID, &[]);
    art.banner = Some("art.png".into());
    insert_media(&conn, &art).unwrap();
    assert_eq!(random_banner(&conn).unwrap().as_deref(), Some("art.png"));
}

fn sample_seed() -> CatalogSeed {
    CatalogSeed {
        categories: vec![
            CategorySeed { id: SERIE_ID, type_category: "Serie".into() },
            CategorySeed { id: GAME_ID, type_category: "Game".into() },
        ],
        media: vec![
            MediaSeed {
                id: None,
                name: "Dragon Quest".into(),
                category: GAME_ID,
                about: None,
                cover: None,
                banner: Some("dq.png".into()),
                total_season: None,
                alternative_titles: vec!["Dragon Warrior".into()],
            },
            MediaSeed {
                id: Some(10),
                name: "Dragonball".into(),
                category: SERIE_ID,
                about: None,
                cover: None,
                banner: None,
                total_season: Some(1),
                alternative_titles: vec![],
            },
            MediaSeed {
                id: None,
                name: "Orphan".into(),
                category: 9,
                about: None,
                cover: None,
                banner: None,
                total_season: None,
                alternative_titles: vec![],
            },
        ],
    }
}

#[test]
fn seed_populates_catalog() {
    let conn = open_memory().unwrap();
    let stats = seed_from_catalog(&conn, &sample_seed()).unwrap();
    assert_eq!(stats.categories, 2);
    assert_eq!(stats.inserted, 2);
    assert_eq!(stats.skipped, 1);
    assert_eq!(stats.alternative_titles, 1);
    assert!(media_exists(&conn, 10).unwrap());
}

#[test]
fn reseeding_does_not_duplicate() {
    let conn = open_memory().unwrap();
    seed_from_catalog(&conn, &sample_seed()).unwrap();
    let again = seed_from_catalog(&conn, &sample_seed()).unwrap();
    assert_eq!(again.inserted, 0);
    assert_eq!(again.updated, 2);
    assert_eq!(again.alternative_titles, 0);

    let stats = catalog_stats(&conn).unwrap();
    assert_eq!(stats.media, 2);
    assert_eq!(stats.alternative_titles, 1);
    assert_eq!(stats.with_banner, 1);
}

#[test]
fn categories_are_listed_with_counts() {
    let conn = open_memory().unwrap();
    seed_from_catalog(&conn, &sample_seed()).unwrap();
    let rows = list_categories(&conn).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id, SERIE_ID);
    assert_eq!(rows[0].media_count, 1);
    assert_eq!(rows[1].type_category, "Game");
}
