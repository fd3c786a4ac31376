use geek_catalog::{catalog_registry, AlternativeTitleModel, MediaModel, GAME_ID, SERIE_ID};
use geek_db::{add_alternative_title, open_memory, upsert_category, MediaRepository, SqliteExecutor};
use geek_query::{Page, PageRequest, RequestedFields, SearchEngine, SearchRequest};
use rusqlite::Connection;

/// Dragon Quest (1, game) and Dragonball (2, serie).
fn catalog() -> Connection {
    let conn = open_memory().unwrap();
    upsert_category(&conn, SERIE_ID, "Serie").unwrap();
    upsert_category(&conn, GAME_ID, "Game").unwrap();
    conn.execute_batch(
        "INSERT INTO medias (id_media, name_media, about, id_media_category)
             VALUES (1, 'Dragon Quest', 'A slime approaches', 2);
         INSERT INTO medias (id_media, name_media, about, id_media_category)
             VALUES (2, 'Dragonball', 'Seven balls', 1);",
    )
    .unwrap();
    conn
}

fn ids(page: &Page<MediaModel>) -> Vec<i32> {
    page.content.iter().filter_map(|m| m.id).collect()
}

fn fields(names: &[&str]) -> RequestedFields {
    names.iter().map(|n| (n.to_string(), Vec::new())).collect()
}

#[test]
fn name_and_category_filter() {
    let conn = catalog();
    let registry = catalog_registry();
    let repo = MediaRepository::new(&conn, &registry);

    let page = repo
        .search_media(Some("dragon"), None, Some(GAME_ID), &RequestedFields::new(), PageRequest::new(0, 10))
        .unwrap();
    assert_eq!(page.total_elements, 1);
    assert_eq!(ids(&page), vec![1]);
    assert_eq!(page.content[0].name.as_deref(), Some("Dragon Quest"));
}

#[test]
fn no_filters_pages_by_id() {
    let conn = catalog();
    let registry = catalog_registry();
    let repo = MediaRepository::new(&conn, &registry);

    let first = repo
        .search_media(None, None, None, &RequestedFields::new(), PageRequest::new(0, 1))
        .unwrap();
    assert_eq!(first.total_elements, 2);
    assert_eq!(ids(&first), vec![1]);
    assert!(first.has_next());

    let second = repo
        .search_media(None, None, None, &RequestedFields::new(), PageRequest::new(1, 1))
        .unwrap();
    assert_eq!(ids(&second), vec![2]);
    assert!(!second.has_next());
}

#[test]
fn matching_is_case_insensitive() {
    let conn = catalog();
    let registry = catalog_registry();
    let repo = MediaRepository::new(&conn, &registry);

    let page = repo
        .search_media(Some("DRAGONBALL"), None, None, &RequestedFields::new(), PageRequest::default())
        .unwrap();
    assert_eq!(ids(&page), vec![2]);
}

#[test]
fn alternative_titles_do_not_duplicate_rows() {
    let conn = catalog();
    add_alternative_title(&conn, 1, "Dragon Warrior").unwrap();
    add_alternative_title(&conn, 1, "Dragon Warrior I").unwrap();
    add_alternative_title(&conn, 2, "Dragon Ball").unwrap();
    let registry = catalog_registry();
    let repo = MediaRepository::new(&conn, &registry);

    let page = repo
        .search_media(None, Some("warrior"), None, &RequestedFields::new(), PageRequest::default())
        .unwrap();
    assert_eq!(page.total_elements, 1);
    assert_eq!(ids(&page), vec![1]);

    let all = repo
        .search_media(None, None, None, &RequestedFields::new(), PageRequest::default())
        .unwrap();
    assert_eq!(all.total_elements, 2);
    assert_eq!(ids(&all), vec![1, 2]);
}

#[test]
fn media_without_titles_still_match_name() {
    let conn = catalog();
    let registry = catalog_registry();
    let repo = MediaRepository::new(&conn, &registry);

    let page = repo
        .search_media(Some("quest"), None, None, &RequestedFields::new(), PageRequest::default())
        .unwrap();
    assert_eq!(ids(&page), vec![1]);
}

#[test]
fn only_requested_scalars_are_filled() {
    let conn = catalog();
    let registry = catalog_registry();
    let repo = MediaRepository::new(&conn, &registry);

    let page = repo
        .search_media(
            Some("quest"),
            None,
            None,
            &fields(&["about", "alternativeTitles", "nonsense"]),
            PageRequest::default(),
        )
        .unwrap();
    let media = &page.content[0];
    assert_eq!(media.about.as_deref(), Some("A slime approaches"));
    assert!(media.cover.is_none());
    assert!(media.alternative_titles.is_empty());
}

#[test]
fn hostile_input_is_bound_not_spliced() {
    let conn = catalog();
    let registry = catalog_registry();
    let repo = MediaRepository::new(&conn, &registry);

    let page = repo
        .search_media(
            Some("'; DROP TABLE medias; --"),
            None,
            None,
            &RequestedFields::new(),
            PageRequest::default(),
        )
        .unwrap();
    assert!(page.is_empty());
    assert_eq!(page.total_elements, 0);
    let still_there: i64 = conn
        .query_row("SELECT COUNT(*) FROM medias", [], |r| r.get(0))
        .unwrap();
    assert_eq!(still_there, 2);
}

#[test]
fn offset_past_end_keeps_total() {
    let conn = catalog();
    let registry = catalog_registry();
    let repo = MediaRepository::new(&conn, &registry);

    let page = repo
        .search_media(None, None, None, &RequestedFields::new(), PageRequest::new(50, 10))
        .unwrap();
    assert!(page.is_empty());
    assert_eq!(page.total_elements, 2);
}

#[test]
fn other_entities_are_searchable() {
    let conn = catalog();
    add_alternative_title(&conn, 1, "Dragon Warrior").unwrap();
    add_alternative_title(&conn, 2, "Dragon Ball").unwrap();
    let registry = catalog_registry();
    let engine = SearchEngine::new(&registry, SqliteExecutor::new(&conn));

    let page = engine
        .search::<AlternativeTitleModel>(&SearchRequest::new(PageRequest::default()).name("ball"))
        .unwrap();
    assert_eq!(page.total_elements, 1);
    assert_eq!(page.content[0].name.as_deref(), Some("Dragon Ball"));
}

#[test]
fn accented_uppercase_names_match_lowercase_filter() {
    let conn = catalog();
    conn.execute(
        "INSERT INTO medias (id_media, name_media, id_media_category) VALUES (3, 'POKÉMON ÉMERALD', 2)",
        [],
    )
    .unwrap();
    add_alternative_title(&conn, 3, "Pokémon Esmeralda").unwrap();
    let registry = catalog_registry();
    let repo = MediaRepository::new(&conn, &registry);

    let page = repo
        .search_media(Some("pokémon"), None, None, &RequestedFields::new(), PageRequest::default())
        .unwrap();
    assert_eq!(page.total_elements, 1);
    assert_eq!(ids(&page), vec![3]);

    let by_title = repo
        .search_media(None, Some("ESMERALDA"), Some(GAME_ID), &RequestedFields::new(), PageRequest::default())
        .unwrap();
    assert_eq!(ids(&by_title), vec![3]);
}
