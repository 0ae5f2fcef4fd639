use super::*;
use serde_json::json;

fn source(id: &str, active: bool) -> Source {
    serde_json::from_value(json!({
        "_id": id,
        "source_type": "rss",
        "identifier": format!("https://example.hu/{id}"),
        "source_group_id": "g1",
        "is_active": active
    }))
    .expect("source fixture")
}

fn post(title: Option<&str>, content: &str) -> Post {
    serde_json::from_value(json!({
        "_id": "p1",
        "source_id": "s1",
        "source": "Index",
        "content": content,
        "title": title,
        "posted_at": "2024-03-05T14:30:00"
    }))
    .expect("post fixture")
}

#[test]
fn stat_tiles_count_only_active_sources() {
    let sources = vec![source("a", true), source("b", false), source("c", true)];
    let tiles = stat_tiles(Some(&sources), Some(10), Some(4));

    assert_eq!(tiles.len(), 4);
    assert_eq!(tiles[0], StatTile { label: "Aktív Források", value: "2".to_owned(), accent: "blue" });
    assert_eq!(tiles[1].value, "10");
    assert_eq!(tiles[2].value, "4");
    assert_eq!(tiles[3].value, "Magas");
}

#[test]
fn stat_tiles_show_zero_while_loading() {
    let tiles = stat_tiles(None, None, None);
    assert!(tiles[..3].iter().all(|t| t.value == "0"));
}

#[test]
fn recent_post_row_prefers_title() {
    let row = recent_post_row(&post(Some("Költségvetés 2024"), "hosszú szöveg"));
    assert_eq!(row.headline, "Költségvetés 2024");
    assert_eq!(row.meta, "Index • 2024. március 5.");
    assert_eq!(row.href, "/posts/p1");
}

#[test]
fn recent_post_row_cuts_untitled_content_at_100_chars() {
    let content = "á".repeat(120);
    let row = recent_post_row(&post(None, &content));
    assert_eq!(row.headline.chars().count(), 103);
    assert!(row.headline.ends_with("..."));
}

#[test]
fn ok_len_ignores_errors() {
    assert_eq!(ok_len::<u8>(Some(Ok(vec![1, 2]))), Some(2));
    assert_eq!(ok_len::<u8>(Some(Err(QueryError::Disabled))), None);
    assert_eq!(ok_len::<u8>(None), None);
}
