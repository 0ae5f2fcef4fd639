use super::*;
use serde_json::json;

fn reference(value: serde_json::Value) -> Reference {
    serde_json::from_value(value).expect("reference fixture")
}

#[test]
fn button_label_follows_pending_state() {
    assert_eq!(factcheck_button_label(false), "Tényellenőrzés");
    assert_eq!(factcheck_button_label(true), "Ellenőrzés...");
}

#[test]
fn title_falls_back_to_generic_label() {
    let mut post: Post = serde_json::from_value(json!({
        "_id": "p1",
        "source_id": "s1",
        "content": "szöveg",
        "title": "  ",
        "posted_at": "2024-03-05T14:30:00"
    }))
    .expect("post fixture");
    assert_eq!(post_title(&post), "Poszt");

    post.title = Some("Nyugdíjemelés".to_owned());
    assert_eq!(post_title(&post), "Nyugdíjemelés");
}

#[test]
fn queries_are_disabled_without_an_id() {
    assert!(!query_options("").enabled);
    assert!(query_options("p1").enabled);
}

#[test]
fn reference_row_with_link_and_snippet() {
    let row = reference_row(&reference(json!({
        "type": "web",
        "source": "Google",
        "title": "KSH: fogyasztói árak",
        "url": "https://ksh.hu/arak",
        "snippet": "Az árak 3,2%-kal nőttek.",
        "relevance_score": 0.874
    })));
    assert_eq!(row.heading, "KSH: fogyasztói árak");
    assert_eq!(row.url.as_deref(), Some("https://ksh.hu/arak"));
    assert_eq!(row.summary.as_deref(), Some("Az árak 3,2%-kal nőttek."));
    assert_eq!(row.source, "Google");
    assert_eq!(row.relevance, "Relevancia: 87%");
}

#[test]
fn reference_row_without_url_renders_plain_heading() {
    let row = reference_row(&reference(json!({
        "type": "statistics",
        "source": "EUROSTAT",
        "title": "GDP growth",
        "url": "",
        "relevance_score": 1.0
    })));
    assert_eq!(row.url, None);
    assert_eq!(row.summary, None);
    assert_eq!(row.relevance, "Relevancia: 100%");
}
