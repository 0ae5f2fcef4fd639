use super::*;
use serde_json::json;

// =============================================================
// Listing
// =============================================================

#[test]
fn listing_accepts_bare_array() {
    let listing: Listing<Health> = serde_json::from_value(json!([{ "status": "healthy" }])).expect("listing");
    assert_eq!(listing.into_items(), vec![Health { status: "healthy".to_owned() }]);
}

#[test]
fn listing_accepts_paginated_envelope() {
    let listing: Listing<Health> = serde_json::from_value(json!({
        "items": [{ "status": "a" }, { "status": "b" }],
        "total": 2,
        "page": 1,
        "size": 50
    }))
    .expect("listing");
    let items = listing.into_items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].status, "b");
}

#[test]
fn listing_envelope_tolerates_missing_counters() {
    let listing: Listing<Health> = serde_json::from_value(json!({ "items": [] })).expect("listing");
    assert!(matches!(listing, Listing::Page(Page { total: 0, .. })));
}

// =============================================================
// Sources
// =============================================================

#[test]
fn source_decodes_mongo_id_alias() {
    let source: Source = serde_json::from_value(json!({
        "_id": "abc",
        "source_type": "rss",
        "identifier": "https://example.hu/feed",
        "source_group_id": "g1"
    }))
    .expect("source");
    assert_eq!(source.id, "abc");
    assert_eq!(source.source_type, SourceType::Rss);
    assert!(source.is_active, "missing is_active defaults to active");
    assert!(source.config.is_empty());
}

#[test]
fn source_decodes_plain_id() {
    let source: Source = serde_json::from_value(json!({
        "id": "xyz",
        "source_type": "facebook",
        "identifier": "page",
        "source_group_id": "g1",
        "is_active": false,
        "created_at": "2024-01-01T00:00:00"
    }))
    .expect("source");
    assert_eq!(source.id, "xyz");
    assert!(!source.is_active);
}

#[test]
fn unknown_source_type_round_trips_verbatim() {
    let kind: SourceType = serde_json::from_value(json!("telegram")).expect("kind");
    assert_eq!(kind, SourceType::Other("telegram".to_owned()));
    assert_eq!(kind.label(), "telegram");
    assert_eq!(serde_json::to_value(&kind).expect("encode"), json!("telegram"));
}

#[test]
fn source_type_labels() {
    assert_eq!(SourceType::OfficialPublication.label(), "Magyar Közlöny");
    assert_eq!(SourceType::News.label(), "Hírek");
    assert_eq!(String::from(SourceType::OfficialPublication), "official_publication");
}

#[test]
fn display_name_prefers_non_blank_name() {
    let mut source: Source = serde_json::from_value(json!({
        "id": "1",
        "source_type": "news",
        "identifier": "mti",
        "name": "  "
    }))
    .expect("source");
    assert_eq!(source.display_name(), "mti");
    source.name = Some("MTI Hírek".to_owned());
    assert_eq!(source.display_name(), "MTI Hírek");
}

#[test]
fn new_source_omits_unset_fields() {
    let body = NewSource {
        source_type: SourceType::Rss,
        identifier: "https://example.hu/rss".to_owned(),
        source_group_id: "default".to_owned(),
        name: None,
        config: None,
        is_active: None,
        schedule: None,
    };
    assert_eq!(
        serde_json::to_value(&body).expect("encode"),
        json!({
            "source_type": "rss",
            "identifier": "https://example.hu/rss",
            "source_group_id": "default"
        })
    );
}

#[test]
fn source_group_decodes_backend_shape() {
    let group: SourceGroup = serde_json::from_value(json!({
        "id": "65f0aa",
        "name": "Kormányzati",
        "description": null,
        "user_id": "operator",
        "created_at": "2024-03-05T14:30:00"
    }))
    .expect("group");
    assert_eq!(group.id, "65f0aa");
    assert_eq!(group.user_id, "operator");
    assert_eq!(group.label(), "Kormányzati");

    let aliased: SourceGroup = serde_json::from_value(json!({ "_id": "g2", "name": "Hírek" })).expect("group");
    assert_eq!(aliased.id, "g2");
}

#[test]
fn source_group_label_appends_non_blank_description() {
    let mut group = SourceGroup {
        id: "g".to_owned(),
        name: "Sajtó".to_owned(),
        description: Some("országos lapok".to_owned()),
        user_id: String::new(),
        created_at: None,
    };
    assert_eq!(group.label(), "Sajtó (országos lapok)");
    group.description = Some("  ".to_owned());
    assert_eq!(group.label(), "Sajtó");
}

#[test]
fn new_source_group_omits_missing_description() {
    let body = NewSourceGroup { name: "Sajtó".to_owned(), description: None };
    assert_eq!(serde_json::to_value(&body).expect("json"), json!({ "name": "Sajtó" }));
}

// =============================================================
// Posts
// =============================================================

fn post(title: Option<&str>, content: &str) -> Post {
    Post {
        id: "p1".to_owned(),
        source_id: "s1".to_owned(),
        source: None,
        source_type: None,
        content: content.to_owned(),
        title: title.map(str::to_owned),
        posted_at: "2024-03-05T14:30:00".to_owned(),
        collected_at: String::new(),
        metadata: Map::new(),
    }
}

#[test]
fn headline_prefers_title() {
    assert_eq!(post(Some("Cím"), "tartalom").headline(5), "Cím");
}

#[test]
fn headline_truncates_content_on_char_boundary() {
    let p = post(None, "árvíztűrő tükörfúrógép");
    assert_eq!(p.headline(5), "árvíz...");
}

#[test]
fn headline_keeps_short_content_intact() {
    assert_eq!(post(Some(""), "rövid").headline(100), "rövid");
}

#[test]
fn source_label_falls_back_to_source_id() {
    let mut p = post(None, "x");
    assert_eq!(p.source_label(), "s1");
    p.source = Some("Index".to_owned());
    assert_eq!(p.source_label(), "Index");
}

#[test]
fn original_link_reads_metadata() {
    let mut p = post(None, "x");
    assert_eq!(p.original_link(), None);
    p.metadata.insert("link".to_owned(), json!("https://fb.com/post/1"));
    assert_eq!(p.original_link(), Some("https://fb.com/post/1"));
    p.metadata.insert("link".to_owned(), json!(42));
    assert_eq!(p.original_link(), None);
}

// =============================================================
// Fact-checks
// =============================================================

#[test]
fn factcheck_result_decodes_backend_shape() {
    let result: FactCheckResult = serde_json::from_value(json!({
        "id": "f1",
        "post_id": "6501a2b3c4d5e6f7a8b9c0d1",
        "claims": [{ "text": "Az infláció 5%", "type": "statistical", "confidence": 0.8, "numbers": ["5%"] }],
        "verdict": "partially_true",
        "confidence": 0.64,
        "references": [{ "type": "statistics", "source": "KSH", "url": "https://ksh.hu", "relevance_score": 0.9 }],
        "checked_at": "2024-03-05T14:30:00",
        "metadata": {}
    }))
    .expect("result");
    assert_eq!(result.verdict, Verdict::PartiallyTrue);
    assert_eq!(result.claims[0].kind, "statistical");
    assert_eq!(result.references[0].heading(), "https://ksh.hu");
    assert_eq!(result.short_post_id(), "6501a2b3");
    assert_eq!(result.row_key(), "f1");
}

#[test]
fn verdict_labels_and_tones() {
    assert_eq!(Verdict::Verified.tone(), VerdictTone::Positive);
    assert_eq!(Verdict::True.tone(), VerdictTone::Positive);
    assert_eq!(Verdict::PartiallyTrue.tone(), VerdictTone::Mixed);
    assert_eq!(Verdict::Disputed.tone(), VerdictTone::Warning);
    assert_eq!(Verdict::False.tone(), VerdictTone::Negative);
    assert_eq!(Verdict::from("unverifiable".to_owned()).tone(), VerdictTone::Unknown);
    assert_eq!(Verdict::PartiallyTrue.label(), "Részben Igaz");
    assert_eq!(Verdict::from("unverifiable".to_owned()).label(), "unverifiable");
}

#[test]
fn reference_summary_falls_back_to_content() {
    let reference = Reference {
        kind: "web".to_owned(),
        source: "google".to_owned(),
        title: Some("Cikk".to_owned()),
        url: None,
        snippet: None,
        content: Some("hosszú szöveg".to_owned()),
        relevance_score: 0.5,
    };
    assert_eq!(reference.heading(), "Cikk");
    assert_eq!(reference.summary().as_deref(), Some("hosszú szöveg"));
}

// =============================================================
// Statistics + health
// =============================================================

#[test]
fn dataset_hits_tolerate_provider_key_names() {
    let search = DatasetSearch {
        query: "gdp".to_owned(),
        results: vec![
            json!({ "code": "nama_10_gdp", "label": "GDP and main components" }),
            json!({ "id": "STADAT-1", "title": "Népesség" }),
            json!({ "dataset_code": "x" }),
            json!({ "label": "no code" }),
        ],
    };
    let hits = search.hits();
    assert_eq!(hits.len(), 3);
    assert_eq!(hits[1], DatasetHit { code: "STADAT-1".to_owned(), label: "Népesség".to_owned() });
    assert_eq!(hits[2].label, "x");
}

#[test]
fn health_is_healthy_only_for_exact_status() {
    assert!(Health { status: "healthy".to_owned() }.is_healthy());
    assert!(!Health { status: "degraded".to_owned() }.is_healthy());
}
