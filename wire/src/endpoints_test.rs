use std::collections::BTreeMap;

use serde_json::json;

use super::*;
use crate::types::{NewSource, NewSourceGroup, SourceType, Verdict};

#[test]
fn url_joins_base_with_single_slash() {
    assert_eq!(health().url("http://localhost:8095/api/"), "http://localhost:8095/api/health");
    assert_eq!(health().url("/api"), "/api/health");
}

#[test]
fn sources_crud_paths() {
    assert_eq!(sources::list().path, "/sources");
    assert_eq!(sources::get("abc").path, "/sources/abc");
    assert_eq!(sources::delete("abc").method, Method::Delete);

    let body = NewSource {
        source_type: SourceType::Facebook,
        identifier: "kormany.hu".to_owned(),
        source_group_id: "g".to_owned(),
        name: Some("Kormány".to_owned()),
        config: None,
        is_active: Some(true),
        schedule: None,
    };
    let update = sources::update("abc", &body).expect("endpoint");
    assert_eq!(update.method, Method::Put);
    assert_eq!(update.body.as_ref().and_then(|b| b.get("name")), Some(&json!("Kormány")));
    let create = sources::create(&body).expect("endpoint");
    assert_eq!(create.method, Method::Post);
    assert_eq!(create.path, "/sources");
}

#[test]
fn source_group_paths_carry_the_owner() {
    assert_eq!(sources::groups("operator 1").path_and_query(), "/sources/groups?user_id=operator%201");
    assert_eq!(sources::group("g/1").path, "/sources/groups/g%2F1");
    assert_eq!(sources::list_in_group("g1").path_and_query(), "/sources?source_group_id=g1");

    let body = NewSourceGroup { name: "Sajtó".to_owned(), description: None };
    let create = sources::create_group("operator", &body).expect("endpoint");
    assert_eq!(create.method, Method::Post);
    assert_eq!(create.path_and_query(), "/sources/groups?user_id=operator");
    assert_eq!(create.body, Some(json!({ "name": "Sajtó" })));
}

#[test]
fn path_segments_are_percent_encoded() {
    assert_eq!(collection::post("a/b c").path, "/collection/posts/a%2Fb%20c");
}

#[test]
fn trigger_collection_omits_unset_max_posts() {
    let endpoint = collection::trigger("s1", None);
    assert_eq!(endpoint.method, Method::Post);
    assert_eq!(endpoint.path, "/collection/trigger/s1");
    assert_eq!(endpoint.body, Some(json!({})));

    let endpoint = collection::trigger("s1", Some(25));
    assert_eq!(endpoint.body, Some(json!({ "max_posts": 25 })));
}

#[test]
fn posts_listing_only_sends_set_filters() {
    let endpoint = collection::posts(&PostFilter::recent(10));
    assert_eq!(endpoint.path_and_query(), "/collection/posts?limit=10");

    let endpoint = collection::posts(&PostFilter {
        source_id: Some("s1".to_owned()),
        limit: Some(50),
        offset: Some(100),
    });
    assert_eq!(endpoint.path_and_query(), "/collection/posts?source_id=s1&limit=50&offset=100");
}

#[test]
fn factcheck_run_and_list() {
    let run = factcheck::run("p1", Some(&["https://ksh.hu".to_owned()]));
    assert_eq!(run.path, "/factcheck/p1");
    assert_eq!(run.body, Some(json!({ "manual_sources": ["https://ksh.hu"] })));
    assert_eq!(factcheck::run("p1", None).body, Some(json!({})));

    let list = factcheck::list(&FactCheckFilter {
        post_id: None,
        verdict: Some(Verdict::PartiallyTrue),
        limit: Some(50),
    });
    assert_eq!(list.path_and_query(), "/factcheck/results/list?verdict=partially_true&limit=50");
    assert_eq!(factcheck::result("p1").method, Method::Get);
}

#[test]
fn statistics_search_encodes_query() {
    let endpoint = statistics::search(StatsProvider::Ksh, "népesség & lakás");
    assert_eq!(
        endpoint.path_and_query(),
        "/statistics/ksh/search?query=n%C3%A9pess%C3%A9g%20%26%20lak%C3%A1s"
    );
    assert_eq!(statistics::dataset(StatsProvider::Eurostat, "nama_10_gdp").path, "/statistics/eurostat/dataset/nama_10_gdp");
}

#[test]
fn statistics_collect_bodies_per_provider() {
    let mut filters = BTreeMap::new();
    filters.insert("geo".to_owned(), vec!["HU".to_owned(), "AT".to_owned()]);
    let eurostat = statistics::collect_eurostat("nama_10_gdp", Some(&filters));
    assert_eq!(eurostat.body, Some(json!({ "filters": { "geo": ["HU", "AT"] } })));

    let ksh = statistics::collect_ksh("STADAT-1", Some("stadat"));
    assert_eq!(ksh.path, "/statistics/ksh/collect/STADAT-1");
    assert_eq!(ksh.body, Some(json!({ "source": "stadat" })));
}

#[test]
fn news_collectors_default_max_items() {
    assert_eq!(
        news::mti_collect("politics", None).path_and_query(),
        "/collection/mti/collect?feed_type=politics&max_items=50"
    );
    assert_eq!(
        news::rss_collect("https://telex.hu/rss", Some(10)).path_and_query(),
        "/collection/rss/collect?feed_url=https%3A%2F%2Ftelex.hu%2Frss&max_items=10"
    );
    assert_eq!(news::kozlony_collect(None, None).path_and_query(), "/collection/kozlony/collect?max_items=50");
    assert_eq!(
        news::kozlony_search("rendelet", Some(2024)).path_and_query(),
        "/collection/kozlony/search?query=rendelet&year=2024"
    );
    assert_eq!(news::rss_validate("x").method, Method::Post);
    assert_eq!(news::mti_feeds().path, "/collection/mti/feeds");
    assert_eq!(news::rss_search("a").path_and_query(), "/collection/rss/search?query=a");
    assert_eq!(news::mti_search("a").path_and_query(), "/collection/mti/search?query=a");
}
