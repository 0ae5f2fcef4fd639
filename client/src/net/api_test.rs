use futures::executor::block_on;
use wire::{CollectionStatus, DatasetInfo, FactCheckResult, SourceGroup, Verdict};

use super::*;

#[test]
fn resolve_base_defaults_to_same_origin_proxy() {
    assert_eq!(resolve_base(None), "/api");
    assert_eq!(resolve_base(Some("  ")), "/api");
    assert_eq!(resolve_base(Some("http://localhost:8095/api")), "http://localhost:8095/api");
}

#[test]
fn decode_response_parses_success_body() {
    let health: Health = decode_response(200, r#"{"status":"healthy"}"#).expect("decode");
    assert!(health.is_healthy());
}

#[test]
fn decode_response_accepts_empty_body_for_unit() {
    let () = decode_response(204, "").expect("empty body");
    let _: IgnoredAny = decode_response(200, r#"{"message":"Source deleted"}"#).expect("ignored body");
}

#[test]
fn decode_response_maps_error_status() {
    let err = decode_response::<Post>(404, "{\"detail\":\"Post not found\"}\nTraceback").expect_err("404");
    assert!(err.is_not_found());
    assert_eq!(err, ApiError::Status { status: 404, body: "{\"detail\":\"Post not found\"}".to_owned() });
}

#[test]
fn decode_response_reports_shape_mismatch() {
    let err = decode_response::<Health>(200, "[1, 2]").expect_err("wrong shape");
    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn decode_response_unwraps_either_listing_shape() {
    let bare: Listing<Health> = decode_response(200, r#"[{"status":"healthy"}]"#).expect("bare array");
    let paged: Listing<Health> =
        decode_response(200, r#"{"items":[{"status":"healthy"}],"total":1,"page":1,"size":50}"#).expect("page");
    assert_eq!(bare.into_items().len(), 1);
    assert_eq!(paged.into_items().len(), 1);
}

#[test]
fn not_found_as_none_only_swallows_404() {
    let missing: Result<u8, ApiError> = Err(ApiError::from_status(404, "missing"));
    assert_eq!(not_found_as_none(missing), Ok(None));

    let broken: Result<u8, ApiError> = Err(ApiError::from_status(500, "boom"));
    assert!(not_found_as_none(broken).is_err());

    assert_eq!(not_found_as_none(Ok::<u8, ApiError>(3)), Ok(Some(3)));
}

#[test]
fn resolve_operator_defaults_when_unset_or_blank() {
    assert_eq!(resolve_operator(None), "default");
    assert_eq!(resolve_operator(Some(" ")), "default");
    assert_eq!(resolve_operator(Some("operator-7")), "operator-7");
}

#[test]
fn decode_response_reads_lookup_payloads() {
    let source: Source = decode_response(
        200,
        r#"{"id":"s1","source_type":"rss","identifier":"https://telex.hu/rss","source_group_id":"g1","config":{},"is_active":true,"created_at":"2024-03-05T14:30:00"}"#,
    )
    .expect("source");
    assert_eq!(source.source_group_id, "g1");

    let status: CollectionStatus = decode_response(
        200,
        r#"{"source_id":"s1","is_active":true,"last_collected_at":null,"last_collection_status":"success"}"#,
    )
    .expect("status");
    assert_eq!(status.last_collection_status.as_deref(), Some("success"));

    let dataset: DatasetInfo =
        decode_response(200, r#"{"code":"nama_10_gdp","label":"GDP","source":"eurostat"}"#).expect("dataset");
    assert_eq!(dataset.code, "nama_10_gdp");

    let result: FactCheckResult =
        decode_response(200, r#"{"post_id":"p1","verdict":"true","confidence":0.9}"#).expect("result");
    assert_eq!(result.verdict, Verdict::True);

    let groups: Listing<SourceGroup> =
        decode_response(200, r#"[{"id":"g1","name":"Sajtó","description":null,"user_id":"default"}]"#)
            .expect("groups");
    assert_eq!(groups.into_items()[0].name, "Sajtó");

    let feeds: Value = decode_response(200, r#"{"feeds":["hirek","gazdasag"]}"#).expect("news payload");
    assert_eq!(feeds["feeds"][1], "gazdasag");
}

/// Outside the browser no wrapper touches the network.
#[cfg(not(feature = "hydrate"))]
#[test]
fn wrappers_are_inert_outside_the_browser() {
    let body = NewSourceGroup { name: "Sajtó".to_owned(), description: None };
    let unavailable = |result: Result<(), ApiError>| assert_eq!(result, Err(ApiError::Unavailable));

    block_on(async {
        unavailable(get_source("s1").await.map(drop));
        unavailable(collection_status("s1").await.map(drop));
        unavailable(get_factcheck("p1").await.map(drop));
        unavailable(get_dataset(StatsProvider::Eurostat, "nama_10_gdp").await.map(drop));
        unavailable(list_source_groups().await.map(drop));
        unavailable(get_source_group("g1").await.map(drop));
        unavailable(create_source_group(&body).await.map(drop));
        unavailable(mti_feeds().await.map(drop));
        unavailable(collect_mti("hirek", None).await.map(drop));
        unavailable(search_mti("infláció").await.map(drop));
        unavailable(collect_rss("https://telex.hu/rss", Some(10)).await.map(drop));
        unavailable(validate_rss("https://telex.hu/rss").await.map(drop));
        unavailable(search_rss("infláció").await.map(drop));
        unavailable(collect_kozlony(None, Some(2024)).await.map(drop));
        unavailable(search_kozlony("rendelet", None).await.map(drop));
    });
}
