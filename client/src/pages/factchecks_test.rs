use super::*;
use serde_json::json;

fn result(value: serde_json::Value) -> FactCheckResult {
    serde_json::from_value(value).expect("fact-check fixture")
}

#[test]
fn row_summarises_a_result() {
    let row = factcheck_row(0, &result(json!({
        "_id": "fc1",
        "post_id": "65f1c2d3e4b5a6978899aabb",
        "verdict": "partially_true",
        "confidence": 0.62,
        "claims": [
            { "text": "A GDP 2%-kal nőtt.", "type": "statistical", "confidence": 0.8 },
            { "text": "A munkanélküliség csökkent.", "type": "statistical", "confidence": 0.7 }
        ],
        "references": [
            { "type": "statistics", "source": "KSH", "relevance_score": 0.9 }
        ],
        "checked_at": "2024-03-05T14:30:00"
    })));

    assert_eq!(row.key, "fc1");
    assert_eq!(row.href, "/posts/65f1c2d3e4b5a6978899aabb");
    assert_eq!(row.post_label, "Poszt #65f1c2d3...");
    assert_eq!(row.verdict, Verdict::PartiallyTrue);
    assert_eq!(row.counts, "2 állítás • 1 hivatkozás");
    assert_eq!(row.confidence, "Bizonyosság: 62%");
    assert_eq!(row.checked_at, "2024. március 5. 14:30");
}

#[test]
fn row_key_falls_back_to_post_id_and_keeps_unknown_verdicts() {
    let row = factcheck_row(0, &result(json!({
        "post_id": "p1",
        "verdict": "misleading"
    })));
    assert_eq!(row.key, "p1");
    assert_eq!(row.verdict.label(), "misleading");
    assert_eq!(row.counts, "0 állítás • 0 hivatkozás");
}

#[test]
fn rows_missing_both_ids_fall_back_to_position() {
    let row = factcheck_row(4, &result(json!({ "post_id": "", "verdict": "false" })));
    assert_eq!(row.key, "#4");
}
