use super::*;

#[test]
fn prefix_matches_whole_segments() {
    let recent = QueryKey::new(["posts", "recent"]);
    assert!(recent.starts_with(&QueryKey::from("posts")));
    assert!(recent.starts_with(&recent));
    assert!(!recent.starts_with(&QueryKey::from("post")));
    assert!(!QueryKey::from("posts").starts_with(&recent));
}

#[test]
fn macro_stringifies_segments() {
    let id = String::from("abc");
    assert_eq!(crate::query_key!("post", id), QueryKey::new(["post", "abc"]));
    assert_eq!(crate::query_key!("ksh", 3).segments(), ["ksh", "3"]);
}

#[test]
fn with_appends_segment() {
    assert_eq!(QueryKey::from("factcheck").with("p1"), QueryKey::new(["factcheck", "p1"]));
}

#[test]
fn display_lists_segments() {
    assert_eq!(QueryKey::new(["posts", "recent"]).to_string(), "[posts, recent]");
}
