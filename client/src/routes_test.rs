use super::*;

#[test]
fn root_redirects_to_dashboard() {
    assert_eq!(resolve("/"), Resolved::Redirect("/dashboard"));
    assert_eq!(resolve(""), Resolved::Redirect("/dashboard"));
}

#[test]
fn known_paths_resolve_with_or_without_trailing_slash() {
    assert_eq!(resolve("/sources"), Resolved::Page(AppRoute::Sources));
    assert_eq!(resolve("/sources/"), Resolved::Page(AppRoute::Sources));
    assert_eq!(resolve("/settings?tab=keys"), Resolved::Page(AppRoute::Settings));
}

#[test]
fn post_detail_captures_id() {
    assert_eq!(
        resolve("/posts/65f0c1a2b3"),
        Resolved::Page(AppRoute::PostDetail("65f0c1a2b3".to_owned()))
    );
}

#[test]
fn unknown_paths_are_not_found() {
    assert_eq!(resolve("/admin"), Resolved::NotFound);
    assert_eq!(resolve("/posts/1/edit"), Resolved::NotFound);
}

#[test]
fn every_nav_entry_resolves_to_itself() {
    for route in NAV {
        assert_eq!(resolve(&route.href()), Resolved::Page(route.clone()));
    }
}

#[test]
fn post_detail_highlights_posts_entry() {
    let detail = resolve("/posts/abc");
    assert!(detail.highlights(&AppRoute::Posts));
    assert!(!detail.highlights(&AppRoute::Dashboard));
    assert!(!resolve("/nope").highlights(&AppRoute::Posts));
}

#[test]
fn titles_are_hungarian() {
    assert_eq!(AppRoute::FactChecks.title(), "Tényellenőrzések");
    assert_eq!(resolve("/statistics").title(), "Statisztikák · FactDesk");
    assert_eq!(AppRoute::PostDetail("x".into()).href(), "/posts/x");
}

#[test]
fn post_detail_ids_are_encoded_in_links_and_decoded_on_resolve() {
    let route = AppRoute::PostDetail("a/b?c".to_owned());
    let href = route.href();
    assert_eq!(href, "/posts/a%2Fb%3Fc");
    assert_eq!(resolve(&href), Resolved::Page(route));
}
