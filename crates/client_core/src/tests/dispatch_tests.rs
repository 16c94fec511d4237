use super::*;
use crate::{
    test_support::{RecordingNotifier, RecordingRouter, RecordingViewport},
    ScrollBehavior, ScrollBlock,
};

fn search_fixture(
    viewport: RecordingViewport,
) -> (
    SearchDispatcher,
    SearchState,
    Arc<RecordingNotifier>,
    Arc<RecordingViewport>,
) {
    let state = SearchState::default();
    let notifier = Arc::new(RecordingNotifier::default());
    let viewport = Arc::new(viewport);
    let dispatcher = SearchDispatcher::new(state.clone(), notifier.clone(), viewport.clone());
    (dispatcher, state, notifier, viewport)
}

#[test]
fn search_replaces_state_announces_and_scrolls() {
    let (dispatcher, state, notifier, viewport) = search_fixture(RecordingViewport::rendered());

    dispatcher.search("boots");
    dispatcher.search("socks");

    assert_eq!(state.query(), "socks");
    assert!(state.is_active());
    let notices = notifier.notices();
    assert_eq!(notices.len(), 2);
    assert_eq!(notices[1], Notice::new("Searching", "Searching for: socks"));

    let scrolls = viewport.scrolls();
    assert_eq!(scrolls.len(), 2);
    let (section, options) = &scrolls[1];
    assert_eq!(section, PRODUCTS_SECTION);
    assert_eq!(options.behavior, ScrollBehavior::Smooth);
    assert_eq!(options.block, ScrollBlock::Start);
}

#[test]
fn empty_query_clears_search() {
    let (dispatcher, state, notifier, _viewport) = search_fixture(RecordingViewport::rendered());

    dispatcher.search("hats");
    dispatcher.search("");

    assert_eq!(state.query(), "");
    assert!(!state.is_active());
    assert_eq!(notifier.notices().len(), 2);
}

#[test]
fn repeated_queries_are_not_suppressed() {
    let (dispatcher, _state, notifier, viewport) = search_fixture(RecordingViewport::rendered());

    dispatcher.search("socks");
    dispatcher.search("socks");

    assert_eq!(notifier.notices().len(), 2);
    assert_eq!(viewport.scrolls().len(), 2);
}

#[test]
fn missing_results_section_does_not_fail_search() {
    let (dispatcher, state, notifier, viewport) = search_fixture(RecordingViewport::detached());

    dispatcher.search("scarf");

    assert_eq!(state.query(), "scarf");
    assert_eq!(notifier.notices().len(), 1);
    assert_eq!(viewport.scrolls().len(), 1);
}

#[test]
fn navigate_prefixes_root_separator() {
    let router = Arc::new(RecordingRouter::default());
    let dispatcher = NavigationDispatcher::new(router.clone());

    dispatcher.navigate("about");
    dispatcher.navigate("/about");

    assert_eq!(router.paths(), vec!["/about".to_string(), "//about".to_string()]);
}

#[test]
fn listening_flag_round_trips() {
    let flag = ListeningFlag::default();
    assert!(!flag.get());

    flag.set(true);
    assert!(flag.clone().get());
}
