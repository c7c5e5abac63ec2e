use std::cmp::Ordering;
use std::time::{Duration, Instant};

use sheetfeed::charge::{
    ChargeApi, Debounce, RequestTracker, SortDir, SortKey, SortState, ViewMode, ViewState, Word,
    natural_cmp, parse_init, parse_page,
};

fn word(en: &str) -> Word {
    Word {
        en: en.to_string(),
        ..Word::default()
    }
}

fn english(rows: &[Word]) -> Vec<&str> {
    rows.iter().map(|w| w.en.as_str()).collect()
}

#[test]
fn request_urls_carry_the_version() {
    let api = ChargeApi::new("https://example.org/wp-json/").expect("api");
    assert_eq!(
        api.letters_url(),
        "https://example.org/wp-json/voca/v1/charge?letters=1&v=2026-01-02.01"
    );
    assert_eq!(
        api.letter_url("B"),
        "https://example.org/wp-json/voca/v1/charge?letter=B&v=2026-01-02.01"
    );
    assert_eq!(
        api.search_url("a b&c"),
        "https://example.org/wp-json/voca/v1/charge?q=a+b%26c&v=2026-01-02.01"
    );
    let api = api.with_version("test");
    assert_eq!(api.init_url(), "https://example.org/wp-json/voca/v1/charge?init=1&v=test");
    assert_eq!(api.meta_url(), "https://example.org/wp-json/voca/v1/charge?meta=1&v=test");
    assert!(ChargeApi::new("not a url").is_err());
}

#[test]
fn init_response_picks_a_first_letter() {
    let init = parse_init(
        r#"{"ok":true,"meta":{"total":120},"letters":["b","c"],
            "firstData":{"data":[{"en":"bee","zh":"蜜蜂"}],"count":1}}"#,
    )
    .expect("init");
    assert!(init.ok);
    assert_eq!(init.meta.total, 120);
    assert_eq!(init.first_letter(), "B");
    assert_eq!(init.first_data.count(), 1);
    assert_eq!(init.first_data.data[0].img, "");

    let explicit = parse_init(r#"{"letters":["b"],"firstLetter":"c"}"#).expect("init");
    assert_eq!(explicit.first_letter(), "C");
    let bare = parse_init("{}").expect("init");
    assert_eq!(bare.first_letter(), "A");
}

#[test]
fn page_count_falls_back_to_rows() {
    let page = parse_page(r#"{"data":[{"en":"a"},{"en":"b"}]}"#).expect("page");
    assert_eq!(page.count(), 2);
    let page = parse_page(r#"{"data":[],"count":40}"#).expect("page");
    assert_eq!(page.count(), 40);
    assert!(parse_page("not json").is_err());
}

#[test]
fn loose_cell_values_still_load() {
    let page = parse_page(
        r#"{"data":[{"en":"apple","zh":"蘋果","img":null,"note":""},{"en":42,"zh":true,"note":3}],"count":2}"#,
    )
    .expect("page");
    assert_eq!(page.data[0].img, "");
    assert_eq!(page.data[1].en, "42");
    assert_eq!(page.data[1].zh, "true");
    assert_eq!(page.data[1].note, "3");
    assert_eq!(page.data[1].img, "");
}

#[test]
fn null_collections_are_empty() {
    let page = parse_page(r#"{"data":null}"#).expect("page");
    assert!(page.data.is_empty());
    assert_eq!(page.count(), 0);

    let init = parse_init(r#"{"ok":true,"meta":null,"letters":null,"firstData":null}"#)
        .expect("init");
    assert_eq!(init.meta.total, 0);
    assert_eq!(init.first_letter(), "A");
    assert!(init.first_data.data.is_empty());
}

#[test]
fn natural_order() {
    assert_eq!(natural_cmp("item2", "item10"), Ordering::Less);
    assert_eq!(natural_cmp("Apple", "apple"), Ordering::Equal);
    assert_eq!(natural_cmp("a", "B"), Ordering::Less);
    assert_eq!(natural_cmp("x02", "x1"), Ordering::Greater);
    assert_eq!(natural_cmp("007", "7"), Ordering::Equal);
    assert_eq!(natural_cmp("ab", "abc"), Ordering::Less);
}

#[test]
fn sort_toggles_direction_per_column() {
    let mut sort = SortState::default();
    assert_eq!(sort.key, Some(SortKey::En));
    assert_eq!(sort.mark(SortKey::En), " ▲");
    sort.toggle(SortKey::En);
    assert_eq!(sort.dir, SortDir::Desc);
    assert_eq!(sort.mark(SortKey::En), " ▼");
    sort.toggle(SortKey::Zh);
    assert_eq!(sort.dir, SortDir::Asc);
    assert_eq!(sort.mark(SortKey::En), "");
    assert_eq!(SortKey::from_key("note"), Some(SortKey::Note));
}

#[test]
fn sorted_rows_use_natural_order() {
    let rows = vec![word("b10"), word("B2"), word("a")];
    let mut sort = SortState::default();
    assert_eq!(english(&sort.sorted(&rows)), ["a", "B2", "b10"]);
    sort.toggle(SortKey::En);
    assert_eq!(english(&sort.sorted(&rows)), ["b10", "B2", "a"]);
    let unsorted = SortState {
        key: None,
        dir: SortDir::Asc,
    };
    assert_eq!(english(&unsorted.sorted(&rows)), ["b10", "B2", "a"]);
}

#[test]
fn clearing_search_returns_to_last_letter() {
    let mut view = ViewState::default();
    assert!(!view.clear_search());

    view.show_letter("A", vec![word("apple"), word("ant")]);
    view.sort.toggle(SortKey::Zh);
    view.show_search(vec![word("cat")]);
    assert_eq!(view.mode, ViewMode::Search);
    assert_eq!(view.sort, SortState::default());

    assert!(view.clear_search());
    assert_eq!(view.mode, ViewMode::Letter);
    assert_eq!(english(&view.visible()), ["ant", "apple"]);
}

#[test]
fn debounce_waits_for_quiet() {
    let t0 = Instant::now();
    let ms = Duration::from_millis;
    let mut d = Debounce::default();
    assert!(d.input("  cat ", t0));
    assert_eq!(d.poll(t0 + ms(299)), None);
    assert!(d.input("dog", t0 + ms(100)));
    assert_eq!(d.poll(t0 + ms(350)), None);
    assert_eq!(d.poll(t0 + ms(400)).as_deref(), Some("dog"));
    assert_eq!(d.poll(t0 + ms(1000)), None);

    assert!(d.input("x", t0));
    assert!(!d.input("   ", t0));
    assert_eq!(d.poll(t0 + ms(1000)), None);

    d.input("y", t0);
    d.cancel();
    assert_eq!(d.poll(t0 + ms(1000)), None);
}

#[test]
fn only_the_latest_request_is_current() {
    let mut tracker = RequestTracker::default();
    let first = tracker.issue();
    let second = tracker.issue();
    assert!(!tracker.is_current(first));
    assert!(tracker.is_current(second));
}
