use sheetfeed::parse;
use sheetfeed::vocab::{LinkLabel, README_GID, categories, entries, sheet_csv_url};

#[test]
fn readme_rows_need_all_three_cells() {
    let table = parse("food,123,食物\ntravel,456,旅行\n,5,x\nbad,,\n");
    let cats = categories(&table);
    assert_eq!(cats.len(), 2);
    assert_eq!(cats[0].tag, "food");
    assert_eq!(cats[1].gid, "456");
    assert_eq!(cats[1].label, "旅行");
}

#[test]
fn export_url_for_a_tab() {
    assert_eq!(
        sheet_csv_url("ABC", README_GID),
        "https://docs.google.com/spreadsheets/d/e/ABC/pub?gid=0&single=true&output=csv"
    );
}

#[test]
fn entries_resolve_loose_headers() {
    let table = parse(
        "中文,English (EN),Kana,日文,Korean (KO),Thai (TH),YT,Link ZH EN JA\n\
         蘋果,apple,りんご,林檎,사과,แอปเปิล,https://youtu.be/a,https://x/pdf\n\
         香蕉,banana,,,,,,\n",
    );
    let list = entries(&table);
    assert_eq!(list.len(), 2);

    let apple = &list[0];
    assert_eq!(apple.zh, "蘋果");
    assert_eq!(apple.en, "apple");
    assert_eq!(apple.jp_kana, "りんご");
    assert_eq!(apple.jp_kanji, "林檎");
    assert_eq!(apple.kr, "사과");
    assert_eq!(apple.th, "แอปเปิล");
    let labels: Vec<_> = apple.links.iter().map(|l| l.label).collect();
    assert_eq!(labels, [LinkLabel::Video, LinkLabel::ZhEnJa]);
    assert!(apple.has_video());
    assert_eq!(apple.link_summary(), "🎧");

    let banana = &list[1];
    assert_eq!(banana.en, "banana");
    assert!(banana.links.is_empty());
    assert_eq!(banana.link_summary(), "");
}

#[test]
fn kanji_falls_back_to_generic_japanese_column() {
    let list = entries(&parse("中文,word_jp,PDF ZH\n蘋果,林檎,https://x/zh.pdf\n"));
    assert_eq!(list[0].jp_kanji, "林檎");
    assert_eq!(list[0].jp_kana, "");
    assert_eq!(list[0].links[0].label, LinkLabel::Zh);
    assert_eq!(list[0].link_summary(), "連結");
}

#[test]
fn link_labels_from_headers() {
    assert_eq!(LinkLabel::from_header("YouTube"), LinkLabel::Video);
    assert_eq!(LinkLabel::from_header("PDF ZH・KO・TH"), LinkLabel::ZhKoTh);
    assert_eq!(LinkLabel::from_header("Korean PDF"), LinkLabel::Ko);
    assert_eq!(LinkLabel::from_header("download"), LinkLabel::Link);
    assert_eq!(LinkLabel::Video.display(), "🎧 影片");
}

#[test]
fn repeated_headers_take_the_last_column() {
    let list = entries(&parse("中文,English,中文\nold,apple,new\n"));
    assert_eq!(list[0].zh, "new");
    assert_eq!(list[0].en, "apple");
}

#[test]
fn repeated_link_headers_give_one_link() {
    let list = entries(&parse("中文,YouTube, YouTube \n蘋果,https://a,https://b\n"));
    assert_eq!(list[0].links.len(), 1);
    assert_eq!(list[0].links[0].url, "https://b");
    assert_eq!(list[0].links[0].label, LinkLabel::Video);
}
