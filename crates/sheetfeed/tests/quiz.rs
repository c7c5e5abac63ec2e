use sheetfeed::quiz::{Choice, Element, RESULT_URL, parse_answers, result, result_url, tally};

#[test]
fn parses_letters_and_gaps() {
    let answers = parse_answers("a,B-c_ e").expect("valid");
    assert_eq!(
        answers,
        vec![Some(Choice::A), Some(Choice::B), None, Some(Choice::C), None, None, Some(Choice::E)]
    );
    assert!(parse_answers("abz").is_err());
}

#[test]
fn majority_element_wins() {
    let answers = parse_answers("DDDAABCEED").expect("valid");
    assert_eq!(tally(&answers), [2, 1, 1, 4, 2]);
    assert_eq!(result(&answers), Element::Metal);
}

#[test]
fn ties_go_to_the_earlier_letter() {
    let answers = parse_answers("EEBB").expect("valid");
    assert_eq!(result(&answers), Element::Fire);
    assert_eq!(result(&[None; 10]), Element::Wood);
}

#[test]
fn result_url_carries_the_type() {
    let answers = parse_answers("cccccaaaab").expect("valid");
    assert_eq!(
        result_url(RESULT_URL, &answers).expect("url"),
        "https://ggeggsong.com/engineer-test1-result/?type=earth"
    );
    assert!(result_url("not a url", &answers).is_err());
}
