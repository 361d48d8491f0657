use chrono::NaiveDate;
use citegraph::types::*;

#[test]
fn page_parse_classifies_tokens() {
    assert_eq!(Page::parse("137"), Page::Number(137));
    assert_eq!(Page::parse(" 42 "), Page::Number(42));
    assert_eq!(Page::parse("22orig"), Page::Token("22orig".to_string()));
    assert_eq!(Page::parse("65a2"), Page::Token("65a2".to_string()));
    assert_eq!(Page::parse("orig"), Page::Token("orig".to_string()));
}

#[test]
fn page_sort_key_uses_digit_groups() {
    assert_eq!(Page::Number(137).sort_key(), vec![137]);
    assert_eq!(Page::Number(12345).sort_key(), vec![1234]);
    assert_eq!(Page::Token("22orig".to_string()).sort_key(), vec![22]);
    assert_eq!(Page::Token("65a2".to_string()).sort_key(), vec![65]);
    assert_eq!(Page::Token("7 orig 2".to_string()).sort_key(), vec![7, 2]);
    assert!(Page::Token("orig".to_string()).sort_key().is_empty());
}

#[test]
fn page_numeric_ordering_not_lexical() {
    let mut pages = vec![
        Page::Number(100),
        Page::Token("9orig".to_string()),
        Page::Number(20),
    ];
    pages.sort_by_key(Page::sort_key);
    assert_eq!(
        pages,
        vec![
            Page::Token("9orig".to_string()),
            Page::Number(20),
            Page::Number(100),
        ]
    );
}

#[test]
fn page_leading_number() {
    assert_eq!(Page::Number(50).leading_number(), Some(50));
    assert_eq!(Page::Token("22orig".to_string()).leading_number(), Some(22));
    assert_eq!(Page::Token("orig".to_string()).leading_number(), None);
}

#[test]
fn page_deserializes_from_number_or_string() {
    let n: Page = serde_json::from_str("50").unwrap();
    let s: Page = serde_json::from_str("\"50\"").unwrap();
    let t: Page = serde_json::from_str("\"22orig\"").unwrap();
    assert_eq!(n, Page::Number(50));
    assert_eq!(n, s);
    assert_eq!(t, Page::Token("22orig".to_string()));
    assert_eq!(serde_json::to_string(&t).unwrap(), "\"22orig\"");
    assert_eq!(serde_json::to_string(&n).unwrap(), "50");
}

#[test]
fn case_number_is_a_pair() {
    let number: CaseNumber = serde_json::from_str("[347, 483]").unwrap();
    assert_eq!(number, CaseNumber::new(347, 483));
    assert_eq!(serde_json::to_string(&number).unwrap(), "[347,483]");
    assert_eq!(number.to_string(), "347 U. S. 483");
}

#[test]
fn case_number_rejects_volume_zero() {
    assert!(serde_json::from_str::<CaseNumber>("[0, 5]").is_err());
    assert!(serde_json::from_str::<CaseNumber>("[1]").is_err());
}

#[test]
fn case_date_parses_known_formats() {
    let expected = NaiveDate::from_ymd_opt(1954, 5, 17).unwrap();
    assert_eq!(CaseDate::parse("May 17, 1954"), CaseDate::Parsed(expected));
    assert_eq!(CaseDate::parse(" 1954-05-17 "), CaseDate::Parsed(expected));
    assert_eq!(CaseDate::parse("Spring Term"), CaseDate::Raw("Spring Term".to_string()));
    assert_eq!(CaseDate::parse("Spring Term").as_naive(), None);
}

#[test]
fn case_date_serializes_iso() {
    let date = CaseDate::parse("May 17, 1954");
    assert_eq!(serde_json::to_string(&date).unwrap(), "\"1954-05-17\"");
}

#[test]
fn record_full_text_joins_segments() {
    let record: Record = serde_json::from_str(
        r#"{"name": "X", "url": "", "number": [1, 2], "txt": ["a", "b"], "vol": 1}"#,
    )
    .unwrap();
    assert_eq!(record.full_text(), "a b");
    assert!(record.date.is_none());
}

#[test]
fn candidate_as_number() {
    let c = CandidateCitation { volume: 1, page: 50 };
    assert_eq!(c.as_number(), CaseNumber::new(1, Page::Number(50)));
}

#[test]
fn resolution_helpers() {
    let exact = Resolution::Exact(CaseNumber::new(1, 1));
    let approx = Resolution::Approximate(CaseNumber::new(1, 1));
    assert_eq!(exact.target(), Some(&CaseNumber::new(1, 1)));
    assert!(!exact.is_modified());
    assert!(approx.is_modified());
    assert!(Resolution::Unresolved.target().is_none());
    assert_eq!(approx.as_str(), "approximate");
}
