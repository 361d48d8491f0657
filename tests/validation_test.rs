use citegraph::types::*;
use citegraph::validation::*;

fn record(volume: u32, page: u32, name: &str, text: &str) -> Record {
    Record {
        name: name.to_string(),
        url: String::new(),
        number: CaseNumber::new(volume, page),
        text: vec![text.to_string()],
        vol: volume,
        date: None,
    }
}

fn corpus() -> Vec<Record> {
    vec![
        record(1, 1, "Marbury v. Madison", "..."),
        record(1, 50, "Case B", "..."),
    ]
}

#[test]
fn test_name_found_case_insensitively() {
    let records = corpus();
    let validator = NameValidator::new(&records);
    let citing = CitingText::new("As held in MARBURY V. MADISON, 1 U. S. 1, ...");
    assert_eq!(
        validator.validate(&CaseNumber::new(1, 1), &citing),
        Validation::Corroborated
    );
}

#[test]
fn test_name_absent_is_uncorroborated() {
    let records = corpus();
    let validator = NameValidator::new(&records);
    let citing = CitingText::new("see 1 U. S. 50");
    assert_eq!(
        validator.validate(&CaseNumber::new(1, 50), &citing),
        Validation::Uncorroborated
    );
}

#[test]
fn test_unknown_number_is_dangling() {
    let records = corpus();
    let validator = NameValidator::new(&records);
    let citing = CitingText::new("Case B");
    assert_eq!(
        validator.validate(&CaseNumber::new(2, 50), &citing),
        Validation::Dangling
    );
    assert!(validator.name_of(&CaseNumber::new(2, 50)).is_none());
}

#[test]
fn test_first_record_names_a_shared_number() {
    let records = vec![
        record(3, 7, "First Name", ""),
        record(3, 7, "Second Name", ""),
    ];
    let validator = NameValidator::new(&records);
    assert_eq!(validator.name_of(&CaseNumber::new(3, 7)), Some("First Name"));
}

#[test]
fn test_citing_text_joins_segments() {
    let mut r = record(2, 1, "Citing", "opinion mentions Case");
    r.text.push("B in the dissent".to_string());
    let citing = CitingText::from_record(&r);
    assert!(citing.mentions("case b"));
    assert!(!citing.mentions("case c"));
}

#[test]
fn test_validation_is_deterministic() {
    let records = corpus();
    let validator = NameValidator::new(&records);
    let citing = CitingText::new("Case B was decided");
    let target = CaseNumber::new(1, 50);
    let first = validator.validate(&target, &citing);
    for _ in 0..5 {
        assert_eq!(validator.validate(&target, &citing), first);
    }
    assert_eq!(first.as_str(), "corroborated");
}
