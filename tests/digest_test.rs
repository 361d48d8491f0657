use citegraph::digest::*;
use citegraph::types::{CaseNumber, CitedRecord};

#[test]
fn test_content_hash_deterministic() {
    let hash1 = content_hash("[]");
    let hash2 = content_hash("[]");
    assert_eq!(hash1, hash2);
    assert_eq!(hash1.len(), 64);
}

#[test]
fn test_content_hash_different() {
    assert_ne!(content_hash("[1, 50]"), content_hash("[1, 51]"));
}

#[test]
fn test_artifact_digest_tracks_citations() {
    let mut records = vec![CitedRecord {
        name: "Case C".to_string(),
        url: String::new(),
        text: None,
        number: CaseNumber::new(2, 1),
        citations: vec![CaseNumber::new(1, 50)],
        vol: 2,
        date: None,
    }];
    let before = artifact_digest(&records).unwrap();
    records[0].citations.clear();
    assert_ne!(before, artifact_digest(&records).unwrap());
}
