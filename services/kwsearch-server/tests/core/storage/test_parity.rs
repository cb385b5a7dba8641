// Both backends must answer every query identically

use crate::common::{memory_services, sqlite_services, IndexBuilder};
use kwsearch::core::types::SearchHit;

const QUERIES: &[&str] = &[
    "cat",
    "dog",
    "cat dog",
    "dog cat",
    "cat dog fish",
    "fish",
    "unicorn",
    "cat unicorn",
    "",
    "CAT, DOG!",
];

#[test]
fn test_backends_agree() {
    let snapshot = IndexBuilder::cat_dog();
    let (sqlite, _temp) = sqlite_services(&snapshot);
    let memory = memory_services(snapshot);

    for query in QUERIES {
        let a = sqlite.search.search(query).unwrap();
        let b = memory.search.search(query).unwrap();

        assert_eq!(a.terms, b.terms);
        assert_eq!(
            std::mem::discriminant(&a.outcome),
            std::mem::discriminant(&b.outcome),
            "Backends disagree on {query:?}"
        );

        // SQLite's AVG may round differently from a plain sum
        let (a, b) = (a.outcome.hits(), b.outcome.hits());
        assert_eq!(a.len(), b.len(), "Backends disagree on {query:?}");
        for (x, y) in a.iter().zip(b) {
            assert_eq!(x.document_id, y.document_id, "Order differs for {query:?}");
            assert_eq!(x.title, y.title);
            assert_eq!(x.excerpt, y.excerpt);
            assert!((x.score - y.score).abs() < 1e-9);
        }
    }
}

#[test]
fn test_backends_agree_on_stats() {
    let snapshot = IndexBuilder::many_matches(20);
    let (sqlite, _temp) = sqlite_services(&snapshot);
    let memory = memory_services(snapshot);

    assert_eq!(sqlite.search.stats().unwrap(), memory.search.stats().unwrap());
}

#[test]
fn test_hit_fields_come_from_webpage() {
    let snapshot = IndexBuilder::new()
        .titled_page(7, "Rust & You", "https://rust.example/?a=1", "ownership")
        .link("rust", 7, 0.42)
        .build();
    let (sqlite, _temp) = sqlite_services(&snapshot);

    let response = sqlite.search.search("rust").unwrap();
    assert_eq!(
        response.outcome.hits(),
        &[SearchHit {
            document_id: 7,
            title: "Rust & You".to_string(),
            url: "https://rust.example/?a=1".to_string(),
            excerpt: "ownership".to_string(),
            score: 0.42,
        }]
    );
}
