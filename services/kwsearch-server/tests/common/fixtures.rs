// Index fixtures for integration testing

use kwsearch::core::storage::Snapshot;
use kwsearch::core::types::{DocumentId, Keyword, Occurrence, Webpage};
use std::collections::HashMap;

/// Builds snapshots keyword by keyword
#[derive(Default)]
pub struct IndexBuilder {
    snapshot: Snapshot,
    keyword_ids: HashMap<String, i64>,
}

#[allow(dead_code)] // Not every test binary uses every fixture
impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page with generated title/url and the given content
    pub fn page(mut self, id: DocumentId, content: &str) -> Self {
        self.snapshot.webpages.push(Webpage {
            webpage_id: id,
            url: format!("https://example.org/page/{id}"),
            title: format!("Page {id}"),
            content: content.to_string(),
        });
        self
    }

    /// Add a page with explicit title and url
    pub fn titled_page(mut self, id: DocumentId, title: &str, url: &str, content: &str) -> Self {
        self.snapshot.webpages.push(Webpage {
            webpage_id: id,
            url: url.to_string(),
            title: title.to_string(),
            content: content.to_string(),
        });
        self
    }

    /// Associate `keyword` with page `id`, creating the keyword if needed
    pub fn link(mut self, keyword: &str, id: DocumentId, pagerank: f64) -> Self {
        let keyword_id = match self.keyword_ids.get(keyword) {
            Some(&existing) => existing,
            None => {
                let next_id = self.keyword_ids.len() as i64 + 1;
                self.keyword_ids.insert(keyword.to_string(), next_id);
                self.snapshot.keywords.push(Keyword {
                    keyword_id: next_id,
                    name: keyword.to_string(),
                });
                next_id
            }
        };

        self.snapshot.occurrences.push(Occurrence {
            webpage_id: id,
            keyword_id,
            counter: 1,
            pagerank,
        });
        self
    }

    pub fn build(self) -> Snapshot {
        self.snapshot
            .validate()
            .expect("Fixture snapshot must be valid");
        self.snapshot
    }

    /// cat -> {1,2,3}, dog -> {2,3,4}, fish -> {3}
    ///
    /// "cat dog" yields page 3 (0.7) then page 2 (0.3).
    pub fn cat_dog() -> Snapshot {
        Self::new()
            .page(1, "a page about cats")
            .page(2, "cats and dogs")
            .page(3, "cats, dogs and fish")
            .page(4, "only dogs here")
            .link("cat", 1, 0.9)
            .link("cat", 2, 0.2)
            .link("cat", 3, 0.6)
            .link("dog", 2, 0.4)
            .link("dog", 3, 0.8)
            .link("dog", 4, 0.1)
            .link("fish", 3, 5.0)
            .build()
    }

    /// A single page whose content is `chars` characters long
    pub fn long_content(chars: usize) -> Snapshot {
        let content: String = "abcdefghij".chars().cycle().take(chars).collect();
        Self::new().page(1, &content).link("long", 1, 1.0).build()
    }

    /// `n` pages all associated with "common", with distinct pageranks
    pub fn many_matches(n: i64) -> Snapshot {
        let mut builder = Self::new();
        for id in 1..=n {
            builder = builder
                .page(id, "common")
                .link("common", id, id as f64 / n as f64);
        }
        builder.build()
    }
}
