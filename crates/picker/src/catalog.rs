//! Prompt templates grouped as category → subcategory → prompt.
//!
//! The catalog is loaded once per page load through a [`CatalogSource`] and
//! is read-only afterwards. Any load failure degrades to
//! [`PromptCatalog::builtin`].

use crate::error::CatalogError;
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Prompt {
    pub title: String,
    pub text: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Subcategory {
    pub name: String,
    #[serde(default)]
    pub prompts: Vec<Prompt>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub subcategories: Vec<Subcategory>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptCatalog {
    pub categories: Vec<Category>,
}

/// Accepted file shapes: the sync job's `{ "categories": [...] }` object, or
/// a bare array of categories.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Wrapped { categories: Vec<Category> },
    Bare(Vec<Category>),
}

/// Position of one prompt in the catalog. Rendered as `c/s/p` in the
/// overlay's `data-prompt` attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntryRef {
    pub category: usize,
    pub subcategory: usize,
    pub prompt: usize,
}

impl EntryRef {
    pub const fn new(category: usize, subcategory: usize, prompt: usize) -> Self {
        Self {
            category,
            subcategory,
            prompt,
        }
    }
}

impl fmt::Display for EntryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.category, self.subcategory, self.prompt)
    }
}

impl FromStr for EntryRef {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('/').map(|p| p.trim().parse::<usize>());
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(Ok(c)), Some(Ok(sc)), Some(Ok(p)), None) => Ok(EntryRef::new(c, sc, p)),
            _ => Err(()),
        }
    }
}

impl PromptCatalog {
    pub fn from_json_str(s: &str) -> Result<Self, CatalogError> {
        let categories = match serde_json::from_str::<CatalogFile>(s)? {
            CatalogFile::Wrapped { categories } | CatalogFile::Bare(categories) => categories,
        };
        let catalog = PromptCatalog { categories };
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.prompt_count() == 0 {
            return Err(CatalogError::Malformed("catalog has no prompts".into()));
        }
        for (ci, c) in self.categories.iter().enumerate() {
            if c.name.trim().is_empty() {
                return Err(CatalogError::Malformed(format!("category {ci} has no name")));
            }
            for (si, sub) in c.subcategories.iter().enumerate() {
                if sub.name.trim().is_empty() {
                    return Err(CatalogError::Malformed(format!(
                        "subcategory {ci}/{si} has no name"
                    )));
                }
                for (pi, p) in sub.prompts.iter().enumerate() {
                    if p.title.trim().is_empty() {
                        return Err(CatalogError::Malformed(format!(
                            "prompt {ci}/{si}/{pi} has no title"
                        )));
                    }
                    if p.text.trim().is_empty() {
                        return Err(CatalogError::Malformed(format!(
                            "prompt {ci}/{si}/{pi} ({}) has no text",
                            p.title
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    pub fn entry(&self, at: EntryRef) -> Option<&Prompt> {
        self.categories
            .get(at.category)?
            .subcategories
            .get(at.subcategory)?
            .prompts
            .get(at.prompt)
    }

    /// Every prompt with its position, in display order.
    pub fn entries(&self) -> impl Iterator<Item = (EntryRef, &Prompt)> {
        self.categories.iter().enumerate().flat_map(|(ci, c)| {
            c.subcategories.iter().enumerate().flat_map(move |(si, sub)| {
                sub.prompts
                    .iter()
                    .enumerate()
                    .map(move |(pi, p)| (EntryRef::new(ci, si, pi), p))
            })
        })
    }

    pub fn prompt_count(&self) -> usize {
        self.categories
            .iter()
            .flat_map(|c| &c.subcategories)
            .map(|s| s.prompts.len())
            .sum()
    }

    /// The catalog shipped with the picker, used whenever loading fails.
    pub fn builtin() -> Self {
        fn p(title: &str, text: &str) -> Prompt {
            Prompt {
                title: title.to_string(),
                text: text.to_string(),
            }
        }
        fn sub(name: &str, prompts: Vec<Prompt>) -> Subcategory {
            Subcategory {
                name: name.to_string(),
                prompts,
            }
        }
        fn cat(name: &str, subcategories: Vec<Subcategory>) -> Category {
            Category {
                name: name.to_string(),
                subcategories,
            }
        }

        PromptCatalog {
            categories: vec![
                cat(
                    "Writing",
                    vec![
                        sub(
                            "Editing",
                            vec![
                                p(
                                    "Proofread",
                                    "Proofread the following text. Fix grammar, spelling and punctuation, keep my voice, and list the changes you made:\n\n",
                                ),
                                p(
                                    "Make it concise",
                                    "Rewrite the following text to be about half as long without losing any key point:\n\n",
                                ),
                            ],
                        ),
                        sub(
                            "Email",
                            vec![p(
                                "Polite follow-up",
                                "Write a short, polite follow-up email about the topic below. Keep it under 120 words:\n\n",
                            )],
                        ),
                    ],
                ),
                cat(
                    "Code",
                    vec![
                        sub(
                            "Review",
                            vec![
                                p(
                                    "Code review",
                                    "Review the following code. Point out bugs, unclear naming and missing error handling, ordered by severity:\n\n",
                                ),
                                p(
                                    "Explain this code",
                                    "Explain what the following code does, step by step, for someone new to the codebase:\n\n",
                                ),
                            ],
                        ),
                        sub(
                            "Testing",
                            vec![p(
                                "Write unit tests",
                                "Write unit tests for the following code. Cover edge cases and failure paths:\n\n",
                            )],
                        ),
                    ],
                ),
                cat(
                    "Learning",
                    vec![sub(
                        "Explain",
                        vec![p(
                            "Explain like I'm new",
                            "Explain the following concept in simple terms, with one everyday analogy and one concrete example:\n\n",
                        )],
                    )],
                ),
            ],
        }
    }
}

/// The data collaborator that supplies the catalog.
pub trait CatalogSource {
    fn describe(&self) -> String;
    fn load(&self) -> Result<PromptCatalog, CatalogError>;
}

/// A JSON file produced by the spreadsheet sync job.
#[derive(Clone, Debug)]
pub struct JsonFileSource {
    pub path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for JsonFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<PromptCatalog, CatalogError> {
        let text = std::fs::read_to_string(&self.path)?;
        PromptCatalog::from_json_str(&text)
    }
}

/// In-memory JSON, e.g. bundled with the extension or captured from a fetch.
#[derive(Clone, Debug)]
pub struct StaticSource {
    pub json: String,
}

impl StaticSource {
    pub fn new(json: impl Into<String>) -> Self {
        Self { json: json.into() }
    }
}

impl CatalogSource for StaticSource {
    fn describe(&self) -> String {
        format!("static ({} bytes)", self.json.len())
    }

    fn load(&self) -> Result<PromptCatalog, CatalogError> {
        PromptCatalog::from_json_str(&self.json)
    }
}

/// Load from `source`, substituting the built-in catalog on any failure.
pub fn load_or_default(source: &dyn CatalogSource) -> PromptCatalog {
    match source.load() {
        Ok(catalog) => {
            log::debug!(
                target: "picker.catalog",
                "loaded {} prompts in {} categories from {}",
                catalog.prompt_count(),
                catalog.categories.len(),
                source.describe()
            );
            catalog
        }
        Err(e) => {
            log::warn!(
                target: "picker.catalog",
                "catalog from {} unavailable, using defaults: {e}",
                source.describe()
            );
            PromptCatalog::builtin()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SYNCED: &str = r#"{
        "categories": [
            { "name": "Marketing", "subcategories": [
                { "name": "Social", "prompts": [
                    { "title": "Tweet", "text": "Write a tweet about:" },
                    { "title": "Thread", "text": "Write a thread about:" }
                ] }
            ] },
            { "name": "Support", "subcategories": [
                { "name": "Replies", "prompts": [ { "title": "Apology", "text": "Draft an apology for:" } ] }
            ] }
        ]
    }"#;

    #[test]
    fn parses_synced_shape_and_resolves_entries() {
        let c = PromptCatalog::from_json_str(SYNCED).expect("catalog");
        assert_eq!(c.prompt_count(), 3);
        assert_eq!(c.entry(EntryRef::new(0, 0, 1)).map(|p| p.title.as_str()), Some("Thread"));
        assert_eq!(c.entry(EntryRef::new(1, 0, 0)).map(|p| p.title.as_str()), Some("Apology"));
        assert_eq!(c.entry(EntryRef::new(1, 1, 0)), None);
        let refs: Vec<String> = c.entries().map(|(r, _)| r.to_string()).collect();
        assert_eq!(refs, vec!["0/0/0", "0/0/1", "1/0/0"]);
    }

    #[test]
    fn accepts_a_bare_category_array() {
        let c = PromptCatalog::from_json_str(
            r#"[{ "name": "A", "subcategories": [{ "name": "B", "prompts": [{ "title": "T", "text": "x" }] }] }]"#,
        )
        .expect("catalog");
        assert_eq!(c.categories[0].name, "A");
    }

    #[test]
    fn rejects_malformed_shapes() {
        for bad in [
            "not json",
            r#"{"categories": 3}"#,
            r#"{"categories": []}"#,
            r#"[{ "name": " ", "subcategories": [{ "name": "B", "prompts": [{ "title": "T", "text": "x" }] }] }]"#,
            r#"[{ "name": "A", "subcategories": [{ "name": "B", "prompts": [{ "title": "T", "text": "  " }] }] }]"#,
            r#"[{ "name": "A", "subcategories": [{ "name": "B", "prompts": [] }] }]"#,
        ] {
            assert!(PromptCatalog::from_json_str(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn load_failure_falls_back_to_builtin() {
        let missing = JsonFileSource::new("/no/such/catalog.json");
        assert!(matches!(missing.load(), Err(CatalogError::Io(_))));
        assert_eq!(load_or_default(&missing), PromptCatalog::builtin());

        let broken = StaticSource::new("{");
        assert!(matches!(broken.load(), Err(CatalogError::Parse(_))));
        assert_eq!(load_or_default(&broken), PromptCatalog::builtin());

        let good = StaticSource::new(SYNCED);
        assert_eq!(load_or_default(&good).categories.len(), 2);
    }

    #[test]
    fn builtin_catalog_is_valid() {
        let c = PromptCatalog::builtin();
        assert!(c.categories.len() >= 2);
        assert!(c.validate().is_ok());
        assert!(c.categories.iter().all(|cat| !cat.subcategories.is_empty()));
    }

    #[test]
    fn entry_refs_parse_from_attributes() {
        assert_eq!("2/0/11".parse::<EntryRef>(), Ok(EntryRef::new(2, 0, 11)));
        for bad in ["", "1/2", "1/2/3/4", "a/b/c", "-1/0/0"] {
            assert!(bad.parse::<EntryRef>().is_err(), "{bad:?}");
        }
    }
}
