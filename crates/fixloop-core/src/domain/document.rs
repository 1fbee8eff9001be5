//! Project and document snapshots.
//!
//! Documents are never mutated in place: every fix application goes through
//! [`Project::with_document_text`], which returns a brand-new snapshot while
//! the old one stays valid for before/after comparison.

use serde::{Deserialize, Serialize};

use crate::domain::error::{CoreError, Result};
use crate::options::RuleOptions;

/// Default name of the project built by [`Project::from_sources`].
pub const TEST_PROJECT_NAME: &str = "TestProject";

/// Naming convention for documents built by [`Project::from_sources`]:
/// `Test0.cs`, `Test1.cs`, ...
pub const DEFAULT_FILE_PREFIX: &str = "Test";
pub const DEFAULT_FILE_EXT: &str = ".cs";

/// An immutable in-memory source file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    /// Stable key of the document within its project (path or file name).
    pub name: String,

    /// Full source text.
    pub text: String,
}

impl Document {
    /// Create a document.
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Iterate over the lines of the document, terminators excluded.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }
}

/// An ordered, named collection of documents sharing analysis configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Project {
    /// Project name, used in traces and failure reports.
    pub name: String,

    /// Documents in insertion order.
    pub documents: Vec<Document>,

    /// Rule options shared by every document in the project.
    pub options: RuleOptions,
}

impl Project {
    /// Create an empty project.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            documents: Vec::new(),
            options: RuleOptions::new(),
        }
    }

    /// Build a project from raw sources using the `Test0.cs`, `Test1.cs`, ...
    /// naming convention.
    pub fn from_sources<S: AsRef<str>>(sources: &[S]) -> Self {
        let mut project = Self::new(TEST_PROJECT_NAME);
        for (index, source) in sources.iter().enumerate() {
            project.documents.push(Document::new(
                format!("{DEFAULT_FILE_PREFIX}{index}{DEFAULT_FILE_EXT}"),
                source.as_ref(),
            ));
        }
        project
    }

    /// Add a document.
    pub fn with_document(mut self, document: Document) -> Self {
        self.documents.push(document);
        self
    }

    /// Replace the rule options.
    pub fn with_options(mut self, options: RuleOptions) -> Self {
        self.options = options;
        self
    }

    /// Look up a document by name.
    pub fn document(&self, name: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.name == name)
    }

    /// The first document, which fix verification treats as the document
    /// under test.
    pub fn primary_document(&self) -> Option<&Document> {
        self.documents.first()
    }

    /// Return a new snapshot with the named document's text replaced.
    ///
    /// The receiver is left untouched. Replacing a document that does not
    /// exist is a caller bug and surfaces as [`CoreError::ProjectInvalid`].
    pub fn with_document_text(&self, name: &str, text: impl Into<String>) -> Result<Self> {
        let mut next = self.clone();
        let document = next
            .documents
            .iter_mut()
            .find(|d| d.name == name)
            .ok_or_else(|| CoreError::ProjectInvalid(format!("no document named {name}")))?;
        document.text = text.into();
        Ok(next)
    }

    /// Check that the project can produce an analyzable representation.
    ///
    /// Document names must be non-empty and unique within the project.
    pub fn validate(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for document in &self.documents {
            if document.name.is_empty() {
                return Err(CoreError::ProjectInvalid(
                    "document with empty name".to_string(),
                ));
            }
            if !seen.insert(document.name.as_str()) {
                return Err(CoreError::ProjectInvalid(format!(
                    "duplicate document name: {}",
                    document.name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_sources_naming_convention() {
        let project = Project::from_sources(&["fn a() {}", "fn b() {}"]);
        assert_eq!(project.name, "TestProject");
        assert_eq!(project.documents[0].name, "Test0.cs");
        assert_eq!(project.documents[1].name, "Test1.cs");
    }

    #[test]
    fn test_with_document_text_is_copy_on_fix() {
        let before = Project::from_sources(&["old text"]);
        let after = before
            .with_document_text("Test0.cs", "new text")
            .expect("document exists");

        assert_eq!(before.documents[0].text, "old text");
        assert_eq!(after.documents[0].text, "new text");
    }

    #[test]
    fn test_with_document_text_unknown_name_fails() {
        let project = Project::from_sources(&["text"]);
        let err = project.with_document_text("Missing.cs", "x").unwrap_err();
        assert!(err.to_string().contains("Missing.cs"));
    }

    #[test]
    fn test_validate_rejects_duplicate_names() {
        let project = Project::new("p")
            .with_document(Document::new("Test0.cs", "a"))
            .with_document(Document::new("Test0.cs", "b"));
        assert!(project.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let project = Project::new("p").with_document(Document::new("", "a"));
        assert!(project.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_well_formed_project() {
        let project = Project::from_sources(&["a", "b", "c"]);
        assert!(project.validate().is_ok());
    }
}
