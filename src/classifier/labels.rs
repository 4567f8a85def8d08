use std::fs;
use std::path::Path;

use log::info;

use super::error::ClassifierError;

/// An ordered, immutable table of class names.
///
/// Index position is the semantic class identifier: the name at index `i`
/// belongs to the model's output score `i`. The table is loaded once and
/// never mutated, so it can be shared freely across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelTable {
    labels: Vec<String>,
}

impl LabelTable {
    /// Creates a table from an already-ordered list of class names.
    pub fn new(labels: Vec<String>) -> Result<Self, ClassifierError> {
        if labels.is_empty() {
            return Err(ClassifierError::Configuration(
                "label table must contain at least one class name".to_string(),
            ));
        }
        Ok(Self { labels })
    }

    /// Parses a table from text, one class name per line, in file order.
    pub fn from_text(text: &str) -> Result<Self, ClassifierError> {
        let labels: Vec<String> = text.lines().map(|line| line.trim_end().to_string()).collect();
        Self::new(labels)
    }

    /// Reads a table from a plain-text label resource.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            ClassifierError::Configuration(format!(
                "failed to read label file {}: {}",
                path.display(),
                e
            ))
        })?;
        let table = Self::from_text(&text)?;
        info!("Loaded {} class labels from {}", table.len(), path.display());
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_one_name_per_line() {
        let table = LabelTable::from_text("background\ntench\ngoldfish\n").unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(0), Some("background"));
        assert_eq!(table.get(2), Some("goldfish"));
        assert_eq!(table.get(3), None);
    }

    #[test]
    fn test_trailing_newline_does_not_add_a_class() {
        let with = LabelTable::from_text("cat\ndog\n").unwrap();
        let without = LabelTable::from_text("cat\ndog").unwrap();
        assert_eq!(with, without);
    }

    #[test]
    fn test_windows_line_endings() {
        let table = LabelTable::from_text("cat\r\ndog\r\n").unwrap();
        assert_eq!(table.get(0), Some("cat"));
        assert_eq!(table.get(1), Some("dog"));
    }

    #[test]
    fn test_empty_text_is_rejected() {
        assert!(matches!(
            LabelTable::from_text(""),
            Err(ClassifierError::Configuration(_))
        ));
    }

    #[test]
    fn test_missing_file_is_rejected() {
        let result = LabelTable::from_file("/nonexistent/labels.txt");
        assert!(matches!(result, Err(ClassifierError::Configuration(_))));
    }
}
