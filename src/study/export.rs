use crate::models::{Flashcard, Metadata, ProcessingResult};
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: Option<String>,
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportDocument {
    pub summary: String,
    pub quiz: Vec<ExportQuestion>,
    pub flashcards: Vec<Flashcard>,
    pub metadata: Option<Metadata>,
}

/// Turns a result into its downloadable form, resolving each quiz answer to
/// the literal option text.
pub fn export_document(result: &ProcessingResult) -> ExportDocument {
    ExportDocument {
        summary: result.summary.clone(),
        quiz: result
            .quiz
            .iter()
            .map(|q| ExportQuestion {
                question: q.question.clone(),
                options: q.options.clone(),
                correct_answer: q.correct_option().map(str::to_string),
                explanation: q.explanation.clone(),
            })
            .collect(),
        flashcards: result.flashcards.clone(),
        metadata: result.metadata.clone(),
    }
}

pub fn export_file_name(timestamp_millis: i64) -> String {
    format!("studybridge-results-{}.json", timestamp_millis)
}

/// Writes the document as pretty-printed JSON into `dir`.
pub fn write_export(dir: &Path, document: &ExportDocument) -> io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(chrono::Utc::now().timestamp_millis()));
    let json = serde_json::to_string_pretty(document)?;
    std::fs::write(&path, json)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuizItem;

    #[test]
    fn test_correct_answer_is_resolved_to_text() {
        let result = ProcessingResult {
            summary: "S".into(),
            quiz: vec![QuizItem {
                question: "Q".into(),
                options: vec!["A".into(), "B".into()],
                correct_index: 1,
                explanation: Some("E".into()),
            }],
            flashcards: vec![],
            metadata: None,
        };

        let doc = export_document(&result);
        assert_eq!(doc.quiz[0].correct_answer.as_deref(), Some("B"));
        assert_eq!(doc.quiz[0].explanation.as_deref(), Some("E"));

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["quiz"][0]["correctAnswer"], "B");
        assert_eq!(json["summary"], "S");
    }

    #[test]
    fn test_write_export_creates_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let doc = export_document(&crate::models::sample_result());

        let path = write_export(&dir.path().join("exports"), &doc).unwrap();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("studybridge-results-"));
        assert!(name.ends_with(".json"));

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["flashcards"].as_array().unwrap().len(), 4);
        assert_eq!(written["metadata"]["level"], "high-school");
    }
}
