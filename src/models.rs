use serde::{Deserialize, Serialize};
use std::fmt;

/// One multiple-choice question produced by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizItem {
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl QuizItem {
    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct_index).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
}

/// Descriptive information attached to a result. Only `is_demo`, `level` and
/// `original_text` affect behaviour.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_service: Option<String>,
    #[serde(default)]
    pub is_demo: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
}

/// Summary, quiz and flashcards for one submission. Never mutated once a view
/// receives it; views share it behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessingResult {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub quiz: Vec<QuizItem>,
    #[serde(default)]
    pub flashcards: Vec<Flashcard>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl ProcessingResult {
    /// Checks the quiz invariants the state machines rely on.
    pub fn validate(&self) -> Result<(), String> {
        validate_quiz(&self.quiz)
    }

    pub fn is_demo(&self) -> bool {
        self.metadata.as_ref().is_some_and(|m| m.is_demo)
    }

    /// One-line description shown under the summary, if any metadata exists.
    pub fn processing_note(&self) -> Option<String> {
        let meta = self.metadata.as_ref()?;
        let mut note = format!(
            "Processed {} characters at {} level",
            meta.text_length.unwrap_or_default(),
            meta.level.as_deref().unwrap_or("unknown").replace('-', " ")
        );
        if let Some(service) = &meta.ai_service {
            note.push_str(&format!(" using {}", service));
        }
        Some(note)
    }
}

/// `{success, data}` envelope returned by the processing endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessingResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<ProcessingResult>,
    #[serde(default)]
    pub error: Option<String>,
}

const DATE_FORMAT_TODAY: &str = "Today %H:%M";
fn validate_quiz(quiz: &[QuizItem]) -> Result<(), String> {
    for (i, item) in quiz.iter().enumerate() {
        if item.options.len() < 2 {
            return Err(format!(
                "quiz question {} has {} option(s), expected at least 2",
                i + 1,
                item.options.len()
            ));
        }
        if item.correct_index >= item.options.len() {
            return Err(format!(
                "quiz question {} has correctIndex {} but only {} options",
                i + 1,
                item.correct_index,
                item.options.len()
            ));
        }
    }
    Ok(())
}

/// Characters of the summary shown in the history list.
pub const HISTORY_PREVIEW_CHARS: usize = 150;

const DATE_FORMAT_YESTERDAY: &str = "Yesterday %H:%M";
const DATE_FORMAT_OTHER: &str = "%Y-%m-%d %H:%M";

/// A result saved to the user's account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub id: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub quiz: Vec<QuizItem>,
    #[serde(default)]
    pub flashcards: Vec<Flashcard>,
    #[serde(default)]
    pub original_text: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub created_at: String,
}

impl HistoryItem {
    pub fn validate(&self) -> Result<(), String> {
        validate_quiz(&self.quiz)
    }

    /// First [`HISTORY_PREVIEW_CHARS`] characters of the summary, always
    /// followed by an ellipsis.
    pub fn preview(&self) -> String {
        let head: String = self.summary.chars().take(HISTORY_PREVIEW_CHARS).collect();
        format!("{}...", head)
    }

    pub fn to_result(&self) -> ProcessingResult {
        ProcessingResult {
            summary: self.summary.clone(),
            quiz: self.quiz.clone(),
            flashcards: self.flashcards.clone(),
            metadata: Some(Metadata {
                text_length: Some(self.original_text.chars().count() as u64),
                level: Some(self.level.clone()),
                original_text: Some(self.original_text.clone()),
                ..Metadata::default()
            }),
        }
    }

    /// Creation time in local time, or the raw string when it does not parse.
    pub fn created_label(&self) -> String {
        let Ok(ts) = chrono::DateTime::parse_from_rfc3339(&self.created_at) else {
            return self.created_at.clone();
        };
        let created = ts.with_timezone(&chrono::Local);
        let today = chrono::Local::now().date_naive();

        if created.date_naive() == today {
            created.format(DATE_FORMAT_TODAY).to_string()
        } else if created.date_naive() == today - chrono::Duration::days(1) {
            created.format(DATE_FORMAT_YESTERDAY).to_string()
        } else {
            created.format(DATE_FORMAT_OTHER).to_string()
        }
    }
}

/// Reading level sent along with every processing request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Level {
    MiddleSchool,
    #[default]
    HighSchool,
    College,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::MiddleSchool, Level::HighSchool, Level::College];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::MiddleSchool => "middle-school",
            Level::HighSchool => "high-school",
            Level::College => "college",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Level::MiddleSchool => "Middle School",
            Level::HighSchool => "High School",
            Level::College => "College",
        }
    }

    pub fn next(self) -> Level {
        let i = Self::ALL.iter().position(|l| *l == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Level {
        let i = Self::ALL.iter().position(|l| *l == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
pub(crate) fn sample_result() -> ProcessingResult {
    ProcessingResult {
        summary: "Cells are the basic unit of life.".to_string(),
        quiz: vec![
            QuizItem {
                question: "What is the basic unit of life?".to_string(),
                options: vec!["Atom".into(), "Cell".into(), "Organ".into()],
                correct_index: 1,
                explanation: Some("Cells make up all living things.".into()),
            },
            QuizItem {
                question: "Which organelle holds DNA?".to_string(),
                options: vec!["Nucleus".into(), "Ribosome".into()],
                correct_index: 0,
                explanation: None,
            },
            QuizItem {
                question: "Plants make food by?".to_string(),
                options: vec!["Respiration".into(), "Photosynthesis".into()],
                correct_index: 1,
                explanation: Some("Light energy becomes sugar.".into()),
            },
        ],
        flashcards: vec![
            Flashcard { front: "Cell".into(), back: "Basic unit of life".into() },
            Flashcard { front: "Nucleus".into(), back: "Holds DNA".into() },
            Flashcard { front: "Ribosome".into(), back: "Makes proteins".into() },
            Flashcard { front: "Chloroplast".into(), back: "Site of photosynthesis".into() },
        ],
        metadata: Some(Metadata {
            text_length: Some(1200),
            level: Some("high-school".into()),
            ai_service: Some("gemini".into()),
            is_demo: false,
            original_text: Some("Cells ...".into()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_wire_format() {
        let json = r#"{
            "summary": "S",
            "quiz": [{"question": "Q", "options": ["A", "B"], "correctIndex": 1, "explanation": "E"}],
            "flashcards": [{"front": "F", "back": "B"}],
            "metadata": {"textLength": 10, "level": "college", "isDemo": true, "originalText": "T"}
        }"#;
        let result: ProcessingResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.quiz[0].correct_index, 1);
        assert_eq!(result.quiz[0].correct_option(), Some("B"));
        assert!(result.is_demo());
        assert_eq!(result.metadata.unwrap().original_text.as_deref(), Some("T"));
    }

    #[test]
    fn test_missing_collections_default_to_empty() {
        let result: ProcessingResult = serde_json::from_str(r#"{"summary": ""}"#).unwrap();
        assert!(result.quiz.is_empty());
        assert!(result.flashcards.is_empty());
        assert!(result.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_answer() {
        let mut result = sample_result();
        result.quiz[1].correct_index = 2;
        let err = result.validate().unwrap_err();
        assert!(err.contains("question 2"));
    }

    #[test]
    fn test_validate_rejects_single_option() {
        let mut result = sample_result();
        result.quiz[0].options.truncate(1);
        result.quiz[0].correct_index = 0;
        assert!(result.validate().is_err());
    }

    #[test]
    fn test_processing_note() {
        let result = sample_result();
        assert_eq!(
            result.processing_note().as_deref(),
            Some("Processed 1200 characters at high school level using gemini")
        );
        assert!(ProcessingResult::default().processing_note().is_none());
    }

    #[test]
    fn test_history_item_to_result() {
        let item: HistoryItem = serde_json::from_str(
            r#"{"id": "7", "summary": "S", "quiz": [], "flashcards": [{"front": "a", "back": "b"}],
                "originalText": "abc", "level": "college", "createdAt": "2024-03-01T10:00:00Z"}"#,
        )
        .unwrap();
        let result = item.to_result();
        assert_eq!(result.flashcards.len(), 1);
        let meta = result.metadata.unwrap();
        assert_eq!(meta.level.as_deref(), Some("college"));
        assert_eq!(meta.original_text.as_deref(), Some("abc"));
        assert!(item.created_label().starts_with("2024-03-0"));
    }

    #[test]
    fn test_preview_always_ends_with_ellipsis() {
        let mut item: HistoryItem = serde_json::from_str(r#"{"id": "1"}"#).unwrap();
        item.summary = "x".repeat(152);
        let preview = item.preview();
        assert_eq!(preview, format!("{}...", "x".repeat(150)));

        item.summary = "short".into();
        assert_eq!(item.preview(), "short...");

        item.summary = "é".repeat(200);
        assert_eq!(item.preview().chars().count(), 153);
    }

    #[test]
    fn test_history_item_with_bad_answer_index_is_invalid() {
        let item: HistoryItem = serde_json::from_str(
            r#"{"id": "9", "quiz": [{"question": "Q", "options": ["A", "B"], "correctIndex": 4}]}"#,
        )
        .unwrap();
        let err = item.validate().unwrap_err();
        assert!(err.contains("correctIndex 4"));
    }

    #[test]
    fn test_recent_dates_are_relative() {
        let mut item: HistoryItem = serde_json::from_str(r#"{"id": "1"}"#).unwrap();
        item.created_at = chrono::Local::now().to_rfc3339();
        assert!(item.created_label().starts_with("Today "));
    }

    #[test]
    fn test_unparseable_date_is_shown_raw() {
        let item = HistoryItem {
            id: "1".into(),
            summary: String::new(),
            quiz: vec![],
            flashcards: vec![],
            original_text: String::new(),
            level: String::new(),
            created_at: "yesterday".into(),
        };
        assert_eq!(item.created_label(), "yesterday");
    }

    #[test]
    fn test_level_cycle() {
        assert_eq!(Level::default().as_str(), "high-school");
        assert_eq!(Level::College.next(), Level::MiddleSchool);
        assert_eq!(Level::MiddleSchool.previous(), Level::College);
        assert_eq!(Level::MiddleSchool.to_string(), "middle-school");
    }
}
