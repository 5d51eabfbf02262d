//! Account calls: login, signup, and saving/listing study history.

use crate::api::{ApiClient, RequestOptions};
use crate::db::TokenStore;
use crate::logger;
use crate::models::{HistoryItem, ProcessingResult};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Saved,
    /// No session token; nothing was sent.
    LoginRequired,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum HistoryOutcome {
    Loaded(Vec<HistoryItem>),
    /// No session token; nothing was sent.
    LoginRequired,
}

#[derive(Debug, Deserialize)]
struct HistoryResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    items: Vec<HistoryItem>,
}

#[derive(Clone)]
pub struct PersistenceBridge {
    client: ApiClient,
    tokens: Arc<dyn TokenStore>,
}

impl PersistenceBridge {
    pub fn new(client: ApiClient, tokens: Arc<dyn TokenStore>) -> Self {
        Self { client, tokens }
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    pub async fn save_result(&self, result: &ProcessingResult) -> SaveOutcome {
        let Some(token) = self.tokens.token() else {
            return SaveOutcome::LoginRequired;
        };

        let metadata = result.metadata.clone().unwrap_or_default();
        let body = json!({
            "summary": result.summary,
            "quiz": result.quiz,
            "flashcards": result.flashcards,
            "originalText": metadata.original_text.unwrap_or_default(),
            "level": metadata.level.unwrap_or_else(|| "unknown".to_string()),
        });

        let response = self
            .client
            .send("/user/save-history", RequestOptions::post_json(body).with_bearer(&token))
            .await;

        match response {
            Ok(response) if response.body.get("success").and_then(|v| v.as_bool()) == Some(true) => {
                logger::log("Saved result to history");
                SaveOutcome::Saved
            }
            Ok(response) => {
                let reason = response
                    .error_message()
                    .unwrap_or_else(|| "Unknown error".to_string());
                logger::log(&format!("Save rejected: {}", reason));
                SaveOutcome::Failed(format!("Failed to save: {}", reason))
            }
            Err(e) => {
                logger::log(&format!("Save failed: {}", e));
                SaveOutcome::Failed("Something went wrong saving your results.".to_string())
            }
        }
    }

    /// Lists saved items. Failures of any kind yield an empty list so the
    /// page can show its empty state.
    pub async fn load_history(&self) -> HistoryOutcome {
        let Some(token) = self.tokens.token() else {
            return HistoryOutcome::LoginRequired;
        };

        let response = self
            .client
            .send("/user/history", RequestOptions::get().with_bearer(&token))
            .await;

        let items = match response {
            Ok(response) => match serde_json::from_value::<HistoryResponse>(response.body) {
                Ok(history) if history.success => history
                    .items
                    .into_iter()
                    .filter(|item| match item.validate() {
                        Ok(()) => true,
                        Err(e) => {
                            logger::log(&format!("Skipping history item {}: {}", item.id, e));
                            false
                        }
                    })
                    .collect(),
                Ok(_) => {
                    logger::log("History request was not successful");
                    Vec::new()
                }
                Err(e) => {
                    logger::log(&format!("Unreadable history response: {}", e));
                    Vec::new()
                }
            },
            Err(e) => {
                logger::log(&format!("History request failed: {}", e));
                Vec::new()
            }
        };
        HistoryOutcome::Loaded(items)
    }

    /// Logs in and stores the returned token.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, String> {
        let response = self
            .client
            .send(
                "/user/login",
                RequestOptions::post_json(json!({ "email": email, "password": password })),
            )
            .await
            .map_err(|e| e.to_string())?;

        if !response.is_success() {
            return Err(response.error_message().unwrap_or_else(|| "Login failed".to_string()));
        }

        let token = response
            .body
            .get("token")
            .and_then(|t| t.as_str())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| "Login failed".to_string())?;
        self.tokens.set_token(token);
        logger::log("Logged in");
        Ok(token.to_string())
    }

    pub async fn signup(&self, email: &str, password: &str) -> Result<(), String> {
        let response = self
            .client
            .send(
                "/user/signup",
                RequestOptions::post_json(json!({ "email": email, "password": password })),
            )
            .await
            .map_err(|e| e.to_string())?;

        if response.is_success() {
            logger::log("Signed up");
            Ok(())
        } else {
            Err(response.error_message().unwrap_or_else(|| "Signup failed".to_string()))
        }
    }

    pub fn logout(&self) {
        self.tokens.clear();
        logger::log("Logged out");
    }
}
