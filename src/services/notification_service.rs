//! Completion notification delivery.
//!
//! When a quiz reaches its terminal phase a summary is posted to the
//! configured webhook. Delivery is fire-and-forget: failures are logged and
//! never fail the operation that triggered them.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, warn};

use crate::{dao::models::QuizEntity, services::standings::Standing};

/// Handle used to post completion summaries to the configured webhook.
#[derive(Clone)]
pub struct NotificationSender {
    client: reqwest::Client,
    webhook_url: Option<Arc<str>>,
}

impl NotificationSender {
    /// Build a sender. With no webhook URL the sender silently drops every
    /// notification.
    pub fn new(webhook_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            webhook_url: webhook_url.map(Arc::from),
        }
    }

    /// Sender that drops every notification.
    pub fn disabled() -> Self {
        Self::new(None)
    }

    /// Post the completion summary in a background task.
    pub fn notify_quiz_completed(&self, quiz: &QuizEntity, standings: &[Standing]) {
        let Some(url) = self.webhook_url.clone() else {
            debug!(quiz_id = %quiz.id, "no notification webhook configured; skipping");
            return;
        };

        let payload = json!({
            "event": "quiz_completed",
            "quiz_id": quiz.id,
            "quiz_name": quiz.name,
            "date": quiz.date,
            "location": quiz.location,
            "standings": standings
                .iter()
                .map(|standing| {
                    json!({
                        "team_number": standing.team_number,
                        "name": standing.team_name,
                        "total_points": standing.total_points,
                    })
                })
                .collect::<Vec<_>>(),
        });

        let client = self.client.clone();
        let quiz_id = quiz.id;
        tokio::spawn(async move {
            match client.post(url.as_ref()).json(&payload).send().await {
                Ok(response) if response.status().is_success() => {
                    debug!(%quiz_id, "completion notification delivered");
                }
                Ok(response) => {
                    warn!(%quiz_id, status = %response.status(), "completion notification rejected");
                }
                Err(err) => {
                    warn!(%quiz_id, error = %err, "completion notification failed");
                }
            }
        });
    }
}
