//! Dashboard summary view.

use chrono::{DateTime, Utc};

use crate::api::{ChatSession, TherapyApi};
use crate::error::ApiResult;

/// What the dashboard shows after a load.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardSummary {
    pub chat_count: usize,
    pub team_count: usize,
    pub problem_count: usize,
    /// The session with the newest parseable `last_updated`.
    pub latest_session: Option<ChatSession>,
    pub latest_activity: Option<DateTime<Utc>>,
}

/// Parse a `last_updated` value. Only RFC 3339 timestamps are understood.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|timestamp| timestamp.with_timezone(&Utc))
}

/// Most recently updated session. Sessions without a readable timestamp
/// are skipped.
pub fn latest_session(sessions: &[ChatSession]) -> Option<(&ChatSession, DateTime<Utc>)> {
    sessions
        .iter()
        .filter_map(|session| {
            let updated = parse_timestamp(session.last_updated.as_deref()?)?;
            Some((session, updated))
        })
        .max_by_key(|(_, updated)| *updated)
}

pub struct DashboardView {
    api: TherapyApi,
    summary: Option<DashboardSummary>,
    last_error: Option<String>,
}

impl DashboardView {
    pub fn new(api: TherapyApi) -> Self {
        Self {
            api,
            summary: None,
            last_error: None,
        }
    }

    pub fn summary(&self) -> Option<&DashboardSummary> {
        self.summary.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Fetch chats, teams and problems together and rebuild the summary.
    pub async fn load(&mut self) -> ApiResult<&DashboardSummary> {
        let fetched = tokio::try_join!(
            self.api.list_chats(),
            self.api.list_teams(),
            self.api.list_problems(),
        );

        let (chats, teams, problems) = match fetched {
            Ok(fetched) => fetched,
            Err(e) => {
                self.last_error = Some(e.user_message());
                return Err(e);
            }
        };

        let latest = latest_session(&chats);
        let summary = DashboardSummary {
            chat_count: chats.len(),
            team_count: teams.len(),
            problem_count: problems.len(),
            latest_session: latest.map(|(session, _)| session.clone()),
            latest_activity: latest.map(|(_, updated)| updated),
        };

        self.last_error = None;
        Ok(&*self.summary.insert(summary))
    }
}
