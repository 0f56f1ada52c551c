//! Team roster and problem list views.

use crate::api::{Problem, TeamRoster, TherapyApi};
use crate::error::ApiResult;

/// Read-only lists of teams and problems.
pub struct RosterView {
    api: TherapyApi,
    teams: Vec<TeamRoster>,
    problems: Vec<Problem>,
    last_error: Option<String>,
}

impl RosterView {
    pub fn new(api: TherapyApi) -> Self {
        Self {
            api,
            teams: Vec::new(),
            problems: Vec::new(),
            last_error: None,
        }
    }

    pub fn teams(&self) -> &[TeamRoster] {
        &self.teams
    }

    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub async fn load_teams(&mut self) -> ApiResult<&[TeamRoster]> {
        match self.api.list_teams().await {
            Ok(teams) => {
                self.last_error = None;
                self.teams = teams;
                Ok(&self.teams)
            }
            Err(e) => {
                self.last_error = Some(e.user_message());
                Err(e)
            }
        }
    }

    pub async fn load_problems(&mut self) -> ApiResult<&[Problem]> {
        match self.api.list_problems().await {
            Ok(problems) => {
                self.last_error = None;
                self.problems = problems;
                Ok(&self.problems)
            }
            Err(e) => {
                self.last_error = Some(e.user_message());
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{InMemoryTokenStore, MockHttpClient, MockResponse};
    use crate::auth::ApiClient;
    use crate::traits::Method;
    use serde_json::json;
    use std::sync::Arc;

    fn view(http: &MockHttpClient) -> RosterView {
        let client = ApiClient::with_base_url(
            "http://api.test",
            Arc::new(http.clone()),
            Arc::new(InMemoryTokenStore::new()),
        )
        .unwrap();
        RosterView::new(TherapyApi::new(Arc::new(client)))
    }

    #[tokio::test]
    async fn test_load_teams_and_problems() {
        let http = MockHttpClient::new();
        http.push_response(
            Method::Get,
            "http://api.test/TeamMembers/",
            MockResponse::json(200, json!([{"id": 4, "teamname": "Green", "content": ["li", "mo"]}])),
        );
        http.push_response(
            Method::Get,
            "http://api.test/Problems/",
            MockResponse::json(200, json!([{"content": "Procrastination"}])),
        );
        let mut roster = view(&http);

        let teams = roster.load_teams().await.unwrap();
        assert_eq!(teams[0].member_labels(), vec!["li", "mo"]);

        roster.load_problems().await.unwrap();
        assert_eq!(roster.problems()[0].content, "Procrastination");
        assert_eq!(roster.teams().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_list() {
        let http = MockHttpClient::new();
        http.push_response(
            Method::Get,
            "http://api.test/TeamMembers/",
            MockResponse::json(200, json!([{"id": 4, "teamname": "Green"}])),
        );
        http.push_response(Method::Get, "http://api.test/TeamMembers/", MockResponse::status(500));
        let mut roster = view(&http);

        roster.load_teams().await.unwrap();
        assert!(roster.load_teams().await.is_err());

        assert_eq!(roster.teams().len(), 1);
        assert_eq!(roster.last_error(), Some("Request failed with status 500"));
    }
}
