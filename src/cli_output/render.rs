//! Text formatting for sessions, transcripts and summaries.
//!
//! Everything here returns strings so the printing side stays trivial.

use crate::api::{ChatSession, DisplayMessage, Problem, TeamRoster};
use crate::error::ApiError;
use crate::view_state::dashboard::parse_timestamp;
use crate::view_state::DashboardSummary;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// `#12  Anxiety about work  [therapy]  2024-03-01 10:00`
pub fn session_line(session: &ChatSession) -> String {
    let title = if session.title.is_empty() {
        "(untitled)"
    } else {
        session.title.as_str()
    };

    let mut line = format!("#{:<4} {}  [{}]", session.id, title, session.ai_mode);
    if let Some(updated) = session.last_updated.as_deref() {
        match parse_timestamp(updated) {
            Some(timestamp) => {
                line.push_str("  ");
                line.push_str(&timestamp.format(TIMESTAMP_FORMAT).to_string());
            }
            None if !updated.trim().is_empty() => {
                line.push_str("  ");
                line.push_str(updated.trim());
            }
            None => {}
        }
    }
    line
}

/// Label shown before a transcript line.
pub fn speaker(message: &DisplayMessage) -> &str {
    match message.role.as_str() {
        "user" => "you",
        "" => "?",
        other => other,
    }
}

/// `you> I can't sleep`
pub fn message_line(message: &DisplayMessage) -> String {
    format!("{}> {}", speaker(message), message.content)
}

pub fn team_lines(team: &TeamRoster) -> Vec<String> {
    let members = team.member_labels();
    let mut lines = vec![format!("{} ({} members)", team.teamname, members.len())];
    lines.extend(members.into_iter().map(|member| format!("  - {}", member)));
    lines
}

pub fn problem_line(index: usize, problem: &Problem) -> String {
    let text = problem.content.trim();
    if text.is_empty() {
        format!("{}. (empty)", index + 1)
    } else {
        format!("{}. {}", index + 1, text)
    }
}

pub fn summary_lines(summary: &DashboardSummary) -> Vec<String> {
    let mut lines = vec![
        format!("Chats:    {}", summary.chat_count),
        format!("Teams:    {}", summary.team_count),
        format!("Problems: {}", summary.problem_count),
    ];
    match (&summary.latest_session, summary.latest_activity) {
        (Some(session), Some(at)) => lines.push(format!(
            "Latest:   {} ({})",
            session.title,
            at.format(TIMESTAMP_FORMAT)
        )),
        _ => lines.push("Latest:   no recent activity".to_string()),
    }
    lines
}

/// The message and a recovery hint for a failed call.
pub fn error_lines(error: &ApiError) -> (String, &'static str) {
    (error.user_message(), error.category().recovery_hint())
}
