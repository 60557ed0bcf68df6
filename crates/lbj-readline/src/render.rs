//! Terminal rendering of briefs, usage guides and the specialist grid.

use colored::{ColoredString, Colorize};
use lbj_core::{
    Message, MessageRole, OrchestratorBrief, SpecialistId, StatusState, SystemStatus, UsageGuide,
};

const RULE_WIDTH: usize = 60;

/// Paints text in a specialist's accent color.
fn accent(text: &str, color: &str) -> ColoredString {
    match color.split('-').next().unwrap_or_default() {
        "emerald" => text.green(),
        "purple" => text.magenta(),
        "amber" => text.yellow(),
        "blue" => text.blue(),
        _ => text.normal(),
    }
}

fn specialist_label(raw: &str) -> ColoredString {
    match SpecialistId::parse(raw) {
        Some(id) => accent(raw, id.profile().color).bold(),
        None => raw.bright_black(),
    }
}

fn heading(title: &str) -> String {
    let fill = RULE_WIDTH.saturating_sub(title.len() + 4);
    format!("── {} {}", title, "─".repeat(fill))
        .bright_magenta()
        .bold()
        .to_string()
}

fn field(label: &str, value: &str) -> String {
    let mut lines = value.lines();
    let first = lines.next().unwrap_or_default();
    let mut out = format!("{} {}", format!("{label}:").bright_white().bold(), first);
    for line in lines {
        out.push('\n');
        out.push_str("  ");
        out.push_str(line);
    }
    out
}

pub fn render_brief(brief: &OrchestratorBrief) -> String {
    let systems = if brief.recommended_systems.is_empty() {
        "(none)".bright_black().to_string()
    } else {
        brief
            .recommended_systems
            .iter()
            .map(|raw| specialist_label(raw).to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };

    [
        heading("Orchestrator Brief"),
        field("Intent", &brief.user_intent),
        field("Context", &brief.key_context),
        field("Recommended", &systems),
        field("Why", &brief.reason_for_routing),
    ]
    .join("\n")
}

pub fn render_usage_guide(guide: &UsageGuide) -> String {
    [
        heading("Usage Guide"),
        format!(
            "{} {}",
            "Open:".bright_white().bold(),
            specialist_label(&guide.system_to_open)
        ),
        field("Provide", &guide.what_to_paste_or_upload),
        field("It will", &guide.what_this_system_will_do),
        field("You get", &guide.what_youll_get_at_the_end),
    ]
    .join("\n")
}

pub fn render_status_grid(statuses: &[SystemStatus]) -> String {
    statuses
        .iter()
        .map(|system| {
            let (dot, state) = match system.status {
                StatusState::Active => (accent("●", &system.color), "active".bold()),
                StatusState::Idle => ("○".bright_black(), "idle".bright_black()),
                StatusState::Offline => ("✕".red(), "offline".red()),
            };
            format!(
                "{} {:<10} {:<8} {}",
                dot,
                system.name,
                state,
                system.description.bright_black()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders one conversation turn as shown by `/history` and after a submit.
pub fn render_message(message: &Message) -> String {
    match message.role {
        MessageRole::User => {
            let mut out = format!("> {}", message.text.as_deref().unwrap_or_default())
                .green()
                .to_string();
            if let Some(file_name) = &message.file_name {
                out.push_str(&format!(" {}", format!("[{file_name}]").bright_black()));
            }
            out
        }
        MessageRole::Orchestrator => match (&message.brief, &message.usage_guide) {
            (Some(brief), Some(guide)) => {
                format!("{}\n\n{}", render_brief(brief), render_usage_guide(guide))
            }
            _ => message
                .text
                .as_deref()
                .unwrap_or_default()
                .red()
                .to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lbj_core::{OrchestrationResult, StatusBoard};

    fn plain() {
        colored::control::set_override(false);
    }

    fn result() -> OrchestrationResult {
        OrchestrationResult {
            brief: OrchestratorBrief {
                user_intent: "Qualify inbound leads".into(),
                key_context: "File summary: 40 leads\nmostly SMB".into(),
                recommended_systems: vec!["LBJ-Sales-AI".into(), "LBJ-Mystery-AI".into()],
                reason_for_routing: "Lead work".into(),
            },
            usage_guide: UsageGuide {
                system_to_open: "LBJ-Sales-AI".into(),
                what_to_paste_or_upload: "The CSV".into(),
                what_this_system_will_do: "Score leads".into(),
                what_youll_get_at_the_end: "A call list".into(),
            },
        }
    }

    #[test]
    fn test_routed_message_shows_both_panels() {
        plain();
        let rendered = render_message(&Message::routed(result()));

        assert!(rendered.contains("Orchestrator Brief"));
        assert!(rendered.contains("Context: File summary: 40 leads\n  mostly SMB"));
        assert!(rendered.contains("Recommended: LBJ-Sales-AI, LBJ-Mystery-AI"));
        assert!(rendered.contains("Usage Guide"));
        assert!(rendered.contains("Open: LBJ-Sales-AI"));
        assert!(rendered.contains("You get: A call list"));
    }

    #[test]
    fn test_user_message_shows_attachment() {
        plain();
        let rendered = render_message(&Message::user("hello", Some("deck.pdf".into())));
        assert_eq!(rendered, "> hello [deck.pdf]");
    }

    #[test]
    fn test_status_grid_lists_every_specialist() {
        plain();
        let mut board = StatusBoard::new();
        board.activate(&["LBJ-Ops-AI"]);
        let grid = render_status_grid(&board.snapshot());

        let lines: Vec<&str> = grid.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("○ Sales AI"));
        assert!(lines[2].starts_with("● Ops AI"));
        assert!(lines[2].contains("active"));
    }
}
