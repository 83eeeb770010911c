//! Live console rendering of a running salon

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use salon_application::SalonObserver;
use salon_domain::{
    Message, Participant, ParticipantId, ParticipantState, Role, SessionState, TerminationReason,
    Topic,
};
use std::collections::HashSet;
use std::sync::Mutex;

/// Renders a salon as it happens, with a crystallization progress bar
pub struct ConsoleObserver {
    bar: ProgressBar,
    seen: Mutex<HashSet<ParticipantId>>,
}

impl ConsoleObserver {
    pub fn new() -> Self {
        let bar = ProgressBar::new(100);
        bar.set_style(Self::bar_style());
        bar.set_prefix("Crystallization");
        Self {
            bar,
            seen: Mutex::new(HashSet::new()),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{prefix:.bold.magenta} [{bar:40.magenta/blue}] {pos}%")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn print(&self, line: String) {
        if self.bar.is_hidden() {
            println!("{}", line);
        } else {
            self.bar.println(line);
        }
    }
}

impl Default for ConsoleObserver {
    fn default() -> Self {
        Self::new()
    }
}

/// One transcript line, colored by role.
pub fn render_message(message: &Message, speaker: &Participant) -> String {
    let name = match speaker.role {
        Role::Host => speaker.name.yellow().bold(),
        _ if speaker.is_user => speaker.name.green().bold(),
        _ => speaker.name.cyan().bold(),
    };
    match &message.insight_label {
        Some(label) => format!("{}: {} {}", name, message.content, label.magenta()),
        None => format!("{}: {}", name, message.content),
    }
}

impl SalonObserver for ConsoleObserver {
    fn on_roster_changed(&self, roster: &[ParticipantState]) {
        let Ok(mut seen) = self.seen.lock() else {
            return;
        };
        for state in roster {
            if seen.insert(state.participant.id.clone()) {
                self.print(format!(
                    "{} {} joined ({})",
                    "+".green(),
                    state.participant.name.bold(),
                    state.participant.role
                ));
            }
        }
    }

    fn on_state_changed(&self, state: SessionState) {
        if state == SessionState::Active {
            self.bar.set_position(0);
            self.print(format!("\n{}\n", "=== The salon is in session ===".cyan().bold()));
        }
    }

    fn on_message(&self, message: &Message, speaker: &Participant) {
        self.print(render_message(message, speaker));
    }

    fn on_progress(&self, progress: u8) {
        self.bar.set_position(u64::from(progress));
    }

    fn on_completed(&self, reason: TerminationReason, emerged: Option<&Topic>) {
        let summary = match emerged {
            Some(topic) => format!("{} ({})", reason, topic.title),
            None => reason.to_string(),
        };
        self.bar
            .finish_with_message(format!("{}", summary.green()));
        self.print(format!("{} {}", "Session ended:".bold(), summary));
    }
}

/// Plain line-by-line rendering, no progress bar
pub struct SimpleObserver;

impl SalonObserver for SimpleObserver {
    fn on_message(&self, message: &Message, speaker: &Participant) {
        println!("{}", render_message(message, speaker));
    }

    fn on_progress(&self, progress: u8) {
        println!("{} {}%", "->".cyan(), progress);
    }

    fn on_completed(&self, reason: TerminationReason, _emerged: Option<&Topic>) {
        println!("{} {}", "Session ended:".bold(), reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salon_domain::participant::personas::host;

    #[test]
    fn test_render_message_includes_label() {
        colored::control::set_override(false);
        let host = host();
        let message = Message::new(host.id.clone(), "Welcome.").with_label(Some("#Ethics".into()));
        assert_eq!(render_message(&message, &host), "The Architect: Welcome. #Ethics");

        let plain = Message::new(host.id.clone(), "Welcome.");
        assert_eq!(render_message(&plain, &host), "The Architect: Welcome.");
    }
}
