//! Console output formatter for salon results

use colored::Colorize;
use salon_application::{RunSalonOutput, SalonOutcome};
use salon_domain::{Category, LatentLink, Topic};
use serde::Serialize;

/// Serializable summary of a finished salon
#[derive(Debug, Serialize)]
pub struct SalonReport<'a> {
    pub session_id: &'a str,
    pub topic: &'a Topic,
    pub state: &'static str,
    pub termination: Option<&'static str>,
    pub progress: u8,
    pub emerged: Option<&'a Topic>,
    pub transcript: Vec<TranscriptLine<'a>>,
}

#[derive(Debug, Serialize)]
pub struct TranscriptLine<'a> {
    pub speaker: &'a str,
    pub content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insight_label: Option<&'a str>,
    pub timestamp: String,
}

impl<'a> SalonReport<'a> {
    pub fn from_output(output: &'a RunSalonOutput) -> Self {
        let session = &output.session;
        let transcript = session
            .transcript()
            .iter()
            .map(|m| TranscriptLine {
                speaker: session
                    .registry()
                    .get(&m.speaker)
                    .map(|s| s.participant.name.as_str())
                    .unwrap_or(m.speaker.as_str()),
                content: &m.content,
                insight_label: m.insight_label.as_deref(),
                timestamp: m.timestamp.to_rfc3339(),
            })
            .collect();

        Self {
            session_id: session.id().as_str(),
            topic: session.topic(),
            state: session.state().as_str(),
            termination: session.termination().map(|r| r.as_str()),
            progress: session.progress().value(),
            emerged: output.emerged(),
            transcript,
        }
    }
}

/// Formats salon results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Full transcript with the outcome
    pub fn format_salon(output: &RunSalonOutput) -> String {
        let report = SalonReport::from_output(output);
        let mut out = String::new();

        out.push_str(&Self::header("TIER Knowledge Salon"));
        out.push('\n');
        out.push_str(&format!(
            "{} {} [{}]\n",
            "Topic:".cyan().bold(),
            report.topic.title,
            report.topic.category
        ));

        out.push_str(&Self::section_header("Transcript"));
        for line in &report.transcript {
            out.push_str(&format!("{} {}", format!("{}:", line.speaker).yellow().bold(), line.content));
            if let Some(label) = line.insight_label {
                out.push_str(&format!(" {}", label.magenta()));
            }
            out.push('\n');
        }

        out.push_str(&Self::section_header("Outcome"));
        match &output.outcome {
            SalonOutcome::Completed { reason, .. } => {
                out.push_str(&format!("{} {}\n", "Ended by:".bold(), reason));
            }
            SalonOutcome::Stalled => {
                out.push_str(&format!("{}\n", "Stalled: nobody left to speak.".red()));
            }
        }
        out.push_str(&format!("{} {}%\n", "Crystallization:".bold(), report.progress));
        if let Some(topic) = report.emerged {
            out.push_str(&format!("\n{}\n", "A new topic crystallized:".green().bold()));
            out.push_str(&Self::format_topic(topic));
        }

        out.push_str(&Self::footer());
        out
    }

    pub fn format_salon_json(output: &RunSalonOutput) -> String {
        Self::to_json(&SalonReport::from_output(output))
    }

    /// One topic as an indented card
    pub fn format_topic(topic: &Topic) -> String {
        let mut out = format!(
            "{} {} {}\n",
            format!("[{}]", topic.id).dimmed(),
            topic.title.bold(),
            format!("({})", topic.category).cyan()
        );
        out.push_str(&format!("{}\n", Self::indent(&topic.description, "    ")));
        out.push_str(&format!("    {} {}\n", "Significance:".dimmed(), topic.significance));
        if let Some(by) = &topic.discovered_by {
            let year = topic.year.as_deref().unwrap_or("?");
            out.push_str(&format!("    {} {}, {}\n", "Discovered:".dimmed(), by, year));
        }
        if topic.is_fusion() {
            let parents: Vec<&str> = topic.parents.iter().map(|p| p.as_str()).collect();
            out.push_str(&format!("    {} {}\n", "Fused from:".dimmed(), parents.join(" + ")));
        }
        out
    }

    /// Topics grouped by category
    pub fn format_topics(topics: &[Topic]) -> String {
        if topics.is_empty() {
            return format!("{}\n", "No topics.".dimmed());
        }
        let mut out = String::new();
        for category in Category::ALL {
            let group: Vec<&Topic> = topics.iter().filter(|t| t.category == category).collect();
            if group.is_empty() {
                continue;
            }
            out.push_str(&Self::section_header(&format!(
                "{} - {}",
                category,
                category.subtitle()
            )));
            for topic in group {
                out.push_str(&Self::format_topic(topic));
            }
        }
        out
    }

    pub fn format_topics_json(topics: &[Topic]) -> String {
        Self::to_json(&topics)
    }

    pub fn format_links(links: &[LatentLink]) -> String {
        if links.is_empty() {
            return format!("{}\n", "No latent links found.".dimmed());
        }
        let mut out = Self::section_header("Latent Links");
        for link in links {
            out.push_str(&format!("{} {}\n", link.pair.to_string().yellow().bold(), link.insight));
        }
        out
    }

    pub fn format_links_json(links: &[LatentLink]) -> String {
        Self::to_json(&links)
    }

    fn to_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salon_domain::participant::personas::host;
    use salon_domain::{Message, Session, TerminationReason, TopicId};

    fn topic() -> Topic {
        Topic::new(
            "t2",
            Category::True,
            "General Relativity",
            "Gravity as spacetime curvature.",
            "Redefined space and time.",
        )
        .with_provenance("Albert Einstein", "1915")
    }

    fn finished_output() -> RunSalonOutput {
        let host = host();
        let mut session = Session::new(topic());
        session.add_participant(host.clone()).unwrap();
        session
            .activate(Message::new(host.id.clone(), "Welcome."))
            .unwrap();
        session
            .append(Message::new(host.id.clone(), "Curvature is geometry.").with_label(Some("#Ontology".into())))
            .unwrap();
        session
            .complete(TerminationReason::MessageCap, Some(Message::new(host.id.clone(), "Time.")))
            .unwrap();
        RunSalonOutput {
            session,
            outcome: SalonOutcome::Completed {
                reason: TerminationReason::MessageCap,
                emerged: None,
            },
        }
    }

    #[test]
    fn test_salon_report_resolves_speaker_names() {
        let output = finished_output();
        let report = SalonReport::from_output(&output);
        assert_eq!(report.transcript.len(), 3);
        assert_eq!(report.transcript[0].speaker, "The Architect");
        assert_eq!(report.transcript[1].insight_label, Some("#Ontology"));
        assert_eq!(report.transcript[2].content, "Time.");
        assert_eq!(report.termination, Some("message_cap"));
        assert_eq!(report.state, "COMPLETED");
    }

    #[test]
    fn test_format_salon_json_shape() {
        let output = finished_output();
        let json: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_salon_json(&output)).unwrap();
        assert_eq!(json["topic"]["title"], "General Relativity");
        assert_eq!(json["transcript"].as_array().unwrap().len(), 3);
        assert!(json["emerged"].is_null());
        assert!(json["transcript"][0].get("insight_label").is_none());
    }

    #[test]
    fn test_format_salon_text_mentions_outcome() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::format_salon(&finished_output());
        assert!(text.contains("The Architect: Curvature is geometry. #Ontology"));
        assert!(text.contains("Ended by: message_cap"));
    }

    #[test]
    fn test_format_topics_groups_by_category() {
        colored::control::set_override(false);
        let fused = Topic::new("f1", Category::Spirit, "Gravity of Ethics", "d", "s")
            .with_parents(vec![TopicId::new("t2"), TopicId::new("g1")]);
        let text = ConsoleFormatter::format_topics(&[fused, topic()]);
        let true_at = text.find("TRUE - Natural Sciences").unwrap();
        let spirit_at = text.find("SPIRIT - Interdisciplinary").unwrap();
        assert!(true_at < spirit_at);
        assert!(text.contains("Fused from: t2 + g1"));
        assert!(text.contains("Discovered: Albert Einstein, 1915"));
    }

    #[test]
    fn test_empty_lists() {
        colored::control::set_override(false);
        assert_eq!(ConsoleFormatter::format_topics(&[]), "No topics.\n");
        assert_eq!(ConsoleFormatter::format_links(&[]), "No latent links found.\n");
        assert_eq!(ConsoleFormatter::format_links_json(&[]), "[]");
    }

    #[test]
    fn test_indent() {
        assert_eq!(ConsoleFormatter::indent("a\nb", "  "), "  a\n  b");
    }
}
