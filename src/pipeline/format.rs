//! Notification message rendering.

use crate::models::{Availability, ChangeRecord, NotifyConfig, ProductAvailability};

/// Slack mention that pings everyone in the channel.
const EVERYONE: &str = "<!everyone>";

/// Renders the current snapshot and detected changes into one message.
#[derive(Debug, Clone)]
pub struct MessageFormatter {
    title: String,
    mention_everyone: bool,
}

impl MessageFormatter {
    pub fn new(title: impl Into<String>, mention_everyone: bool) -> Self {
        Self {
            title: title.into(),
            mention_everyone,
        }
    }

    pub fn from_config(config: &NotifyConfig) -> Self {
        Self::new(config.title.clone(), config.mention_everyone)
    }

    /// Render the message.
    ///
    /// Layout, sections separated by a blank line:
    /// banner and change summary (only with changes), header,
    /// available products, sold out products.
    pub fn format(&self, current: &ProductAvailability, changes: &[ChangeRecord]) -> String {
        let mut sections: Vec<String> = Vec::with_capacity(4);

        if !changes.is_empty() {
            sections.push(self.change_section(changes));
        }
        sections.push(format!("*{}*", self.title));
        sections.push(Self::state_section("Available", current, Availability::Available));
        sections.push(Self::state_section("Sold Out", current, Availability::SoldOut));

        sections.join("\n\n")
    }

    fn change_section(&self, changes: &[ChangeRecord]) -> String {
        let banner = if self.mention_everyone {
            format!("{EVERYONE} :rotating_light: *Stock changes detected*")
        } else {
            ":rotating_light: *Stock changes detected*".to_string()
        };

        let mut lines = vec![banner, format!("*Changes ({}):*", changes.len())];
        lines.extend(changes.iter().map(|change| format!("• {change}")));
        lines.join("\n")
    }

    fn state_section(label: &str, current: &ProductAvailability, state: Availability) -> String {
        let names: Vec<&str> = current.names_with(state).collect();

        let mut lines = vec![format!("*{} ({}):*", label, names.len())];
        if names.is_empty() {
            lines.push("_none_".to_string());
        } else {
            lines.extend(names.iter().map(|name| format!("• {name}")));
        }
        lines.join("\n")
    }
}

impl Default for MessageFormatter {
    fn default() -> Self {
        Self::from_config(&NotifyConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Availability::{Available, SoldOut};

    fn formatter() -> MessageFormatter {
        MessageFormatter::new("Stock Update", true)
    }

    fn current() -> ProductAvailability {
        [
            ("Dark Roast", Available),
            ("Kenya AA", Available),
            ("Decaf", SoldOut),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_quiet_run_has_no_banner() {
        let text = formatter().format(&current(), &[]);

        assert!(!text.contains(EVERYONE));
        assert!(!text.contains("Stock changes detected"));
        assert_eq!(
            text,
            "*Stock Update*\n\n\
             *Available (2):*\n• Dark Roast\n• Kenya AA\n\n\
             *Sold Out (1):*\n• Decaf"
        );
    }

    #[test]
    fn test_changes_are_prepended() {
        let changes = vec![
            ChangeRecord::added("Kenya AA", Available),
            ChangeRecord::transitioned("Decaf", Available, SoldOut),
        ];
        let text = formatter().format(&current(), &changes);

        assert!(text.starts_with("<!everyone> :rotating_light: *Stock changes detected*\n"));
        assert!(text.contains("• Kenya AA: added (Available)"));
        assert!(text.contains("• Decaf: Available → Sold out"));

        let summary = text.find("*Changes (2):*").unwrap();
        let header = text.find("*Stock Update*").unwrap();
        let available = text.find("*Available (2):*").unwrap();
        let sold_out = text.find("*Sold Out (1):*").unwrap();
        assert!(summary < header && header < available && available < sold_out);
    }

    #[test]
    fn test_banner_without_mention() {
        let changes = vec![ChangeRecord::added("Dark Roast", Available)];
        let text = MessageFormatter::new("Stock Update", false).format(&current(), &changes);

        assert!(text.starts_with(":rotating_light:"));
        assert!(!text.contains(EVERYONE));
    }

    #[test]
    fn test_empty_sections_render_none() {
        let text = formatter().format(&ProductAvailability::new(), &[]);
        assert!(text.contains("*Available (0):*\n_none_"));
        assert!(text.contains("*Sold Out (0):*\n_none_"));
    }

    #[test]
    fn test_format_is_repeatable() {
        let changes = vec![ChangeRecord::transitioned("Decaf", Available, SoldOut)];
        let f = formatter();
        assert_eq!(f.format(&current(), &changes), f.format(&current(), &changes));
    }

    #[test]
    fn test_default_uses_configured_title() {
        let text = MessageFormatter::default().format(&ProductAvailability::new(), &[]);
        assert!(text.starts_with("*Komuna Coffee Stock Update*"));
    }
}
