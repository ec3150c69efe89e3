//! Round-by-round record of a playthrough, exportable as an after-action report.

use nf_core::strings::labels;
use nf_core::{OutcomeCategory, ResponseKey, StringTable};
use serde::{Deserialize, Serialize};

use crate::meter::{Ending, Meter};

/// The localized "+1 charge" line for a granted reward.
pub fn reward_message(strings: &StringTable, resource: &ResponseKey) -> String {
    strings.render(
        labels::REWARD_GRANTED,
        "+1 {resource} charge",
        &[("resource", resource.as_str())],
    )
}

/// One played round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Authored round number.
    pub round: u32,
    /// The inject text.
    pub prompt: String,
    /// The chosen response.
    pub response: ResponseKey,
    /// How the choice resolved.
    pub category: OutcomeCategory,
    /// Feedback text of the drawn variant.
    pub feedback: String,
    /// Meter after the round.
    pub meter_after: i32,
    /// Charge gained this round, if any.
    pub reward: Option<ResponseKey>,
}

/// Chronological log of rounds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journal {
    records: Vec<RoundRecord>,
}

impl Journal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record.
    pub fn append(&mut self, record: RoundRecord) {
        self.records.push(record);
    }

    /// All records.
    pub fn records(&self) -> &[RoundRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the journal is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Export the journal as a markdown report.
    pub fn export_markdown(&self, ending: Option<Ending>, strings: &StringTable) -> String {
        let mut out = String::from("# After-Action Report\n\n");
        for (i, r) in self.records.iter().enumerate() {
            out.push_str(&format!("## Round {} (inject {})\n\n", i + 1, r.round));
            out.push_str(&format!("> {}\n\n", r.prompt));
            out.push_str(&format!(
                "**Response**: {} ({})  \n**Meter**: {}\n\n",
                r.response,
                r.category,
                Meter::new(r.meter_after)
            ));
            out.push_str(&format!("{}\n\n", r.feedback));
            if let Some(resource) = &r.reward {
                out.push_str(&format!("*{}*\n\n", reward_message(strings, resource)));
            }
        }
        if let Some(ending) = ending {
            out.push_str(&format!(
                "## Outcome: {}\n\n{}\n",
                ending.title(strings),
                ending.message(strings)
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> RoundRecord {
        RoundRecord {
            round: 3,
            prompt: "Bots amplify a fake evacuation order".to_string(),
            response: ResponseKey::new("debunk"),
            category: OutcomeCategory::Success,
            feedback: "Official channels correct the record within the hour.".to_string(),
            meter_after: 2,
            reward: Some(ResponseKey::new("coalition")),
        }
    }

    #[test]
    fn empty_journal() {
        let j = Journal::new();
        assert!(j.is_empty());
        assert_eq!(j.len(), 0);
    }

    #[test]
    fn meter_line_format() {
        let mut j = Journal::new();
        j.append(record());
        let md = j.export_markdown(None, &StringTable::new());
        let line = md
            .lines()
            .find(|l| l.starts_with("**Meter**"))
            .unwrap_or_default();
        insta::assert_snapshot!(line, @"**Meter**: +2");
    }

    #[test]
    fn export_includes_reward_and_ending() {
        let mut j = Journal::new();
        j.append(record());
        let md = j.export_markdown(Some(Ending::Victory), &StringTable::new());
        assert!(md.contains("## Round 1 (inject 3)"));
        assert!(md.contains("**Meter**: +2"));
        assert!(md.contains("*+1 coalition charge*"));
        assert!(md.contains("## Outcome: RESILIENT VICTORY"));
    }

    #[test]
    fn zero_meter_has_no_sign() {
        let mut j = Journal::new();
        j.append(RoundRecord {
            meter_after: 0,
            ..record()
        });
        let md = j.export_markdown(None, &StringTable::new());
        assert!(md.contains("**Meter**: 0\n"));
        assert!(!md.contains("+0"));
    }

    #[test]
    fn reward_line_uses_localized_template() {
        let mut j = Journal::new();
        j.append(record());
        let strings = StringTable::new().with(labels::REWARD_GRANTED, "Koalition +1 ({resource})");
        let md = j.export_markdown(None, &strings);
        assert!(md.contains("*Koalition +1 (coalition)*"));
        assert!(!md.contains("+1 coalition charge"));
    }
}
