//! Named rule templates for UI selection

use super::RuleSet;
use serde::{Deserialize, Serialize};

/// Fixed catalog of well-known rule sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleTemplate {
    /// Conway's Life, `B3/S23`.
    Life,
    /// `B2/S` — every live cell dies, pairs seed explosive growth.
    Seeds,
    /// `B34/S34`, "34 Life".
    ThirtyFourLife,
    /// `B36/S23` — Life plus births on six neighbors.
    HighLife,
}

impl RuleTemplate {
    pub const ALL: [RuleTemplate; 4] = [
        RuleTemplate::Life,
        RuleTemplate::Seeds,
        RuleTemplate::ThirtyFourLife,
        RuleTemplate::HighLife,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RuleTemplate::Life => "Life",
            RuleTemplate::Seeds => "Seeds",
            RuleTemplate::ThirtyFourLife => "34 Life",
            RuleTemplate::HighLife => "HighLife",
        }
    }

    pub fn rules(&self) -> RuleSet {
        match self {
            RuleTemplate::Life => RuleSet::from_valid(&[3], &[2, 3]),
            RuleTemplate::Seeds => RuleSet::from_valid(&[2], &[]),
            RuleTemplate::ThirtyFourLife => RuleSet::from_valid(&[3, 4], &[3, 4]),
            RuleTemplate::HighLife => RuleSet::from_valid(&[3, 6], &[2, 3]),
        }
    }

    /// Look a template up by display name, case-insensitively.
    pub fn find(name: &str) -> Option<RuleTemplate> {
        Self::ALL
            .into_iter()
            .find(|template| template.name().eq_ignore_ascii_case(name))
    }

    /// The template whose rules equal the given rule set, if any. Used to
    /// highlight the active template when rules are edited by hand.
    pub fn matching(rules: &RuleSet) -> Option<RuleTemplate> {
        Self::ALL
            .into_iter()
            .find(|template| &template.rules() == rules)
    }

    pub fn is_default(&self) -> bool {
        *self == RuleTemplate::Life
    }
}

impl Default for RuleTemplate {
    fn default() -> Self {
        RuleTemplate::Life
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_strings() {
        assert_eq!(RuleTemplate::Life.rules().to_string(), "B3/S23");
        assert_eq!(RuleTemplate::Seeds.rules().to_string(), "B2/S");
        assert_eq!(RuleTemplate::ThirtyFourLife.rules().to_string(), "B34/S34");
        assert_eq!(RuleTemplate::HighLife.rules().to_string(), "B36/S23");
    }

    #[test]
    fn test_default_template() {
        assert!(RuleTemplate::Life.is_default());
        assert!(!RuleTemplate::Seeds.is_default());
        assert_eq!(RuleTemplate::default(), RuleTemplate::Life);
    }

    #[test]
    fn test_find_by_name() {
        assert_eq!(RuleTemplate::find("Seeds"), Some(RuleTemplate::Seeds));
        assert_eq!(RuleTemplate::find("highlife"), Some(RuleTemplate::HighLife));
        assert_eq!(RuleTemplate::find("34 life"), Some(RuleTemplate::ThirtyFourLife));
        assert_eq!(RuleTemplate::find("Brian's Brain"), None);
    }

    #[test]
    fn test_matching_rule_set() {
        let edited = RuleTemplate::Life
            .rules()
            .with_born(6, true)
            .unwrap();
        assert_eq!(RuleTemplate::matching(&edited), Some(RuleTemplate::HighLife));
        let unknown = edited.with_survive(8, true).unwrap();
        assert_eq!(RuleTemplate::matching(&unknown), None);
    }

    #[test]
    fn test_rules_equality_with_parsed_strings() {
        let parsed: RuleSet = "B34/S34".parse().unwrap();
        assert_eq!(RuleTemplate::matching(&parsed), Some(RuleTemplate::ThirtyFourLife));
    }
}
