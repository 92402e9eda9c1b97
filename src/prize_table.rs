use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::types::WHITE_BALL_COUNT;

pub const GRAND_PRIZE: u64 = 2_000_000;

/// Payout for one combination of white-ball matches and red-ball match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrizeRule {
    pub white_match_count: u8,
    pub red_match: bool,
    pub amount: u64,
}

impl PrizeRule {
    pub const fn new(white_match_count: u8, red_match: bool, amount: u64) -> Self {
        Self {
            white_match_count,
            red_match,
            amount,
        }
    }
}

pub const DEFAULT_PRIZE_RULES: [PrizeRule; 9] = [
    PrizeRule::new(5, true, GRAND_PRIZE),
    PrizeRule::new(5, false, 1_000_000),
    PrizeRule::new(4, true, 50_000),
    PrizeRule::new(4, false, 100),
    PrizeRule::new(3, true, 100),
    PrizeRule::new(3, false, 7),
    PrizeRule::new(2, true, 7),
    PrizeRule::new(1, true, 4),
    PrizeRule::new(0, true, 4),
];

/// Lookup from (white matches, red match) to payout. Combinations without a rule pay nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrizeTable {
    rules: Vec<PrizeRule>,
    amounts: HashMap<(u8, bool), u64>,
}

impl PrizeTable {
    /// Builds the table; a later rule for the same combination replaces an earlier one.
    pub fn new(rules: Vec<PrizeRule>) -> Result<Self> {
        let mut amounts = HashMap::with_capacity(rules.len());
        for rule in &rules {
            if rule.white_match_count as usize > WHITE_BALL_COUNT {
                anyhow::bail!(
                    "prize rule has {} white matches, at most {} are possible",
                    rule.white_match_count,
                    WHITE_BALL_COUNT
                );
            }
            amounts.insert((rule.white_match_count, rule.red_match), rule.amount);
        }
        Ok(Self { rules, amounts })
    }

    /// Reads a JSON array of prize rules.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading prize table {}", path.display()))?;
        Self::from_json_str(&raw).with_context(|| format!("parsing prize table {}", path.display()))
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let rules: Vec<PrizeRule> = serde_json::from_str(raw)?;
        Self::new(rules)
    }

    pub fn amount_for(&self, white_match_count: u8, red_match: bool) -> u64 {
        self.amounts
            .get(&(white_match_count, red_match))
            .copied()
            .unwrap_or(0)
    }

    pub fn rules(&self) -> &[PrizeRule] {
        &self.rules
    }
}

impl Default for PrizeTable {
    fn default() -> Self {
        let rules = DEFAULT_PRIZE_RULES.to_vec();
        let amounts = rules
            .iter()
            .map(|rule| ((rule.white_match_count, rule.red_match), rule.amount))
            .collect();
        Self { rules, amounts }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_matches_published_payouts() {
        let table = PrizeTable::default();
        assert_eq!(table.amount_for(5, true), 2_000_000);
        assert_eq!(table.amount_for(5, false), 1_000_000);
        assert_eq!(table.amount_for(4, true), 50_000);
        assert_eq!(table.amount_for(4, false), 100);
        assert_eq!(table.amount_for(3, true), 100);
        assert_eq!(table.amount_for(3, false), 7);
        assert_eq!(table.amount_for(2, true), 7);
        assert_eq!(table.amount_for(1, true), 4);
        assert_eq!(table.amount_for(0, true), 4);
    }

    #[test]
    fn missing_combinations_pay_nothing() {
        let table = PrizeTable::default();
        assert_eq!(table.amount_for(2, false), 0);
        assert_eq!(table.amount_for(1, false), 0);
        assert_eq!(table.amount_for(0, false), 0);
    }

    #[test]
    fn custom_rules_replace_defaults() {
        let table = PrizeTable::new(vec![
            PrizeRule::new(5, true, 10),
            PrizeRule::new(5, true, 20),
        ])
        .unwrap();
        assert_eq!(table.amount_for(5, true), 20);
        assert_eq!(table.amount_for(4, true), 0);
    }

    #[test]
    fn rejects_impossible_match_counts() {
        assert!(PrizeTable::new(vec![PrizeRule::new(6, true, 1)]).is_err());
    }

    #[test]
    fn parses_json_rules() {
        let table = PrizeTable::from_json_str(
            r#"[{"whiteMatchCount": 3, "redMatch": false, "amount": 9}]"#,
        )
        .unwrap();
        assert_eq!(table.amount_for(3, false), 9);
        assert_eq!(table.rules().len(), 1);
    }
}
