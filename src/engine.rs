use chrono::NaiveDate;

use crate::prize_table::PrizeTable;
use crate::types::{DrawResultIndex, LotteryStatus, Pick, PickResult, WinningResult};

/// Scores picks against cached draw results. Holds no mutable state.
#[derive(Debug, Clone, Default)]
pub struct PrizeEngine {
    prize_table: PrizeTable,
}

impl PrizeEngine {
    pub fn new(prize_table: PrizeTable) -> Self {
        Self { prize_table }
    }

    pub fn prize_table(&self) -> &PrizeTable {
        &self.prize_table
    }

    pub fn evaluate(
        &self,
        picks: &[Pick],
        draw_date: NaiveDate,
        index: &DrawResultIndex,
    ) -> LotteryStatus {
        let result = index.get(&draw_date);

        let pick_results: Vec<PickResult> = picks
            .iter()
            .map(|pick| {
                let prize_amount = result.map_or(0, |result| self.prize_for_pick(pick, result));
                PickResult {
                    pick: *pick,
                    prize_amount,
                    is_win: prize_amount > 0,
                }
            })
            .collect();

        let total_prize_amount: u64 = pick_results.iter().map(|r| r.prize_amount).sum();

        LotteryStatus {
            pick_results,
            total_prize_amount,
        }
    }

    pub fn prize_for_pick(&self, pick: &Pick, result: &WinningResult) -> u64 {
        let (white_matches, red_match) = match_counts(pick, result);
        self.prize_table.amount_for(white_matches, red_match)
    }
}

/// Every white-ball position is checked on its own, so a number repeated in
/// the pick counts once per occurrence.
pub fn match_counts(pick: &Pick, result: &WinningResult) -> (u8, bool) {
    let white_matches = pick
        .white_balls()
        .iter()
        .filter(|number| result.has_white_ball(**number))
        .count() as u8;

    (white_matches, pick.red_ball() == result.red_ball)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prize_table::{DEFAULT_PRIZE_RULES, PrizeRule};
    use std::collections::HashSet;

    fn draw_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 5, 15).unwrap()
    }

    fn index() -> DrawResultIndex {
        let mut index = DrawResultIndex::new();
        index.insert(
            draw_date(),
            WinningResult {
                white_balls: HashSet::from([4, 10, 37, 39, 69]),
                red_ball: 24,
            },
        );
        index
    }

    #[test]
    fn four_whites_and_red_pays_fifty_thousand() {
        let engine = PrizeEngine::default();
        let status = engine.evaluate(&[Pick::new([4, 10, 37, 39, 1, 24])], draw_date(), &index());

        assert_eq!(status.pick_results[0].prize_amount, 50_000);
        assert!(status.pick_results[0].is_win);
        assert_eq!(status.total_prize_amount, 50_000);
    }

    #[test]
    fn uncached_draw_date_never_wins() {
        let engine = PrizeEngine::default();
        let other_date = NaiveDate::from_ymd_opt(2021, 5, 19).unwrap();
        let picks = [
            Pick::new([1, 2, 3, 4, 5, 6]),
            Pick::new([4, 10, 37, 39, 69, 24]),
        ];

        let status = engine.evaluate(&picks, other_date, &index());

        assert!(status.pick_results.iter().all(|r| r.prize_amount == 0 && !r.is_win));
        assert_eq!(status.total_prize_amount, 0);
    }

    #[test]
    fn empty_index_pays_nothing() {
        let engine = PrizeEngine::default();
        let status = engine.evaluate(
            &[Pick::new([1, 2, 3, 4, 5, 6])],
            draw_date(),
            &DrawResultIndex::new(),
        );

        assert_eq!(status.pick_results[0].prize_amount, 0);
        assert!(!status.pick_results[0].is_win);
    }

    #[test]
    fn repeated_numbers_in_pick_count_per_position() {
        let result = WinningResult {
            white_balls: HashSet::from([4, 10, 37, 39, 69]),
            red_ball: 24,
        };
        let pick = Pick::new([4, 4, 4, 1, 2, 3]);

        assert_eq!(match_counts(&pick, &result), (3, false));
    }

    #[test]
    fn red_ball_is_not_counted_as_white() {
        let result = WinningResult {
            white_balls: HashSet::from([4, 10, 37, 39, 24]),
            red_ball: 24,
        };
        let pick = Pick::new([1, 2, 3, 5, 6, 24]);

        assert_eq!(match_counts(&pick, &result), (0, true));
    }

    #[test]
    fn total_is_sum_and_order_is_kept() {
        let engine = PrizeEngine::default();
        let picks = [
            Pick::new([4, 10, 37, 39, 69, 24]),
            Pick::new([1, 2, 3, 5, 6, 24]),
            Pick::new([1, 2, 3, 5, 6, 7]),
            Pick::new([4, 10, 37, 1, 2, 3]),
        ];

        let status = engine.evaluate(&picks, draw_date(), &index());

        let amounts: Vec<u64> = status.pick_results.iter().map(|r| r.prize_amount).collect();
        assert_eq!(amounts, vec![2_000_000, 4, 0, 7]);
        assert_eq!(status.total_prize_amount, amounts.iter().sum::<u64>());
        let returned: Vec<Pick> = status.pick_results.iter().map(|r| r.pick).collect();
        assert_eq!(returned, picks.to_vec());
    }

    #[test]
    fn no_picks_total_zero() {
        let status = PrizeEngine::default().evaluate(&[], draw_date(), &index());
        assert!(status.pick_results.is_empty());
        assert_eq!(status.total_prize_amount, 0);
    }

    #[test]
    fn payouts_always_come_from_the_table() {
        let engine = PrizeEngine::default();
        let allowed: HashSet<u64> = DEFAULT_PRIZE_RULES
            .iter()
            .map(|rule| rule.amount)
            .chain(std::iter::once(0))
            .collect();

        let mut picks = Vec::new();
        for white in [4u8, 10, 37, 39, 69, 1, 2] {
            for red in [24u8, 1] {
                picks.push(Pick::new([white, 10, 37, 3, 5, red]));
                picks.push(Pick::new([white, white, 2, 3, 5, red]));
            }
        }

        let status = engine.evaluate(&picks, draw_date(), &index());
        assert!(status
            .pick_results
            .iter()
            .all(|r| allowed.contains(&r.prize_amount)));
    }

    #[test]
    fn evaluate_is_repeatable() {
        let engine = PrizeEngine::default();
        let picks = [
            Pick::new([4, 10, 37, 39, 1, 24]),
            Pick::new([1, 2, 3, 4, 5, 6]),
        ];
        let index = index();

        let first = engine.evaluate(&picks, draw_date(), &index);
        let second = engine.evaluate(&picks, draw_date(), &index);
        assert_eq!(first, second);
    }

    #[test]
    fn custom_prize_table_is_used() {
        let table = PrizeTable::new(vec![PrizeRule::new(0, false, 1)]).unwrap();
        let engine = PrizeEngine::new(table);

        let status = engine.evaluate(&[Pick::new([1, 2, 3, 5, 6, 7])], draw_date(), &index());
        assert_eq!(status.total_prize_amount, 1);

        let status = engine.evaluate(&[Pick::new([4, 10, 37, 39, 69, 24])], draw_date(), &index());
        assert_eq!(status.total_prize_amount, 0);
    }
}
