use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Number of white balls drawn (and picked) per ticket line.
pub const WHITE_BALL_COUNT: usize = 5;
pub const PICK_LENGTH: usize = WHITE_BALL_COUNT + 1;

/// One ticket line: five white balls followed by the red ball.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Pick([u8; PICK_LENGTH]);

impl Pick {
    pub fn new(numbers: [u8; PICK_LENGTH]) -> Self {
        Self(numbers)
    }

    pub fn white_balls(&self) -> &[u8] {
        &self.0[..WHITE_BALL_COUNT]
    }

    pub fn red_ball(&self) -> u8 {
        self.0[WHITE_BALL_COUNT]
    }

    pub fn numbers(&self) -> &[u8; PICK_LENGTH] {
        &self.0
    }
}

/// Winning numbers of a single draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WinningResult {
    pub white_balls: HashSet<u8>,
    pub red_ball: u8,
}

impl WinningResult {
    pub fn has_white_ball(&self, number: u8) -> bool {
        self.white_balls.contains(&number)
    }
}

/// Draw date -> winning numbers. A missing date simply means nothing is cached for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawResultIndex {
    results: HashMap<NaiveDate, WinningResult>,
}

impl DrawResultIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a result, replacing any earlier one for the same date.
    pub fn insert(&mut self, draw_date: NaiveDate, result: WinningResult) {
        self.results.insert(draw_date, result);
    }

    pub fn get(&self, draw_date: &NaiveDate) -> Option<&WinningResult> {
        self.results.get(draw_date)
    }

    pub fn contains(&self, draw_date: &NaiveDate) -> bool {
        self.results.contains_key(draw_date)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn latest_draw_date(&self) -> Option<NaiveDate> {
        self.results.keys().max().copied()
    }
}

/// A draw as delivered by the public data source.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDrawRecord {
    pub draw_date: String,
    pub winning_numbers: String,
    #[serde(default)]
    pub multiplier: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PickResult {
    pub pick: Pick,
    pub prize_amount: u64,
    pub is_win: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LotteryStatus {
    pub pick_results: Vec<PickResult>,
    pub total_prize_amount: u64,
}

/// Ticket as received from a client, before validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LotteryTicketRequest {
    pub draw_date: Option<String>,
    pub picks: Option<Vec<Vec<i64>>>,
}
