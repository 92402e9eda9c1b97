//! Tokenizer for the `winning_numbers` field of a draw record.
//!
//! Grammar:
//!
//! ```text
//! winning_numbers = ws* number (ws+ number){5} (ws+ multiplier)? ws*
//! number          = digit+
//! multiplier      = digit+
//! ```
//!
//! The first five numbers are the white balls and must be distinct, the
//! sixth is the red ball. A trailing multiplier is checked to be numeric and
//! then ignored. Anything else is rejected.

use std::collections::HashSet;

use crate::types::{PICK_LENGTH, WHITE_BALL_COUNT, WinningResult};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum WinningNumbersError {
    #[error("expected 6 numbers and an optional multiplier, found {0} tokens")]
    WrongTokenCount(usize),
    #[error("'{0}' is not a ball number")]
    InvalidNumber(String),
    #[error("white ball {0} appears more than once")]
    DuplicateWhiteBall(u8),
}

pub fn parse_winning_numbers(text: &str) -> Result<WinningResult, WinningNumbersError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() != PICK_LENGTH && tokens.len() != PICK_LENGTH + 1 {
        return Err(WinningNumbersError::WrongTokenCount(tokens.len()));
    }

    if let Some(multiplier) = tokens.get(PICK_LENGTH) {
        parse_ball(multiplier)?;
    }

    let numbers = tokens[..PICK_LENGTH]
        .iter()
        .map(|token| parse_ball(token))
        .collect::<Result<Vec<u8>, _>>()?;

    let mut white_balls = HashSet::with_capacity(WHITE_BALL_COUNT);
    for &number in &numbers[..WHITE_BALL_COUNT] {
        if !white_balls.insert(number) {
            return Err(WinningNumbersError::DuplicateWhiteBall(number));
        }
    }

    Ok(WinningResult {
        white_balls,
        red_ball: numbers[WHITE_BALL_COUNT],
    })
}

fn parse_ball(token: &str) -> Result<u8, WinningNumbersError> {
    if !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(WinningNumbersError::InvalidNumber(token.to_string()));
    }
    token
        .parse::<u8>()
        .map_err(|_| WinningNumbersError::InvalidNumber(token.to_string()))
}
