use chrono::NaiveDate;

use crate::types::{LotteryTicketRequest, PICK_LENGTH, Pick, WHITE_BALL_COUNT};
use crate::utils::{is_draw_day, parse_draw_date};

pub const WHITE_BALL_MIN: i64 = 1;
pub const WHITE_BALL_MAX: i64 = 69;
pub const RED_BALL_MIN: i64 = 1;
pub const RED_BALL_MAX: i64 = 26;

pub const ERROR_VALIDATION_FAILED: &str = "ValidationFailed";
pub const CODE_INVALID_INPUT: &str = "INVALID_INPUT";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct ValidationError {
    pub code: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self {
            code: CODE_INVALID_INPUT,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            code: ERROR_VALIDATION_FAILED,
            message: message.into(),
        }
    }
}

/// A ticket that passed validation and can be scored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidTicket {
    pub draw_date: NaiveDate,
    pub picks: Vec<Pick>,
}

/// Returns the first problem found.
pub fn validate_ticket(
    ticket: &LotteryTicketRequest,
    max_picks: usize,
) -> Result<ValidTicket, ValidationError> {
    let raw_date = ticket
        .draw_date
        .as_deref()
        .ok_or_else(|| ValidationError::invalid_input("drawDate is required"))?;
    let raw_picks = ticket
        .picks
        .as_ref()
        .ok_or_else(|| ValidationError::invalid_input("picks is required"))?;

    let draw_date = parse_draw_date(raw_date).ok_or_else(|| {
        ValidationError::invalid_input(format!("drawDate '{}' is not a YYYY-MM-DD date", raw_date))
    })?;
    if !is_draw_day(draw_date) {
        return Err(ValidationError::failed(
            "drawDate must fall on a Wednesday or Saturday",
        ));
    }

    if raw_picks.is_empty() || raw_picks.len() > max_picks {
        return Err(ValidationError::invalid_input(format!(
            "between 1 and {} picks are allowed, got {}",
            max_picks,
            raw_picks.len()
        )));
    }
    if let Some(pick) = raw_picks.iter().find(|pick| pick.len() != PICK_LENGTH) {
        return Err(ValidationError::invalid_input(format!(
            "each pick must contain {} numbers, got {}",
            PICK_LENGTH,
            pick.len()
        )));
    }

    let picks = raw_picks
        .iter()
        .map(|pick| validate_pick(pick))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ValidTicket { draw_date, picks })
}

fn validate_pick(numbers: &[i64]) -> Result<Pick, ValidationError> {
    let mut pick = [0u8; PICK_LENGTH];

    for (slot, &number) in pick.iter_mut().zip(numbers).take(WHITE_BALL_COUNT) {
        if !(WHITE_BALL_MIN..=WHITE_BALL_MAX).contains(&number) {
            return Err(ValidationError::failed("Invalid whiteball number in pick"));
        }
        *slot = number as u8;
    }

    let red = numbers[WHITE_BALL_COUNT];
    if !(RED_BALL_MIN..=RED_BALL_MAX).contains(&red) {
        return Err(ValidationError::failed("Invalid redball number in pick"));
    }
    pick[WHITE_BALL_COUNT] = red as u8;

    Ok(Pick::new(pick))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(draw_date: &str, picks: Vec<Vec<i64>>) -> LotteryTicketRequest {
        LotteryTicketRequest {
            draw_date: Some(draw_date.to_string()),
            picks: Some(picks),
        }
    }

    #[test]
    fn accepts_valid_ticket() {
        let valid = validate_ticket(&ticket("2021-05-15", vec![vec![4, 10, 37, 39, 1, 24]]), 10).unwrap();
        assert_eq!(valid.draw_date, NaiveDate::from_ymd_opt(2021, 5, 15).unwrap());
        assert_eq!(valid.picks, vec![Pick::new([4, 10, 37, 39, 1, 24])]);
    }

    #[test]
    fn rejects_out_of_range_white_ball() {
        let err = validate_ticket(&ticket("2021-05-15", vec![vec![70, 10, 37, 39, 1, 24]]), 10).unwrap_err();
        assert_eq!(err.code, ERROR_VALIDATION_FAILED);
        assert_eq!(err.message, "Invalid whiteball number in pick");

        let err = validate_ticket(&ticket("2021-05-15", vec![vec![0, 10, 37, 39, 1, 24]]), 10).unwrap_err();
        assert_eq!(err.message, "Invalid whiteball number in pick");
    }

    #[test]
    fn rejects_out_of_range_red_ball() {
        let err = validate_ticket(&ticket("2021-05-15", vec![vec![4, 10, 37, 39, 1, 27]]), 10).unwrap_err();
        assert_eq!(err.code, ERROR_VALIDATION_FAILED);
        assert_eq!(err.message, "Invalid redball number in pick");
    }

    #[test]
    fn red_ball_range_is_narrower_than_white() {
        assert!(validate_ticket(&ticket("2021-05-15", vec![vec![69, 68, 67, 66, 65, 26]]), 10).is_ok());
        assert!(validate_ticket(&ticket("2021-05-15", vec![vec![69, 68, 67, 66, 65, 30]]), 10).is_err());
    }

    #[test]
    fn rejects_wrong_pick_shape() {
        let err = validate_ticket(&ticket("2021-05-15", vec![vec![1, 2, 3, 4, 5]]), 10).unwrap_err();
        assert_eq!(err.code, CODE_INVALID_INPUT);

        let err = validate_ticket(&ticket("2021-05-15", vec![]), 10).unwrap_err();
        assert_eq!(err.code, CODE_INVALID_INPUT);

        let too_many = vec![vec![1, 2, 3, 4, 5, 6]; 3];
        let err = validate_ticket(&ticket("2021-05-15", too_many), 2).unwrap_err();
        assert_eq!(err.code, CODE_INVALID_INPUT);
    }

    #[test]
    fn rejects_bad_draw_dates() {
        let picks = vec![vec![1, 2, 3, 4, 5, 6]];

        let err = validate_ticket(&ticket("2021-05-14", picks.clone()), 10).unwrap_err();
        assert_eq!(err.code, ERROR_VALIDATION_FAILED);

        let err = validate_ticket(&ticket("15-05-2021", picks.clone()), 10).unwrap_err();
        assert_eq!(err.code, CODE_INVALID_INPUT);

        let missing = LotteryTicketRequest {
            draw_date: None,
            picks: Some(picks),
        };
        assert_eq!(validate_ticket(&missing, 10).unwrap_err().code, CODE_INVALID_INPUT);
    }

    #[test]
    fn error_displays_code_and_message() {
        let err = validate_ticket(&ticket("2021-05-15", vec![vec![4, 10, 37, 39, 1, 27]]), 10).unwrap_err();
        assert_eq!(err.to_string(), "ValidationFailed: Invalid redball number in pick");
    }
}
