use anyhow::Result;
use chrono::NaiveDate;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use crate::draw_cache::DrawResultCache;
use crate::engine::PrizeEngine;
use crate::types::{DrawResultIndex, LotteryStatus, LotteryTicketRequest, Pick};
use crate::utils::{format_draw_date, parse_draw_date};
use crate::validation::{ValidationError, validate_ticket};

pub struct LotteryUseCase {
    cache: Arc<DrawResultCache>,
    engine: PrizeEngine,
    max_picks: usize,
}

impl LotteryUseCase {
    pub fn new(cache: Arc<DrawResultCache>, engine: PrizeEngine, max_picks: usize) -> Self {
        Self {
            cache,
            engine,
            max_picks,
        }
    }

    /// Scores already-validated picks. A draw date with no cached result pays nothing.
    pub async fn evaluate_lottery_status(
        &self,
        picks: &[Pick],
        draw_date: NaiveDate,
    ) -> LotteryStatus {
        let index = self.cache.current_index().await.unwrap_or_default();
        self.engine.evaluate(picks, draw_date, &index)
    }

    pub async fn get_lottery_status(&self, arguments: &HashMap<String, Value>) -> Result<String> {
        let ticket = arguments
            .get("lotteryTicket")
            .ok_or_else(|| anyhow::anyhow!("Missing lotteryTicket parameter"))?;
        let ticket: LotteryTicketRequest = serde_json::from_value(ticket.clone())
            .map_err(|e| ValidationError::invalid_input(format!("malformed lotteryTicket: {}", e)))?;

        let ticket = validate_ticket(&ticket, self.max_picks)?;
        let status = self.evaluate_lottery_status(&ticket.picks, ticket.draw_date).await;

        info!(
            "checked {} picks for {}: total prize {}",
            ticket.picks.len(),
            format_draw_date(ticket.draw_date),
            status.total_prize_amount
        );

        Ok(json!({ "lotteryStatus": status }).to_string())
    }

    pub async fn get_draw_result(&self, arguments: &HashMap<String, Value>) -> Result<String> {
        let date = arguments
            .get("date")
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow::anyhow!("Missing date parameter"))?;
        let draw_date =
            parse_draw_date(date).ok_or_else(|| anyhow::anyhow!("Invalid date: {}", date))?;

        let index: Arc<DrawResultIndex> = self.cache.current_index().await.unwrap_or_default();
        let result = index.get(&draw_date).map(|result| {
            let mut white_balls: Vec<u8> = result.white_balls.iter().copied().collect();
            white_balls.sort_unstable();
            json!({
                "whiteBalls": white_balls,
                "redBall": result.red_ball,
            })
        });

        Ok(json!({
            "success": true,
            "drawDate": format_draw_date(draw_date),
            "result": result
        })
        .to_string())
    }

    pub async fn get_prize_table(&self, _arguments: &HashMap<String, Value>) -> Result<String> {
        Ok(json!({
            "success": true,
            "rules": self.engine.prize_table().rules()
        })
        .to_string())
    }
}
