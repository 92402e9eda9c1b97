pub mod api;
pub mod clock;
pub mod config;
pub mod draw_cache;
pub mod engine;
pub mod mcp_handler;
pub mod prize_table;
pub mod types;
pub mod use_cases;
pub mod utils;
pub mod validation;
pub mod winning_numbers;

pub use api::{DrawDataSource, NyOpenDataSource};
pub use clock::{Clock, SystemClock};
pub use draw_cache::{CacheState, DrawResultCache, Freshness};
pub use engine::PrizeEngine;
pub use prize_table::{PrizeRule, PrizeTable};
pub use types::*;
