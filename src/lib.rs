pub mod candle;
pub mod candle_store;
pub mod config;
pub mod indicator;

/// 설정 로더
pub mod config_loader;

pub use candle::{Candle, PriceBar};
pub use indicator::ichimoku::{IchimokuParams, IchimokuPoint, compute};
pub use indicator::{IndicatorError, IndicatorResult};
