#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use ichimoku_cloud::candle::{Candle, PriceBar};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestCandle {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle for TestCandle {
    fn open_price(&self) -> f64 {
        self.open
    }
    fn high_price(&self) -> f64 {
        self.high
    }
    fn low_price(&self) -> f64 {
        self.low
    }
    fn close_price(&self) -> f64 {
        self.close
    }
    fn volume(&self) -> f64 {
        self.volume
    }
    fn datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.timestamp, 0).unwrap_or_default()
    }
}

impl TestCandle {
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        TestCandle {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

pub fn create_uptrend_candles(count: usize, base_price: f64, step: f64) -> Vec<TestCandle> {
    (0..count)
        .map(|i| {
            let price = base_price + (i as f64 * step);
            TestCandle {
                timestamp: i as i64,
                open: price - step / 2.0,
                high: price + step,
                low: price - step,
                close: price + step / 2.0,
                volume: 1000.0,
            }
        })
        .collect()
}

pub fn create_downtrend_candles(count: usize, base_price: f64, step: f64) -> Vec<TestCandle> {
    (0..count)
        .map(|i| {
            let price = base_price - (i as f64 * step);
            TestCandle {
                timestamp: i as i64,
                open: price + step / 2.0,
                high: price + step,
                low: price - step,
                close: price - step / 2.0,
                volume: 1000.0,
            }
        })
        .collect()
}

/// 2024-01-01부터 하루 간격의 가격 막대 생성
pub fn create_daily_bars(prices: &[(f64, f64, f64)]) -> Vec<PriceBar> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    prices
        .iter()
        .enumerate()
        .map(|(i, &(high, low, close))| {
            PriceBar::new(
                start + Duration::days(i as i64),
                close,
                high,
                low,
                close,
                1_000.0 + i as f64,
            )
        })
        .collect()
}

/// 고가 110, 저가 90, 종가 100으로 고정된 평탄한 일봉
pub fn create_flat_bars(count: usize) -> Vec<PriceBar> {
    create_daily_bars(&vec![(110.0, 90.0, 100.0); count])
}

/// 사인파 형태로 출렁이는 일봉 (고가/저가 폭이 일정하지 않음)
pub fn create_wave_bars(count: usize) -> Vec<PriceBar> {
    let prices: Vec<(f64, f64, f64)> = (0..count)
        .map(|i| {
            let x = i as f64;
            let close = 100.0 + 10.0 * (x / 5.0).sin() + x * 0.1;
            let spread = 1.0 + (i % 7) as f64 * 0.5;
            (close + spread, close - spread * 0.8, close)
        })
        .collect();
    create_daily_bars(&prices)
}
