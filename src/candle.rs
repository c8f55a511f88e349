use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Debug, Display};

/// 지표 계산에 필요한 캔들(OHLCV) 인터페이스
///
/// 시세 공급자별 캔들 타입이 이 트레이트를 구현하면 그대로 지표 엔진에 넣을 수 있습니다.
pub trait Candle: Clone + PartialEq + Debug + Send + Sync {
    /// 시가
    fn open_price(&self) -> f64;
    /// 고가
    fn high_price(&self) -> f64;
    /// 저가
    fn low_price(&self) -> f64;
    /// 종가
    fn close_price(&self) -> f64;
    /// 거래량
    fn volume(&self) -> f64;
    /// 캔들 시각
    fn datetime(&self) -> DateTime<Utc>;
}

/// 하나의 시점에 대한 가격 막대
///
/// 입력 시계열은 시간 오름차순이어야 하며, 엔진은 순서를 검사하지 않고 그대로 유지합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// 시각 (RFC 3339 또는 `YYYY-MM-DD`)
    #[serde(deserialize_with = "deserialize_time")]
    pub time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PriceBar {
    /// 새 가격 막대 생성
    pub fn new(
        time: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        PriceBar {
            time,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// 임의의 캔들에서 OHLCV 필드를 그대로 복사합니다.
    ///
    /// # Arguments
    /// * `candle` - 원본 캔들
    ///
    /// # Returns
    /// * `PriceBar` - 동일한 값을 가진 가격 막대
    pub fn from_candle<C: Candle>(candle: &C) -> Self {
        PriceBar {
            time: candle.datetime(),
            open: candle.open_price(),
            high: candle.high_price(),
            low: candle.low_price(),
            close: candle.close_price(),
            volume: candle.volume(),
        }
    }
}

impl Display for PriceBar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PriceBar({}: o={}, h={}, l={}, c={}, v={})",
            self.time.format("%Y-%m-%d %H:%M:%S"),
            self.open,
            self.high,
            self.low,
            self.close,
            self.volume
        )
    }
}

impl Candle for PriceBar {
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
        self.time
    }
}

/// 시각 문자열 파싱
///
/// RFC 3339 타임스탬프를 먼저 시도하고, 실패하면 `YYYY-MM-DD` 날짜를 UTC 자정으로 해석합니다.
///
/// # Arguments
/// * `raw` - 시각 문자열
///
/// # Returns
/// * `Result<DateTime<Utc>, String>` - 파싱된 시각 또는 오류 메시지
pub fn parse_time(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Ok(datetime.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| format!("시각 형식을 해석할 수 없음: {} ({})", raw, e))?;

    date.and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("유효하지 않은 날짜: {}", raw))
}

fn deserialize_time<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_time(&raw).map_err(serde::de::Error::custom)
}
