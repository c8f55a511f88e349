use crate::candle::Candle;
use crate::indicator::utils::rolling_extreme;
use crate::indicator::{IndicatorResult, TABuilder, TAs, TAsBuilder, validate_period};
use std::fmt::Display;
use std::marker::PhantomData;

/// 값 배열의 후행 롤링 최대값
///
/// 처음 `period - 1`개 위치는 `None`입니다.
pub fn rolling_max(values: &[f64], period: usize) -> Vec<Option<f64>> {
    rolling_extreme(values, period, |current, candidate| current >= candidate)
}

/// 캔들 고가의 롤링 최고가
pub fn highest<C: Candle>(data: &[C], period: usize) -> Vec<Option<f64>> {
    let highs: Vec<f64> = data.iter().map(|candle| candle.high_price()).collect();
    rolling_max(&highs, period)
}

/// 기간별 롤링 최고가 시계열
#[derive(Clone, Debug, PartialEq)]
pub struct MAX {
    period: usize,
    pub values: Vec<Option<f64>>,
}

impl MAX {
    pub fn period(&self) -> usize {
        self.period
    }

    /// 인덱스 위치의 최고가 (윈도우가 다 차지 않았거나 범위를 벗어나면 `None`)
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    /// 가장 최근 위치의 최고가
    pub fn last(&self) -> Option<f64> {
        self.values.last().copied().flatten()
    }
}

impl Display for MAX {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.last() {
            Some(max) => write!(f, "MAX({}: {})", self.period, max),
            None => write!(f, "MAX({}: -)", self.period),
        }
    }
}

#[derive(Debug)]
pub struct MAXBuilder<C: Candle> {
    period: usize,
    _phantom: PhantomData<C>,
}

impl<C> MAXBuilder<C>
where
    C: Candle,
{
    pub fn new(period: usize) -> IndicatorResult<MAXBuilder<C>> {
        validate_period("period", period)?;
        Ok(MAXBuilder {
            period,
            _phantom: PhantomData,
        })
    }

    pub fn build(&self, data: &[C]) -> MAX {
        MAX {
            period: self.period,
            values: highest(data, self.period),
        }
    }
}

impl<C> TABuilder<MAX, C> for MAXBuilder<C>
where
    C: Candle,
{
    fn build(&self, data: &[C]) -> IndicatorResult<MAX> {
        Ok(MAXBuilder::build(self, data))
    }
}

pub type MAXs = TAs<usize, MAX>;
pub type MAXsBuilder<C> = TAsBuilder<usize, MAX, C>;

pub struct MAXsBuilderFactory;

impl MAXsBuilderFactory {
    pub fn build<C: Candle + 'static>(periods: &[usize]) -> IndicatorResult<MAXsBuilder<C>> {
        MAXsBuilder::new("maxs".to_owned(), periods, |period| {
            let builder: Box<dyn TABuilder<MAX, C>> = Box::new(MAXBuilder::<C>::new(*period)?);
            Ok(builder)
        })
    }
}
