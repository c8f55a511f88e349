use crate::candle::Candle;
use crate::indicator::utils::rolling_extreme;
use crate::indicator::{IndicatorResult, TABuilder, TAs, TAsBuilder, validate_period};
use std::fmt::Display;
use std::marker::PhantomData;

/// 값 배열의 후행 롤링 최소값
///
/// 처음 `period - 1`개 위치는 `None`입니다.
pub fn rolling_min(values: &[f64], period: usize) -> Vec<Option<f64>> {
    rolling_extreme(values, period, |current, candidate| current <= candidate)
}

/// 캔들 저가의 롤링 최저가
pub fn lowest<C: Candle>(data: &[C], period: usize) -> Vec<Option<f64>> {
    let lows: Vec<f64> = data.iter().map(|candle| candle.low_price()).collect();
    rolling_min(&lows, period)
}

/// 기간별 롤링 최저가 시계열
#[derive(Clone, Debug, PartialEq)]
pub struct MIN {
    period: usize,
    pub values: Vec<Option<f64>>,
}

impl MIN {
    pub fn period(&self) -> usize {
        self.period
    }

    /// 인덱스 위치의 최저가 (윈도우가 다 차지 않았거나 범위를 벗어나면 `None`)
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    /// 가장 최근 위치의 최저가
    pub fn last(&self) -> Option<f64> {
        self.values.last().copied().flatten()
    }
}

impl Display for MIN {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.last() {
            Some(min) => write!(f, "MIN({}: {})", self.period, min),
            None => write!(f, "MIN({}: -)", self.period),
        }
    }
}

#[derive(Debug)]
pub struct MINBuilder<C: Candle> {
    period: usize,
    _phantom: PhantomData<C>,
}

impl<C> MINBuilder<C>
where
    C: Candle,
{
    pub fn new(period: usize) -> IndicatorResult<MINBuilder<C>> {
        validate_period("period", period)?;
        Ok(MINBuilder {
            period,
            _phantom: PhantomData,
        })
    }

    pub fn build(&self, data: &[C]) -> MIN {
        MIN {
            period: self.period,
            values: lowest(data, self.period),
        }
    }
}

impl<C> TABuilder<MIN, C> for MINBuilder<C>
where
    C: Candle,
{
    fn build(&self, data: &[C]) -> IndicatorResult<MIN> {
        Ok(MINBuilder::build(self, data))
    }
}

pub type MINs = TAs<usize, MIN>;
pub type MINsBuilder<C> = TAsBuilder<usize, MIN, C>;

pub struct MINsBuilderFactory;

impl MINsBuilderFactory {
    pub fn build<C: Candle + 'static>(periods: &[usize]) -> IndicatorResult<MINsBuilder<C>> {
        MINsBuilder::new("mins".to_owned(), periods, |period| {
            let builder: Box<dyn TABuilder<MIN, C>> = Box::new(MINBuilder::<C>::new(*period)?);
            Ok(builder)
        })
    }
}
