use crate::candle::{Candle, PriceBar};
use crate::config_loader::{ConfigError, ConfigResult, ConfigValidation};
use crate::indicator::max::highest;
use crate::indicator::min::lowest;
use crate::indicator::utils::{midpoint, shift_backward, shift_forward};
use crate::indicator::{
    IndicatorError, IndicatorResult, TABuilder, TAs, TAsBuilder, validate_period,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::marker::PhantomData;

/// 일목균형표 매개변수
///
/// 설정 파일에서 빠진 항목은 관례적인 기본값(9, 26, 26, 52, 26)으로 채워집니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct IchimokuParams {
    /// 전환선(Tenkan-sen) 기간
    pub conversion_len: usize,
    /// 기준선(Kijun-sen) 기간
    pub base_len: usize,
    /// 후행스팬(Chikou Span)을 과거로 옮기는 칸 수
    pub lagging_len: usize,
    /// 선행스팬 B(Senkou Span B) 기간
    pub leading_span_b_len: usize,
    /// 선행스팬 A/B를 미래로 옮기는 칸 수
    pub cloud_shift: usize,
}

impl Default for IchimokuParams {
    fn default() -> Self {
        IchimokuParams {
            conversion_len: 9,
            base_len: 26,
            lagging_len: 26,
            leading_span_b_len: 52,
            cloud_shift: 26,
        }
    }
}

impl Display for IchimokuParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Ichimoku({},{},{},{},{})",
            self.conversion_len,
            self.base_len,
            self.lagging_len,
            self.leading_span_b_len,
            self.cloud_shift
        )
    }
}

impl IchimokuParams {
    /// 모든 기간 매개변수가 1 이상인지 검사
    ///
    /// # Returns
    /// * `IndicatorResult<()>` - 첫 번째로 잘못된 매개변수의 이름을 담은 오류
    pub fn validate(&self) -> IndicatorResult<()> {
        validate_period("conversion_len", self.conversion_len)?;
        validate_period("base_len", self.base_len)?;
        validate_period("lagging_len", self.lagging_len)?;
        validate_period("leading_span_b_len", self.leading_span_b_len)?;
        validate_period("cloud_shift", self.cloud_shift)?;
        Ok(())
    }
}

impl ConfigValidation for IchimokuParams {
    fn validate(&self) -> ConfigResult<()> {
        IchimokuParams::validate(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

/// 구름(Kumo)의 방향
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cloud {
    /// 선행스팬 A > 선행스팬 B
    Bullish,
    /// 선행스팬 A <= 선행스팬 B
    Bearish,
}

/// 한 시점의 일목균형표 값
///
/// 원본 가격 막대를 그대로 담고, 각 지표는 값이 아직 없으면 `None`입니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IchimokuPoint {
    #[serde(flatten)]
    pub bar: PriceBar,
    /// 전환선
    pub tenkan_sen: Option<f64>,
    /// 기준선
    pub kijun_sen: Option<f64>,
    /// 선행스팬 A (cloud_shift 칸 앞에서 계산된 값)
    pub senkou_span_a: Option<f64>,
    /// 선행스팬 B (cloud_shift 칸 앞에서 계산된 값)
    pub senkou_span_b: Option<f64>,
    /// 후행스팬 (lagging_len 칸 뒤의 종가)
    pub chikou_span: Option<f64>,
}

impl IchimokuPoint {
    pub fn time(&self) -> DateTime<Utc> {
        self.bar.time
    }

    /// 구름 방향, 선행스팬 중 하나라도 없으면 `None`
    pub fn cloud(&self) -> Option<Cloud> {
        let (span_a, span_b) = (self.senkou_span_a?, self.senkou_span_b?);
        if span_a > span_b {
            Some(Cloud::Bullish)
        } else {
            Some(Cloud::Bearish)
        }
    }

    /// 구름 두께 (선행스팬 A - 선행스팬 B)
    ///
    /// 양수면 상승 구름, 음수면 하락 구름입니다.
    pub fn cloud_thickness(&self) -> Option<f64> {
        Some(self.senkou_span_a? - self.senkou_span_b?)
    }

    /// 가격이 구름 위에 있는지 확인 (구름이 없으면 false)
    pub fn is_price_above_cloud(&self, price: f64) -> bool {
        match (self.senkou_span_a, self.senkou_span_b) {
            (Some(a), Some(b)) => price > a && price > b,
            _ => false,
        }
    }

    /// 가격이 구름 아래에 있는지 확인 (구름이 없으면 false)
    pub fn is_price_below_cloud(&self, price: f64) -> bool {
        match (self.senkou_span_a, self.senkou_span_b) {
            (Some(a), Some(b)) => price < a && price < b,
            _ => false,
        }
    }

    /// 가격이 구름 안에 있는지 확인 (구름이 없으면 false)
    pub fn is_price_in_cloud(&self, price: f64) -> bool {
        self.cloud().is_some()
            && !self.is_price_above_cloud(price)
            && !self.is_price_below_cloud(price)
    }

    pub fn is_tenkan_above_kijun(&self) -> bool {
        matches!((self.tenkan_sen, self.kijun_sen), (Some(t), Some(k)) if t > k)
    }

    pub fn is_tenkan_below_kijun(&self) -> bool {
        matches!((self.tenkan_sen, self.kijun_sen), (Some(t), Some(k)) if t < k)
    }
}

impl Display for IchimokuPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn value(v: Option<f64>) -> String {
            v.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v))
        }

        write!(
            f,
            "Ichimoku({}: T:{}, K:{}, SpA:{}, SpB:{}, C:{})",
            self.bar.time.format("%Y-%m-%d"),
            value(self.tenkan_sen),
            value(self.kijun_sen),
            value(self.senkou_span_a),
            value(self.senkou_span_b),
            value(self.chikou_span)
        )
    }
}

/// 입력 시계열 전체에 대한 일목균형표 결과
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IchimokuSeries {
    params: IchimokuParams,
    points: Vec<IchimokuPoint>,
}

impl IchimokuSeries {
    pub fn params(&self) -> &IchimokuParams {
        &self.params
    }

    /// 입력과 같은 순서, 같은 길이의 시점별 결과
    pub fn points(&self) -> &[IchimokuPoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<IchimokuPoint> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&IchimokuPoint> {
        self.points.get(index)
    }

    /// 가장 최근 시점
    pub fn last(&self) -> Option<&IchimokuPoint> {
        self.points.last()
    }
}

impl Display for IchimokuSeries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.last() {
            Some(point) => write!(f, "{} x{} -> {}", self.params, self.len(), point),
            None => write!(f, "{} x0", self.params),
        }
    }
}

/// 기간 동안의 최고가와 최저가의 중간값 시계열
fn donchian_midpoint<C: Candle>(data: &[C], period: usize) -> Vec<Option<f64>> {
    highest(data, period)
        .into_iter()
        .zip(lowest(data, period))
        .map(|(high, low)| midpoint(high, low))
        .collect()
}

/// 계산에 쓰이는 가격 필드가 모두 유한한 수인지 검사
fn validate_bars<C: Candle>(bars: &[C]) -> IndicatorResult<()> {
    for (index, bar) in bars.iter().enumerate() {
        let fields = [
            ("open", bar.open_price()),
            ("high", bar.high_price()),
            ("low", bar.low_price()),
            ("close", bar.close_price()),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                log::warn!("유효하지 않은 가격: index={}, {}={}", index, field, value);
                return Err(IndicatorError::InvalidInput(format!(
                    "{}번째 막대({})의 {} 값이 유한한 수가 아닙니다: {}",
                    index,
                    bar.datetime(),
                    field,
                    value
                )));
            }
        }
    }
    Ok(())
}

/// 일목균형표 계산
///
/// 결과는 입력과 길이와 순서가 같습니다. 선행스팬은 `cloud_shift`칸 앞으로,
/// 후행스팬은 `lagging_len`칸 뒤로 옮겨진 값이며, 배열 밖으로 밀려난 값은 버려집니다.
/// 윈도우가 다 차지 않았거나 이동으로 값이 없는 위치는 오류가 아니라 `None`입니다.
///
/// # Arguments
/// * `bars` - 시간 오름차순 캔들 슬라이스
/// * `params` - 일목균형표 매개변수
///
/// # Returns
/// * `IndicatorResult<Vec<IchimokuPoint>>` - 시점별 결과
///
/// # Errors
/// * 기간 매개변수가 0이거나, 가격 필드가 `NaN`/무한대인 막대가 있으면 `InvalidInput`
pub fn compute<C: Candle>(
    bars: &[C],
    params: &IchimokuParams,
) -> IndicatorResult<Vec<IchimokuPoint>> {
    params.validate()?;

    if bars.is_empty() {
        log::debug!("빈 시계열, 계산 생략: {}", params);
        return Ok(Vec::new());
    }

    validate_bars(bars)?;
    log::debug!("일목균형표 계산 시작: {}, 막대 {}개", params, bars.len());

    let tenkan = donchian_midpoint(bars, params.conversion_len);
    let kijun = donchian_midpoint(bars, params.base_len);

    let raw_span_a: Vec<Option<f64>> = tenkan
        .iter()
        .zip(&kijun)
        .map(|(&t, &k)| midpoint(t, k))
        .collect();
    let senkou_span_a = shift_forward(&raw_span_a, params.cloud_shift);

    let raw_span_b = donchian_midpoint(bars, params.leading_span_b_len);
    let senkou_span_b = shift_forward(&raw_span_b, params.cloud_shift);

    let closes: Vec<f64> = bars.iter().map(|bar| bar.close_price()).collect();
    let chikou_span = shift_backward(&closes, params.lagging_len);

    let points: Vec<IchimokuPoint> = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| IchimokuPoint {
            bar: PriceBar::from_candle(bar),
            tenkan_sen: tenkan[i],
            kijun_sen: kijun[i],
            senkou_span_a: senkou_span_a[i],
            senkou_span_b: senkou_span_b[i],
            chikou_span: chikou_span[i],
        })
        .collect();

    log::trace!(
        "일목균형표 계산 완료: {}, 마지막 시점 {:?}",
        params,
        points.last().map(|p| p.to_string())
    );

    Ok(points)
}

/// 일목균형표 계산을 위한 빌더
#[derive(Debug)]
pub struct IchimokuBuilder<C: Candle> {
    params: IchimokuParams,
    _phantom: PhantomData<C>,
}

impl<C> IchimokuBuilder<C>
where
    C: Candle,
{
    /// 새 일목균형표 빌더 생성
    ///
    /// # Arguments
    /// * `params` - 일목균형표 매개변수
    ///
    /// # Returns
    /// * `IndicatorResult<IchimokuBuilder<C>>` - 기간이 0인 매개변수가 있으면 오류
    pub fn new(params: IchimokuParams) -> IndicatorResult<Self> {
        params.validate()?;
        Ok(IchimokuBuilder {
            params,
            _phantom: PhantomData,
        })
    }

    pub fn params(&self) -> &IchimokuParams {
        &self.params
    }

    /// 캔들 슬라이스로 일목균형표 계산
    pub fn build(&self, data: &[C]) -> IndicatorResult<IchimokuSeries> {
        Ok(IchimokuSeries {
            params: self.params,
            points: compute(data, &self.params)?,
        })
    }
}

impl<C> TABuilder<IchimokuSeries, C> for IchimokuBuilder<C>
where
    C: Candle,
{
    fn build(&self, data: &[C]) -> IndicatorResult<IchimokuSeries> {
        IchimokuBuilder::build(self, data)
    }
}

/// 여러 일목균형표 결과 컬렉션 타입
pub type Ichimokus = TAs<IchimokuParams, IchimokuSeries>;

/// 여러 일목균형표 빌더 타입
pub type IchimokusBuilder<C> = TAsBuilder<IchimokuParams, IchimokuSeries, C>;

/// 일목균형표 컬렉션 빌더 팩토리
pub struct IchimokusBuilderFactory;

impl IchimokusBuilderFactory {
    /// 여러 매개변수 세트에 대한 빌더 생성
    ///
    /// # Arguments
    /// * `params` - 매개변수 세트 목록 (중복은 한 번만 계산)
    ///
    /// # Returns
    /// * `IndicatorResult<IchimokusBuilder<C>>` - 빌더 또는 첫 번째로 잘못된 매개변수 오류
    pub fn build<C: Candle + 'static>(
        params: &[IchimokuParams],
    ) -> IndicatorResult<IchimokusBuilder<C>> {
        IchimokusBuilder::new("ichimokus".to_owned(), params, |param| {
            let builder: Box<dyn TABuilder<IchimokuSeries, C>> =
                Box::new(IchimokuBuilder::<C>::new(*param)?);
            Ok(builder)
        })
    }

    /// 기본 매개변수(9, 26, 26, 52, 26)로 빌더 생성
    pub fn build_default<C: Candle + 'static>() -> IndicatorResult<IchimokusBuilder<C>> {
        Self::build(&[IchimokuParams::default()])
    }
}
