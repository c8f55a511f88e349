// 기술적 지표 모듈
// 일목균형표와 그 계산에 쓰이는 롤링 최고가/최저가 지표를 제공합니다.

pub mod ichimoku;
pub mod max;
pub mod min;
pub mod utils;

use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;

use crate::candle::Candle;
use crate::candle_store::CandleStore;

/// 지표 계산 오류
#[derive(Debug, Clone, PartialEq)]
pub enum IndicatorError {
    /// 잘못된 입력 (0 이하의 기간, 유한하지 않은 가격 등)
    InvalidInput(String),
}

impl Display for IndicatorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndicatorError::InvalidInput(msg) => write!(f, "잘못된 입력: {}", msg),
        }
    }
}

impl std::error::Error for IndicatorError {}

/// 지표 계산 결과
pub type IndicatorResult<T> = Result<T, IndicatorError>;

/// 기간 매개변수 검사
///
/// # Arguments
/// * `name` - 매개변수 이름 (오류 메시지용)
/// * `period` - 기간 값
///
/// # Returns
/// * `IndicatorResult<()>` - 1 이상이면 Ok
pub fn validate_period(name: &str, period: usize) -> IndicatorResult<()> {
    if period == 0 {
        log::warn!("잘못된 기간 매개변수: {} = {}", name, period);
        return Err(IndicatorError::InvalidInput(format!(
            "{}는 1 이상이어야 합니다 (입력값: {})",
            name, period
        )));
    }
    Ok(())
}

/// 지표 생성 인터페이스
///
/// 빌더는 매개변수만 보관하며, 같은 입력에 대해 항상 같은 결과를 돌려줍니다.
pub trait TABuilder<T, C: Candle>: Send + Debug {
    /// 저장소의 캔들(시간 오름차순)로 지표 생성
    fn from_storage(&self, storage: &CandleStore<C>) -> IndicatorResult<T> {
        self.build(&storage.get_time_ordered_items())
    }

    /// 시간 오름차순 캔들 슬라이스로 지표 생성
    fn build(&self, data: &[C]) -> IndicatorResult<T>;
}

/// 매개변수 키별로 계산된 지표 컬렉션
///
/// 키 삽입 순서를 유지합니다.
#[derive(Debug)]
pub struct TAs<K, T>
where
    K: PartialEq + Eq + Hash + Debug,
{
    /// 이 컬렉션의 이름
    name: String,
    /// 순서가 유지되는 키 목록
    keys: Vec<K>,
    /// 키별 지표
    data: HashMap<K, T>,
}

impl<K, T> Display for TAs<K, T>
where
    K: PartialEq + Eq + Hash + Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TAs({}, {} keys)", self.name, self.keys.len())
    }
}

impl<K, T> TAs<K, T>
where
    K: PartialEq + Eq + Hash + Debug,
{
    pub fn new(name: String, keys: Vec<K>, data: HashMap<K, T>) -> TAs<K, T> {
        TAs { name, keys, data }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 키 목록 (삽입 순서)
    pub fn get_keys(&self) -> &[K] {
        &self.keys
    }

    /// 키에 해당하는 지표, 없으면 `None`
    pub fn get(&self, key: &K) -> Option<&T> {
        self.data.get(key)
    }

    /// 키 순서대로 모든 지표를 반환합니다.
    pub fn get_all(&self) -> Vec<&T> {
        self.keys.iter().filter_map(|key| self.data.get(key)).collect()
    }
}

/// 여러 매개변수 세트의 빌더를 묶어 한 번에 계산하는 빌더
pub struct TAsBuilder<K, T, C: Candle> {
    /// 이 빌더 컬렉션의 이름
    name: String,
    /// 순서가 유지되는 키 목록
    keys: Vec<K>,
    /// 각 키에 대응하는 개별 빌더
    builders: HashMap<K, Box<dyn TABuilder<T, C>>>,
}

impl<K, T, C> TAsBuilder<K, T, C>
where
    K: PartialEq + Eq + Hash + Clone + Debug,
    C: Candle,
{
    /// 새 TAsBuilder 생성
    ///
    /// # Arguments
    /// * `name` - 빌더 이름
    /// * `keys` - 키 목록
    /// * `gen_builder` - 키별 빌더 생성 함수 (매개변수가 잘못되면 오류)
    ///
    /// # Returns
    /// * `IndicatorResult<TAsBuilder<K, T, C>>` - 새 인스턴스 또는 첫 번째 오류
    pub fn new(
        name: String,
        keys: &[K],
        gen_builder: impl Fn(&K) -> IndicatorResult<Box<dyn TABuilder<T, C>>>,
    ) -> IndicatorResult<TAsBuilder<K, T, C>> {
        let mut builders: HashMap<K, Box<dyn TABuilder<T, C>>> = HashMap::new();
        let mut ordered_keys = Vec::with_capacity(keys.len());
        for key in keys {
            if builders.contains_key(key) {
                continue;
            }
            builders.insert(key.clone(), gen_builder(key)?);
            ordered_keys.push(key.clone());
        }

        Ok(TAsBuilder {
            name,
            keys: ordered_keys,
            builders,
        })
    }

    /// 저장소에서 지표 컬렉션 생성
    pub fn from_storage(&self, storage: &CandleStore<C>) -> IndicatorResult<TAs<K, T>> {
        self.build(&storage.get_time_ordered_items())
    }

    /// 데이터에서 지표 컬렉션 생성
    ///
    /// # Arguments
    /// * `data` - 시간 오름차순 캔들 슬라이스
    ///
    /// # Returns
    /// * `IndicatorResult<TAs<K, T>>` - 키별 지표 또는 첫 번째 오류
    pub fn build(&self, data: &[C]) -> IndicatorResult<TAs<K, T>> {
        let mut tas: HashMap<K, T> = HashMap::with_capacity(self.builders.len());
        for (key, builder) in &self.builders {
            tas.insert(key.clone(), builder.build(data)?);
        }

        Ok(TAs::new(self.name.to_owned(), self.keys.clone(), tas))
    }
}

impl<K: Debug, T, C> Debug for TAsBuilder<K, T, C>
where
    C: Candle,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TAsBuilder")
            .field("name", &self.name)
            .field("keys", &self.keys)
            .field("builders", &format!("<{} builders>", self.builders.len()))
            .finish()
    }
}
