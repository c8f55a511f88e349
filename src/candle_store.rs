use crate::candle::Candle;

/// 최대 크기가 제한된 캔들 저장소
///
/// 캔들은 시각 기준 내림차순(최신이 먼저)으로 보관되며,
/// 최대 크기를 넘으면 가장 오래된 캔들부터 버려집니다.
/// 지표 엔진에 넘길 때는 `get_time_ordered_items`로 오름차순 사본을 얻습니다.
#[derive(Debug, Clone)]
pub struct CandleStore<T: Candle> {
    items: Vec<T>,
    pub max_size: usize,
    pub use_duplicated_filter: bool,
}

/// 가장 최근 캔들이 주어진 캔들과 같은지 확인
fn is_same_item<T: PartialEq>(items: &[T], data: &T) -> bool {
    items.first() == Some(data)
}

impl<T> CandleStore<T>
where
    T: Candle,
{
    /// 새 저장소 생성
    ///
    /// # Arguments
    /// * `items` - 초기 캔들 목록 (순서 무관)
    /// * `max_size` - 보관할 최대 캔들 수
    /// * `use_duplicated_filter` - 직전 캔들과 같은 캔들의 재삽입 무시 여부
    ///
    /// # Returns
    /// * `CandleStore<T>` - 최신순으로 정렬된 저장소
    pub fn new(mut items: Vec<T>, max_size: usize, use_duplicated_filter: bool) -> CandleStore<T> {
        items.sort_by(|a, b| b.datetime().cmp(&a.datetime()));
        items.truncate(max_size);

        CandleStore {
            items,
            max_size,
            use_duplicated_filter,
        }
    }

    /// 캔들을 시각 순서에 맞는 위치에 삽입합니다.
    ///
    /// 중복 필터가 켜져 있고 가장 최근 캔들과 동일하면 무시합니다.
    /// 삽입 후 최대 크기를 넘으면 가장 오래된 캔들이 제거됩니다.
    ///
    /// # Arguments
    /// * `data` - 삽입할 캔들
    pub fn add(&mut self, data: T) {
        if self.use_duplicated_filter && is_same_item(&self.items, &data) {
            log::trace!("중복 캔들 무시: {:?}", data.datetime());
            return;
        }

        let insert_idx = self
            .items
            .binary_search_by(|item| data.datetime().cmp(&item.datetime()))
            .unwrap_or_else(|idx| idx);

        self.items.insert(insert_idx, data);
        self.items.truncate(self.max_size);
    }

    /// 여러 캔들을 차례로 삽입
    pub fn add_all(&mut self, data: impl IntoIterator<Item = T>) {
        for item in data {
            self.add(item);
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 가장 최근 캔들
    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    /// 최신순 인덱스로 캔들 조회 (0이 가장 최근)
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// 최신순으로 정렬된 전체 캔들
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// 시간 오름차순으로 정렬된 캔들 사본을 반환합니다.
    ///
    /// # Returns
    /// * `Vec<T>` - 가장 오래된 캔들이 먼저 오는 목록
    pub fn get_time_ordered_items(&self) -> Vec<T> {
        self.items.iter().rev().cloned().collect()
    }
}
