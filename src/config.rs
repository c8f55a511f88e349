use crate::config_loader::{ConfigError, ConfigResult, ConfigValidation};
use crate::indicator::ichimoku::IchimokuParams;
use serde::{Deserialize, Serialize};

/// 캔들 저장소 설정
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// 보관할 최대 캔들 수 (없으면 입력 캔들을 모두 보관)
    pub max_size: Option<usize>,
    /// 직전 캔들과 같은 캔들의 재삽입 무시 여부
    pub use_duplicated_filter: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            max_size: None,
            use_duplicated_filter: true,
        }
    }
}

impl StoreConfig {
    /// 입력 캔들 수에 맞춘 저장소 크기
    ///
    /// `max_size`가 없으면 입력 전체를 보관하고, 빈 입력이어도 1 이상을 반환합니다.
    pub fn capacity_for(&self, available: usize) -> usize {
        self.max_size.unwrap_or(available).max(1)
    }
}

/// 차트 서비스 시작 시 한 번 읽는 설정
///
/// ```toml
/// [ichimoku]
/// conversion_len = 9
/// base_len = 26
///
/// [store]
/// max_size = 500
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub ichimoku: IchimokuParams,
    pub store: StoreConfig,
}

impl ConfigValidation for ChartConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.ichimoku
            .validate()
            .map_err(|e| ConfigError::ValidationError(format!("[ichimoku] {}", e)))?;

        if self.store.max_size == Some(0) {
            return Err(ConfigError::ValidationError(
                "[store] max_size는 1 이상이어야 합니다".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_loader::{ConfigFormat, ConfigLoader};

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ConfigLoader::load_from_string::<ChartConfig>("", ConfigFormat::Toml).unwrap();
        assert_eq!(config, ChartConfig::default());
        assert_eq!(config.ichimoku, IchimokuParams::default());
        assert_eq!(config.store.max_size, None);
        assert!(config.store.use_duplicated_filter);
    }

    #[test]
    fn test_load_sections() {
        let toml_str = r#"
            [ichimoku]
            conversion_len = 7
            cloud_shift = 22

            [store]
            max_size = 300
            use_duplicated_filter = false
        "#;
        let config =
            ConfigLoader::load_from_string::<ChartConfig>(toml_str, ConfigFormat::Toml).unwrap();

        assert_eq!(config.ichimoku.conversion_len, 7);
        assert_eq!(config.ichimoku.cloud_shift, 22);
        assert_eq!(config.ichimoku.base_len, 26);
        assert_eq!(config.store.max_size, Some(300));
        assert!(!config.store.use_duplicated_filter);
    }

    #[test]
    fn test_invalid_ichimoku_section() {
        let json = r#"{"ichimoku":{"leading_span_b_len":0}}"#;
        match ConfigLoader::load_from_string::<ChartConfig>(json, ConfigFormat::Json) {
            Err(ConfigError::ValidationError(msg)) => {
                assert!(msg.contains("[ichimoku]"));
                assert!(msg.contains("leading_span_b_len"));
            }
            other => panic!("유효성 검사 오류가 발생해야 함: {:?}", other),
        }
    }

    #[test]
    fn test_store_capacity_follows_input_when_unset() {
        let store = StoreConfig::default();
        assert_eq!(store.capacity_for(5000), 5000);
        assert_eq!(store.capacity_for(0), 1);

        let limited = StoreConfig {
            max_size: Some(300),
            ..StoreConfig::default()
        };
        assert_eq!(limited.capacity_for(5000), 300);
        assert_eq!(limited.capacity_for(10), 300);
    }

    #[test]
    fn test_invalid_store_size() {
        let json = r#"{"store":{"max_size":0}}"#;
        let result = ConfigLoader::load_from_string::<ChartConfig>(json, ConfigFormat::Json);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }
}
