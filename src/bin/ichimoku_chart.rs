use ichimoku_cloud::candle::PriceBar;
use ichimoku_cloud::candle_store::CandleStore;
use ichimoku_cloud::config::ChartConfig;
use ichimoku_cloud::config_loader::{ConfigFormat, ConfigLoader};
use ichimoku_cloud::indicator::TABuilder;
use ichimoku_cloud::indicator::ichimoku::IchimokuBuilder;
use log::{debug, error, info, warn};
use std::env;
use std::path::{Path, PathBuf};
use std::process;

/// JSON 배열 파일에서 가격 막대 로드
fn load_bars(path: &Path) -> Result<Vec<PriceBar>, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("가격 파일 읽기 실패: {}: {}", path.display(), e))?;

    serde_json::from_str(&content)
        .map_err(|e| format!("가격 파일 파싱 실패: {}: {}", path.display(), e))
}

fn load_config(path: Option<PathBuf>) -> Result<ChartConfig, String> {
    match path {
        Some(path) => {
            debug!("사용자 지정 설정 파일 사용: {}", path.display());
            ConfigLoader::load_from_file::<ChartConfig>(&path, ConfigFormat::Auto)
                .map_err(|e| e.to_string())
        }
        None => {
            debug!("설정 파일 없음, 기본 설정 사용");
            Ok(ChartConfig::default())
        }
    }
}

fn run(bars_path: &Path, config_path: Option<PathBuf>) -> Result<String, String> {
    let config = load_config(config_path)?;
    info!("설정: {}, 저장소 최대 {:?}개", config.ichimoku, config.store.max_size);

    let bars = load_bars(bars_path)?;
    info!("가격 막대 {}개 로드: {}", bars.len(), bars_path.display());

    let max_size = config.store.capacity_for(bars.len());
    if bars.len() > max_size {
        warn!("가격 막대 {}개 중 최근 {}개만 사용", bars.len(), max_size);
        eprintln!(
            "경고: 가격 막대 {}개 중 최근 {}개만 사용합니다 ([store] max_size)",
            bars.len(),
            max_size
        );
    }

    let mut store = CandleStore::new(Vec::new(), max_size, config.store.use_duplicated_filter);
    store.add_all(bars);
    debug!("저장소에 캔들 {}개 보관", store.len());

    let builder = IchimokuBuilder::new(config.ichimoku).map_err(|e| e.to_string())?;
    let series = builder.from_storage(&store).map_err(|e| e.to_string())?;
    info!("계산 완료: {}", series);

    serde_json::to_string_pretty(&series).map_err(|e| format!("결과 직렬화 실패: {}", e))
}

/// argv가 비어 있어도 사용법에 출력할 프로그램 이름
fn program_name(args: &[String]) -> &str {
    args.first().map(String::as_str).unwrap_or("ichimoku_chart")
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    debug!("커맨드 라인 인수: {:?}", args);

    if args.len() < 2 {
        error!("인수가 충분하지 않습니다. 가격 파일 경로가 필요합니다.");
        eprintln!(
            "사용법: {} <가격_파일.json> [설정_파일.toml|json]",
            program_name(&args)
        );
        process::exit(2);
    }

    let bars_path = PathBuf::from(&args[1]);
    let config_path = args.get(2).map(PathBuf::from);

    match run(&bars_path, config_path) {
        Ok(output) => println!("{}", output),
        Err(err) => {
            error!("일목균형표 계산 실패: {}", err);
            eprintln!("일목균형표 계산 실패: {}", err);
            process::exit(1);
        }
    }
}
