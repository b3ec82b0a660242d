use std::fmt;

use common::{FormInput, OptimizationResult, cache_usage_label};
use serde::Serialize;

/// Fixed user-facing strings shared by every renderer.
pub mod labels {
    pub const DATA_SIZE: &str = "데이터 크기 (예: 500M, 1G)";
    pub const DATA_SIZE_PLACEHOLDER: &str = "500M, 1G 등";
    pub const READ_WRITE_RATIO: &str = "읽기/쓰기 비율 (예: 70% 읽기, 30% 쓰기)";
    pub const READ_WRITE_RATIO_PLACEHOLDER: &str = "예: 70/30";
    pub const TASK_TYPE: &str = "작업 유형";
    pub const SPEED_REQUIREMENT: &str = "처리 속도 요구 사항";
    pub const CACHE_USAGE: &str = "캐시 사용 여부";
    pub const IO_PRIORITY: &str = "I/O 스케줄링 우선순위";
    pub const SUBMIT: &str = "최적화 요청";

    pub const LOADING: &str = "로딩 중...";
    pub const RESULT_HEADING: &str = "최적화 결과";
    pub const PREDICTED_IOPS: &str = "예상 IOPS";
    pub const OPTIMIZED_SETTINGS: &str = "최적화된 설정";
    pub const RECOMMENDATIONS: &str = "추천 사항";
    pub const ERROR: &str = "오류";

    pub const RESULT_DATA_SIZE: &str = "데이터 크기";
    pub const RESULT_READ_WRITE_RATIO: &str = "읽기/쓰기 비율";
    pub const RESULT_TASK_TYPE: &str = "작업 유형";
    pub const RESULT_CACHE_USAGE: &str = "캐시 사용";
    pub const RESULT_IO_PRIORITY: &str = "I/O 우선순위";
}

pub const NO_RECOMMENDATIONS: &str = "추천 사항이 없습니다.";

/// Everything a renderer needs to draw the form at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormView {
    pub input: FormInput,
    pub loading: bool,
    pub result: Option<ResultView>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingRow {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultView {
    pub predicted_iops: String,
    pub settings: Vec<SettingRow>,
    /// Never empty: a missing or empty list becomes the single placeholder.
    pub recommendations: Vec<String>,
}

impl ResultView {
    pub fn from_result(result: &OptimizationResult) -> Self {
        let settings = &result.optimized_settings;
        let row = |label, value: &str| SettingRow {
            label,
            value: value.to_string(),
        };

        let recommendations = match &result.recommendations {
            Some(items) if !items.is_empty() => items.clone(),
            _ => vec![NO_RECOMMENDATIONS.to_string()],
        };

        Self {
            predicted_iops: result.predicted_iops.to_string(),
            settings: vec![
                row(labels::RESULT_DATA_SIZE, &settings.data_size),
                row(labels::RESULT_READ_WRITE_RATIO, &settings.read_write_ratio),
                row(labels::RESULT_TASK_TYPE, &settings.task_type),
                row(labels::RESULT_CACHE_USAGE, cache_usage_label(settings.cache_usage)),
                row(labels::RESULT_IO_PRIORITY, &settings.io_priority),
            ],
            recommendations,
        }
    }
}

impl fmt::Display for FormView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let input = &self.input;
        writeln!(f, "{}: {}", labels::DATA_SIZE, input.data_size)?;
        writeln!(f, "{}: {}", labels::READ_WRITE_RATIO, input.read_write_ratio)?;
        writeln!(f, "{}: {}", labels::TASK_TYPE, input.task_type)?;
        writeln!(f, "{}: {}", labels::SPEED_REQUIREMENT, input.speed_requirement)?;
        writeln!(f, "{}: {}", labels::CACHE_USAGE, cache_usage_label(input.cache_usage))?;
        writeln!(f, "{}: {}", labels::IO_PRIORITY, input.io_priority)?;

        if self.loading {
            writeln!(f, "{}", labels::LOADING)?;
        }

        if let Some(result) = &self.result {
            writeln!(f)?;
            writeln!(f, "{}", labels::RESULT_HEADING)?;
            writeln!(f, "{}: {}", labels::PREDICTED_IOPS, result.predicted_iops)?;
            writeln!(f, "{}:", labels::OPTIMIZED_SETTINGS)?;
            for setting in &result.settings {
                writeln!(f, "  - {}: {}", setting.label, setting.value)?;
            }
            writeln!(f, "{}:", labels::RECOMMENDATIONS)?;
            for item in &result.recommendations {
                writeln!(f, "  - {item}")?;
            }
        }

        if let Some(error) = &self.error {
            writeln!(f)?;
            writeln!(f, "{}: {error}", labels::ERROR)?;
        }

        Ok(())
    }
}
