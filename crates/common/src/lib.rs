use serde::{Deserialize, Serialize};

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";
pub const SUBMIT_PATH: &str = "/api/submit";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskType {
    #[default]
    #[serde(rename = "순차")]
    Sequential,
    #[serde(rename = "랜덤")]
    Random,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedRequirement {
    #[serde(rename = "고속")]
    High,
    #[default]
    #[serde(rename = "보통")]
    Normal,
    #[serde(rename = "저속")]
    Low,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum IoPriority {
    #[default]
    #[serde(rename = "처리량 우선")]
    ThroughputFirst,
    #[serde(rename = "지연 시간 최소화")]
    LatencyFirst,
}

impl TaskType {
    pub const ALL: [Self; 2] = [Self::Sequential, Self::Random];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sequential => "순차",
            Self::Random => "랜덤",
        }
    }
}

impl SpeedRequirement {
    pub const ALL: [Self; 3] = [Self::High, Self::Normal, Self::Low];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "고속",
            Self::Normal => "보통",
            Self::Low => "저속",
        }
    }
}

impl IoPriority {
    pub const ALL: [Self; 2] = [Self::ThroughputFirst, Self::LatencyFirst];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ThroughputFirst => "처리량 우선",
            Self::LatencyFirst => "지연 시간 최소화",
        }
    }
}

/// Returned when a select value does not match any of the offered options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOption {
    pub field: &'static str,
    pub value: String,
}

impl std::fmt::Display for UnknownOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown {} option: {}", self.field, self.value)
    }
}

impl std::error::Error for UnknownOption {}

macro_rules! option_from_str {
    ($ty:ty, $field:literal) => {
        impl std::str::FromStr for $ty {
            type Err = UnknownOption;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .into_iter()
                    .find(|option| option.as_str() == value)
                    .ok_or_else(|| UnknownOption {
                        field: $field,
                        value: value.to_string(),
                    })
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

option_from_str!(TaskType, "taskType");
option_from_str!(SpeedRequirement, "speedRequirement");
option_from_str!(IoPriority, "ioPriority");

/// The six form fields exactly as they go over the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormInput {
    pub data_size: String,
    pub read_write_ratio: String,
    pub task_type: TaskType,
    pub speed_requirement: SpeedRequirement,
    pub cache_usage: bool,
    pub io_priority: IoPriority,
}

/// Settings echoed back by the optimizer. Values are free-form because the
/// server may answer with options the form never offers (e.g. `seq`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedSettings {
    pub data_size: String,
    pub read_write_ratio: String,
    pub task_type: String,
    pub cache_usage: bool,
    pub io_priority: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub predicted_iops: f64,
    pub optimized_settings: OptimizedSettings,
    #[serde(default)]
    pub recommendations: Option<Vec<String>>,
    #[serde(default)]
    pub performance_output: String,
}

pub fn cache_usage_label(enabled: bool) -> &'static str {
    if enabled { "활성화" } else { "비활성화" }
}
