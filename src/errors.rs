use std::path::PathBuf;

use strum::EnumProperty;

pub type Result<T> = std::result::Result<T, Error>;

// 退出码规划：
//  - 1: 运行期文件系统错误（扫描、统计、删除）
//  - 2: 配置错误（在访问文件系统之前失败）
//  - 3: 部分失败（continue 策略下存在失败条目）
//  - 内部错误无退出码（一律映射到 1）

#[derive(Debug, thiserror::Error, strum_macros::EnumProperty)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Error {
    // 无效配置
    #[strum(props(exit_code = 2))]
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    // 列出目录失败
    #[strum(props(exit_code = 1))]
    #[error("failed to list {}: {source}", path.display())]
    ScanFailure {
        path: PathBuf,
        source: std::io::Error,
    },
    // 统计目录大小失败
    #[strum(props(exit_code = 1))]
    #[error("failed to compute size of {}: {source}", path.display())]
    SizeComputationFailure {
        path: PathBuf,
        source: std::io::Error,
    },
    // 删除目录失败
    #[strum(props(exit_code = 1))]
    #[error("failed to delete {}: {source}", path.display())]
    DeletionFailure {
        path: PathBuf,
        source: std::io::Error,
    },
    // 部分条目处理失败
    #[strum(props(exit_code = 3))]
    #[error("{failed} application dir(s) could not be purged")]
    PartialFailure { failed: usize },
    // 内部通用错误
    #[error("internal error: {0}")]
    Internal(String),
    // 包装 std::io::Error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    // 包装 serde_json::Error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn exit_code(&self) -> u8 {
        self.get_int("exit_code")
            .and_then(|code| u8::try_from(code).ok())
            .unwrap_or(1)
    }
}

#[macro_export]
macro_rules! fail {
    ($msg:expr) => {
        $crate::errors::Error::Internal(format!($msg))
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::errors::Error::Internal(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! invalid {
    ($msg:expr) => {
        Err($crate::errors::Error::InvalidConfiguration(format!($msg)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        Err($crate::errors::Error::InvalidConfiguration(format!($fmt, $($arg)*)))
    };
}
