use crate::{
    errors::{Error, Result},
    fail, invalid,
};
use chrono::{Days, Local, NaiveDateTime, TimeZone};

// 所有时间都在系统本地时区下以 NaiveDateTime 比较，目录修改时间也按同一时区转换。

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    // 首个统计或删除失败即中止整个运行
    #[default]
    Abort,
    // 记录失败条目后继续处理其余条目
    Continue,
}

impl std::str::FromStr for ErrorPolicy {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "abort" => Ok(ErrorPolicy::Abort),
            "continue" => Ok(ErrorPolicy::Continue),
            _ => invalid!("invalid error policy: {s}, only 'abort' or 'continue' are allowed"),
        }
    }
}

impl std::fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorPolicy::Abort => write!(f, "abort"),
            ErrorPolicy::Continue => write!(f, "continue"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RetentionPolicy {
    pub cutoff: NaiveDateTime,
    pub delete_enabled: bool,
    pub error_policy: ErrorPolicy,
}

impl RetentionPolicy {
    /// 以当前本地时间为基准构造策略，截止时间在整个运行期间只计算这一次。
    pub fn from_now(
        retention_days: i64,
        delete_enabled: bool,
        error_policy: ErrorPolicy,
    ) -> Result<Self> {
        let cutoff = compute_cutoff(Local::now().naive_local(), retention_days)?;

        Ok(RetentionPolicy {
            cutoff,
            delete_enabled,
            error_policy,
        })
    }

    pub fn is_expired(&self, modified_at: NaiveDateTime) -> bool {
        modified_at < self.cutoff
    }
}

pub fn validate_retention_days(retention_days: i64) -> Result<u64> {
    if retention_days <= 1 {
        return invalid!(
            "retention days must be greater than 1, provided: {retention_days} (e.g. --delete-older-than 300)"
        );
    }

    Ok(retention_days as u64)
}

pub fn compute_cutoff(reference: NaiveDateTime, retention_days: i64) -> Result<NaiveDateTime> {
    let days = validate_retention_days(retention_days)?;

    reference
        .checked_sub_days(Days::new(days))
        .ok_or_else(|| {
            Error::InvalidConfiguration(format!(
                "retention days is too large, provided: {days} (cutoff before {reference} is out of range)"
            ))
        })
}

/// 将毫秒时间戳转换为本地时区的日期时间。
pub fn local_datetime(millis: i64) -> Result<NaiveDateTime> {
    Local
        .timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.naive_local())
        .ok_or_else(|| fail!("modification time is out of range: {millis}"))
}
