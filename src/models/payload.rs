use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};

// 非 UTF-8 路径按有损方式输出，与文本报告的 display() 一致
fn lossy_path<P: AsRef<Path>, S: Serializer>(path: &P, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.as_ref().to_string_lossy())
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum Record {
    #[serde(rename = "candidate")]
    Candidate(Candidate),
    #[serde(rename = "deleting")]
    Deleting {
        #[serde(serialize_with = "lossy_path")]
        path: PathBuf,
    },
    #[serde(rename = "failure")]
    Failure(Failure),
    #[serde(rename = "summary")]
    Summary(PurgeSummary),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    #[serde(serialize_with = "lossy_path")]
    pub path: PathBuf,
    pub owner: String,
    pub modified_at: NaiveDateTime,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    #[serde(serialize_with = "lossy_path")]
    pub path: PathBuf,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PurgeSummary {
    pub candidates: usize,
    pub deleted: usize,
    pub total_bytes: u64,
    pub failures: Vec<Failure>,
}
