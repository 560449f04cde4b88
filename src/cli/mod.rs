pub mod purge;

use crate::{models::ReportFormat, retention::ErrorPolicy};
use clap::Parser;
use std::path::PathBuf;

/// Purge aggregated application logs older than a number of days.
///
/// Lists expired application log dirs by default; pass `--delete-files` to delete them.
#[derive(Parser, Debug)]
#[command(version)]
pub struct Args {
    /// Application dirs last modified more than this many days ago are purged (must be > 1)
    #[arg(long, value_name = "DAYS", allow_negative_numbers = true)]
    pub delete_older_than: i64,
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub delete_files: bool,
    /// Defaults to $PURGER_REMOTE_APP_LOG_DIR or /tmp/logs
    #[arg(long)]
    pub root_log_dir: Option<PathBuf>,
    /// What to do when measuring or deleting one application dir fails: abort | continue
    #[arg(long, default_value_t = ErrorPolicy::Abort)]
    pub on_error: ErrorPolicy,
    /// Report format: text | json
    #[arg(long, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let args = Args::try_parse_from(["logpurger", "--delete-older-than", "300"]).unwrap();
        assert_eq!(args.delete_older_than, 300);
        assert!(!args.delete_files);
        assert_eq!(args.root_log_dir, None);
        assert_eq!(args.on_error, ErrorPolicy::Abort);
        assert_eq!(args.format, ReportFormat::Text);

        let args = Args::try_parse_from([
            "logpurger",
            "--delete-older-than",
            "-3",
            "--delete-files",
            "--root-log-dir",
            "/app-logs",
            "--on-error",
            "continue",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(args.delete_older_than, -3);
        assert!(args.delete_files);
        assert_eq!(args.root_log_dir, Some(PathBuf::from("/app-logs")));
        assert_eq!(args.on_error, ErrorPolicy::Continue);
        assert_eq!(args.format, ReportFormat::Json);
    }

    #[test]
    fn test_retention_days_is_required() {
        assert!(Args::try_parse_from(["logpurger"]).is_err());
        assert!(Args::try_parse_from(["logpurger", "--delete-older-than", "x"]).is_err());
        assert!(
            Args::try_parse_from(["logpurger", "--delete-older-than", "3", "--format", "xml"])
                .is_err()
        );
    }
}
