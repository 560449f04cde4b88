use crate::{
    cli::Args,
    errors::{Error, Result},
    fs::{FileSystem, LocalFileSystem, Scoped},
    janitor::Janitor,
    models::{ReportFormat, payload::PurgeSummary},
    report::Reporter,
    retention::RetentionPolicy,
    scanner::scan,
    vars::{PURGER_REMOTE_APP_LOG_DIR, PURGER_REMOTE_APP_LOG_DIR_SUFFIX},
};
use log::info;
use std::{io::Write, path::PathBuf};
use tracing::info_span;

#[derive(Debug)]
pub struct Settings {
    pub policy: RetentionPolicy,
    pub root_log_dir: PathBuf,
    pub suffix: String,
    pub format: ReportFormat,
}

impl Settings {
    pub fn from_args(args: Args) -> Result<Self> {
        let policy =
            RetentionPolicy::from_now(args.delete_older_than, args.delete_files, args.on_error)?;
        let root_log_dir = args
            .root_log_dir
            .unwrap_or_else(|| PathBuf::from(*PURGER_REMOTE_APP_LOG_DIR));

        Ok(Settings {
            policy,
            root_log_dir,
            suffix: String::from(*PURGER_REMOTE_APP_LOG_DIR_SUFFIX),
            format: args.format,
        })
    }
}

pub fn run(args: Args) -> Result<PurgeSummary> {
    run_with(args, LocalFileSystem::new, std::io::stdout().lock())
}

/// 先校验配置再打开文件系统，文件系统在任何退出路径上都会被关闭。
pub fn run_with<F, O, W>(args: Args, open: O, out: W) -> Result<PurgeSummary>
where
    F: FileSystem,
    O: FnOnce() -> F,
    W: Write,
{
    let settings = Settings::from_args(args)?;
    let _span = info_span!(
        "purge",
        root = %settings.root_log_dir.display(),
        delete = settings.policy.delete_enabled,
    )
    .entered();
    info!(
        "Purging application dirs modified before {} (delete: {}, on error: {})",
        settings.policy.cutoff, settings.policy.delete_enabled, settings.policy.error_policy
    );

    let fs = Scoped::new(open());
    let entries = scan(&*fs, &settings.root_log_dir, &settings.suffix)?;
    let reporter = Reporter::new(settings.format, out);
    let summary = Janitor::new(&*fs, settings.policy, reporter).purge(entries)?;
    if !summary.failures.is_empty() {
        return Err(Error::PartialFailure {
            failed: summary.failures.len(),
        });
    }

    Ok(summary)
}
