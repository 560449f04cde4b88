use crate::{
    errors::{Error, Result},
    fs::FileSystem,
    models::payload::{Candidate, Failure, PurgeSummary, Record},
    report::Reporter,
    retention::{ErrorPolicy, RetentionPolicy},
    scanner::AppDirEntry,
};
use log::{debug, info, warn};
use std::{io, io::Write, path::Path};

pub struct Janitor<'a, F: FileSystem + ?Sized, W: Write> {
    fs: &'a F,
    policy: RetentionPolicy,
    reporter: Reporter<W>,
}

impl<'a, F: FileSystem + ?Sized, W: Write> Janitor<'a, F, W> {
    pub fn new(fs: &'a F, policy: RetentionPolicy, reporter: Reporter<W>) -> Self {
        Janitor {
            fs,
            policy,
            reporter,
        }
    }

    /// 依次处理扫描结果，最后输出汇总记录。
    ///
    /// 扫描错误总是致命的；统计和删除错误按 [`ErrorPolicy`] 处理。已经执行的删除不会回滚。
    pub fn purge<I>(&mut self, entries: I) -> Result<PurgeSummary>
    where
        I: IntoIterator<Item = Result<AppDirEntry>>,
    {
        let mut summary = PurgeSummary::default();
        for entry in entries {
            let entry = entry?;
            if !self.policy.is_expired(entry.modified_at) {
                debug!(
                    "Keeping {} of {} (modified at {})",
                    entry.path.display(),
                    entry.owner_dir.display(),
                    entry.modified_at
                );
                continue;
            }

            match self.purge_one(&entry, &mut summary) {
                Ok(_) => {}
                Err(e @ (Error::SizeComputationFailure { .. } | Error::DeletionFailure { .. }))
                    if self.policy.error_policy == ErrorPolicy::Continue =>
                {
                    warn!("{e}, continuing");
                    let failure = Failure {
                        path: entry.path,
                        error: e.to_string(),
                    };
                    self.reporter.emit(&Record::Failure(failure.clone()))?;
                    summary.failures.push(failure);
                }
                Err(e) => return Err(e),
            }
        }
        self.reporter.emit(&Record::Summary(summary.clone()))?;

        if self.policy.delete_enabled {
            info!(
                "Deleted {} application dir(s), reclaimed {} byte(s)",
                summary.deleted, summary.total_bytes
            );
        } else {
            info!(
                "Found {} expired application dir(s), {} byte(s) reclaimable",
                summary.candidates, summary.total_bytes
            );
        }

        Ok(summary)
    }

    fn purge_one(&mut self, entry: &AppDirEntry, summary: &mut PurgeSummary) -> Result<()> {
        // 必须在删除前统计；非目录（包括符号链接）只计自身长度
        let size = if entry.is_dir {
            directory_size(self.fs, &entry.path).map_err(|source| {
                Error::SizeComputationFailure {
                    path: entry.path.clone(),
                    source,
                }
            })?
        } else {
            entry.len
        };
        self.reporter.emit(&Record::Candidate(Candidate {
            path: entry.path.clone(),
            owner: entry.owner.clone(),
            modified_at: entry.modified_at,
            size,
        }))?;
        summary.candidates += 1;

        if self.policy.delete_enabled {
            self.reporter.emit(&Record::Deleting {
                path: entry.path.clone(),
            })?;
            self.fs
                .delete(&entry.path, true)
                .map_err(|source| Error::DeletionFailure {
                    path: entry.path.clone(),
                    source,
                })?;
            summary.deleted += 1;
        }
        summary.total_bytes += size;

        Ok(())
    }
}

/// 统计目录下所有文件的总字节数，目录项本身不计入。
pub fn directory_size<F: FileSystem + ?Sized>(fs: &F, path: &Path) -> io::Result<u64> {
    let mut size = 0;
    let mut pending = vec![path.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for status in fs.list_status(&dir)? {
            if status.is_dir {
                pending.push(status.path);
            } else {
                size += status.len;
            }
        }
    }

    Ok(size)
}
