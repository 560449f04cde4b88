use crate::{
    errors::{Error, Result},
    fs::{FileStatus, FileSystem},
    retention::local_datetime,
};
use chrono::NaiveDateTime;
use log::{debug, info};
use std::{
    io,
    path::{Path, PathBuf},
    vec,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirEntry {
    pub path: PathBuf,
    pub owner: String,
    // 所属用户目录（不含后缀）
    pub owner_dir: PathBuf,
    pub modified_at: NaiveDateTime,
    pub is_dir: bool,
    pub len: u64,
}

/// 逐个用户目录地产出应用目录，顺序与文件系统列出的顺序一致。
pub struct Scanner<'a, F: FileSystem + ?Sized> {
    fs: &'a F,
    suffix: PathBuf,
    owners: vec::IntoIter<FileStatus>,
    current: Option<(PathBuf, vec::IntoIter<FileStatus>)>,
}

pub fn scan<'a, F: FileSystem + ?Sized>(
    fs: &'a F,
    root: &Path,
    suffix: &str,
) -> Result<Scanner<'a, F>> {
    let owners = fs.list_status(root).map_err(|source| Error::ScanFailure {
        path: root.to_path_buf(),
        source,
    })?;

    Ok(Scanner {
        fs,
        suffix: PathBuf::from(suffix),
        owners: owners.into_iter(),
        current: None,
    })
}

impl<F: FileSystem + ?Sized> Scanner<'_, F> {
    // 切换到下一个有后缀目录的用户，没有更多用户时返回 Ok(false)
    fn advance_owner(&mut self) -> Result<bool> {
        for owner in self.owners.by_ref() {
            // 非目录不是用户目录
            if !owner.is_dir {
                continue;
            }
            let owner_dir_path = owner.path.join(&self.suffix);
            info!("Checking for owner dir : {}", owner_dir_path.display());
            match self.fs.list_status(&owner_dir_path) {
                Ok(apps) => {
                    self.current = Some((owner.path, apps.into_iter()));
                    return Ok(true);
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    // 该用户从未使用过日志聚合
                    debug!("Skipping {}: {e}", owner_dir_path.display());
                }
                Err(source) => {
                    return Err(Error::ScanFailure {
                        path: owner_dir_path,
                        source,
                    });
                }
            }
        }

        Ok(false)
    }
}

impl<F: FileSystem + ?Sized> Iterator for Scanner<'_, F> {
    type Item = Result<AppDirEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((owner_dir, apps)) = self.current.as_mut()
                && let Some(app) = apps.next()
            {
                let entry = local_datetime(app.modification_time).map(|modified_at| AppDirEntry {
                    path: app.path,
                    owner: app.owner,
                    owner_dir: owner_dir.clone(),
                    modified_at,
                    is_dir: app.is_dir,
                    len: app.len,
                });
                return Some(entry);
            }
            self.current = None;
            match self.advance_owner() {
                Ok(true) => continue,
                Ok(false) => return None,
                Err(e) => {
                    // 致命错误之后不再继续产出
                    self.owners = Vec::new().into_iter();
                    return Some(Err(e));
                }
            }
        }
    }
}
