use super::{FileStatus, FileSystem};
use log::debug;
use std::{
    fs::{self, Metadata},
    io,
    path::Path,
    time::UNIX_EPOCH,
};

/// 基于本地磁盘的文件系统实现。
///
/// 被列出的路径本身会跟随符号链接解析；列出的子项中的符号链接按链接本身上报（非目录），
/// 删除时也只删除链接，不跟随到目标。
#[derive(Debug, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    pub fn new() -> Self {
        LocalFileSystem
    }
}

impl FileSystem for LocalFileSystem {
    fn list_status(&self, path: &Path) -> io::Result<Vec<FileStatus>> {
        if !fs::metadata(path)?.is_dir() {
            return Ok(vec![to_status(path, &fs::symlink_metadata(path)?)?]);
        }

        let mut statuses = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            let metadata = entry.metadata()?;
            statuses.push(to_status(&entry.path(), &metadata)?);
        }

        Ok(statuses)
    }

    fn delete(&self, path: &Path, recursive: bool) -> io::Result<()> {
        let metadata = fs::symlink_metadata(path)?;
        if metadata.is_dir() {
            if recursive {
                fs::remove_dir_all(path)?;
            } else {
                fs::remove_dir(path)?;
            }
        } else {
            fs::remove_file(path)?;
        }
        debug!("Removed {}", path.display());

        Ok(())
    }
}

fn to_status(path: &Path, metadata: &Metadata) -> io::Result<FileStatus> {
    let modification_time = metadata
        .modified()?
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        // 早于纪元的时间戳
        .unwrap_or_else(|e| -(e.duration().as_millis() as i64));

    Ok(FileStatus {
        path: path.to_path_buf(),
        is_dir: metadata.is_dir(),
        modification_time,
        owner: owner_of(metadata),
        len: if metadata.is_dir() { 0 } else { metadata.len() },
    })
}

#[cfg(unix)]
fn owner_of(metadata: &Metadata) -> String {
    use std::os::unix::fs::MetadataExt;

    metadata.uid().to_string()
}

#[cfg(not(unix))]
fn owner_of(_metadata: &Metadata) -> String {
    String::from("unknown")
}
