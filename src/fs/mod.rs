mod local;
#[cfg(test)]
pub mod memory;

pub use local::LocalFileSystem;

use log::{debug, error};
use std::{
    io,
    ops::{Deref, DerefMut},
    path::{Path, PathBuf},
};

/// 目录项的状态信息，字段含义与分布式文件系统的 `FileStatus` 一致。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStatus {
    pub path: PathBuf,
    pub is_dir: bool,
    // 自 UNIX 纪元以来的毫秒数
    pub modification_time: i64,
    pub owner: String,
    pub len: u64,
}

/// 层级文件系统的最小能力集合。
///
/// 所有调用都是阻塞的。`list_status` 对不存在的路径必须返回 [`io::ErrorKind::NotFound`]，
/// 扫描器依赖它区分“用户从未聚合日志”与真正的 I/O 故障。
pub trait FileSystem {
    fn list_status(&self, path: &Path) -> io::Result<Vec<FileStatus>>;

    fn delete(&self, path: &Path, recursive: bool) -> io::Result<()>;

    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<F: FileSystem + ?Sized> FileSystem for &mut F {
    fn list_status(&self, path: &Path) -> io::Result<Vec<FileStatus>> {
        (**self).list_status(path)
    }

    fn delete(&self, path: &Path, recursive: bool) -> io::Result<()> {
        (**self).delete(path, recursive)
    }

    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

/// Closes the wrapped filesystem when dropped, on success and failure paths alike.
pub struct Scoped<F: FileSystem> {
    inner: F,
}

impl<F: FileSystem> Scoped<F> {
    pub fn new(inner: F) -> Self {
        Scoped { inner }
    }
}

impl<F: FileSystem> Deref for Scoped<F> {
    type Target = F;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<F: FileSystem> DerefMut for Scoped<F> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

impl<F: FileSystem> Drop for Scoped<F> {
    fn drop(&mut self) {
        match self.inner.close() {
            Ok(_) => debug!("Filesystem closed"),
            Err(e) => error!("Failed to close filesystem: {e}"),
        }
    }
}
