use super::{FileStatus, FileSystem};
use std::{
    cell::RefCell,
    collections::HashSet,
    io,
    path::{Path, PathBuf},
};

/// 测试用的内存文件系统，列出顺序即插入顺序。
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    entries: RefCell<Vec<FileStatus>>,
    failing_lists: HashSet<PathBuf>,
    failing_deletes: HashSet<PathBuf>,
    listed: RefCell<Vec<PathBuf>>,
    closed: usize,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mkdir(&mut self, path: &str, owner: &str, modification_time: i64) -> &mut Self {
        let path = PathBuf::from(path);
        self.ensure_parents(&path, owner);
        self.entries.get_mut().push(FileStatus {
            path,
            is_dir: true,
            modification_time,
            owner: owner.to_string(),
            len: 0,
        });
        self
    }

    pub fn touch(&mut self, path: &str, owner: &str, len: u64) -> &mut Self {
        let path = PathBuf::from(path);
        self.ensure_parents(&path, owner);
        self.entries.get_mut().push(FileStatus {
            path,
            is_dir: false,
            modification_time: 0,
            owner: owner.to_string(),
            len,
        });
        self
    }

    pub fn fail_list(&mut self, path: &str) -> &mut Self {
        self.failing_lists.insert(PathBuf::from(path));
        self
    }

    pub fn fail_delete(&mut self, path: &str) -> &mut Self {
        self.failing_deletes.insert(PathBuf::from(path));
        self
    }

    pub fn exists(&self, path: &str) -> bool {
        self.find(Path::new(path)).is_some()
    }

    pub fn close_count(&self) -> usize {
        self.closed
    }

    pub fn listed(&self) -> Vec<PathBuf> {
        self.listed.borrow().clone()
    }

    fn ensure_parents(&mut self, path: &Path, owner: &str) {
        let Some(parent) = path.parent() else {
            return;
        };
        if parent == Path::new("/") || parent.as_os_str().is_empty() {
            return;
        }
        if self.find(parent).is_none() {
            self.ensure_parents(parent, owner);
            self.entries.get_mut().push(FileStatus {
                path: parent.to_path_buf(),
                is_dir: true,
                modification_time: 0,
                owner: owner.to_string(),
                len: 0,
            });
        }
    }

    fn find(&self, path: &Path) -> Option<FileStatus> {
        self.entries
            .borrow()
            .iter()
            .find(|status| status.path == path)
            .cloned()
    }
}

impl FileSystem for MemoryFileSystem {
    fn list_status(&self, path: &Path) -> io::Result<Vec<FileStatus>> {
        self.listed.borrow_mut().push(path.to_path_buf());
        if self.failing_lists.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("injected list failure: {}", path.display()),
            ));
        }
        if path != Path::new("/") {
            match self.find(path) {
                Some(status) if status.is_dir => {}
                Some(status) => return Ok(vec![status]),
                None => {
                    return Err(io::Error::new(
                        io::ErrorKind::NotFound,
                        format!("{} does not exist", path.display()),
                    ));
                }
            }
        }

        Ok(self
            .entries
            .borrow()
            .iter()
            .filter(|status| status.path.parent() == Some(path))
            .cloned()
            .collect())
    }

    fn delete(&self, path: &Path, recursive: bool) -> io::Result<()> {
        if self.failing_deletes.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("injected delete failure: {}", path.display()),
            ));
        }
        let mut entries = self.entries.borrow_mut();
        let has_children = entries.iter().any(|status| status.path.parent() == Some(path));
        if has_children && !recursive {
            return Err(io::Error::other(format!(
                "{} is not empty",
                path.display()
            )));
        }
        let before = entries.len();
        entries.retain(|status| !status.path.starts_with(path));
        if entries.len() == before {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            ));
        }

        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        self.closed += 1;
        Ok(())
    }
}
