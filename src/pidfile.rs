//! PID file management: write this process's pid on start, remove it on a
//! clean shutdown.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct PidFile {
    path: PathBuf,
}

impl PidFile {
    pub fn create(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut file = fs::File::create(&path)?;
        writeln!(file, "{}", std::process::id())?;
        Ok(PidFile { path })
    }

    pub fn remove(&self) {
        if let Err(e) = fs::remove_file(&self.path) {
            log::warn!("failed to remove pid file {}: {}", self.path.display(), e);
        }
    }
}

impl Drop for PidFile {
    fn drop(&mut self) {
        self.remove();
    }
}
