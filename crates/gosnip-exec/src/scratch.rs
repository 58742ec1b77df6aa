//! Scratch directory for generated programs.
//!
//! Every call gets its own subdirectory, so one call cleaning up after itself
//! never removes a file another call is still running. The scratch directory
//! itself stays until [`ScratchDir::purge`]:
//!
//! ```text
//! <scratch>/call-<nanos>-<pid>-<seq>/temp-<nanos>.go
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

use crate::error::ExecError;

/// Permission bits for scratch directories.
pub const DIR_MODE: u32 = 0o755;
/// Permission bits for generated program files.
pub const FILE_MODE: u32 = 0o644;

const CALL_DIR_PREFIX: &str = "call";
const FILE_PREFIX: &str = "temp";
const FILE_EXTENSION: &str = "go";

/// Retries when a call directory name is taken or its parent vanished.
const CREATE_ATTEMPTS: usize = 8;

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// The managed directory holding per-call scratch files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    /// Manage the directory at `path`. Nothing is created until first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_dir()
    }

    /// Create a fresh, uniquely named program file for one call.
    ///
    /// The scratch directory and its parents are created on demand.
    pub fn create_file(&self) -> Result<ScratchFile, ExecError> {
        let mut last_error = None;

        for _ in 0..CREATE_ATTEMPTS {
            create_dir_all(&self.path)
                .map_err(|e| ExecError::filesystem("create directory", &self.path, e))?;

            let nanos = unix_nanos();
            let dir = self.path.join(format!(
                "{}-{}-{}-{}",
                CALL_DIR_PREFIX,
                nanos,
                std::process::id(),
                SEQUENCE.fetch_add(1, Ordering::Relaxed)
            ));

            match create_dir(&dir) {
                Ok(()) => {}
                // Name taken, or a purge removed the parent in between.
                Err(e)
                    if matches!(
                        e.kind(),
                        io::ErrorKind::AlreadyExists | io::ErrorKind::NotFound
                    ) =>
                {
                    debug!("retrying scratch directory after {}: {}", dir.display(), e);
                    last_error = Some(ExecError::filesystem("create directory", dir, e));
                    continue;
                }
                Err(e) => return Err(ExecError::filesystem("create directory", dir, e)),
            }

            let path = dir.join(format!("{}-{}.{}", FILE_PREFIX, nanos, FILE_EXTENSION));
            let file = match create_file(&path) {
                Ok(file) => file,
                Err(e) => {
                    let _ = fs::remove_dir_all(&dir);
                    return Err(ExecError::filesystem("create file", path, e));
                }
            };

            debug!("created scratch file {}", path.display());
            return Ok(ScratchFile {
                dir,
                path,
                file: Some(file),
                retain: false,
            });
        }

        Err(last_error.unwrap_or_else(|| {
            ExecError::filesystem(
                "create directory",
                &self.path,
                io::Error::new(io::ErrorKind::Other, "no attempts made"),
            )
        }))
    }

    /// Remove the whole scratch tree. Removing a missing tree is not an error.
    pub fn purge(&self) -> io::Result<()> {
        match fs::remove_dir_all(&self.path) {
            Ok(()) => {
                debug!("purged scratch directory {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// One call's generated program file.
///
/// Dropping it removes the call's directory unless [`ScratchFile::retain`]
/// was set.
#[derive(Debug)]
pub struct ScratchFile {
    dir: PathBuf,
    path: PathBuf,
    file: Option<File>,
    retain: bool,
}

impl ScratchFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The per-call directory containing the file.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Keep the file on disk after this handle is dropped.
    pub fn retain(&mut self, retain: bool) {
        self.retain = retain;
    }

    /// Write the program and close the handle so the toolchain can read it.
    pub fn write_program(&mut self, program: &str) -> Result<(), ExecError> {
        let mut file = match self.file.take() {
            Some(file) => file,
            None => OpenOptions::new()
                .write(true)
                .truncate(true)
                .open(&self.path)
                .map_err(|e| ExecError::filesystem("open file", &self.path, e))?,
        };

        file.write_all(program.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|e| ExecError::filesystem("write file", &self.path, e))
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        // Close before removing; Windows refuses to delete open files.
        self.file.take();

        if self.retain {
            debug!("keeping scratch file {}", self.path.display());
            return;
        }

        match fs::remove_dir_all(&self.dir) {
            Ok(()) => debug!("removed scratch directory {}", self.dir.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(
                "failed to remove scratch directory {}: {}",
                self.dir.display(),
                e
            ),
        }
    }
}

fn unix_nanos() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default()
}

fn create_dir_all(path: &Path) -> io::Result<()> {
    dir_builder(true).create(path)
}

fn create_dir(path: &Path) -> io::Result<()> {
    dir_builder(false).create(path)
}

fn dir_builder(recursive: bool) -> fs::DirBuilder {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(recursive);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }
    builder
}

fn create_file(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }
    options.open(path)
}
