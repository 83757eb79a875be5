//! File system storage for threads

use dt_core::error::{DataThreadError, Result};
use dt_core::thread::{Thread, ThreadFile, ThreadMigrator, ThreadStorage, CURRENT_SCHEMA_VERSION};
use dt_core::types::ThreadId;
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Default data directory, falling back to `~/.datathread`
pub fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "datathread", "datathread")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".datathread")
        })
}

/// Subdirectory of the data directory holding thread documents
const THREADS_DIR: &str = "threads";

/// File system based thread storage, one JSON document per thread
pub struct FileSystemStorage {
    /// Base directory for storage
    base_dir: PathBuf,
    /// Threads subdirectory
    threads_dir: PathBuf,
}

impl FileSystemStorage {
    /// Open storage rooted at `base_dir`, creating `threads/` if needed
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        let threads_dir = base_dir.join(THREADS_DIR);
        fs::create_dir_all(&threads_dir)
            .map_err(io_context("Failed to create threads directory"))?;
        debug!("Thread store at {:?}", threads_dir);

        Ok(Self {
            base_dir,
            threads_dir,
        })
    }

    /// Create storage in the default data directory
    pub fn default_location() -> Result<Self> {
        Self::new(default_data_dir())
    }

    /// Create storage in `data_dir`, or the default location when unset
    pub fn open(data_dir: Option<&Path>) -> Result<Self> {
        data_dir.map_or_else(Self::default_location, Self::new)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn threads_dir(&self) -> &Path {
        &self.threads_dir
    }

    fn thread_path(&self, id: &ThreadId) -> PathBuf {
        self.threads_dir.join(format!("{}.json", id))
    }

    /// Hidden sibling of the thread document, renamed over it once written
    fn staging_path(&self, id: &ThreadId) -> PathBuf {
        self.threads_dir.join(format!(".{}.json.tmp", id))
    }

    fn write_document(&self, thread: &Thread) -> Result<()> {
        let staging = self.staging_path(&thread.id);
        let target = self.thread_path(&thread.id);

        let document = ThreadFile::new(thread.clone());
        let mut writer = fs::File::create(&staging)
            .map(BufWriter::new)
            .map_err(io_context("Failed to stage thread document"))?;
        serde_json::to_writer_pretty(&mut writer, &document)?;
        writer.flush()?;
        drop(writer);

        if let Err(e) = fs::rename(&staging, &target) {
            let _ = fs::remove_file(&staging);
            return Err(io_context("Failed to replace thread document")(e));
        }

        debug!(
            "Saved thread {} ({} comments)",
            thread.id,
            thread.comments.len()
        );
        Ok(())
    }

    fn read_document(&self, path: &Path) -> Result<Thread> {
        let reader = fs::File::open(path).map(BufReader::new)?;
        let document: ThreadFile = serde_json::from_reader(reader)?;

        if ThreadMigrator::needs_migration(&document) {
            info!(
                "Upgrading {:?} from schema {} to {}",
                path, document.schema_version, CURRENT_SCHEMA_VERSION
            );
        }
        Ok(ThreadMigrator::migrate(document)?.into_thread())
    }

    /// Stored thread documents in file name order
    fn documents(&self) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(&self.threads_dir)
            .map_err(io_context("Failed to list threads directory"))?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry.path()),
                Err(e) => {
                    warn!("Skipping unreadable entry in {:?}: {}", self.threads_dir, e);
                    None
                }
            })
            .filter(|path| is_thread_document(path))
            .collect();
        paths.sort();
        Ok(paths)
    }
}

/// `<id>.json`, excluding hidden staging files
fn is_thread_document(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    !name.starts_with('.') && path.extension().is_some_and(|ext| ext == "json")
}

fn io_context(action: &'static str) -> impl FnOnce(std::io::Error) -> DataThreadError {
    move |e| DataThreadError::Io(e).with_context(action)
}

impl ThreadStorage for FileSystemStorage {
    fn save(&self, thread: &Thread) -> Result<()> {
        self.write_document(thread)
    }

    fn load(&self, id: &ThreadId) -> Result<Thread> {
        let path = self.thread_path(id);
        if !path.exists() {
            return Err(DataThreadError::ThreadNotFound(id.to_string()));
        }
        self.read_document(&path)
    }

    fn load_all(&self) -> Result<Vec<Thread>> {
        let threads = self
            .documents()?
            .into_iter()
            .filter_map(|path| match self.read_document(&path) {
                Ok(thread) => Some(thread),
                Err(e) => {
                    warn!("Skipping unreadable thread document {:?}: {}", path, e);
                    None
                }
            })
            .collect();
        Ok(threads)
    }

    fn delete(&self, id: &ThreadId) -> Result<()> {
        let path = self.thread_path(id);
        if !path.exists() {
            return Err(DataThreadError::ThreadNotFound(id.to_string()));
        }
        fs::remove_file(&path).map_err(io_context("Failed to delete thread document"))?;

        debug!("Deleted thread {}", id);
        Ok(())
    }

    fn exists(&self, id: &ThreadId) -> bool {
        self.thread_path(id).exists()
    }
}
