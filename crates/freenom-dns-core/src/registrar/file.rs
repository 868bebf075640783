// # File Registrar
//
// Registrar backed by a JSON snapshot on disk.
//
// ## Purpose
//
// Keeps an account's zones across process runs, so a command line host can
// create a record in one invocation and find it in the next.
//
// ## Crash Recovery
//
// - Atomic writes: write-then-rename
// - Backup: the previous snapshot is kept as `.backup`
// - Recovery: a snapshot that fails to parse is replaced from the backup
// - A failed write leaves both the file and the in-memory view unchanged
//
// ## File Format
//
// ```json
// {
//   "version": "1.0",
//   "domains": {
//     "example.tk": {
//       "records": [
//         { "type": "A", "name": "www", "value": "10.0.0.1", "priority": 0, "ttl": 3600 }
//       ],
//       "updated_at": "2026-01-09T12:00:00Z"
//     }
//   }
// }
// ```

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;

use super::{ZoneBook, check_credentials};
use crate::config::{Credentials, RegistrarConfig};
use crate::record::RegistrarRecord;
use crate::traits::{DomainInfo, Registrar, RegistrarFactory};
use crate::Error;

const REGISTRAR_NAME: &str = "file";

/// Snapshot format version
const SNAPSHOT_VERSION: &str = "1.0";

#[derive(Debug, Default)]
struct FileAccount {
    book: ZoneBook,
    logged_in: bool,
}

impl FileAccount {
    fn require_login(&self) -> Result<(), Error> {
        if !self.logged_in {
            return Err(Error::auth("not logged in"));
        }
        Ok(())
    }
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct SnapshotFormat {
    version: String,
    #[serde(flatten)]
    book: ZoneBook,
}

/// File-backed registrar implementation
///
/// # Example
///
/// ```rust,no_run
/// use freenom_dns_core::config::Credentials;
/// use freenom_dns_core::registrar::FileRegistrar;
/// use freenom_dns_core::traits::Registrar;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let registrar = FileRegistrar::new("/var/lib/freenom/zones.json").await?;
///     registrar.login(&Credentials::new("alice", "secret")).await?;
///
///     let info = registrar.get_domain_info("example.tk").await?;
///     println!("{} records", info.records.len());
///
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct FileRegistrar {
    path: PathBuf,
    state: Arc<RwLock<FileAccount>>,
}

impl FileRegistrar {
    /// Open or create a snapshot
    ///
    /// Parent directories are created if needed. A missing file is an
    /// empty account. The snapshot holds no credentials, so any non-empty
    /// pair logs in.
    pub async fn new<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).await.map_err(|e| {
                Error::config(format!(
                    "Failed to create registrar directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let book = Self::load_with_recovery(&path).await?;

        Ok(Self {
            path,
            state: Arc::new(RwLock::new(FileAccount {
                book,
                ..FileAccount::default()
            })),
        })
    }

    /// Put a domain into the account. Returns `false` if it was already there.
    pub async fn add_domain(&self, domain: &str) -> Result<bool, Error> {
        let mut guard = self.state.write().await;
        let mut next = guard.book.clone();
        if !next.add_domain(domain) {
            return Ok(false);
        }
        self.write_snapshot(&next).await?;
        guard.book = next;
        Ok(true)
    }

    /// Names of all domains in the account, sorted
    pub async fn domains(&self) -> Vec<String> {
        self.state.read().await.book.domain_names()
    }

    /// Path of the snapshot file
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load_with_recovery(path: &Path) -> Result<ZoneBook, Error> {
        match Self::load(path).await {
            Ok(book) => Ok(book),
            Err(Error::Json(e)) => {
                tracing::warn!(
                    path = %path.display(),
                    "Registrar snapshot appears corrupted: {}. Attempting recovery from backup.",
                    e
                );

                let backup_path = Self::backup_path(path);
                if !backup_path.exists() {
                    return Err(Error::registrar(
                        REGISTRAR_NAME,
                        format!(
                            "snapshot {} is corrupted and no backup exists",
                            path.display()
                        ),
                    ));
                }

                let book = Self::load(&backup_path).await?;
                fs::copy(&backup_path, path).await?;
                tracing::info!(path = %path.display(), "Restored registrar snapshot from backup");
                Ok(book)
            }
            Err(e) => Err(e),
        }
    }

    async fn load(path: &Path) -> Result<ZoneBook, Error> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "Registrar snapshot does not exist yet");
            return Ok(ZoneBook::default());
        }

        let content = fs::read_to_string(path).await?;
        let snapshot: SnapshotFormat = serde_json::from_str(&content)?;

        if snapshot.version != SNAPSHOT_VERSION {
            tracing::warn!(
                "Registrar snapshot version mismatch: expected {}, got {}. Loading anyway.",
                SNAPSHOT_VERSION,
                snapshot.version
            );
        }

        Ok(snapshot.book)
    }

    async fn write_snapshot(&self, book: &ZoneBook) -> Result<(), Error> {
        let snapshot = SnapshotFormat {
            version: SNAPSHOT_VERSION.to_string(),
            book: book.clone(),
        };
        let json = serde_json::to_string_pretty(&snapshot)?;

        let temp_path = self.temp_path();
        {
            let mut file = fs::File::create(&temp_path).await?;
            file.write_all(json.as_bytes()).await?;
            file.flush().await?;
        }

        if self.path.exists()
            && let Err(e) = fs::copy(&self.path, Self::backup_path(&self.path)).await
        {
            tracing::warn!("Failed to create registrar backup: {}", e);
        }

        fs::rename(&temp_path, &self.path).await?;

        tracing::trace!(path = %self.path.display(), "Registrar snapshot written");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut temp = self.path.clone();
        temp.set_extension("tmp");
        temp
    }

    fn backup_path(path: &Path) -> PathBuf {
        let mut backup = path.to_path_buf();
        backup.set_extension("backup");
        backup
    }
}

#[async_trait]
impl Registrar for FileRegistrar {
    async fn login(&self, credentials: &Credentials) -> Result<(), Error> {
        let mut guard = self.state.write().await;
        check_credentials(None, credentials)?;
        guard.logged_in = true;
        Ok(())
    }

    async fn get_domain_info(&self, domain: &str) -> Result<DomainInfo, Error> {
        let guard = self.state.read().await;
        guard.require_login()?;
        guard.book.info(REGISTRAR_NAME, domain)
    }

    async fn add_record(&self, domain: &str, records: &[RegistrarRecord]) -> Result<(), Error> {
        let mut guard = self.state.write().await;
        guard.require_login()?;
        let mut next = guard.book.clone();
        next.add(domain, records);
        self.write_snapshot(&next).await?;
        guard.book = next;
        Ok(())
    }

    async fn modify_record(
        &self,
        domain: &str,
        old: &RegistrarRecord,
        new: &RegistrarRecord,
    ) -> Result<(), Error> {
        let mut guard = self.state.write().await;
        guard.require_login()?;
        let mut next = guard.book.clone();
        next.modify(domain, old, new)?;
        self.write_snapshot(&next).await?;
        guard.book = next;
        Ok(())
    }

    async fn delete_record(&self, domain: &str, record: &RegistrarRecord) -> Result<(), Error> {
        let mut guard = self.state.write().await;
        guard.require_login()?;
        let mut next = guard.book.clone();
        next.delete(domain, record)?;
        self.write_snapshot(&next).await?;
        guard.book = next;
        Ok(())
    }

    fn registrar_name(&self) -> &'static str {
        REGISTRAR_NAME
    }
}

/// Factory for [`FileRegistrar`]
pub struct FileRegistrarFactory;

#[async_trait]
impl RegistrarFactory for FileRegistrarFactory {
    async fn create(&self, config: &RegistrarConfig) -> Result<Arc<dyn Registrar>, Error> {
        match config {
            RegistrarConfig::File { path } => Ok(Arc::new(FileRegistrar::new(path).await?)),
            _ => Err(Error::config("Invalid config for file registrar")),
        }
    }
}
