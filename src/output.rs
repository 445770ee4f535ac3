use std::path::{Path, PathBuf};

use crate::error::ScrapeError;

/// Where one account's files land:
///
/// ```text
/// <root>/Instagram/<account>/<account>.csv
/// <root>/Instagram/<account>/<account>FOTOS/<n>.jpg
/// ```
#[derive(Debug, Clone)]
pub struct OutputLayout {
    account_dir: PathBuf,
    account: String,
}

impl OutputLayout {
    pub fn new(root: &Path, account: &str) -> Result<Self, ScrapeError> {
        validate_account(account)?;
        Ok(Self {
            account_dir: root.join("Instagram").join(account),
            account: account.to_string(),
        })
    }

    pub fn account_dir(&self) -> &Path {
        &self.account_dir
    }

    pub fn images_dir(&self) -> PathBuf {
        self.account_dir.join(format!("{}FOTOS", self.account))
    }

    pub fn image_path(&self, id: usize) -> PathBuf {
        self.images_dir().join(format!("{id}.jpg"))
    }

    pub fn csv_path(&self) -> PathBuf {
        self.account_dir.join(format!("{}.csv", self.account))
    }
}

/// The account name becomes a directory and file name, so it must be a single path component.
pub fn validate_account(account: &str) -> Result<(), ScrapeError> {
    let bad = account.is_empty()
        || account == "."
        || account == ".."
        || account.contains(['/', '\\']);
    if bad {
        return Err(ScrapeError::InvalidAccount(account.to_string()));
    }
    Ok(())
}
