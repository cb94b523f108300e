//! Stored puzzle inputs on disk

use crate::error::StoreError;
use std::fs;
use std::path::PathBuf;

/// Directory of saved puzzle inputs
///
/// Layout: `{dir}/{year}_day{day:02}.txt`
pub struct InputStore {
    dir: PathBuf,
}

impl InputStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Path of the stored input for a year/day, whether or not it exists
    pub fn path(&self, year: u16, day: u8) -> PathBuf {
        self.dir.join(format!("{}_day{:02}.txt", year, day))
    }

    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.path(year, day).is_file()
    }

    /// Save `input` for later runs, creating the directory if needed
    pub fn put(&self, year: u16, day: u8, input: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::DirCreation {
            path: self.dir.clone(),
            source,
        })?;
        fs::write(self.path(year, day), input)?;
        Ok(())
    }
}
