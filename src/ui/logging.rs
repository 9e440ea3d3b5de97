//! Logging utilities.
//!
//! The terminal belongs to the UI, so log records go to a size-rotated file
//! in the user's cache directory instead.

use std::fs::{create_dir_all, remove_file};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::BaseDirs;
use env_logger::{Builder, Target, fmt::TimestampPrecision};
use file_rotate::compression::Compression;
use file_rotate::suffix::AppendCount;
use file_rotate::{ContentLimit, FileRotate};
use log::LevelFilter;

const LOG_FILE_NAME: &str = "metaclass_ui.log";

/// Rotate once the live file reaches 1 MiB.
const MAX_LOG_BYTES: usize = 1024 * 1024;

/// Rotated files kept next to the live one.
const KEPT_LOG_FILES: usize = 3;

/// Location of the live log file.
///
/// # Errors
///
/// Returns an error if the user's home directory cannot be determined.
pub fn log_file_path() -> Result<PathBuf>
{
    let base_dirs = BaseDirs::new().context("Failed to determine home directory")?;

    Ok(base_dirs
        .cache_dir()
        .join(LOG_FILE_NAME))
}

/// Initializes the logging system for the application.
///
/// Sets `Info` as the default level and `Debug` for this crate, with
/// millisecond timestamps.
///
/// # Arguments
///
/// * `log_path` - Path of the live log file, usually from [`log_file_path`]
///
/// # Errors
///
/// Returns an error if the log directory cannot be created or a logger is
/// already installed.
pub fn init_logging(log_path: &Path) -> Result<()>
{
    if let Some(log_dir) = log_path.parent()
    {
        create_dir_all(log_dir).context("Failed to create log directory")?;
    }

    let log_file = FileRotate::new(
        log_path,
        AppendCount::new(KEPT_LOG_FILES),
        ContentLimit::Bytes(MAX_LOG_BYTES),
        Compression::None,
        #[cfg(unix)]
        None,
    );

    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter_module("metaclass_ui", LevelFilter::Debug)
        .format_timestamp(Some(TimestampPrecision::Millis))
        .target(Target::Pipe(Box::new(log_file)))
        .try_init()
        .context("Failed to initialize logger")?;

    Ok(())
}

/// Removes the log file and its rotated copies.
///
/// Files that do not exist are skipped.
///
/// # Arguments
///
/// * `log_path` - Path of the live log file
///
/// # Errors
///
/// Returns an error if an existing file cannot be removed.
pub fn clear_log_files(log_path: &Path) -> Result<()>
{
    let rotated = (1..=KEPT_LOG_FILES).map(|index| {
        let mut name = log_path.as_os_str().to_owned();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    });

    for path in std::iter::once(log_path.to_path_buf()).chain(rotated)
    {
        if path.exists()
        {
            remove_file(&path).context(format!("Failed to remove {}", path.display()))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests
{
    use std::fs::{File, read_dir};

    use super::*;

    #[test]
    fn log_file_lives_in_cache_dir()
    {
        if let Ok(path) = log_file_path()
        {
            assert!(path.ends_with(LOG_FILE_NAME));
        }
    }

    #[test]
    fn clears_live_and_rotated_files()
    {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join(LOG_FILE_NAME);

        File::create(&log_path).unwrap();
        File::create(dir.path().join("metaclass_ui.log.1")).unwrap();
        File::create(dir.path().join("metaclass_ui.log.3")).unwrap();
        File::create(dir.path().join("unrelated.txt")).unwrap();

        clear_log_files(&log_path).unwrap();

        let remaining: Vec<String> = read_dir(dir.path())
            .unwrap()
            .map(|entry| {
                entry
                    .unwrap()
                    .file_name()
                    .into_string()
                    .unwrap()
            })
            .collect();

        assert_eq!(remaining, ["unrelated.txt"]);
    }

    #[test]
    fn clearing_nothing_is_fine()
    {
        let dir = tempfile::tempdir().unwrap();

        clear_log_files(&dir.path().join(LOG_FILE_NAME)).unwrap();
    }
}
