//! Banned-user roster.
//!
//! Loads the user records shown on the banned-user page from a local JSON
//! file. The records are handed to the page untouched.
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::{debug, warn};
use serde::Deserialize;

/// File name of the roster inside the data directory.
const ROSTER_FILE_NAME: &str = "banned_users.json";

/// A banned user as supplied by the backend export.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord
{
    /// Meta account identifier.
    pub meta_id: String,
    /// Given name.
    pub name: String,
    /// Family name.
    pub surname: String,
    /// Contact address, may be missing in older exports.
    #[serde(default)]
    pub email: String,
}

impl UserRecord
{
    /// Full name in "surname name" order, as listed on the page.
    #[must_use]
    pub fn display_name(&self) -> String
    {
        format!("{} {}", self.surname, self.name)
    }

    /// Returns the searchable fields of the record.
    #[must_use]
    pub const fn fields(&self) -> [&str; 4]
    {
        [
            self.meta_id.as_str(),
            self.name.as_str(),
            self.surname.as_str(),
            self.email.as_str(),
        ]
    }
}

/// Ordered collection of banned users.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster
{
    /// Records in file order.
    users: Vec<UserRecord>,
}

impl Roster
{
    /// Parses a roster from a JSON array of user records.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a JSON array of user records.
    pub fn from_json(text: &str) -> Result<Self>
    {
        let users: Vec<UserRecord> =
            serde_json::from_str(text).context("Malformed banned-user roster")?;

        Ok(Self { users })
    }

    /// Reads and parses a roster file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path of the JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self>
    {
        let text = fs::read_to_string(path)
            .context(format!("Failed to read roster {}", path.display()))?;

        let roster = Self::from_json(&text)
            .context(format!("Failed to parse roster {}", path.display()))?;

        debug!(
            "Loaded {} banned users from {}",
            roster.users.len(),
            path.display()
        );

        Ok(roster)
    }

    /// Loads the roster from the default location.
    ///
    /// A missing file is not an error: the page simply shows no users.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be determined or the
    /// file exists but cannot be read or parsed.
    pub fn load_default() -> Result<Self>
    {
        Self::load_or_empty(&Self::default_path()?)
    }

    /// Reads a roster file, treating a missing file as an empty roster.
    ///
    /// # Arguments
    ///
    /// * `path` - Path of the JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_empty(path: &Path) -> Result<Self>
    {
        if !path.exists()
        {
            warn!("No roster at {}, starting empty", path.display());
            return Ok(Self::default());
        }

        Self::load(path)
    }

    /// Location of the roster in the application's data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform data directory cannot be determined.
    pub fn default_path() -> Result<PathBuf>
    {
        let project_dirs = ProjectDirs::from("com", "commigo", "metaclass_ui")
            .context("Failed to determine project directories")?;

        Ok(project_dirs
            .data_dir()
            .join(ROSTER_FILE_NAME))
    }

    /// The records, in file order.
    #[must_use]
    pub fn users(&self) -> &[UserRecord]
    {
        &self.users
    }

    /// Consumes the roster, returning its records.
    #[must_use]
    pub fn into_users(self) -> Vec<UserRecord>
    {
        self.users
    }
}

#[cfg(test)]
mod tests
{
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    const SAMPLE: &str = r#"[
        {"metaId": "m-1", "name": "Ada", "surname": "Lovelace", "email": "ada@example.org"},
        {"metaId": "m-2", "name": "Alan", "surname": "Turing"}
    ]"#;

    #[test]
    fn parses_records_in_order()
    {
        let roster = Roster::from_json(SAMPLE).unwrap();
        let ids: Vec<&str> = roster
            .users()
            .iter()
            .map(|user| user.meta_id.as_str())
            .collect();

        assert_eq!(ids, ["m-1", "m-2"]);
        assert_eq!(roster.users()[0].email, "ada@example.org");
    }

    #[test]
    fn missing_email_defaults_to_empty()
    {
        let roster = Roster::from_json(SAMPLE).unwrap();

        assert!(roster.users()[1].email.is_empty());
        assert_eq!(roster.users()[1].display_name(), "Turing Alan");
    }

    #[test]
    fn rejects_malformed_json()
    {
        let err = Roster::from_json(r#"{"metaId": "m-1"}"#).unwrap_err();

        assert!(
            err.to_string()
                .contains("Malformed banned-user roster")
        );
    }

    #[test]
    fn empty_array_is_an_empty_roster()
    {
        let roster = Roster::from_json("[]").unwrap();

        assert!(roster.users().is_empty());
    }

    #[test]
    fn load_reads_file()
    {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes())
            .unwrap();

        let roster = Roster::load(file.path()).unwrap();

        assert_eq!(roster.into_users().len(), 2);
    }

    #[test]
    fn load_reports_path_of_missing_file()
    {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let err = Roster::load(&path).unwrap_err();

        assert!(
            err.to_string()
                .contains("absent.json")
        );
    }

    #[test]
    fn missing_file_is_an_empty_roster()
    {
        let dir = tempfile::tempdir().unwrap();

        let roster = Roster::load_or_empty(&dir.path().join("banned_users.json")).unwrap();

        assert!(roster.users().is_empty());
    }

    #[test]
    fn existing_file_is_loaded_not_emptied()
    {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes())
            .unwrap();

        let roster = Roster::load_or_empty(file.path()).unwrap();

        assert_eq!(roster.users().len(), 2);
    }

    #[test]
    fn malformed_existing_file_is_still_an_error()
    {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"not json")
            .unwrap();

        assert!(Roster::load_or_empty(file.path()).is_err());
    }

    #[test]
    fn demo_roster_loads()
    {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/banned_users.json");

        let roster = Roster::load(&path).unwrap();

        assert_eq!(roster.users().len(), 4);
        assert!(roster.users()[2].email.is_empty());
    }

    #[test]
    fn default_path_ends_with_roster_file()
    {
        if let Ok(path) = Roster::default_path()
        {
            assert!(path.ends_with(ROSTER_FILE_NAME));
        }
    }
}
