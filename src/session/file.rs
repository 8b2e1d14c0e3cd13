use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::PathBuf,
};

use crate::{prelude::*, session::KeyValueStore};

/// Store kept in a TOML file as a flat table of strings.
///
/// The file is re-read on every access and rewritten on every change. A missing file is an
/// empty store.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> Result<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => toml::from_str(&contents)
                .with_context(|| format!("failed to parse `{}`", self.path.display())),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(error) => {
                Err(error).with_context(|| format!("failed to read `{}`", self.path.display()))
            }
        }
    }

    fn write(&self, table: &BTreeMap<String, String>) -> Result {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create `{}`", parent.display()))?;
        }
        fs::write(&self.path, toml::to_string(table)?)
            .with_context(|| format!("failed to write `{}`", self.path.display()))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result {
        let mut table = self.read()?;
        table.insert(key.to_owned(), value.to_owned());
        self.write(&table)
    }

    fn remove(&mut self, key: &str) -> Result {
        let mut table = self.read()?;
        if table.remove(key).is_some() {
            self.write(&table)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{SessionStore, Theme};

    #[test]
    fn missing_file_is_empty() -> Result {
        let directory = tempfile::tempdir()?;
        let store = FileStore::new(directory.path().join("session.toml"));
        assert_eq!(store.get("theme")?, None);
        Ok(())
    }

    #[test]
    fn values_survive_reopening() -> Result {
        let directory = tempfile::tempdir()?;
        let path = directory.path().join("nested").join("session.toml");

        let mut store = FileStore::new(&path);
        store.set("token", "abc")?;
        store.set("user", r#"{"id":"1","name":"Amina"}"#)?;
        store.remove("token")?;

        let store = FileStore::new(&path);
        assert_eq!(store.get("token")?, None);
        assert_eq!(store.get("user")?.as_deref(), Some(r#"{"id":"1","name":"Amina"}"#));
        Ok(())
    }

    #[test]
    fn session_store_over_file_ok() -> Result {
        let directory = tempfile::tempdir()?;
        let path = directory.path().join("session.toml");

        SessionStore::load(FileStore::new(&path))?.set_theme(Theme::Dark)?;
        assert_eq!(SessionStore::load(FileStore::new(&path))?.session().theme, Theme::Dark);
        Ok(())
    }

    #[test]
    fn garbage_file_is_an_error() -> Result {
        let directory = tempfile::tempdir()?;
        let path = directory.path().join("session.toml");
        fs::write(&path, "this is = = not toml")?;
        assert!(FileStore::new(&path).get("theme").is_err());
        Ok(())
    }
}
