use std::fs;
use std::path::PathBuf;

/// Where serialized config content lives. `None` from a read means the
/// source does not exist yet and defaults should be used.
pub trait ConfigContentProvider {
    fn read_content(&self) -> Result<Option<String>, String>;
    fn write_content(&self, content: &str) -> Result<(), String>;
}

pub struct FileContentProvider {
    path: PathBuf,
}

impl FileContentProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConfigContentProvider for FileContentProvider {
    fn read_content(&self) -> Result<Option<String>, String> {
        if !self.path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&self.path)
            .map(Some)
            .map_err(|e| format!("Failed to read config file {}: {}", self.path.display(), e))
    }

    fn write_content(&self, content: &str) -> Result<(), String> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }
        fs::write(&self.path, content)
            .map_err(|e| format!("Failed to write config file {}: {}", self.path.display(), e))
    }
}
