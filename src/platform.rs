//! Host-provided capabilities.
//!
//! The engine never touches a clipboard or a save dialog directly; the
//! runtime environment supplies these two capabilities and substitutes its
//! native equivalents (browser APIs, `arboard`, a download sink, ...).

use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::{Error, Result};

/// Write-only clipboard access.
pub trait Clipboard {
    fn write_text(&self, text: &str) -> Result<()>;
}

/// Sink for generated files offered to the user.
pub trait FileSaver {
    fn save_text_file(&self, name: &str, contents: &str) -> Result<()>;
}

/// A `FileSaver` that writes into a target directory.
#[derive(Debug, Clone)]
pub struct DirectoryFileSaver {
    dir: PathBuf,
}

impl DirectoryFileSaver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).exists()
    }
}

impl FileSaver for DirectoryFileSaver {
    fn save_text_file(&self, name: &str, contents: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(name);
        std::fs::write(&path, contents)?;
        Ok(())
    }
}

/// An in-memory `Clipboard` for tests and headless hosts.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().expect("clipboard mutex poisoned").clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        *self.contents.lock().expect("clipboard mutex poisoned") = Some(text.to_string());
        Ok(())
    }
}

/// A `Clipboard` that always fails, for exercising the error path.
#[derive(Debug, Default)]
pub struct UnavailableClipboard;

impl Clipboard for UnavailableClipboard {
    fn write_text(&self, _text: &str) -> Result<()> {
        Err(Error::Clipboard {
            detail: "no clipboard is available in this environment".into(),
        })
    }
}

/// An in-memory `FileSaver` recording `(name, contents)` pairs.
#[derive(Debug, Default)]
pub struct MemoryFileSaver {
    saved: Mutex<Vec<(String, String)>>,
}

impl MemoryFileSaver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saved(&self) -> Vec<(String, String)> {
        self.saved.lock().expect("saver mutex poisoned").clone()
    }
}

impl FileSaver for MemoryFileSaver {
    fn save_text_file(&self, name: &str, contents: &str) -> Result<()> {
        self.saved
            .lock()
            .expect("saver mutex poisoned")
            .push((name.to_string(), contents.to_string()));
        Ok(())
    }
}
