//! Host-side HAL implementations

use core_types::{Rect, Rgb565};
use hal::{Clock, CredentialStore, DisplayPanel, StorageError, StorageMedium, TextAnchor};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Storage medium backed by files under a state directory.
pub struct DirStorage {
    root: PathBuf,
}

impl DirStorage {
    /// Opens (creating if needed) the state directory
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| StorageError::Io(e.to_string()))?;
        Ok(Self { root })
    }

    fn resource_path(&self, resource: &str) -> PathBuf {
        self.root.join(resource)
    }
}

impl StorageMedium for DirStorage {
    fn available(&self) -> bool {
        self.root.is_dir()
    }

    fn exists(&self, resource: &str) -> bool {
        self.resource_path(resource).is_file()
    }

    fn read(&self, resource: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.resource_path(resource);
        if !path.is_file() {
            return Err(StorageError::NotFound(resource.to_string()));
        }
        fs::read(&path).map_err(|e| StorageError::Io(e.to_string()))
    }

    fn write(&mut self, resource: &str, bytes: &[u8]) -> Result<(), StorageError> {
        fs::write(self.resource_path(resource), bytes).map_err(|e| StorageError::Io(e.to_string()))
    }
}

/// Credential store persisted as one JSON document in the state directory.
pub struct FileCredentials {
    path: PathBuf,
    entries: HashMap<String, HashMap<String, String>>,
}

impl FileCredentials {
    /// Loads existing credentials, falling back to empty on any damage
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = fs::read(&path)
            .ok()
            .and_then(|bytes| serde_json::from_slice(&bytes).ok())
            .unwrap_or_default();
        Self { path, entries }
    }

    fn persist(&self) -> Result<(), StorageError> {
        let bytes =
            serde_json::to_vec_pretty(&self.entries).map_err(|e| StorageError::Io(e.to_string()))?;
        fs::write(&self.path, bytes).map_err(|e| StorageError::Io(e.to_string()))
    }
}

impl CredentialStore for FileCredentials {
    fn read(&self, namespace: &str, key: &str) -> Option<String> {
        self.entries.get(namespace)?.get(key).cloned()
    }

    fn write(&mut self, namespace: &str, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .entry(namespace.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
        self.persist()
    }
}

/// Monotonic clock over [`Instant`].
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn poll_millis(&mut self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Headless display that counts primitives and optionally echoes text
/// runs to stdout, keeping long runs at constant memory.
pub struct ConsoleDisplay {
    width: i32,
    height: i32,
    echo_text: bool,
    ops: u64,
}

impl ConsoleDisplay {
    pub fn new(echo_text: bool) -> Self {
        Self {
            width: 240,
            height: 320,
            echo_text,
            ops: 0,
        }
    }

    /// Primitives drawn since start
    pub fn op_count(&self) -> u64 {
        self.ops
    }

    fn bump(&mut self) {
        self.ops += 1;
    }
}

impl DisplayPanel for ConsoleDisplay {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn fill_screen(&mut self, _color: Rgb565) {
        self.bump();
    }

    fn fill_rect(&mut self, _rect: Rect, _color: Rgb565) {
        self.bump();
    }

    fn draw_rect(&mut self, _rect: Rect, _color: Rgb565) {
        self.bump();
    }

    fn fill_round_rect(&mut self, _rect: Rect, _radius: i32, _color: Rgb565) {
        self.bump();
    }

    fn draw_round_rect(&mut self, _rect: Rect, _radius: i32, _color: Rgb565) {
        self.bump();
    }

    fn draw_hline(&mut self, _x: i32, _y: i32, _w: i32, _color: Rgb565) {
        self.bump();
    }

    fn draw_vline(&mut self, _x: i32, _y: i32, _h: i32, _color: Rgb565) {
        self.bump();
    }

    fn draw_line(&mut self, _x0: i32, _y0: i32, _x1: i32, _y1: i32, _color: Rgb565) {
        self.bump();
    }

    fn fill_circle(&mut self, _cx: i32, _cy: i32, _radius: i32, _color: Rgb565) {
        self.bump();
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        _anchor: TextAnchor,
        _color: Rgb565,
        _bg: Option<Rgb565>,
    ) {
        self.bump();
        if self.echo_text {
            println!("[draw {x:3},{y:3}] {text}");
        }
    }

    fn text_width(&self, text: &str) -> i32 {
        8 * text.chars().count() as i32
    }
}
