//! # Launcher Registry
//!
//! The registry of launchable application shortcuts.
//!
//! ## Philosophy
//!
//! - **Built-ins are code, not data**: the two internal shortcuts are
//!   re-seeded on every load and never persisted; only installed external
//!   shortcuts reach storage
//! - **Fail-soft**: an absent medium or a corrupt resource falls back to
//!   the built-ins alone — boot never aborts over the registry, and a
//!   half-parsed resource never produces a partial list
//! - **Full rewrite**: every install rewrites the persisted resource in
//!   its entirety; there is no incremental update and no schema version

mod persistence;

pub use persistence::{decode_records, encode_records, ShortcutRecord};

use core_types::{AppKind, Rgb565};
use hal::StorageMedium;
use thiserror::Error;

/// Resource name of the persisted registry.
pub const REGISTRY_RESOURCE: &str = "apps.json";

/// Exec token dispatching the built-in settings application.
pub const EXEC_SETTINGS: &str = "sys.settings";
/// Exec token dispatching the built-in messenger application.
pub const EXEC_MESSENGER: &str = "sys.messenger";

/// Launcher operation errors.
#[derive(Debug, Error)]
pub enum LauncherError {
    #[error("Failed to persist registry: {0}")]
    Persist(String),
}

/// One launchable entry on the home grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppShortcut {
    /// Display name
    pub name: String,
    /// Optional icon resource; empty means "draw the initial"
    pub icon_path: String,
    /// Tile color when no icon is drawn
    pub color: Rgb565,
    pub kind: AppKind,
    /// Built-in exec token or storage path of the executable
    pub exec_path: String,
}

/// Ordered shortcut list with persistence semantics.
#[derive(Debug, Default)]
pub struct ShortcutRegistry {
    shortcuts: Vec<AppShortcut>,
}

impl ShortcutRegistry {
    pub fn new() -> Self {
        Self {
            shortcuts: Vec::new(),
        }
    }

    /// Rebuilds the list: built-ins first, then whatever the medium holds.
    ///
    /// Any read or parse failure leaves exactly the built-ins.
    pub fn load(&mut self, storage: &dyn StorageMedium) {
        self.shortcuts.clear();
        self.shortcuts.push(AppShortcut {
            name: "Settings".to_string(),
            icon_path: String::new(),
            color: Rgb565::new(0x738E),
            kind: AppKind::Internal,
            exec_path: EXEC_SETTINGS.to_string(),
        });
        self.shortcuts.push(AppShortcut {
            name: "Chat".to_string(),
            icon_path: String::new(),
            color: Rgb565::new(0x3333),
            kind: AppKind::Internal,
            exec_path: EXEC_MESSENGER.to_string(),
        });

        if !storage.available() || !storage.exists(REGISTRY_RESOURCE) {
            return;
        }
        let Ok(bytes) = storage.read(REGISTRY_RESOURCE) else {
            return;
        };
        let Ok(records) = decode_records(&bytes) else {
            return;
        };
        for record in records {
            self.shortcuts.push(AppShortcut {
                name: record.name,
                icon_path: String::new(),
                color: record.color,
                kind: AppKind::External,
                exec_path: record.path,
            });
        }
    }

    /// Appends an external shortcut and persists the registry
    pub fn install(
        &mut self,
        name: &str,
        path: &str,
        color: Rgb565,
        storage: &mut dyn StorageMedium,
    ) -> Result<(), LauncherError> {
        self.shortcuts.push(AppShortcut {
            name: name.to_string(),
            icon_path: String::new(),
            color,
            kind: AppKind::External,
            exec_path: path.to_string(),
        });
        self.save(storage)
    }

    /// Rewrites the persisted resource from the external entries.
    ///
    /// A missing medium makes this a no-op; the in-memory list is already
    /// the source of truth for this session.
    pub fn save(&self, storage: &mut dyn StorageMedium) -> Result<(), LauncherError> {
        if !storage.available() {
            return Ok(());
        }
        let records: Vec<ShortcutRecord> = self
            .shortcuts
            .iter()
            .filter(|s| s.kind == AppKind::External)
            .map(|s| ShortcutRecord {
                name: s.name.clone(),
                path: s.exec_path.clone(),
                color: s.color,
            })
            .collect();
        let bytes = encode_records(&records).map_err(|e| LauncherError::Persist(e.to_string()))?;
        storage
            .write(REGISTRY_RESOURCE, &bytes)
            .map_err(|e| LauncherError::Persist(e.to_string()))
    }

    /// The live ordered list, built-ins first
    pub fn shortcuts(&self) -> &[AppShortcut] {
        &self.shortcuts
    }

    pub fn len(&self) -> usize {
        self.shortcuts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shortcuts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hal::MemoryStore;

    #[test]
    fn test_load_without_medium_yields_builtins() {
        let mut registry = ShortcutRegistry::new();
        // dirty prior state must not survive a load
        registry
            .install("Stale", "/stale.bin", Rgb565::new(1), &mut MemoryStore::new())
            .unwrap();

        registry.load(&MemoryStore::missing());
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.shortcuts()[0].name, "Settings");
        assert_eq!(registry.shortcuts()[1].name, "Chat");
        assert!(registry.shortcuts().iter().all(|s| s.kind == AppKind::Internal));
    }

    #[test]
    fn test_install_persists_only_externals() {
        let mut storage = MemoryStore::new();
        let mut registry = ShortcutRegistry::new();
        registry.load(&storage);

        registry
            .install("Doom", "/doom.bin", Rgb565::new(0xF800), &mut storage)
            .unwrap();
        assert_eq!(registry.len(), 3);

        let mut reloaded = ShortcutRegistry::new();
        reloaded.load(&storage);
        assert_eq!(reloaded.len(), 3);
        let external: Vec<_> = reloaded
            .shortcuts()
            .iter()
            .filter(|s| s.kind == AppKind::External)
            .collect();
        assert_eq!(external.len(), 1);
        assert_eq!(external[0].name, "Doom");
        assert_eq!(external[0].exec_path, "/doom.bin");
        assert_eq!(external[0].color, Rgb565::new(0xF800));
    }

    #[test]
    fn test_corrupt_resource_falls_back_to_builtins() {
        let mut storage = MemoryStore::new();
        storage.write(REGISTRY_RESOURCE, b"{ not json").unwrap();

        let mut registry = ShortcutRegistry::new();
        registry.load(&storage);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_load_preserves_install_order() {
        let mut storage = MemoryStore::new();
        let mut registry = ShortcutRegistry::new();
        registry.load(&storage);
        registry
            .install("One", "/one.bin", Rgb565::new(1), &mut storage)
            .unwrap();
        registry
            .install("Two", "/two.bin", Rgb565::new(2), &mut storage)
            .unwrap();

        let mut reloaded = ShortcutRegistry::new();
        reloaded.load(&storage);
        let names: Vec<_> = reloaded.shortcuts().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Settings", "Chat", "One", "Two"]);
    }

    #[test]
    fn test_install_without_medium_keeps_memory_list() {
        let mut storage = MemoryStore::missing();
        let mut registry = ShortcutRegistry::new();
        registry.load(&storage);
        registry
            .install("Doom", "/doom.bin", Rgb565::new(3), &mut storage)
            .unwrap();
        assert_eq!(registry.len(), 3);
    }
}
