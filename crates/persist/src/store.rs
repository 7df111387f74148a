//! File-backed save slots.
//!
//! Layout inside the store directory:
//! ```text
//! <slot>.save.json      - pretty-printed SaveFile
//! <slot>.save.json.tmp  - in-flight write, renamed over the slot on success
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use sandbox_kernel::WorldError;

use crate::save::SaveFile;

const SAVE_EXTENSION: &str = ".save.json";

/// Errors from save and load operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed world: {0}")]
    World(#[from] WorldError),
    #[error("integrity check failed: expected {expected}, got {actual}")]
    IntegrityMismatch { expected: String, actual: String },
    #[error("schema version mismatch: file has v{file_version}, expected v{expected_version}")]
    SchemaMismatch {
        file_version: u32,
        expected_version: u32,
    },
    #[error("invalid slot name {0:?}")]
    InvalidSlotName(String),
    #[error("no save in slot {0:?}")]
    SlotNotFound(String),
}

/// Directory of named save slots.
pub struct SaveStore {
    root: PathBuf,
}

impl SaveStore {
    /// Open or create a store at the given directory.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = path.as_ref().to_path_buf();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn slot_path(&self, slot: &str) -> Result<PathBuf, StoreError> {
        let valid = !slot.is_empty()
            && slot
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidSlotName(slot.to_string()));
        }
        Ok(self.root.join(format!("{slot}{SAVE_EXTENSION}")))
    }

    /// Write a save into a slot, replacing any previous one.
    pub fn save(&self, slot: &str, save: &SaveFile) -> Result<PathBuf, StoreError> {
        let path = self.slot_path(slot)?;
        write_save(&path, save)?;
        tracing::info!(slot, path = %path.display(), "game saved");
        Ok(path)
    }

    /// Read a slot. The returned file has not been restored yet.
    pub fn load(&self, slot: &str) -> Result<SaveFile, StoreError> {
        let path = self.slot_path(slot)?;
        if !path.exists() {
            return Err(StoreError::SlotNotFound(slot.to_string()));
        }
        read_save(&path)
    }

    /// Slot names present in the store, sorted.
    pub fn slots(&self) -> Result<Vec<String>, StoreError> {
        let mut slots = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let name = entry?.file_name();
            if let Some(slot) = name.to_str().and_then(|n| n.strip_suffix(SAVE_EXTENSION)) {
                slots.push(slot.to_string());
            }
        }
        slots.sort();
        Ok(slots)
    }
}

/// Write a save file to an arbitrary path via a temporary sibling.
pub fn write_save(path: &Path, save: &SaveFile) -> Result<(), StoreError> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    let result = write_then_rename(&tmp, path, save);
    if result.is_err() {
        // Never leave a half-written sibling behind.
        let _ = std::fs::remove_file(&tmp);
    }
    result
}

fn write_then_rename(tmp: &Path, path: &Path, save: &SaveFile) -> Result<(), StoreError> {
    let mut writer = std::io::BufWriter::new(std::fs::File::create(tmp)?);
    serde_json::to_writer_pretty(&mut writer, save)?;
    writer.flush()?;
    drop(writer);
    std::fs::rename(tmp, path)?;
    Ok(())
}

/// Read a save file from an arbitrary path.
pub fn read_save(path: &Path) -> Result<SaveFile, StoreError> {
    let reader = std::io::BufReader::new(std::fs::File::open(path)?);
    let save: SaveFile = serde_json::from_reader(reader)?;
    tracing::debug!(
        path = %path.display(),
        cols = save.cols,
        rows = save.rows,
        "save file read"
    );
    Ok(save)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use sandbox_common::TileType;
    use sandbox_kernel::{World, WorldConfig};
    use sandbox_physics::PhysicsConfig;
    use sandbox_player::Player;

    fn world() -> World {
        World::generate(WorldConfig {
            cols: 30,
            rows: 15,
            tile_size: 16,
            seed: 9,
        })
        .unwrap()
    }

    #[test]
    fn open_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SaveStore::open(tmp.path().join("saves")).unwrap();
        assert!(store.root().is_dir());
        assert!(store.slots().unwrap().is_empty());
    }

    #[test]
    fn save_and_load_slot() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SaveStore::open(tmp.path()).unwrap();

        let mut w = world();
        w.break_tile(5, 14);
        let player = Player::at(Vec2::new(40.0, 8.0), PhysicsConfig::default());
        store.save("slot-1", &SaveFile::capture(&w, Some(&player))).unwrap();

        // Reopen and load
        let store2 = SaveStore::open(tmp.path()).unwrap();
        let (loaded, p) = store2.load("slot-1").unwrap().restore().unwrap();
        assert_eq!(loaded.state_hash(), w.state_hash());
        assert_eq!(loaded.tile_at(5, 14), TileType::Empty);
        assert_eq!(p.unwrap().position(), Vec2::new(40.0, 8.0));
        assert_eq!(store2.slots().unwrap(), vec!["slot-1".to_string()]);
    }

    #[test]
    fn saving_twice_replaces_slot() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SaveStore::open(tmp.path()).unwrap();
        let mut w = world();
        store.save("a", &SaveFile::capture(&w, None)).unwrap();
        w.place_tile(2, 0, TileType::Dirt);
        store.save("a", &SaveFile::capture(&w, None)).unwrap();

        let (loaded, _) = store.load("a").unwrap().restore().unwrap();
        assert_eq!(loaded.tile_at(2, 0), TileType::Dirt);
        assert_eq!(store.slots().unwrap().len(), 1);
    }

    #[test]
    fn missing_slot_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SaveStore::open(tmp.path()).unwrap();
        assert!(matches!(store.load("nope"), Err(StoreError::SlotNotFound(_))));
    }

    #[test]
    fn path_like_slot_names_are_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SaveStore::open(tmp.path()).unwrap();
        let save = SaveFile::capture(&world(), None);
        assert!(matches!(
            store.save("../escape", &save),
            Err(StoreError::InvalidSlotName(_))
        ));
        assert!(matches!(store.load(""), Err(StoreError::InvalidSlotName(_))));
    }

    #[test]
    fn failed_write_removes_temp_file() {
        let tmp = tempfile::tempdir().unwrap();
        // A directory in the way makes the final rename fail.
        let target = tmp.path().join("blocked.save.json");
        std::fs::create_dir(&target).unwrap();

        let save = SaveFile::capture(&world(), None);
        assert!(matches!(write_save(&target, &save), Err(StoreError::Io(_))));
        assert!(!tmp.path().join("blocked.save.json.tmp").exists());
        assert!(target.is_dir());
    }

    #[test]
    fn corrupt_json_is_a_json_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("bad.save.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(read_save(&path), Err(StoreError::Json(_))));
    }
}
