use std::{collections::HashMap, fs, path::{Path, PathBuf}};

use anyhow::{Context, Result};
use tracing::debug;

use crate::{Character, CurseResistance, StoreError};

/// Where the host keeps character records. The rules only ever write back curse
/// resistance, and never wait on or retry that write.
pub trait CharacterStore {
    fn save_curse_resistance(
        &mut self,
        character_id: &str,
        resistance: &CurseResistance,
    ) -> Result<(), StoreError>;
}

/// Stores nothing. For rolls whose write-back is handled elsewhere.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullStore;

impl CharacterStore for NullStore {
    fn save_curse_resistance(&mut self, _: &str, _: &CurseResistance) -> Result<(), StoreError> {
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    characters: HashMap<String, Character>,
    /// Every write in arrival order.
    pub writes: Vec<(String, CurseResistance)>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes always fail.
    pub fn failing() -> Self {
        Self { fail_writes: true, ..Self::default() }
    }

    pub fn insert(&mut self, character: Character) {
        self.characters.insert(character.id.clone(), character);
    }

    pub fn get(&self, id: &str) -> Option<&Character> {
        self.characters.get(id)
    }
}

impl CharacterStore for MemoryStore {
    fn save_curse_resistance(
        &mut self,
        character_id: &str,
        resistance: &CurseResistance,
    ) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Rejected("store is read-only".to_string()));
        }
        self.writes.push((character_id.to_string(), *resistance));
        if let Some(c) = self.characters.get_mut(character_id) {
            c.system.curse_resistance = Some(*resistance);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
}

impl FileFormat {
    /// `.yaml` / `.yml` are YAML, everything else JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()).map(str::to_lowercase).as_deref() {
            Some("yaml") | Some("yml") => FileFormat::Yaml,
            _ => FileFormat::Json,
        }
    }
}

pub fn parse_character(text: &str, format: FileFormat) -> Result<Character> {
    let character = match format {
        FileFormat::Json => serde_json::from_str(text).context("invalid character JSON")?,
        FileFormat::Yaml => serde_yaml::from_str(text).context("invalid character YAML")?,
    };
    Ok(character)
}

pub fn render_character(character: &Character, format: FileFormat) -> Result<String, StoreError> {
    Ok(match format {
        FileFormat::Json => serde_json::to_string_pretty(character)?,
        FileFormat::Yaml => serde_yaml::to_string(character)?,
    })
}

/// One character kept in a JSON or YAML file; a write-back rewrites the file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    format: FileFormat,
    character: Character,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>, character: Character) -> Self {
        let path = path.into();
        let format = FileFormat::from_path(&path);
        Self { path, format, character }
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn save(&self) -> Result<(), StoreError> {
        fs::write(&self.path, render_character(&self.character, self.format)?)?;
        debug!(path = %self.path.display(), "character written");
        Ok(())
    }
}

impl CharacterStore for FileStore {
    fn save_curse_resistance(
        &mut self,
        character_id: &str,
        resistance: &CurseResistance,
    ) -> Result<(), StoreError> {
        if self.character.id != character_id {
            return Err(StoreError::UnknownCharacter(character_id.to_string()));
        }
        self.character.system.curse_resistance = Some(*resistance);
        self.save()
    }
}
