//! File helpers shared by the `yokai` and `simulate-rolls` binaries.

use anyhow::Context;
use encoding_rs::Encoding;
use std::{fs, path::Path};
use yokai_engine::{
    store::{parse_character, FileFormat},
    Character,
};

/// Read a text file, honoring a UTF-8/UTF-16 byte order mark when present.
pub fn read_text_auto(path: &Path) -> anyhow::Result<String> {
    let bytes = fs::read(path)?;
    if let Some((enc, bom_len)) = Encoding::for_bom(&bytes) {
        let (cow, _, _) = enc.decode(&bytes[bom_len..]);
        Ok(cow.into_owned())
    } else {
        Ok(String::from_utf8(bytes)?)
    }
}

/// Load a JSON or YAML character (by extension) and fill its sheet defaults.
pub fn read_character(path: &Path) -> anyhow::Result<Character> {
    let text = read_text_auto(path)
        .with_context(|| format!("failed to read character file: {}", path.display()))?;
    let mut character = parse_character(&text, FileFormat::from_path(path))
        .with_context(|| format!("failed to parse character file: {}", path.display()))?;
    character.prepare();
    Ok(character)
}
