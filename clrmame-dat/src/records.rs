//! Typed records decoded from `clrmamepro`, `game` and `rom` groups.

use std::fmt;

use serde::Serialize;

use crate::decode::Entity;

/// Named string fields shared by every record type.
pub trait AsFields {
    /// Type name used when displaying the record.
    const NAME: &'static str;
    /// Recognized scalar field names, in display order.
    const FIELDS: &'static [&'static str];

    fn field(&self, name: &str) -> Option<&str>;

    /// Assign a recognized field. Returns `false` for unknown names.
    fn set_field(&mut self, name: &str, value: String) -> bool;

    fn as_fields(&self) -> Vec<(&'static str, Option<&str>)> {
        Self::FIELDS.iter().map(|&f| (f, self.field(f))).collect()
    }
}

/// Construction from a group's decoded child pairs.
///
/// Unknown keys are ignored, as are nested groups under a scalar field name.
pub trait FromPairs: Sized + Default + AsFields {
    fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, Entity)>,
    {
        let mut record = Self::default();
        for (key, value) in pairs {
            match value {
                Entity::Leaf(value) => {
                    if !record.set_field(&key, value) {
                        log::debug!("ignoring unknown {} field {key:?}", Self::NAME);
                    }
                }
                _ => log::debug!("ignoring nested {} value under {key:?}", Self::NAME),
            }
        }
        record
    }
}

fn write_fields<T: AsFields>(record: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}(", T::NAME)?;
    for (i, (name, value)) in record.as_fields().into_iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        match value {
            Some(v) => write!(f, "{name}={v:?}")?,
            None => write!(f, "{name}=None")?,
        }
    }
    Ok(())
}

/// DAT header, from the `clrmamepro` group or an XML `<header>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Header {
    pub name: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    pub author: Option<String>,
    pub homepage: Option<String>,
    pub url: Option<String>,
}

impl AsFields for Header {
    const NAME: &'static str = "Header";
    const FIELDS: &'static [&'static str] =
        &["name", "description", "version", "author", "homepage", "url"];

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => self.name.as_deref(),
            "description" => self.description.as_deref(),
            "version" => self.version.as_deref(),
            "author" => self.author.as_deref(),
            "homepage" => self.homepage.as_deref(),
            "url" => self.url.as_deref(),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            "name" => &mut self.name,
            "description" => &mut self.description,
            "version" => &mut self.version,
            "author" => &mut self.author,
            "homepage" => &mut self.homepage,
            "url" => &mut self.url,
            _ => return false,
        };
        *slot = Some(value);
        true
    }
}

impl FromPairs for Header {}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_fields(self, f)?;
        write!(f, ")")
    }
}

/// A single ROM dump belonging to a game.
///
/// `flags` is an older name for `status`; both names read and write the same
/// field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Rom {
    pub name: Option<String>,
    pub size: Option<String>,
    pub crc: Option<String>,
    pub md5: Option<String>,
    pub sha1: Option<String>,
    pub status: Option<String>,
}

impl Rom {
    pub fn flags(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn set_flags(&mut self, flags: impl Into<String>) {
        self.status = Some(flags.into());
    }

    /// Size in bytes, if present and numeric.
    pub fn size_bytes(&self) -> Option<u64> {
        self.size.as_deref()?.parse().ok()
    }
}

impl AsFields for Rom {
    const NAME: &'static str = "Rom";
    const FIELDS: &'static [&'static str] = &["name", "size", "crc", "md5", "sha1", "status"];

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => self.name.as_deref(),
            "size" => self.size.as_deref(),
            "crc" => self.crc.as_deref(),
            "md5" => self.md5.as_deref(),
            "sha1" => self.sha1.as_deref(),
            "status" | "flags" => self.status.as_deref(),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            "name" => &mut self.name,
            "size" => &mut self.size,
            "crc" => &mut self.crc,
            "md5" => &mut self.md5,
            "sha1" => &mut self.sha1,
            "status" | "flags" => &mut self.status,
            _ => return false,
        };
        *slot = Some(value);
        true
    }
}

impl FromPairs for Rom {
    /// `flags` only fills `status` when no `status` key is present at all,
    /// regardless of which comes first.
    fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, Entity)>,
    {
        let mut rom = Rom::default();
        let mut has_status = false;
        let mut flags = None;

        for (key, value) in pairs {
            let Entity::Leaf(value) = value else {
                log::debug!("ignoring nested Rom value under {key:?}");
                continue;
            };
            match key.as_str() {
                "flags" => flags = Some(value),
                "status" => {
                    has_status = true;
                    rom.status = Some(value);
                }
                _ => {
                    if !rom.set_field(&key, value) {
                        log::debug!("ignoring unknown Rom field {key:?}");
                    }
                }
            }
        }

        if !has_status && flags.is_some() {
            rom.status = flags;
        }
        rom
    }
}

impl fmt::Display for Rom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_fields(self, f)?;
        write!(f, ")")
    }
}

/// A game entry and its ROMs, in encounter order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Game {
    pub name: Option<String>,
    pub description: Option<String>,
    pub roms: Vec<Rom>,
}

impl AsFields for Game {
    const NAME: &'static str = "Game";
    const FIELDS: &'static [&'static str] = &["name", "description"];

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => self.name.as_deref(),
            "description" => self.description.as_deref(),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: String) -> bool {
        match name {
            "name" => self.name = Some(value),
            "description" => self.description = Some(value),
            _ => return false,
        }
        true
    }
}

impl FromPairs for Game {
    /// Every `rom` child adds one ROM; its group must already be decoded.
    fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, Entity)>,
    {
        let mut game = Game::default();
        let mut roms = Vec::new();

        for (key, value) in pairs {
            match (key.as_str(), value) {
                ("rom", Entity::Rom(rom)) => roms.push(rom),
                (_, Entity::Leaf(value)) => {
                    if !game.set_field(&key, value) {
                        log::debug!("ignoring unknown Game field {key:?}");
                    }
                }
                _ => log::debug!("ignoring nested Game value under {key:?}"),
            }
        }

        if !roms.is_empty() {
            game.roms = roms;
        }
        game
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_fields(self, f)?;
        write!(f, ", roms=[")?;
        for (i, rom) in self.roms.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{rom}")?;
        }
        write!(f, "])")
    }
}

#[cfg(test)]
#[path = "tests/records_tests.rs"]
mod tests;
