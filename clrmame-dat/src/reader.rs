use std::io::{BufRead, Read};
use std::path::Path;

use serde::Serialize;

use crate::decode::{self, Entity};
use crate::error::DatError;
use crate::records::{Game, Header};
use crate::tree::{self, PairList};
use crate::xml;

/// Input format, detected from the first non-whitespace byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatFormat {
    ClrMamePro,
    Xml,
}

impl DatFormat {
    /// Format implied by the first non-whitespace byte of a DAT.
    pub fn from_first_byte(byte: u8) -> Self {
        if byte == b'<' {
            DatFormat::Xml
        } else {
            DatFormat::ClrMamePro
        }
    }
}

/// Skip leading whitespace and report the format, returning a reader that
/// still yields every byte of the input.
fn detect_format<R: BufRead>(mut reader: R) -> Result<(DatFormat, impl BufRead), DatError> {
    let mut first_bytes = Vec::new();
    let mut buf = [0u8; 1];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            return Err(DatError::invalid_dat("Empty DAT file"));
        }
        first_bytes.push(buf[0]);
        if !buf[0].is_ascii_whitespace() {
            break;
        }
    }

    let format = DatFormat::from_first_byte(buf[0]);
    log::debug!("detected {format:?} DAT");

    let chain = std::io::Cursor::new(first_bytes).chain(reader);
    Ok((format, std::io::BufReader::new(chain)))
}

fn read_lines<R: BufRead>(reader: R) -> Result<Vec<String>, DatError> {
    Ok(reader.lines().collect::<Result<_, _>>()?)
}

/// Parse a DAT, auto-detecting ClrMamePro text or XML.
pub fn parse_dat<R: BufRead>(reader: R) -> Result<Vec<Entity>, DatError> {
    let (format, reader) = detect_format(reader)?;
    match format {
        DatFormat::Xml => xml::parse_xml(reader),
        DatFormat::ClrMamePro => Ok(decode::parse_entities(read_lines(reader)?).collect()),
    }
}

/// Parse a DAT file from a file path.
pub fn parse_dat_file(path: &Path) -> Result<Vec<Entity>, DatError> {
    let file = std::fs::File::open(path)?;
    parse_dat(std::io::BufReader::new(file))
}

/// Read the generic pair tree of a ClrMamePro text DAT, without decoding.
pub fn read_tree<R: BufRead>(reader: R) -> Result<PairList, DatError> {
    let (format, reader) = detect_format(reader)?;
    if format == DatFormat::Xml {
        return Err(DatError::invalid_dat(
            "XML DATs have no generic tree; decode them with parse_dat",
        ));
    }
    let lines = read_lines(reader)?;
    Ok(PairList(tree::parse(lines).collect()))
}

pub fn read_tree_file(path: &Path) -> Result<PairList, DatError> {
    let file = std::fs::File::open(path)?;
    read_tree(std::io::BufReader::new(file))
}

/// Header and games of one DAT, merged from its top-level entities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatFile {
    pub header: Option<Header>,
    pub games: Vec<Game>,
}

impl DatFile {
    /// Merge decoded entities. The first header wins; top-level values that
    /// are neither a header nor a game are dropped.
    pub fn from_entities<I: IntoIterator<Item = Entity>>(entities: I) -> Self {
        let mut dat = DatFile::default();
        for entity in entities {
            match entity {
                Entity::Header(header) => {
                    if dat.header.is_some() {
                        log::warn!("ignoring duplicate DAT header: {header}");
                    } else {
                        dat.header = Some(header);
                    }
                }
                Entity::Game(game) => dat.games.push(game),
                other => log::debug!("ignoring top-level {} value", other.kind()),
            }
        }
        dat
    }

    /// Load and merge a DAT file in either format.
    pub fn load(path: &Path) -> Result<Self, DatError> {
        Ok(Self::from_entities(parse_dat_file(path)?))
    }

    pub fn name(&self) -> Option<&str> {
        self.header.as_ref()?.name.as_deref()
    }

    /// Total number of ROMs across all games.
    pub fn rom_count(&self) -> usize {
        self.games.iter().map(|g| g.roms.len()).sum()
    }
}

#[cfg(test)]
#[path = "tests/reader_tests.rs"]
mod tests;
