//! Logiqx-style XML DATs, decoded straight into records.
//!
//! ```text
//! <datafile>
//!     <header><name>System</name><version>1</version></header>
//!     <game name="Game (USA)">
//!         <description>Game (USA)</description>
//!         <rom name="Game (USA).bin" size="1024" crc="deadbeef"/>
//!     </game>
//! </datafile>
//! ```

use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::decode::Entity;
use crate::error::DatError;
use crate::records::{AsFields, FromPairs, Game, Header, Rom};

/// Text element currently being collected.
enum Capture {
    HeaderField(String),
    Description,
}

/// Parse an XML DAT. The header (if any) comes first, then every game in
/// document order.
///
/// Only the first top-level `<header>` is read. A captured element keeps its
/// text verbatim up to its first child element.
pub fn parse_xml<R: BufRead>(reader: R) -> Result<Vec<Entity>, DatError> {
    let mut xml = Reader::from_reader(reader);

    let mut buf = Vec::new();
    let mut depth = 0usize;

    let mut header: Option<Header> = None;
    let mut header_seen = false;
    let mut in_header = false;
    let mut header_children = 0usize;

    let mut games = Vec::new();
    let mut current_game: Option<Game> = None;

    let mut capture: Option<Capture> = None;
    let mut text = String::new();
    let mut text_closed = false;

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let tag = tag_name(e);
                if capture.is_some() {
                    text_closed = true;
                }
                match (depth, tag.as_str()) {
                    (1, "header") if header_seen => {
                        log::debug!("ignoring additional <header> element");
                    }
                    (1, "header") => {
                        header_seen = true;
                        in_header = true;
                        header_children = 0;
                        header = Some(Header::default());
                    }
                    (1, "game") => current_game = Some(start_game(e)?),
                    (2, _) if in_header => {
                        header_children += 1;
                        if Header::FIELDS.contains(&tag.as_str()) {
                            capture = Some(Capture::HeaderField(tag.clone()));
                            text.clear();
                            text_closed = false;
                        }
                    }
                    (2, "description") if current_game.is_some() => {
                        capture = Some(Capture::Description);
                        text.clear();
                        text_closed = false;
                    }
                    (2, "rom") => {
                        if let Some(ref mut game) = current_game {
                            game.roms.push(parse_xml_rom(e)?);
                        }
                    }
                    _ => {}
                }
                depth += 1;
            }
            Event::Empty(ref e) => {
                let tag = tag_name(e);
                if capture.is_some() {
                    text_closed = true;
                }
                match (depth, tag.as_str()) {
                    (1, "header") => {
                        if !header_seen {
                            log::debug!("ignoring empty <header> element");
                        }
                        header_seen = true;
                    }
                    (1, "game") => games.push(Entity::Game(start_game(e)?)),
                    (2, _) if in_header => {
                        header_children += 1;
                        if let Some(ref mut h) = header {
                            set_first(h, &tag, String::new());
                        }
                    }
                    (2, "description") => {
                        if let Some(ref mut game) = current_game {
                            game.description.get_or_insert_with(String::new);
                        }
                    }
                    (2, "rom") => {
                        if let Some(ref mut game) = current_game {
                            game.roms.push(parse_xml_rom(e)?);
                        }
                    }
                    _ => {}
                }
            }
            Event::Text(ref e) => {
                if capture.is_some() && !text_closed {
                    text.push_str(&e.unescape()?);
                }
            }
            Event::CData(e) => {
                if capture.is_some() && !text_closed {
                    text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Event::End(ref e) => {
                depth = depth.saturating_sub(1);
                let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
                match (depth, tag.as_str()) {
                    (1, "header") if in_header => {
                        in_header = false;
                        if header_children == 0 {
                            log::debug!("ignoring empty <header> element");
                            header = None;
                        }
                    }
                    (1, "game") => {
                        if let Some(game) = current_game.take() {
                            games.push(Entity::Game(game));
                        }
                    }
                    (2, _) => match capture.take() {
                        Some(Capture::HeaderField(field)) => {
                            if let Some(ref mut h) = header {
                                set_first(h, &field, std::mem::take(&mut text));
                            }
                        }
                        Some(Capture::Description) => {
                            if let Some(ref mut game) = current_game {
                                game.description
                                    .get_or_insert_with(|| std::mem::take(&mut text));
                            }
                        }
                        None => {}
                    },
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(header
        .map(Entity::Header)
        .into_iter()
        .chain(games)
        .collect())
}

fn tag_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).to_string()
}

/// Only the first element for each header field counts.
fn set_first(header: &mut Header, field: &str, value: String) {
    if header.field(field).is_none() {
        header.set_field(field, value);
    }
}

fn start_game(e: &BytesStart<'_>) -> Result<Game, DatError> {
    let mut game = Game::default();
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"name" {
            game.name = Some(attr.unescape_value()?.into_owned());
        }
    }
    Ok(game)
}

/// Every attribute goes through the same pair construction as the text
/// grammar, so `flags` still aliases `status`.
fn parse_xml_rom(e: &BytesStart<'_>) -> Result<Rom, DatError> {
    let mut pairs = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr.unescape_value()?.into_owned();
        pairs.push((key, Entity::Leaf(value)));
    }
    Ok(Rom::from_pairs(pairs))
}

#[cfg(test)]
#[path = "tests/xml_tests.rs"]
mod tests;
