//! Maps generic key/value trees onto typed records.

use std::fmt;

use serde::Serialize;

use crate::records::{FromPairs, Game, Header, Rom};
use crate::tree::{self, Container, PairList, Value};

/// Group key for the DAT header.
pub const HEADER_KEY: &str = "clrmamepro";
/// Group key for a game.
pub const GAME_KEY: &str = "game";
/// Group key for a ROM inside a game.
pub const ROM_KEY: &str = "rom";

/// A decoded value.
///
/// Recognized groups become records. Anything else keeps its shape, with
/// its children decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Entity {
    Header(Header),
    Game(Game),
    Rom(Rom),
    Leaf(String),
    Group(Vec<(String, Entity)>),
}

impl Entity {
    pub fn as_header(&self) -> Option<&Header> {
        match self {
            Entity::Header(h) => Some(h),
            _ => None,
        }
    }

    pub fn as_game(&self) -> Option<&Game> {
        match self {
            Entity::Game(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_rom(&self) -> Option<&Rom> {
        match self {
            Entity::Rom(r) => Some(r),
            _ => None,
        }
    }

    /// Short label for the kind of value, used in listings.
    pub fn kind(&self) -> &'static str {
        match self {
            Entity::Header(_) => "header",
            Entity::Game(_) => "game",
            Entity::Rom(_) => "rom",
            Entity::Leaf(_) => "leaf",
            Entity::Group(_) => "group",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Header(h) => write!(f, "{h}"),
            Entity::Game(g) => write!(f, "{g}"),
            Entity::Rom(r) => write!(f, "{r}"),
            Entity::Leaf(s) => write!(f, "{s:?}"),
            Entity::Group(pairs) => {
                write!(f, "(")?;
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{key} {value}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Decode one value, children first.
///
/// A `rom` group nested in a `game` is already a [`Rom`] by the time the
/// game scans its children.
pub fn decode_value<C: Container>(key: &str, value: Value<C>) -> Entity {
    let group = match value {
        Value::Leaf(s) => return Entity::Leaf(s),
        Value::Group(group) => group,
    };

    let children = group.into_iter().map(|(k, v)| {
        let decoded = decode_value(&k, v);
        (k, decoded)
    });

    match key {
        HEADER_KEY => Entity::Header(Header::from_pairs(children)),
        GAME_KEY => Entity::Game(Game::from_pairs(children)),
        ROM_KEY => Entity::Rom(Rom::from_pairs(children)),
        _ => Entity::Group(children.collect()),
    }
}

/// Decode a sequence of top-level pairs lazily, dropping their keys.
pub fn decode<I, C>(pairs: I) -> impl Iterator<Item = Entity>
where
    I: IntoIterator<Item = (String, Value<C>)>,
    C: Container,
{
    pairs.into_iter().map(|(key, value)| decode_value(&key, value))
}

/// Parse and decode lines of the text grammar.
pub fn parse_entities<I, S>(lines: I) -> impl Iterator<Item = Entity>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    decode::<_, PairList>(tree::parse(lines))
}

#[cfg(test)]
#[path = "tests/decode_tests.rs"]
mod tests;
