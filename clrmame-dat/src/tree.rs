//! Recursive key/value tree parser.
//!
//! The grammar is a flat run of `key value` pairs where a value is either a
//! single token or a parenthesised group of further pairs. The parser is
//! generic over the [`Container`] that each group is collected into.

use std::marker::PhantomData;

use indexmap::IndexMap;
use serde::Serialize;

use crate::tokenizer::{self, CLOSE_GROUP, OPEN_GROUP, Tokens};

/// A parsed value: either a leaf token or a nested group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value<C> {
    Leaf(String),
    Group(C),
}

impl<C> Value<C> {
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Value::Leaf(s) => Some(s),
            Value::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&C> {
        match self {
            Value::Leaf(_) => None,
            Value::Group(c) => Some(c),
        }
    }
}

/// Strategy for collecting one nesting level of pairs.
///
/// Containers are built eagerly from their children; the top-level sequence
/// stays lazy.
pub trait Container: Sized + IntoIterator<Item = (String, Value<Self>)> {
    fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, Value<Self>)>;
}

/// Ordered list of pairs. Repeated keys are all kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PairList(pub Vec<(String, Value<PairList>)>);

impl PairList {
    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value<PairList>> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// All values stored under `key`, in encounter order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Value<PairList>> + 'a {
        self.0.iter().filter(move |(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value<PairList>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Container for PairList {
    fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, Value<Self>)>,
    {
        PairList(pairs.into_iter().collect())
    }
}

impl IntoIterator for PairList {
    type Item = (String, Value<PairList>);
    type IntoIter = std::vec::IntoIter<(String, Value<PairList>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Key-to-value map. A repeated key keeps its first position but takes the
/// last value seen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PairMap(pub IndexMap<String, Value<PairMap>>);

impl PairMap {
    pub fn get(&self, key: &str) -> Option<&Value<PairMap>> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value<PairMap>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Container for PairMap {
    fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, Value<Self>)>,
    {
        PairMap(pairs.into_iter().collect())
    }
}

impl IntoIterator for PairMap {
    type Item = (String, Value<PairMap>);
    type IntoIter = indexmap::map::IntoIter<String, Value<PairMap>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<Value<PairList>> for Value<PairMap> {
    /// Re-collect every nested group as a map, as if it had been parsed with
    /// [`PairMap`] in the first place.
    fn from(value: Value<PairList>) -> Self {
        match value {
            Value::Leaf(text) => Value::Leaf(text),
            Value::Group(list) => Value::Group(PairMap::from_pairs(
                list.into_iter().map(|(key, child)| (key, child.into())),
            )),
        }
    }
}

/// Read one pair from a shared token cursor.
///
/// Returns `None` at a close-group marker or when the tokens run out. A key
/// with no value before the end of input is dropped.
fn next_pair<T, C>(tokens: &mut T) -> Option<(String, Value<C>)>
where
    T: Iterator<Item = String>,
    C: Container,
{
    let key = tokens.next()?;
    if key == CLOSE_GROUP {
        return None;
    }

    let Some(token) = tokens.next() else {
        log::debug!("dropping key {key:?} with no value at end of input");
        return None;
    };

    let value = if token == OPEN_GROUP {
        Value::Group(C::from_pairs(Group::<T, C>::new(tokens)))
    } else {
        Value::Leaf(token)
    };
    Some((key, value))
}

/// Pairs of one nested group, borrowing the parent's token cursor.
struct Group<'a, T, C> {
    tokens: &'a mut T,
    done: bool,
    _container: PhantomData<C>,
}

impl<'a, T, C> Group<'a, T, C> {
    fn new(tokens: &'a mut T) -> Self {
        Self {
            tokens,
            done: false,
            _container: PhantomData,
        }
    }
}

impl<T, C> Iterator for Group<'_, T, C>
where
    T: Iterator<Item = String>,
    C: Container,
{
    type Item = (String, Value<C>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let pair = next_pair(self.tokens);
        self.done = pair.is_none();
        pair
    }
}

/// Lazy sequence of top-level pairs.
///
/// The top level is an implicit group: it ends when the tokens run out, or
/// at a stray close-group marker.
pub struct Pairs<T, C> {
    tokens: T,
    done: bool,
    _container: PhantomData<C>,
}

impl<T, C> Pairs<T, C>
where
    T: Iterator<Item = String>,
    C: Container,
{
    pub fn new(tokens: T) -> Self {
        Self {
            tokens,
            done: false,
            _container: PhantomData,
        }
    }
}

impl<T, C> Iterator for Pairs<T, C>
where
    T: Iterator<Item = String>,
    C: Container,
{
    type Item = (String, Value<C>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let pair = next_pair(&mut self.tokens);
        self.done = pair.is_none();
        pair
    }
}

/// Parse lines into top-level pairs using `C` for every nested group.
pub fn parse_with<C, I, S>(lines: I) -> Pairs<Tokens<impl Iterator<Item = char>>, C>
where
    C: Container,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Pairs::new(tokenizer::tokenize(lines))
}

/// Parse lines into top-level pairs, keeping every pair in order.
pub fn parse<I, S>(lines: I) -> Pairs<Tokens<impl Iterator<Item = char>>, PairList>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parse_with(lines)
}

/// Parse lines into one single-entry map per top-level pair.
///
/// Top-level duplicates are never merged; only keys inside a group collapse.
pub fn parse_to_maps<I, S>(lines: I) -> impl Iterator<Item = PairMap>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parse_with::<PairMap, _, _>(lines).map(|pair| PairMap::from_pairs([pair]))
}

#[cfg(test)]
#[path = "tests/tree_tests.rs"]
mod tests;
