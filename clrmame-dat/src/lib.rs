//! Parser for ClrMamePro DAT files.
//!
//! The text grammar is tokenized, parsed into a generic key/value tree, and
//! then decoded into [`Header`], [`Game`] and [`Rom`] records. Logiqx XML
//! DATs decode into the same records.

pub mod decode;
pub mod error;
pub mod reader;
pub mod records;
pub mod tokenizer;
pub mod tree;
pub mod xml;

pub use decode::{Entity, decode, decode_value, parse_entities};
pub use error::DatError;
pub use reader::{DatFile, DatFormat, parse_dat, parse_dat_file, read_tree, read_tree_file};
pub use records::{AsFields, FromPairs, Game, Header, Rom};
pub use tokenizer::{Tokens, tokenize};
pub use tree::{Container, PairList, PairMap, Pairs, Value, parse, parse_to_maps, parse_with};
pub use xml::parse_xml;
