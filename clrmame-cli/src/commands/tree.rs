use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use clrmame_dat::{Container, PairMap, Value};

use crate::cli_types::{ContainerKind, OutputFormat};
use crate::error::CliError;

/// Print the raw key/value tree of a text DAT.
pub(crate) fn run_tree(
    path: &Path,
    format: OutputFormat,
    container: ContainerKind,
) -> Result<(), CliError> {
    let tree = clrmame_dat::read_tree_file(path)?;

    match (format, container) {
        (OutputFormat::Json, ContainerKind::List) => {
            println!("{}", serde_json::to_string_pretty(&tree)?);
        }
        (OutputFormat::Json, ContainerKind::Map) => {
            let maps: Vec<PairMap> = tree
                .into_iter()
                .map(|(key, value)| PairMap::from_pairs([(key, value.into())]))
                .collect();
            println!("{}", serde_json::to_string_pretty(&maps)?);
        }
        (OutputFormat::Text, ContainerKind::List) => {
            for (key, value) in tree {
                print_pair(&key, value, 0);
            }
        }
        (OutputFormat::Text, ContainerKind::Map) => {
            for (key, value) in tree {
                let value: Value<PairMap> = value.into();
                print_pair(&key, value, 0);
            }
        }
    }
    Ok(())
}

fn print_pair<C: Container>(key: &str, value: Value<C>, depth: usize) {
    let indent = "  ".repeat(depth);
    let key = key.if_supports_color(Stdout, |t| t.bold());
    match value {
        Value::Leaf(text) => {
            log::info!(
                "{indent}{key} {}",
                format!("{text:?}").if_supports_color(Stdout, |t| t.cyan()),
            );
        }
        Value::Group(group) => {
            log::info!("{indent}{key} (");
            for (child_key, child) in group {
                print_pair(&child_key, child, depth + 1);
            }
            log::info!("{indent})");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_rejects_xml_dat() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("set.xml");
        std::fs::write(&path, "<datafile><game name=\"G\"/></datafile>").unwrap();
        let err = run_tree(&path, OutputFormat::Text, ContainerKind::List).unwrap_err();
        assert!(matches!(
            err,
            CliError::Dat(clrmame_dat::DatError::InvalidDat(_))
        ));
    }

    #[test]
    fn test_tree_reads_text_dat() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("set.dat");
        std::fs::write(&path, "game ( name \"G\" rom ( name g.bin ) )\n").unwrap();
        for container in [ContainerKind::List, ContainerKind::Map] {
            run_tree(&path, OutputFormat::Json, container).unwrap();
            run_tree(&path, OutputFormat::Text, container).unwrap();
        }
    }
}
