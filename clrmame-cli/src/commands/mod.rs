pub(crate) mod config;
pub(crate) mod games;
pub(crate) mod header;
pub(crate) mod tree;
