//! Configuration key used to group log segments.
//!
//! Example header: "Static schedule, chunk=4:"  =>  ConfigurationKey { name: "Static", chunk: Some(4) }
//!
//! A schedule without a chunk size keeps `chunk: None`, which is not the same as `Some(0)`.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConfigurationKey {
    pub name: String,
    pub chunk: Option<u32>,
}

impl ConfigurationKey {
    pub fn new(name: impl Into<String>, chunk: Option<u32>) -> Self {
        Self {
            name: name.into(),
            chunk,
        }
    }

    /// Chunk rendered for file names and titles; absent chunks read "None".
    pub fn chunk_label(&self) -> String {
        match self.chunk {
            Some(c) => c.to_string(),
            None => "None".to_string(),
        }
    }

    /// File name of the rendered distribution for this key.
    pub fn file_name(&self) -> String {
        format!("distr_{}_chunk={}.png", self.name, self.chunk_label())
    }
}

impl fmt::Display for ConfigurationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, chunk={}", self.name, self.chunk_label())
    }
}
