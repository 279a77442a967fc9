//! The serialized form of a block program as saved by the block editor.
//!
//! A document is a JSON workspace holding zero or more top-level block
//! chains and a declaration section for the variables the blocks refer to:
//!
//! ```json
//! {
//!     "blocks": {
//!         "languageVersion": 0,
//!         "blocks": [
//!             { "type": "move_forward", "id": "a1", "x": 20, "y": 20,
//!               "next": { "block": { "type": "turn_left", "id": "a2" } } }
//!         ]
//!     },
//!     "variables": [ { "name": "count", "id": "v1" } ]
//! }
//! ```

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

mod variables;

pub use variables::*;

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct BlockDocument {
    #[serde(default)]
    pub blocks: Option<Workspace>,
    #[serde(default)]
    pub variables: Option<Vec<Declaration>>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Workspace {
    #[serde(default)]
    pub blocks: Vec<Block>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Block {
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
    #[serde(default)]
    pub inputs: BTreeMap<String, Connection>,
    #[serde(default)]
    pub next: Option<Connection>,
    #[serde(default, rename = "extraState")]
    pub extra_state: Option<Value>,
}

/// What is plugged into an input or next slot. A shadow block is the
/// editor's default placeholder and counts only when no real block is
/// attached.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Connection {
    #[serde(default)]
    pub block: Option<Box<Block>>,
    #[serde(default)]
    pub shadow: Option<Box<Block>>,
}

impl Connection {
    pub fn target(&self) -> Option<&Block> {
        self.block
            .as_deref()
            .or(self
                .shadow
                .as_deref())
    }
}

impl BlockDocument {
    pub fn from_json(content: &str) -> Result<BlockDocument, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn roots(&self) -> &[Block] {
        match &self.blocks {
            Some(workspace) => &workspace.blocks,
            None => &[],
        }
    }

    /// The declarations in this document's own declaration section, if it
    /// has any.
    pub fn declarations(&self) -> &[Declaration] {
        match &self.variables {
            Some(variables) => variables,
            None => &[],
        }
    }
}

impl Block {
    pub fn input(&self, name: &str) -> Option<&Block> {
        self.inputs
            .get(name)
            .and_then(|connection| connection.target())
    }

    pub fn next_block(&self) -> Option<&Block> {
        self.next
            .as_ref()
            .and_then(|connection| connection.target())
    }

    /// A text field. Older documents store variable fields as a bare string,
    /// newer ones as an object with an `id`; both are returned here.
    pub fn field(&self, name: &str) -> Option<&str> {
        match self
            .fields
            .get(name)?
        {
            Value::String(text) => Some(text),
            Value::Object(map) => map
                .get("id")
                .or_else(|| map.get("name"))
                .and_then(|value| value.as_str()),
            _ => None,
        }
    }

    pub fn field_number(&self, name: &str) -> Option<i64> {
        match self
            .fields
            .get(name)?
        {
            Value::Number(number) => number
                .as_i64()
                .or_else(|| {
                    number
                        .as_f64()
                        .filter(|f| f.fract() == 0.0)
                        .map(|f| f as i64)
                }),
            Value::String(text) => text
                .trim()
                .parse()
                .ok(),
            _ => None,
        }
    }

    pub fn extra(&self, name: &str) -> Option<&Value> {
        self.extra_state
            .as_ref()?
            .get(name)
    }

    /// Visual position used to order top-level chains, top to bottom and
    /// then left to right. Blocks without coordinates sort first.
    pub fn position(&self) -> (f64, f64) {
        (self.y.unwrap_or(0.0), self.x.unwrap_or(0.0))
    }

    /// Highest N for which an input named `<prefix>N` is present.
    pub fn count_numbered_inputs(&self, prefix: &str) -> usize {
        self.inputs
            .keys()
            .filter_map(|key| key.strip_prefix(prefix))
            .filter_map(|suffix| {
                suffix
                    .parse::<usize>()
                    .ok()
            })
            .map(|n| n + 1)
            .max()
            .unwrap_or(0)
    }
}
