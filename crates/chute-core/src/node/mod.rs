//! Config node module containing the tree type, typed values and the text codec.

pub mod codec;
pub mod tree;
pub mod value;

pub use codec::{parse_tree, write_tree, NodeError};
pub use tree::ConfigNode;
pub use value::{ConfigValue, ValueError};
