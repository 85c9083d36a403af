use serde::{Deserialize, Serialize};

/// Kind of medium an item can be in
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Environment {
    Air,
    Fire,
    Ice,
    Water,
}

impl Default for Environment {
    fn default() -> Self {
        Environment::Air
    }
}
