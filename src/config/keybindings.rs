use std::{collections::HashMap, fmt::Debug};

use crossterm::event::KeyEvent;
use derive_deref::{Deref, DerefMut};
use serde::{de::DeserializeOwned, Deserialize, Deserializer};

use crate::config::keyparser::KeyParser;

#[derive(Clone, Debug, Deref, DerefMut)]
pub struct KeyBindings<T: PartialEq + DeserializeOwned + Debug>(pub HashMap<Vec<KeyEvent>, T>);

impl<T: PartialEq + DeserializeOwned + Debug> Default for KeyBindings<T> {
    fn default() -> Self {
        Self(HashMap::new())
    }
}

impl<'de, T: PartialEq + DeserializeOwned + Debug> Deserialize<'de> for KeyBindings<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let parsed_map = HashMap::<String, T>::deserialize(deserializer)?;

        let keybindings = parsed_map
            .into_iter()
            .map(|(keyseq, action)| {
                KeyParser::parse_key_sequence(&keyseq)
                    .map(|seq| (seq, action))
                    .map_err(serde::de::Error::custom)
            })
            .collect::<Result<HashMap<Vec<KeyEvent>, T>, D::Error>>()?;

        Ok(KeyBindings(keybindings))
    }
}

impl<T: PartialEq + DeserializeOwned + Debug + Clone> KeyBindings<T> {
    /// Fills in every binding from `defaults` whose key sequence is not bound here yet.
    pub fn merge_defaults(&mut self, defaults: &KeyBindings<T>) {
        for (key, action) in defaults.iter() {
            self.entry(key.clone()).or_insert_with(|| action.clone());
        }
    }

    /// Returns true if `keyseq` is the beginning of a longer binding.
    pub fn is_prefix(&self, keyseq: &[KeyEvent]) -> bool {
        self.keys()
            .any(|k| k.len() > keyseq.len() && k.starts_with(keyseq))
    }

    pub fn find_action_str(&self, action: &T) -> Option<String> {
        self.iter()
            .find(|(_, a)| *a == action)
            .map(|(k, _)| KeyParser::keyseq_to_string(k))
    }
}
