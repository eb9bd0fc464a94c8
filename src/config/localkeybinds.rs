use serde::Deserialize;

use crate::{
    action::localaction::{HomeAction, ImportModalAction},
    config::keybindings::KeyBindings,
};

#[derive(Clone, Debug, Default, Deserialize)]
pub struct LocalKeyBinds {
    #[serde(default)]
    pub home: KeyBindings<HomeAction>,
    #[serde(default)]
    pub import_modal: KeyBindings<ImportModalAction>,
}

impl LocalKeyBinds {
    pub fn merge_defaults(&mut self, defaults: &LocalKeyBinds) {
        self.home.merge_defaults(&defaults.home);
        self.import_modal.merge_defaults(&defaults.import_modal);
    }
}
