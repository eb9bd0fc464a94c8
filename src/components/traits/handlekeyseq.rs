use std::fmt::{Debug, Display};

use crossterm::event::KeyEvent;
use serde::de::DeserializeOwned;

use crate::{
    action::Action,
    config::{keybindings::KeyBindings, keyparser::KeyParser},
};

#[derive(Clone, Debug, PartialEq)]
pub enum KeySeqResult {
    NoActionNeeded,
    ActionNeeded(Action),
}

pub trait PassKeySeq {
    fn handle_key_seq(&mut self, keyseq: &[KeyEvent]) -> Option<KeySeqResult>;
    /// True if more keys could still complete a binding.
    fn is_key_prefix(&self, keyseq: &[KeyEvent]) -> bool;
}

pub struct KeyBindingHelp {
    pub keyseq: String,
    pub desc: String,
}

pub trait HandleKeySeq<T: PartialEq + DeserializeOwned + Debug + Clone + Display> {
    /// Optionally, a component may have a subcomponent that has keybinds. This function is
    /// called just before the key sequence is matched against this component's keybinding. If this
    /// function returns something other than None, it means that the key sequence matched against
    /// something in the subcomponent, and this component should not override that.
    fn pass_to_lower_comp(&mut self, keyseq: &[KeyEvent]) -> Option<KeySeqResult> {
        let _ = keyseq;
        None
    }

    fn lower_comp_prefix(&self, keyseq: &[KeyEvent]) -> bool {
        let _ = keyseq;
        false
    }

    fn handle_local_action(&mut self, action: T) -> KeySeqResult;

    fn get_keybinds(&self) -> &KeyBindings<T>;

    fn handle_key_seq(&mut self, keyseq: &[KeyEvent]) -> Option<KeySeqResult> {
        if let Some(res) = self.pass_to_lower_comp(keyseq) {
            Some(res)
        } else if let Some(res) = self.get_keybinds().get(keyseq) {
            Some(self.handle_local_action(res.clone()))
        } else {
            None
        }
    }

    fn is_key_prefix(&self, keyseq: &[KeyEvent]) -> bool {
        self.lower_comp_prefix(keyseq) || self.get_keybinds().is_prefix(keyseq)
    }

    /// One entry per binding, sorted by description so the order is stable between frames.
    fn get_help(&self) -> Vec<KeyBindingHelp> {
        let mut help: Vec<KeyBindingHelp> = self
            .get_keybinds()
            .iter()
            .map(|(ks, a)| KeyBindingHelp {
                keyseq: KeyParser::keyseq_to_string(ks),
                desc: a.to_string(),
            })
            .collect();
        help.sort_by(|a, b| a.desc.cmp(&b.desc).then(a.keyseq.cmp(&b.keyseq)));
        help
    }
}
