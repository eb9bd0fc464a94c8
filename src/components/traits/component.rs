use color_eyre::Result;

use crate::{
    action::Action,
    components::traits::{handlekeyseq::PassKeySeq, renderable::Renderable},
};

/// Top level component driven by [`crate::app::App`].
pub trait Component: Renderable + PassKeySeq {
    /// Update the state of the component based on a received action.
    ///
    /// Returns an action that should be processed next, if any.
    fn update(&mut self, action: Action) -> Result<Option<Action>>;
}
