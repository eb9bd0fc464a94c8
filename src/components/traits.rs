pub mod component;
pub mod handlekeyseq;
pub mod handlequery;
pub mod ontick;
pub mod renderable;
