pub mod centered;
pub mod popup;
