pub mod home;
pub mod lib;
pub mod traits;
