pub mod health;
pub mod shorten;
pub mod stats;
