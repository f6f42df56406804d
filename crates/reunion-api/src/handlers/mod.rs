pub mod contacts;
pub mod health;
pub mod photos;
pub mod stats;
