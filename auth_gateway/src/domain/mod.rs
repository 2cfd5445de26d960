pub mod classifier;
pub mod entities;
pub mod errors;
pub mod forms;
pub mod password_strength;
pub mod pkce;
pub mod ports;
pub mod submission;
