pub mod clients;
pub mod cookies;
pub mod guard;
pub mod handlers;
pub mod protocol;
pub mod routes;
pub mod state;
