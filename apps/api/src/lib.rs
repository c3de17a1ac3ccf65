pub mod client;
pub mod config;
pub mod cv;
pub mod db;
pub mod errors;
pub mod form;
pub mod i18n;
pub mod models;
pub mod routes;
pub mod session;
pub mod state;
pub mod store;
pub mod submission;
pub mod wizard;
