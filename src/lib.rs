pub mod api;
pub mod config;
pub mod data_service;
pub mod error;
pub mod http_client;
pub mod leaderboard;
pub mod model;
pub mod poller;
pub mod sheet_rows;
pub mod sheets_client;
pub mod snapshot_cache;
pub mod views;
