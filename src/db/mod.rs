// Database module
// This module handles SQLite access for the dashboard

pub mod connection;
pub mod migrations;
pub mod models;
pub mod queries;
