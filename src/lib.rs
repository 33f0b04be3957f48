pub mod action;
pub mod api;
pub mod app;
pub mod commands;
pub mod components;
pub mod config;
pub mod effects;
pub mod error;
pub mod event;
pub mod models;
pub mod state;
pub mod tui;
pub mod ui;
