pub mod api;
pub mod api_utils;
pub mod components;
pub mod config;
pub mod deletion;
pub mod export;
pub mod list_page;
pub mod list_utils;
pub mod list_view;
pub mod modal;
