pub mod components;
pub mod config;
pub mod export;
pub mod gloo_transport;
pub mod icons;
pub mod list_utils;
pub mod master_data;
pub mod notifications;
pub mod services;
