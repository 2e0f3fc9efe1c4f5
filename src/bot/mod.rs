//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules for better organization:
//! - `message_handler`: Handles commands and shared-location messages
//! - `callback_handler`: Handles inline keyboard callback queries
//! - `dialogue_manager`: Renders menus and advances the dialogue state
//! - `ui_builder`: Creates keyboards and formats messages

pub mod callback_handler;
pub mod dialogue_manager;
pub mod message_handler;
pub mod ui_builder;

// Re-export main handler functions for use in main.rs
pub use callback_handler::callback_handler;
pub use message_handler::message_handler;

// Re-export utility functions that might be used elsewhere
pub use ui_builder::format_recommendation;
