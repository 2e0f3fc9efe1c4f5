//! # Wayfinder Telegram Bot
//!
//! A menu-driven Telegram bot that serves stored travel recommendations.
//! Users narrow down a city by sharing their location or by drilling
//! continent, country, city, then pick a category and receive a
//! recommendation with its description, address and rating.

pub mod bot;
pub mod config;
pub mod db;
pub mod dialogue;
pub mod localization;
