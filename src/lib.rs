//! Inkpost - a small blog post admin
//!
//! Lists posts, shows a post by slug, and lets an admin create and edit posts
//! through server-rendered forms.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
pub mod theme;
