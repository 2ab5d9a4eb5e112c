//! HTTP handlers, grouped by surface.

pub mod admin;
pub mod booking;
pub mod pages;
