//! egui front end: UI state projection, panels, and theme.

pub mod auth_form;
pub mod panels;
pub mod state;
pub mod theme;
