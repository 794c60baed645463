// Presentation layer - Terminal rendering and user input
pub mod commands;
pub mod console_view;
pub mod format;
