mod commands;
mod render;
mod setup;
mod study;
mod styles;

pub use commands::run;
