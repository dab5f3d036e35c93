mod actions;
mod app;
mod dom;
mod net;
mod palette;
mod persistence;
mod render;
mod state;

pub use app::run;
