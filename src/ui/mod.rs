//! Terminal user interface: thin plumbing over the resolvers and the
//! balancer. Presents the numbered menu, collects symbol input, and renders
//! the structured results as text. No domain logic lives here.

mod app;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
