//! Charts module - static chart rendering

mod dashboard;
mod network;
mod palette;

pub use dashboard::{DashboardRenderer, RenderConfig};
pub use network::NetworkRenderer;
