pub mod panel;

pub use panel::PanelPlugin;
