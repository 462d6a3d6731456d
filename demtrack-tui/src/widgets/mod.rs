//! Reusable widgets.

pub mod badge;
pub mod detail;
pub mod modal;
pub mod table;

pub use badge::status_badge;
pub use detail::DetailPanel;
pub use modal::{centered_rect, render_modal};
pub use table::{ResourceTable, TableBody};
