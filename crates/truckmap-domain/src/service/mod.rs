//! View derivations and map math

pub mod detail_view;
pub mod list_view;
pub mod projection;

pub use detail_view::{build_detail_view, DetailView};
pub use list_view::{build_list_view, filter_trucks, CardView, EmptyState, ListView};
