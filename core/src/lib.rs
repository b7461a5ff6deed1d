//! Expo dashboard core.
//!
//! Loads four CSV tables once at startup into an immutable [`dataset::DataContext`],
//! then renders five pages (Home, Companies, Finance, Audience Insights,
//! History) as pure functions of the tables and the current widget values.
//! The render output is plain serializable data — metric cards, table
//! projections, chart specs — for a UI layer to draw.

pub mod aggregate;
pub mod chart;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod state;
pub mod types;
pub mod view;

pub use dataset::DataContext;
pub use error::{DashError, DashResult};
pub use state::AppState;
pub use view::{Page, ViewOutput, WidgetState};
