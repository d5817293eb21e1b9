//! Dashboard UI components
//!
//! Modular Leptos components for the SentryPeer dashboard.
//!
//! ## Architecture
//!
//! 1. **Primitives** (`primitives.rs`) - Low-level reusable building blocks
//!    - Loading and empty states: `LoadingSpinner`, `EmptyState`
//!    - Data display: `TableCard`, `Badge`, `StatusDot`
//!
//! 2. **Layout** (`header.rs`, `sidebar.rs`, `toasts.rs`) - Structural components
//!
//! 3. **Views** (`aggregation.rs`, `views.rs`) - The generic aggregation
//!    panel and the five views built on it, plus the outlet that renders
//!    whichever one the router marks active
//!
//! ## Accessibility
//!
//! All components include proper ARIA attributes for screen reader support.

pub mod aggregation;
pub mod header;
pub mod primitives;
pub mod sidebar;
pub mod toasts;
pub mod views;

// Re-export layout components
pub use header::Header;
pub use sidebar::Sidebar;
pub use toasts::Toasts;

pub use aggregation::{AggregationPanel, AggregationTable};
pub use primitives::{Badge, BadgeVariant, EmptyState, LoadingSpinner, StatusDot, TableCard};
pub use views::{
    ActiveView, CountryAnalysisView, NumberAnalysisView, RouteSync, SipMethodsView,
    SourceIpsView, UserAgentsView,
};
