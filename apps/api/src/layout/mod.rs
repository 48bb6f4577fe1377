// Page layout: A4 geometry, section height estimation and page-break placement.
// Everything here is synchronous and pure; callers on the async side run it
// inside tokio::task::spawn_blocking.

pub mod font_metrics;
pub mod measure;
pub mod page;
pub mod pagination;

pub use measure::{HeightMeasurer, MetricMeasurer, NoLayoutEngine};
pub use page::PageGeometry;
pub use pagination::{decide_break, BreakDecision, PagedDocument, Paginator};
