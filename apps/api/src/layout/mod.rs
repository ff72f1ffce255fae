// Page layout: font metrics, word wrap, and block flow onto US Letter pages.
// Pure and CPU-bound; callers run it inside tokio::task::spawn_blocking.

pub mod flow;
pub mod font_metrics;

pub use flow::{paginate, Align, Block, Mark, Page, PageGeometry, TextStyle};
pub use font_metrics::{FontFamily, FontStyle};
