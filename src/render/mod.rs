//! Report renderers. The battle core never formats anything itself.

pub mod csv;
pub mod text;

pub use self::csv::report_to_csv;
pub use self::text::render_report;
