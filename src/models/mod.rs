pub mod event;
pub mod project;
pub mod report;

pub use event::{Event, MalformedEvent};
pub use project::Project;
pub use report::{ColumnKind, HoursTable, ReportColumn, ReportRow, ReportTable};
