pub mod controller;
pub mod copy_dialog;
pub mod editor;
pub mod lint;
pub mod model;
pub mod summary;
pub mod time;
pub mod validity;

#[cfg(feature = "desktop")]
pub mod commands;

pub use controller::{EditorListener, NoopListener, ScheduleEditorController};
pub use copy_dialog::CopyDialog;
pub use editor::{EditSession, EditorSnapshot, ScheduleEditor, ScheduleOutput};
pub use lint::ScheduleWarning;
pub use model::{DaySchedule, DiscountSchedule, SlotPatch, TimeSlot, Weekday};
pub use time::TimeOfDay;
pub use validity::{RangeSelection, ValidityPeriod};
