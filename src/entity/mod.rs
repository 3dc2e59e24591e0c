pub mod arrangement;
pub mod datetime;
pub mod lesson;
pub mod lesson_type;
pub mod module;
pub mod term;
pub mod timetable_config;
pub mod weeks;
