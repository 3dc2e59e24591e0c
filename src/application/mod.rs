pub mod active_lesson;
pub mod interface;
pub mod populate_lessons;
pub mod show_timetable;
pub mod validate_timetable;

#[cfg(test)]
mod test_catalog;
