use crate::entity::lesson::{Lesson, LessonSlot};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

#[cfg(test)]
use crate::entity::lesson::RawLesson;
#[cfg(test)]
use crate::entity::weeks::Weeks;
#[cfg(test)]
use chrono::{TimeZone, Weekday};

// "HHMM" -> 時刻
pub fn parse_hhmm(time: &str) -> Option<NaiveTime> {
    if time.len() != 4 {
        return None;
    }
    NaiveTime::parse_from_str(time, "%H%M").ok()
}

pub fn get_time_as_date(time: &str, date: NaiveDate) -> Option<NaiveDateTime> {
    parse_hhmm(time).map(|t| date.and_time(t))
}

pub fn get_start_time_as_date(lesson: &Lesson, date: NaiveDate) -> Option<NaiveDateTime> {
    get_time_as_date(lesson.get_start_time(), date)
}

pub fn get_end_time_as_date(lesson: &Lesson, date: NaiveDate) -> Option<NaiveDateTime> {
    get_time_as_date(lesson.get_end_time(), date)
}

// 1430 のような整数で現在時刻を表す
pub fn get_current_hhmm(now: DateTime<Local>) -> u32 {
    now.hour() * 100 + now.minute()
}

// [start, end)
pub fn is_lesson_ongoing(lesson: &Lesson, current_time: u32) -> bool {
    match (
        lesson.get_start_time().parse::<u32>(),
        lesson.get_end_time().parse::<u32>(),
    ) {
        (Ok(start), Ok(end)) => start <= current_time && current_time < end,
        _ => false,
    }
}

#[cfg(test)]
fn lesson_between(start_time: &str, end_time: &str) -> Lesson {
    let raw = RawLesson::new(
        "1",
        "Lecture",
        Weekday::Wed,
        start_time,
        end_time,
        Weeks::Numeric(vec![1]),
        "LT19",
    );
    Lesson::from_raw(&raw, "CS2040", "Data Structures and Algorithms")
}

#[test]
fn test_parse_hhmm_正常系() {
    assert_eq!(parse_hhmm("0830"), NaiveTime::from_hms_opt(8, 30, 0));
    assert_eq!(parse_hhmm("2359"), NaiveTime::from_hms_opt(23, 59, 0));
}

#[test]
fn test_parse_hhmm_異常系() {
    assert_eq!(parse_hhmm("830"), None);
    assert_eq!(parse_hhmm("2460"), None);
    assert_eq!(parse_hhmm("ab12"), None);
}

#[test]
fn test_get_start_time_as_date_正常系() {
    let lesson = lesson_between("1000", "1200");
    let date = NaiveDate::from_ymd_opt(2023, 4, 1).unwrap();

    let actual = get_start_time_as_date(&lesson, date);
    assert_eq!(actual, date.and_hms_opt(10, 0, 0));

    let actual = get_end_time_as_date(&lesson, date);
    assert_eq!(actual, date.and_hms_opt(12, 0, 0));
}

#[test]
fn test_get_current_hhmm_正常系() {
    let now = Local.with_ymd_and_hms(2023, 4, 1, 14, 5, 30).unwrap();
    assert_eq!(get_current_hhmm(now), 1405);
}

#[test]
fn test_is_lesson_ongoing_開始時刻は含み終了時刻は含まない() {
    let lesson = lesson_between("1000", "1200");
    assert!(is_lesson_ongoing(&lesson, 1000));
    assert!(is_lesson_ongoing(&lesson, 1159));
    assert!(!is_lesson_ongoing(&lesson, 1200));
    assert!(!is_lesson_ongoing(&lesson, 959));
}
