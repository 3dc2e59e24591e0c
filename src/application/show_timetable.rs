use crate::entity::arrangement::TimetableArrangement;
use crate::entity::lesson::{Lesson, LessonSlot};
use crate::entity::term::TermConfig;
use crate::entity::weeks::{format_numeric_weeks_with_config, Weeks};
use chrono::Weekday;

#[cfg(test)]
use crate::entity::arrangement::arrange_lessons_for_week;
#[cfg(test)]
use crate::entity::lesson::RawLesson;
#[cfg(test)]
use crate::entity::weeks::WeekRange;
#[cfg(test)]
use chrono::NaiveDate;

// 全週なら None
pub fn describe_weeks(weeks: &Weeks, term: &TermConfig) -> Option<String> {
    match weeks {
        Weeks::Numeric(numeric_weeks) => format_numeric_weeks_with_config(numeric_weeks, term),
        Weeks::Range(week_range) => Some(format!(
            "{} to {}",
            week_range.get_start().format("%d %b"),
            week_range.get_end().format("%d %b")
        )),
    }
}

pub fn describe_lesson(lesson: &Lesson, term: &TermConfig) -> String {
    let mut line = format!(
        "{}-{} {} {} [{}]",
        lesson.get_start_time(),
        lesson.get_end_time(),
        lesson.get_module_code(),
        lesson.get_lesson_type(),
        lesson.get_class_no()
    );

    if let Some(weeks) = describe_weeks(lesson.get_weeks(), term) {
        line += &format!(" ({})", weeks);
    }

    line
}

// 動作確認用のテキスト表示。曜日は月曜から順に並べる
pub fn describe_arrangement(
    arrangement: &TimetableArrangement<Lesson>,
    term: &TermConfig,
) -> Vec<String> {
    let mut days: Vec<&Weekday> = arrangement.keys().collect();
    days.sort_by_key(|day| day.num_days_from_monday());

    let mut lines = vec![];
    for day in days.into_iter() {
        lines.push(format!("{:?}", day));

        for (i, row) in arrangement[day].iter().enumerate() {
            let lessons: Vec<String> = row
                .iter()
                .map(|lesson| describe_lesson(lesson, term))
                .collect();
            lines.push(format!("  {}: {}", i, lessons.join(" | ")));
        }
    }

    lines
}

#[cfg(test)]
fn lesson(class_no: &str, day: Weekday, start: &str, end: &str, weeks: Weeks) -> Lesson {
    let raw = RawLesson::new(class_no, "Lecture", day, start, end, weeks, "LT27");
    Lesson::from_raw(&raw, "CS1010", "Programming Methodology")
}

#[test]
#[allow(non_snake_case)]
fn test_describe_weeks_全週ならNone() {
    let weeks = Weeks::Numeric((1..=13).collect());
    assert_eq!(describe_weeks(&weeks, &TermConfig::default()), None);
}

#[test]
fn test_describe_weeks_日付範囲() {
    let weeks = Weeks::Range(WeekRange::new(
        NaiveDate::from_ymd_opt(2023, 1, 9).unwrap(),
        NaiveDate::from_ymd_opt(2023, 4, 10).unwrap(),
        None,
        None,
    ));
    assert_eq!(
        describe_weeks(&weeks, &TermConfig::default()),
        Some(String::from("09 Jan to 10 Apr"))
    );
}

#[test]
fn test_describe_arrangement_曜日順に行を出力する() {
    let lessons = vec![
        lesson("2", Weekday::Wed, "1000", "1200", Weeks::Numeric(vec![1, 2])),
        lesson("1", Weekday::Mon, "1000", "1200", Weeks::Numeric((1..=13).collect())),
        lesson("3", Weekday::Mon, "1100", "1300", Weeks::Numeric(vec![3])),
    ];
    let arrangement = arrange_lessons_for_week(&lessons);

    let actual = describe_arrangement(&arrangement, &TermConfig::default());
    let expected = vec![
        "Mon",
        "  0: 1000-1200 CS1010 Lecture [1]",
        "  1: 1100-1300 CS1010 Lecture [3] (Week 3)",
        "Wed",
        "  0: 1000-1200 CS1010 Lecture [2] (Weeks 1, 2)",
    ];
    assert_eq!(actual, expected);
}
