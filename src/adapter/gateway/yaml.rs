use crate::entity::lesson::RawLesson;
use crate::entity::module::{Module, Semester, SemesterData};
use crate::entity::term::TermConfig;
use crate::entity::weeks::{WeekRange, Weeks};
use chrono::{NaiveDate, Weekday};
use log::warn;
use regex::Regex;
use std::sync::OnceLock;
use yaml_rust::Yaml;

#[cfg(test)]
use yaml_rust::YamlLoader;

static HHMM_PATTERN: OnceLock<Regex> = OnceLock::new();

fn is_hhmm(time: &str) -> bool {
    HHMM_PATTERN
        .get_or_init(|| Regex::new(r"^([01]\d|2[0-3])[0-5]\d$").expect("invalid HHMM pattern"))
        .is_match(time)
}

// クォートされていない 1000 や 1 は整数として読まれるので文字列に戻す
fn yaml_to_string(yaml: &Yaml) -> Option<String> {
    match yaml {
        Yaml::String(s) => Some(s.clone()),
        Yaml::Integer(i) => Some(i.to_string()),
        Yaml::Real(r) => Some(r.clone()),
        _ => None,
    }
}

fn yaml_to_time(yaml: &Yaml) -> Option<String> {
    let time = match yaml {
        Yaml::Integer(i) => format!("{:04}", i),
        _ => yaml_to_string(yaml)?,
    };

    if is_hhmm(&time) {
        Some(time)
    } else {
        None
    }
}

fn yaml_to_date(yaml: &Yaml) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(yaml.as_str()?, "%Y-%m-%d").ok()
}

fn yaml_to_u32_vec(yaml: &Yaml) -> Option<Vec<u32>> {
    yaml.as_vec()?
        .iter()
        .map(|w| w.as_i64().and_then(|w| u32::try_from(w).ok()))
        .collect()
}

fn is_valid_week_num(week: u32, term: &TermConfig) -> bool {
    week >= 1 && week as usize <= term.get_num_weeks()
}

// weeks: [1, 2, 3] か、weeks: { start, end, weekInterval, weeks }
// 週番号と間隔は学期の週数の範囲内であること
pub fn yaml_to_weeks(yaml: &Yaml, term: &TermConfig) -> Option<Weeks> {
    if let Some(mut weeks) = yaml_to_u32_vec(yaml) {
        if !weeks.iter().all(|w| is_valid_week_num(*w, term)) {
            return None;
        }
        weeks.sort_unstable();
        weeks.dedup();
        return Some(Weeks::Numeric(weeks));
    }

    let start = yaml_to_date(&yaml["start"])?;
    let end = yaml_to_date(&yaml["end"])?;
    let week_interval = match &yaml["weekInterval"] {
        Yaml::BadValue | Yaml::Null => None,
        interval_yaml => {
            let interval = interval_yaml
                .as_i64()
                .and_then(|i| u32::try_from(i).ok())?;
            if !is_valid_week_num(interval, term) {
                return None;
            }
            Some(interval)
        }
    };
    let weeks = match &yaml["weeks"] {
        Yaml::BadValue | Yaml::Null => None,
        weeks_yaml => {
            let weeks = yaml_to_u32_vec(weeks_yaml)?;
            if !weeks.iter().all(|w| is_valid_week_num(*w, term)) {
                return None;
            }
            Some(weeks)
        }
    };

    if start > end {
        return None;
    }

    Some(Weeks::Range(WeekRange::new(start, end, week_interval, weeks)))
}

// 不正な授業はNoneを返す。呼び出し側で読み飛ばす
pub fn yaml_to_raw_lesson(yaml: &Yaml, term: &TermConfig) -> Option<RawLesson> {
    let class_no = yaml_to_string(&yaml["classNo"])?;
    let lesson_type = yaml["lessonType"].as_str()?;
    let day: Weekday = yaml["day"].as_str()?.parse().ok()?;
    let start_time = yaml_to_time(&yaml["startTime"])?;
    let end_time = yaml_to_time(&yaml["endTime"])?;
    let weeks = yaml_to_weeks(&yaml["weeks"], term)?;
    let venue = yaml_to_string(&yaml["venue"]).unwrap_or_default();

    if start_time >= end_time {
        return None;
    }

    Some(RawLesson::new(
        &class_no,
        lesson_type,
        day,
        &start_time,
        &end_time,
        weeks,
        &venue,
    ))
}

pub fn yaml_to_module(yaml: &Yaml, term: &TermConfig) -> Option<Module> {
    let module_code = yaml["moduleCode"].as_str()?;
    let title = yaml["title"].as_str().unwrap_or("");

    let mut semester_data = vec![];

    for sem_yaml in yaml["semesterData"].as_vec().unwrap_or(&vec![]) {
        let semester: Semester = match sem_yaml["semester"]
            .as_i64()
            .and_then(|s| Semester::try_from(s).ok())
        {
            Some(semester) => semester,
            None => {
                warn!("{}: semester is missing, skipped", module_code);
                continue;
            }
        };

        let mut timetable = vec![];
        for lesson_yaml in sem_yaml["timetable"].as_vec().unwrap_or(&vec![]) {
            match yaml_to_raw_lesson(lesson_yaml, term) {
                Some(lesson) => timetable.push(lesson),
                None => warn!(
                    "{}: invalid lesson in semester {}, skipped: {:?}",
                    module_code, semester, lesson_yaml
                ),
            }
        }

        semester_data.push(SemesterData::new(semester, timetable));
    }

    Some(Module::new(module_code, title, semester_data))
}

// term: { num_weeks, min_odd_weeks, min_even_weeks }
// キーがなければ13週の学期の値を使う
pub fn yaml_to_term_config(yaml: &Yaml) -> TermConfig {
    let default = TermConfig::default();
    let term_yaml = &yaml["term"];

    let read = |key: &str, fallback: usize| -> usize {
        term_yaml[key]
            .as_i64()
            .and_then(|v| usize::try_from(v).ok())
            .unwrap_or(fallback)
    };

    TermConfig::new(
        read("num_weeks", default.get_num_weeks()),
        read("min_odd_weeks", default.get_min_odd_weeks()),
        read("min_even_weeks", default.get_min_even_weeks()),
    )
}

#[test]
fn test_yaml_to_raw_lesson_正常系() {
    let s = "
classNo: '01'
lessonType: 'Tutorial'
day: 'Tuesday'
startTime: '0900'
endTime: '1000'
weeks: [3, 4, 5]
venue: 'COM1-0208'
";
    let docs = YamlLoader::load_from_str(s).unwrap();

    let actual = yaml_to_raw_lesson(&docs[0], &TermConfig::default());
    let expected = RawLesson::new(
        "01",
        "Tutorial",
        Weekday::Tue,
        "0900",
        "1000",
        Weeks::Numeric(vec![3, 4, 5]),
        "COM1-0208",
    );
    assert_eq!(actual, Some(expected));
}

#[test]
fn test_yaml_to_raw_lesson_クォートされていない数値も読める() {
    let s = "
classNo: 2
lessonType: 'Lecture'
day: 'Mon'
startTime: 800
endTime: 1000
weeks: [1]
";
    let docs = YamlLoader::load_from_str(s).unwrap();

    let actual = yaml_to_raw_lesson(&docs[0], &TermConfig::default()).unwrap();
    let expected = RawLesson::new(
        "2",
        "Lecture",
        Weekday::Mon,
        "0800",
        "1000",
        Weeks::Numeric(vec![1]),
        "",
    );
    assert_eq!(actual, expected);
}

#[test]
#[allow(non_snake_case)]
fn test_yaml_to_raw_lesson_時刻が不正ならNone() {
    let s = "
classNo: '1'
lessonType: 'Lecture'
day: 'Monday'
startTime: '9am'
endTime: '1000'
weeks: [1]
";
    let docs = YamlLoader::load_from_str(s).unwrap();
    assert_eq!(yaml_to_raw_lesson(&docs[0], &TermConfig::default()), None);
}

#[test]
#[allow(non_snake_case)]
fn test_yaml_to_raw_lesson_終了が開始より前ならNone() {
    let s = "
classNo: '1'
lessonType: 'Lecture'
day: 'Monday'
startTime: '1200'
endTime: '1000'
weeks: [1]
";
    let docs = YamlLoader::load_from_str(s).unwrap();
    assert_eq!(yaml_to_raw_lesson(&docs[0], &TermConfig::default()), None);
}

#[test]
#[allow(non_snake_case)]
fn test_yaml_to_raw_lesson_曜日が不正ならNone() {
    let s = "
classNo: '1'
lessonType: 'Lecture'
day: 'Someday'
startTime: '1000'
endTime: '1200'
weeks: [1]
";
    let docs = YamlLoader::load_from_str(s).unwrap();
    assert_eq!(yaml_to_raw_lesson(&docs[0], &TermConfig::default()), None);
}

#[test]
fn test_yaml_to_weeks_日付範囲() {
    let s = "
start: '2023-01-09'
end: '2023-04-10'
weekInterval: 2
";
    let docs = YamlLoader::load_from_str(s).unwrap();

    let actual = yaml_to_weeks(&docs[0], &TermConfig::default());
    let expected = Weeks::Range(WeekRange::new(
        NaiveDate::from_ymd_opt(2023, 1, 9).unwrap(),
        NaiveDate::from_ymd_opt(2023, 4, 10).unwrap(),
        Some(2),
        None,
    ));
    assert_eq!(actual, Some(expected));
}

#[test]
fn test_yaml_to_weeks_週番号は並べ替えて重複を除く() {
    let docs = YamlLoader::load_from_str("[5, 1, 3, 3]").unwrap();
    assert_eq!(
        yaml_to_weeks(&docs[0], &TermConfig::default()),
        Some(Weeks::Numeric(vec![1, 3, 5]))
    );
}

#[test]
#[allow(non_snake_case)]
fn test_yaml_to_weeks_学期の範囲外の週番号はNone() {
    let term = TermConfig::default();
    for s in ["[0, 1, 2]", "[1, 2, 99]"] {
        let docs = YamlLoader::load_from_str(s).unwrap();
        assert_eq!(yaml_to_weeks(&docs[0], &term), None);
    }

    // 14週の学期なら第14週も有効
    let docs = YamlLoader::load_from_str("[13, 14]").unwrap();
    assert_eq!(
        yaml_to_weeks(&docs[0], &TermConfig::new(14, 7, 6)),
        Some(Weeks::Numeric(vec![13, 14]))
    );
}

#[test]
#[allow(non_snake_case)]
fn test_yaml_to_weeks_日付範囲の週番号や間隔が不正ならNone() {
    let term = TermConfig::default();
    let cases = [
        "{start: '2023-01-09', end: '2023-04-10', weeks: [100000000]}",
        "{start: '2023-01-09', end: '2023-04-10', weekInterval: 0}",
        "{start: '2023-01-09', end: '2023-04-10', weekInterval: 4000000000}",
        "{start: '2023-01-09', end: '2023-04-10', weekInterval: 'two'}",
        "{start: '2023-04-10', end: '2023-01-09'}",
    ];
    for s in cases {
        let docs = YamlLoader::load_from_str(s).unwrap();
        assert_eq!(yaml_to_weeks(&docs[0], &term), None, "{}", s);
    }
}

#[test]
#[allow(non_snake_case)]
fn test_yaml_to_raw_lesson_週番号が不正ならNone() {
    let s = "
classNo: '1'
lessonType: 'Lecture'
day: 'Monday'
startTime: '1000'
endTime: '1200'
weeks:
  start: '2023-01-09'
  end: '2023-04-10'
  weeks: [100000000]
";
    let docs = YamlLoader::load_from_str(s).unwrap();
    assert_eq!(yaml_to_raw_lesson(&docs[0], &TermConfig::default()), None);
}

#[test]
fn test_yaml_to_module_不正な授業は読み飛ばす() {
    let s = "
moduleCode: 'CS1010'
title: 'Programming Methodology'
semesterData:
  - semester: 1
    timetable:
      - classNo: '1'
        lessonType: 'Lecture'
        day: 'Monday'
        startTime: '1000'
        endTime: '1200'
        weeks: [1, 2, 3]
      - classNo: '2'
        lessonType: 'Lecture'
        day: 'Monday'
  - semester: 2
";
    let docs = YamlLoader::load_from_str(s).unwrap();

    let actual = yaml_to_module(&docs[0], &TermConfig::default()).unwrap();
    assert_eq!(actual.get_module_code(), "CS1010");
    assert_eq!(actual.get_title(), "Programming Methodology");
    assert_eq!(actual.get_semester_data().len(), 2);
    assert_eq!(actual.get_semester_data()[0].get_timetable().len(), 1);
    assert!(actual.get_semester_data()[1].get_timetable().is_empty());
}

#[test]
#[allow(non_snake_case)]
fn test_yaml_to_module_moduleCodeがなければNone() {
    let docs = YamlLoader::load_from_str("title: 'No code'").unwrap();
    assert_eq!(yaml_to_module(&docs[0], &TermConfig::default()), None);
}

#[test]
fn test_yaml_to_term_config_一部のキーだけ指定() {
    let s = "
term:
  num_weeks: 14
";
    let docs = YamlLoader::load_from_str(s).unwrap();
    assert_eq!(yaml_to_term_config(&docs[0]), TermConfig::new(14, 7, 6));
}

#[test]
fn test_yaml_to_term_config_キーがない場合は既定値() {
    let docs = YamlLoader::load_from_str("other: 1").unwrap();
    assert_eq!(yaml_to_term_config(&docs[0]), TermConfig::default());
}
