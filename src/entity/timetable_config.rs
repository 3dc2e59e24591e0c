use crate::entity::lesson::{ClassNo, Lesson, LessonSlot, LessonType, ModuleCode, RawLesson};
use linked_hash_map::LinkedHashMap;

#[cfg(test)]
use crate::entity::weeks::Weeks;
#[cfg(test)]
use chrono::Weekday;

// 種別ごとに選んでいるクラス番号は1つだけ。キーがなければ未選択
// 共有リンクの出力を安定させるため、挿入順を保持する
pub type ModuleLessonConfig = LinkedHashMap<LessonType, ClassNo>;

pub type SemTimetableConfig = LinkedHashMap<ModuleCode, ModuleLessonConfig>;

pub type ModuleLessonConfigWithLessons = LinkedHashMap<LessonType, Vec<Lesson>>;

pub type SemTimetableConfigWithLessons = LinkedHashMap<ModuleCode, ModuleLessonConfigWithLessons>;

// キーの順序は無視して比較する
pub fn is_same_timetable_config(t1: &SemTimetableConfig, t2: &SemTimetableConfig) -> bool {
    if t1.len() != t2.len() {
        return false;
    }

    t1.iter().all(|(module_code, config1)| match t2.get(module_code) {
        Some(config2) => {
            config1.len() == config2.len()
                && config1
                    .iter()
                    .all(|(lesson_type, class_no)| config2.get(lesson_type) == Some(class_no))
        }
        None => false,
    })
}

// モジュールを追加した直後に使う初期選択
// 各種別について最初に現れたクラス番号を選ぶ
// TODO: モジュール内で衝突しない組み合わせを選ぶ
pub fn default_module_lesson_config(lessons: &[RawLesson]) -> ModuleLessonConfig {
    let mut config = ModuleLessonConfig::new();

    for lesson in lessons.iter() {
        if !config.contains_key(lesson.get_lesson_type()) {
            config.insert(
                lesson.get_lesson_type().to_string(),
                lesson.get_class_no().to_string(),
            );
        }
    }

    config
}

#[cfg(test)]
fn module_config(pairs: &[(&str, &str)]) -> ModuleLessonConfig {
    pairs
        .iter()
        .map(|(lesson_type, class_no)| (lesson_type.to_string(), class_no.to_string()))
        .collect()
}

#[test]
fn test_is_same_timetable_config_順序が違っても同じ() {
    let mut t1 = SemTimetableConfig::new();
    t1.insert(
        "CS1010".to_string(),
        module_config(&[("Lecture", "1"), ("Tutorial", "2")]),
    );
    t1.insert("MA1521".to_string(), module_config(&[("Lecture", "1")]));

    let mut t2 = SemTimetableConfig::new();
    t2.insert("MA1521".to_string(), module_config(&[("Lecture", "1")]));
    t2.insert(
        "CS1010".to_string(),
        module_config(&[("Tutorial", "2"), ("Lecture", "1")]),
    );

    assert!(is_same_timetable_config(&t1, &t2));
}

#[test]
fn test_is_same_timetable_config_クラス番号が違う() {
    let mut t1 = SemTimetableConfig::new();
    t1.insert("CS1010".to_string(), module_config(&[("Lecture", "1")]));

    let mut t2 = SemTimetableConfig::new();
    t2.insert("CS1010".to_string(), module_config(&[("Lecture", "2")]));

    assert!(!is_same_timetable_config(&t1, &t2));
    assert!(!is_same_timetable_config(&t1, &SemTimetableConfig::new()));
}

#[test]
fn test_default_module_lesson_config_種別ごとに1つ選ぶ() {
    let weeks = Weeks::Numeric(vec![1, 2, 3]);
    let lessons = vec![
        RawLesson::new("1", "Lecture", Weekday::Mon, "1000", "1200", weeks.clone(), "LT27"),
        RawLesson::new("T1", "Tutorial", Weekday::Tue, "0900", "1000", weeks.clone(), "S16"),
        RawLesson::new("T2", "Tutorial", Weekday::Tue, "1000", "1100", weeks.clone(), "S16"),
        RawLesson::new("1", "Lecture", Weekday::Thu, "1000", "1200", weeks, "LT27"),
    ];

    let actual = default_module_lesson_config(&lessons);
    let expected = module_config(&[("Lecture", "1"), ("Tutorial", "T1")]);
    assert_eq!(actual, expected);
}

#[test]
fn test_default_module_lesson_config_授業がない場合() {
    assert!(default_module_lesson_config(&[]).is_empty());
}
