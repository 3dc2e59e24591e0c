use crate::application::interface::ModuleCatalogTrait;
use crate::entity::lesson::{Lesson, LessonSlot};
use crate::entity::module::{get_module_raw_lessons, Module, Semester};
use crate::entity::timetable_config::{
    ModuleLessonConfigWithLessons, SemTimetableConfig, SemTimetableConfigWithLessons,
};
use log::warn;

#[cfg(test)]
use crate::application::test_catalog::sample_modules;
#[cfg(test)]
use crate::entity::timetable_config::ModuleLessonConfig;

// SemTimetableConfigのクラス番号を、実際の授業(Lesson)の一覧に置き換える
// カタログにないモジュールは空として扱う
pub fn populate_sem_timetable_with_lessons(
    sem_timetable_config: &SemTimetableConfig,
    catalog: &dyn ModuleCatalogTrait,
    semester: Semester,
) -> SemTimetableConfigWithLessons {
    let mut populated = SemTimetableConfigWithLessons::new();

    for (module_code, module_lesson_config) in sem_timetable_config.iter() {
        let mut lessons_by_type = ModuleLessonConfigWithLessons::new();

        match catalog.get_module(module_code) {
            Some(module) => {
                let raw_lessons = get_module_raw_lessons(module, semester);

                for (lesson_type, class_no) in module_lesson_config.iter() {
                    let lessons: Vec<Lesson> = raw_lessons
                        .iter()
                        .filter(|lesson| {
                            lesson.get_lesson_type() == lesson_type
                                && lesson.get_class_no() == class_no
                        })
                        .map(|lesson| Lesson::from_raw(lesson, module_code, module.get_title()))
                        .collect();

                    lessons_by_type.insert(lesson_type.clone(), lessons);
                }
            }
            None => {
                warn!("module {} is not in the catalog", module_code);
            }
        }

        populated.insert(module_code.clone(), lessons_by_type);
    }

    populated
}

// 時間割に含まれるモジュールの情報を時間割の順で返す
pub fn get_semester_modules<'a>(
    timetable: &SemTimetableConfig,
    catalog: &'a dyn ModuleCatalogTrait,
) -> Vec<&'a Module> {
    timetable
        .keys()
        .filter_map(|module_code| catalog.get_module(module_code))
        .collect()
}

// 描画用に全授業を1つの配列にする
pub fn flatten_timetable_lessons(populated: &SemTimetableConfigWithLessons) -> Vec<Lesson> {
    populated
        .values()
        .flat_map(|lessons_by_type| lessons_by_type.values())
        .flat_map(|lessons| lessons.iter().cloned())
        .collect()
}

#[cfg(test)]
fn sample_timetable() -> SemTimetableConfig {
    let mut cs1010 = ModuleLessonConfig::new();
    cs1010.insert("Lecture".to_string(), "1".to_string());
    cs1010.insert("Tutorial".to_string(), "T02".to_string());

    let mut timetable = SemTimetableConfig::new();
    timetable.insert("CS1010".to_string(), cs1010);
    timetable
}

#[test]
fn test_populate_sem_timetable_with_lessons_正常系() {
    let modules = sample_modules();
    let actual = populate_sem_timetable_with_lessons(&sample_timetable(), &modules, 1);

    let cs1010 = &actual["CS1010"];
    assert_eq!(cs1010["Lecture"].len(), 2);
    assert_eq!(cs1010["Tutorial"].len(), 1);
    assert_eq!(cs1010["Tutorial"][0].get_class_no(), "T02");
    assert_eq!(cs1010["Tutorial"][0].get_module_code(), "CS1010");
    assert_eq!(cs1010["Tutorial"][0].get_title(), "Programming Methodology");
}

#[test]
fn test_populate_sem_timetable_with_lessons_カタログにないモジュールは空() {
    let modules = sample_modules();
    let mut timetable = sample_timetable();
    timetable.insert("XX9999".to_string(), ModuleLessonConfig::new());

    let actual = populate_sem_timetable_with_lessons(&timetable, &modules, 1);
    assert!(actual["XX9999"].is_empty());
}

#[test]
fn test_populate_sem_timetable_with_lessons_開講していない学期は空の授業() {
    let modules = sample_modules();
    let actual = populate_sem_timetable_with_lessons(&sample_timetable(), &modules, 2);
    assert!(actual["CS1010"]["Lecture"].is_empty());
}

#[test]
fn test_get_semester_modules_時間割の順() {
    let modules = sample_modules();
    let mut timetable = SemTimetableConfig::new();
    timetable.insert("MA1521".to_string(), ModuleLessonConfig::new());
    timetable.insert("XX9999".to_string(), ModuleLessonConfig::new());
    timetable.insert("CS1010".to_string(), ModuleLessonConfig::new());

    let actual: Vec<&str> = get_semester_modules(&timetable, &modules)
        .iter()
        .map(|module| module.get_module_code())
        .collect();
    assert_eq!(actual, vec!["MA1521", "CS1010"]);
}

#[test]
fn test_flatten_timetable_lessons_正常系() {
    let modules = sample_modules();
    let populated = populate_sem_timetable_with_lessons(&sample_timetable(), &modules, 1);
    assert_eq!(flatten_timetable_lessons(&populated).len(), 3);
}
