use crate::application::interface::ModuleCatalogTrait;
use crate::entity::lesson::{LessonSlot, LessonType, ModuleCode, RawLesson};
use crate::entity::module::{get_module_raw_lessons, Module, Semester};
use crate::entity::timetable_config::{ModuleLessonConfig, SemTimetableConfig};
use linked_hash_map::LinkedHashMap;
use log::info;

#[cfg(test)]
use crate::application::test_catalog::sample_modules;

// カタログに存在しないモジュールを時間割から取り除く
// (残った時間割, 取り除いたモジュールコード) を返す
pub fn validate_timetable_modules(
    timetable: &SemTimetableConfig,
    catalog: &dyn ModuleCatalogTrait,
) -> (SemTimetableConfig, Vec<ModuleCode>) {
    let mut valid = SemTimetableConfig::new();
    let mut invalid: Vec<ModuleCode> = vec![];

    for (module_code, module_lesson_config) in timetable.iter() {
        if catalog.has_module(module_code) {
            valid.insert(module_code.clone(), module_lesson_config.clone());
        } else {
            invalid.push(module_code.clone());
        }
    }

    if !invalid.is_empty() {
        info!("removed unknown modules: {}", invalid.join(", "));
    }

    (valid, invalid)
}

// 1モジュール分の選択を検証する
// - 選択がない、またはクラス番号が存在しない種別は、最初のクラス番号に置き換える
// - カタログから消えた種別は取り除く
// (検証後の選択, 変更された種別) を返す
pub fn validate_module_lessons(
    semester: Semester,
    lesson_config: &ModuleLessonConfig,
    module: &Module,
) -> (ModuleLessonConfig, Vec<LessonType>) {
    let mut validated_lesson_config = ModuleLessonConfig::new();
    let mut updated_lesson_types: Vec<LessonType> = vec![];

    let mut lessons_by_type: LinkedHashMap<&str, Vec<&RawLesson>> = LinkedHashMap::new();
    for lesson in get_module_raw_lessons(module, semester).iter() {
        lessons_by_type
            .entry(lesson.get_lesson_type())
            .or_insert_with(Vec::new)
            .push(lesson);
    }

    for (lesson_type, lessons) in lessons_by_type.iter() {
        let class_no_opt = lesson_config.get(*lesson_type);
        let is_valid = match class_no_opt {
            Some(class_no) => lessons.iter().any(|lesson| lesson.get_class_no() == class_no),
            None => false,
        };

        match (is_valid, class_no_opt) {
            (true, Some(class_no)) => {
                validated_lesson_config.insert(lesson_type.to_string(), class_no.clone());
            }
            _ => {
                // lessons_by_typeの値は空にならない
                if let Some(first) = lessons.first() {
                    validated_lesson_config
                        .insert(lesson_type.to_string(), first.get_class_no().to_string());
                }
                updated_lesson_types.push(lesson_type.to_string());
            }
        }
    }

    for lesson_type in lesson_config.keys() {
        if !lessons_by_type.contains_key(lesson_type.as_str()) {
            updated_lesson_types.push(lesson_type.clone());
        }
    }

    (validated_lesson_config, updated_lesson_types)
}

// 両方の検証をまとめて行う。変更があった (モジュール, 種別) を返す
pub fn validate_timetable(
    timetable: &SemTimetableConfig,
    catalog: &dyn ModuleCatalogTrait,
    semester: Semester,
) -> (SemTimetableConfig, Vec<ModuleCode>, Vec<(ModuleCode, LessonType)>) {
    let (valid_modules, removed_modules) = validate_timetable_modules(timetable, catalog);

    let mut validated = SemTimetableConfig::new();
    let mut updated: Vec<(ModuleCode, LessonType)> = vec![];

    for (module_code, lesson_config) in valid_modules.iter() {
        if let Some(module) = catalog.get_module(module_code) {
            let (config, updated_lesson_types) =
                validate_module_lessons(semester, lesson_config, module);
            for lesson_type in updated_lesson_types.into_iter() {
                updated.push((module_code.clone(), lesson_type));
            }
            validated.insert(module_code.clone(), config);
        }
    }

    (validated, removed_modules, updated)
}

#[cfg(test)]
fn module_config(pairs: &[(&str, &str)]) -> ModuleLessonConfig {
    pairs
        .iter()
        .map(|(lesson_type, class_no)| (lesson_type.to_string(), class_no.to_string()))
        .collect()
}

#[test]
fn test_validate_timetable_modules_存在しないモジュールを取り除く() {
    let modules = sample_modules();
    let mut timetable = SemTimetableConfig::new();
    timetable.insert("CS1010".to_string(), module_config(&[("Lecture", "1")]));
    timetable.insert("XX9999".to_string(), module_config(&[("Lecture", "1")]));

    let (valid, invalid) = validate_timetable_modules(&timetable, &modules);

    assert_eq!(valid.keys().collect::<Vec<_>>(), vec!["CS1010"]);
    assert_eq!(invalid, vec!["XX9999".to_string()]);
}

#[test]
fn test_validate_module_lessons_正しい選択はそのまま() {
    let modules = sample_modules();
    let config = module_config(&[
        ("Lecture", "1"),
        ("Tutorial", "T03"),
        ("Laboratory", "B01"),
    ]);

    let (actual, updated) = validate_module_lessons(1, &config, &modules["CS1010"]);

    assert_eq!(actual.get("Tutorial"), Some(&"T03".to_string()));
    assert_eq!(actual.len(), 3);
    assert!(updated.is_empty());
}

#[test]
fn test_validate_module_lessons_不正なクラス番号と未選択を置き換える() {
    let modules = sample_modules();
    let config = module_config(&[("Lecture", "1"), ("Tutorial", "T99")]);

    let (actual, updated) = validate_module_lessons(1, &config, &modules["CS1010"]);

    let expected = module_config(&[
        ("Lecture", "1"),
        ("Tutorial", "T01"),
        ("Laboratory", "B01"),
    ]);
    assert_eq!(actual, expected);
    assert_eq!(updated, vec!["Tutorial".to_string(), "Laboratory".to_string()]);
}

#[test]
fn test_validate_module_lessons_なくなった種別は取り除く() {
    let modules = sample_modules();
    let config = module_config(&[
        ("Lecture", "1"),
        ("Tutorial", "T01"),
        ("Laboratory", "B01"),
        ("Recitation", "R1"),
    ]);

    let (actual, updated) = validate_module_lessons(1, &config, &modules["CS1010"]);

    assert!(actual.get("Recitation").is_none());
    assert_eq!(updated, vec!["Recitation".to_string()]);
}

#[test]
fn test_validate_timetable_まとめて検証する() {
    let modules = sample_modules();
    let mut timetable = SemTimetableConfig::new();
    timetable.insert("XX9999".to_string(), module_config(&[("Lecture", "1")]));
    timetable.insert(
        "CS1010".to_string(),
        module_config(&[("Lecture", "1"), ("Tutorial", "T02"), ("Laboratory", "B01")]),
    );

    let (validated, removed, updated) = validate_timetable(&timetable, &modules, 1);

    assert_eq!(validated.len(), 1);
    assert_eq!(removed, vec!["XX9999".to_string()]);
    assert!(updated.is_empty());
}
