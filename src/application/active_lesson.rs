use crate::application::interface::ModuleCatalogTrait;
use crate::entity::lesson::{are_lessons_same_class, Lesson, LessonSlot, ModifiableLesson};
use crate::entity::module::{get_module_raw_lessons, Semester};
use log::{debug, warn};

#[cfg(test)]
use crate::application::test_catalog::sample_modules;

// 選択中の授業と同じ種別の授業を全クラス分並べる
// 選択中のクラスは active、それ以外は available
pub fn populate_active_lesson_classes(
    active_lesson: &Lesson,
    timetable_lessons: &[Lesson],
    semester: Semester,
    catalog: &dyn ModuleCatalogTrait,
) -> Vec<ModifiableLesson> {
    let module_code = active_lesson.get_module_code();

    let module = match catalog.get_module(module_code) {
        Some(module) => module,
        None => {
            // 選び直しの候補が出せないので、表示中のものをそのまま返す
            warn!("module {} is not in the catalog", module_code);
            return timetable_lessons
                .iter()
                .cloned()
                .map(ModifiableLesson::new)
                .collect();
        }
    };

    // activeなクラスは後で追加するので一旦取り除く
    let mut modifiable_lessons: Vec<ModifiableLesson> = timetable_lessons
        .iter()
        .filter(|lesson| !are_lessons_same_class(lesson, active_lesson))
        .cloned()
        .map(ModifiableLesson::new)
        .collect();

    let same_lesson_type = get_module_raw_lessons(module, semester)
        .iter()
        .filter(|lesson| lesson.get_lesson_type() == active_lesson.get_lesson_type());

    for raw_lesson in same_lesson_type {
        let lesson = Lesson::from_raw(raw_lesson, module_code, module.get_title());

        if are_lessons_same_class(&lesson, active_lesson) {
            modifiable_lessons.push(ModifiableLesson::new_active(lesson));
        } else {
            modifiable_lessons.push(ModifiableLesson::new_available(lesson));
        }
    }

    debug!(
        "{} lessons to show for {} {}",
        modifiable_lessons.len(),
        module_code,
        active_lesson.get_lesson_type()
    );

    modifiable_lessons
}

#[cfg(test)]
fn cs1010_lessons(lesson_type: &str, class_no: &str) -> Vec<Lesson> {
    let modules = sample_modules();
    let module = &modules["CS1010"];
    get_module_raw_lessons(module, 1)
        .iter()
        .filter(|l| l.get_lesson_type() == lesson_type && l.get_class_no() == class_no)
        .map(|l| Lesson::from_raw(l, "CS1010", module.get_title()))
        .collect()
}

#[test]
fn test_populate_active_lesson_classes_activeは1つで残りは候補() {
    let modules = sample_modules();
    let mut shown = cs1010_lessons("Lecture", "1");
    shown.extend(cs1010_lessons("Tutorial", "T02"));
    let active = shown[2].clone();

    let actual = populate_active_lesson_classes(&active, &shown, 1, &modules);

    let tutorials: Vec<&ModifiableLesson> = actual
        .iter()
        .filter(|l| l.get_lesson_type() == "Tutorial")
        .collect();
    assert_eq!(tutorials.len(), 3);
    assert_eq!(tutorials.iter().filter(|l| l.is_active()).count(), 1);

    let mut class_nos: Vec<&str> = tutorials.iter().map(|l| l.get_class_no()).collect();
    class_nos.sort_unstable();
    assert_eq!(class_nos, vec!["T01", "T02", "T03"]);

    for tutorial in tutorials.iter() {
        if tutorial.get_class_no() == "T02" {
            assert!(tutorial.is_active());
            assert!(!tutorial.is_available());
        } else {
            assert!(!tutorial.is_active());
            assert!(tutorial.is_available());
        }
    }
}

#[test]
fn test_populate_active_lesson_classes_他の種別はそのまま残る() {
    let modules = sample_modules();
    let mut shown = cs1010_lessons("Lecture", "1");
    shown.extend(cs1010_lessons("Tutorial", "T02"));
    let active = shown[2].clone();

    let actual = populate_active_lesson_classes(&active, &shown, 1, &modules);

    let lectures: Vec<&ModifiableLesson> = actual
        .iter()
        .filter(|l| l.get_lesson_type() == "Lecture")
        .collect();
    assert_eq!(lectures.len(), 2);
    assert!(lectures.iter().all(|l| !l.is_active() && !l.is_available()));
    assert_eq!(actual.len(), 5);
}

#[test]
fn test_populate_active_lesson_classes_週に複数回あるクラスは全てactive() {
    let modules = sample_modules();
    let shown = cs1010_lessons("Lecture", "1");
    let active = shown[0].clone();

    let actual = populate_active_lesson_classes(&active, &shown, 1, &modules);

    assert_eq!(actual.len(), 2);
    assert!(actual.iter().all(|l| l.is_active()));
}

#[test]
fn test_populate_active_lesson_classes_カタログにない場合はそのまま() {
    let modules = sample_modules();
    let shown: Vec<Lesson> = cs1010_lessons("Tutorial", "T01")
        .iter()
        .map(|l| Lesson::from_raw(l.get_raw(), "XX9999", "Unknown"))
        .collect();

    let actual = populate_active_lesson_classes(&shown[0], &shown, 1, &modules);

    assert_eq!(actual.len(), 1);
    assert!(!actual[0].is_active() && !actual[0].is_available());
}
