use crate::entity::lesson::{ModuleCode, RawLesson};
use std::collections::HashMap;

// 1, 2: 通常学期, 3, 4: 特別学期
pub type Semester = u8;

pub fn is_valid_semester(semester: Semester) -> bool {
    (1..=4).contains(&semester)
}

#[derive(Clone, Debug, PartialEq)]
pub struct SemesterData {
    semester: Semester,
    timetable: Vec<RawLesson>,
}

impl SemesterData {
    pub fn new(semester: Semester, timetable: Vec<RawLesson>) -> Self {
        Self {
            semester,
            timetable,
        }
    }

    pub fn get_semester(&self) -> Semester {
        self.semester
    }

    pub fn get_timetable(&self) -> &Vec<RawLesson> {
        &self.timetable
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Module {
    module_code: ModuleCode,
    title: String,
    semester_data: Vec<SemesterData>,
}

impl Module {
    pub fn new(module_code: &str, title: &str, semester_data: Vec<SemesterData>) -> Self {
        Self {
            module_code: module_code.to_string(),
            title: title.to_string(),
            semester_data,
        }
    }

    pub fn get_module_code(&self) -> &str {
        &self.module_code
    }

    pub fn get_title(&self) -> &str {
        &self.title
    }

    pub fn get_semester_data(&self) -> &Vec<SemesterData> {
        &self.semester_data
    }
}

pub type ModulesMap = HashMap<ModuleCode, Module>;

// その学期に開講していなければ空
pub fn get_module_raw_lessons(module: &Module, semester: Semester) -> &[RawLesson] {
    module
        .get_semester_data()
        .iter()
        .find(|sem_data| sem_data.get_semester() == semester)
        .map(|sem_data| sem_data.get_timetable().as_slice())
        .unwrap_or(&[])
}

#[cfg(test)]
use crate::entity::weeks::Weeks;
#[cfg(test)]
use chrono::Weekday;

#[test]
fn test_is_valid_semester_正常系() {
    assert!(is_valid_semester(1));
    assert!(is_valid_semester(4));
    assert!(!is_valid_semester(0));
    assert!(!is_valid_semester(5));
}

#[test]
fn test_get_module_raw_lessons_学期が一致するもの() {
    let lecture = RawLesson::new(
        "1",
        "Lecture",
        Weekday::Fri,
        "1400",
        "1600",
        Weeks::Numeric(vec![1, 2, 3]),
        "I3-AUD",
    );
    let module = Module::new(
        "CS1231",
        "Discrete Structures",
        vec![
            SemesterData::new(1, vec![lecture.clone()]),
            SemesterData::new(2, vec![]),
        ],
    );

    assert_eq!(get_module_raw_lessons(&module, 1), &[lecture][..]);
    assert!(get_module_raw_lessons(&module, 2).is_empty());
    assert!(get_module_raw_lessons(&module, 3).is_empty());
}
