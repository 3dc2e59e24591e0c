use crate::entity::lesson_type::lesson_type_to_abbrev;
use crate::entity::weeks::Weeks;
use chrono::{NaiveDate, Weekday};

pub type ModuleCode = String;
pub type LessonType = String;
pub type ClassNo = String;

// 時刻は "HHMM" の4桁ゼロ埋め文字列。文字列のまま大小比較できる
pub trait LessonSlot {
    fn get_class_no(&self) -> &str;
    fn get_lesson_type(&self) -> &str;
    fn get_day(&self) -> Weekday;
    fn get_start_time(&self) -> &str;
    fn get_end_time(&self) -> &str;
}

// モジュールのカタログに載っている授業。どのモジュールのものかは持たない
#[derive(Clone, Debug, PartialEq)]
pub struct RawLesson {
    class_no: ClassNo,
    lesson_type: LessonType,
    day: Weekday,
    start_time: String,
    end_time: String,
    weeks: Weeks,
    venue: String,
}

impl RawLesson {
    pub fn new(
        class_no: &str,
        lesson_type: &str,
        day: Weekday,
        start_time: &str,
        end_time: &str,
        weeks: Weeks,
        venue: &str,
    ) -> Self {
        Self {
            class_no: class_no.to_string(),
            lesson_type: lesson_type.to_string(),
            day,
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            weeks,
            venue: venue.to_string(),
        }
    }

    pub fn get_weeks(&self) -> &Weeks {
        &self.weeks
    }

    pub fn get_venue(&self) -> &str {
        &self.venue
    }
}

impl LessonSlot for RawLesson {
    fn get_class_no(&self) -> &str {
        &self.class_no
    }

    fn get_lesson_type(&self) -> &str {
        &self.lesson_type
    }

    fn get_day(&self) -> Weekday {
        self.day
    }

    fn get_start_time(&self) -> &str {
        &self.start_time
    }

    fn get_end_time(&self) -> &str {
        &self.end_time
    }
}

// 時間割に載せるための授業。moduleCodeとtitleを注入したもの
#[derive(Clone, Debug, PartialEq)]
pub struct Lesson {
    raw: RawLesson,
    module_code: ModuleCode,
    title: String,
}

impl Lesson {
    pub fn from_raw(raw: &RawLesson, module_code: &str, title: &str) -> Self {
        Self {
            raw: raw.clone(),
            module_code: module_code.to_string(),
            title: title.to_string(),
        }
    }

    pub fn get_raw(&self) -> &RawLesson {
        &self.raw
    }

    pub fn get_module_code(&self) -> &str {
        &self.module_code
    }

    pub fn get_title(&self) -> &str {
        &self.title
    }

    pub fn get_weeks(&self) -> &Weeks {
        self.raw.get_weeks()
    }
}

impl LessonSlot for Lesson {
    fn get_class_no(&self) -> &str {
        self.raw.get_class_no()
    }

    fn get_lesson_type(&self) -> &str {
        self.raw.get_lesson_type()
    }

    fn get_day(&self) -> Weekday {
        self.raw.get_day()
    }

    fn get_start_time(&self) -> &str {
        self.raw.get_start_time()
    }

    fn get_end_time(&self) -> &str {
        self.raw.get_end_time()
    }
}

// 授業の選び直し中に表示するもの
// is_active: 今選ばれているクラス
// is_available: 乗り換え先の候補となるクラス
#[derive(Clone, Debug, PartialEq)]
pub struct ModifiableLesson {
    lesson: Lesson,
    is_active: bool,
    is_available: bool,
}

impl ModifiableLesson {
    pub fn new(lesson: Lesson) -> Self {
        Self {
            lesson,
            is_active: false,
            is_available: false,
        }
    }

    pub fn new_active(lesson: Lesson) -> Self {
        Self {
            lesson,
            is_active: true,
            is_available: false,
        }
    }

    pub fn new_available(lesson: Lesson) -> Self {
        Self {
            lesson,
            is_active: false,
            is_available: true,
        }
    }

    pub fn get_lesson(&self) -> &Lesson {
        &self.lesson
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn is_available(&self) -> bool {
        self.is_available
    }
}

impl LessonSlot for ModifiableLesson {
    fn get_class_no(&self) -> &str {
        self.lesson.get_class_no()
    }

    fn get_lesson_type(&self) -> &str {
        self.lesson.get_lesson_type()
    }

    fn get_day(&self) -> Weekday {
        self.lesson.get_day()
    }

    fn get_start_time(&self) -> &str {
        self.lesson.get_start_time()
    }

    fn get_end_time(&self) -> &str {
        self.lesson.get_end_time()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HoverLesson {
    pub class_no: ClassNo,
    pub module_code: ModuleCode,
    pub lesson_type: LessonType,
}

pub fn get_hover_lesson(lesson: &Lesson) -> HoverLesson {
    HoverLesson {
        class_no: lesson.get_class_no().to_string(),
        module_code: lesson.get_module_code().to_string(),
        lesson_type: lesson.get_lesson_type().to_string(),
    }
}

// 同じモジュール・同じ種別・同じクラス番号なら同じクラス
pub fn are_lessons_same_class(lesson1: &Lesson, lesson2: &Lesson) -> bool {
    lesson1.get_module_code() == lesson2.get_module_code()
        && lesson1.get_lesson_type() == lesson2.get_lesson_type()
        && lesson1.get_class_no() == lesson2.get_class_no()
}

pub fn is_same_lesson(lesson1: &Lesson, lesson2: &Lesson) -> bool {
    are_lessons_same_class(lesson1, lesson2)
        && lesson1.get_start_time() == lesson2.get_start_time()
        && lesson1.get_end_time() == lesson2.get_end_time()
        && lesson1.get_day() == lesson2.get_day()
        && lesson1.get_weeks() == lesson2.get_weeks()
}

// 一意とは限らない。同じクラスが週に複数回ある場合は同じ値になる
pub fn get_lesson_identifier(lesson: &Lesson) -> String {
    let lesson_type = lesson.get_lesson_type();
    format!(
        "{}-{}-{}",
        lesson.get_module_code(),
        lesson_type_to_abbrev(lesson_type).unwrap_or(lesson_type),
        lesson.get_class_no()
    )
}

pub fn is_lesson_available(lesson: &Lesson, date: NaiveDate, week_num: u32) -> bool {
    lesson.get_weeks().is_active(date, week_num)
}

#[cfg(test)]
fn sample_lesson(class_no: &str, day: Weekday, start_time: &str, end_time: &str) -> Lesson {
    let raw = RawLesson::new(
        class_no,
        "Tutorial",
        day,
        start_time,
        end_time,
        Weeks::Numeric(vec![1, 2, 3]),
        "COM1-0208",
    );
    Lesson::from_raw(&raw, "CS1010", "Programming Methodology")
}

#[test]
fn test_are_lessons_same_class_時間が違っても同じクラス() {
    let lesson1 = sample_lesson("01", Weekday::Mon, "0900", "1000");
    let lesson2 = sample_lesson("01", Weekday::Thu, "1400", "1500");
    assert!(are_lessons_same_class(&lesson1, &lesson2));
    assert!(!is_same_lesson(&lesson1, &lesson2));
}

#[test]
fn test_are_lessons_same_class_クラス番号が違う() {
    let lesson1 = sample_lesson("01", Weekday::Mon, "0900", "1000");
    let lesson2 = sample_lesson("02", Weekday::Mon, "0900", "1000");
    assert!(!are_lessons_same_class(&lesson1, &lesson2));
}

#[test]
fn test_are_lessons_same_class_モジュールが違う() {
    let lesson1 = sample_lesson("01", Weekday::Mon, "0900", "1000");
    let lesson2 = Lesson::from_raw(lesson1.get_raw(), "CS2030", "Programming Methodology II");
    assert!(!are_lessons_same_class(&lesson1, &lesson2));
}

#[test]
fn test_is_same_lesson_全て一致する場合() {
    let lesson1 = sample_lesson("01", Weekday::Mon, "0900", "1000");
    let lesson2 = sample_lesson("01", Weekday::Mon, "0900", "1000");
    assert!(is_same_lesson(&lesson1, &lesson2));
}

#[test]
fn test_get_lesson_identifier_略称を使う() {
    let lesson = sample_lesson("01", Weekday::Mon, "0900", "1000");
    assert_eq!(get_lesson_identifier(&lesson), "CS1010-TUT-01");
}

#[test]
fn test_get_hover_lesson_正常系() {
    let lesson = sample_lesson("01", Weekday::Mon, "0900", "1000");
    let expected = HoverLesson {
        class_no: String::from("01"),
        module_code: String::from("CS1010"),
        lesson_type: String::from("Tutorial"),
    };
    assert_eq!(get_hover_lesson(&lesson), expected);
}

#[test]
fn test_is_lesson_available_週番号で判定する() {
    let lesson = sample_lesson("01", Weekday::Mon, "0900", "1000");
    let date = NaiveDate::from_ymd_opt(2023, 1, 9).unwrap();
    assert!(is_lesson_available(&lesson, date, 2));
    assert!(!is_lesson_available(&lesson, date, 4));
}

#[test]
fn test_modifiable_lesson_フラグ() {
    let lesson = sample_lesson("01", Weekday::Mon, "0900", "1000");
    let active = ModifiableLesson::new_active(lesson.clone());
    let available = ModifiableLesson::new_available(lesson.clone());
    let plain = ModifiableLesson::new(lesson);

    assert!(active.is_active() && !active.is_available());
    assert!(!available.is_active() && available.is_available());
    assert!(!plain.is_active() && !plain.is_available());
}
