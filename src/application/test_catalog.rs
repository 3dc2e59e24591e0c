use crate::entity::lesson::RawLesson;
use crate::entity::module::{Module, ModulesMap, SemesterData};
use crate::entity::weeks::Weeks;
use chrono::Weekday;

fn raw(class_no: &str, lesson_type: &str, day: Weekday, start: &str, end: &str) -> RawLesson {
    RawLesson::new(
        class_no,
        lesson_type,
        day,
        start,
        end,
        Weeks::Numeric((1..=13).collect()),
        "COM1",
    )
}

// CS1010: 講義1クラス(週2回) + チュートリアル3クラス
// MA1521: 講義2クラス、学期2のみ
pub fn sample_modules() -> ModulesMap {
    let cs1010 = Module::new(
        "CS1010",
        "Programming Methodology",
        vec![SemesterData::new(
            1,
            vec![
                raw("1", "Lecture", Weekday::Mon, "1000", "1200"),
                raw("1", "Lecture", Weekday::Thu, "1000", "1200"),
                raw("T01", "Tutorial", Weekday::Tue, "0900", "1000"),
                raw("T02", "Tutorial", Weekday::Tue, "1000", "1100"),
                raw("T03", "Tutorial", Weekday::Wed, "1400", "1500"),
                raw("B01", "Laboratory", Weekday::Fri, "1400", "1600"),
            ],
        )],
    );

    let ma1521 = Module::new(
        "MA1521",
        "Calculus for Computing",
        vec![SemesterData::new(
            2,
            vec![
                raw("1", "Lecture", Weekday::Mon, "0800", "1000"),
                raw("2", "Lecture", Weekday::Wed, "0800", "1000"),
            ],
        )],
    );

    let mut modules = ModulesMap::new();
    modules.insert("CS1010".to_string(), cs1010);
    modules.insert("MA1521".to_string(), ma1521);
    modules
}
