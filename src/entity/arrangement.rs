use crate::entity::lesson::LessonSlot;
use chrono::Weekday;
use linked_hash_map::LinkedHashMap;

#[cfg(test)]
use crate::entity::lesson::RawLesson;
#[cfg(test)]
use crate::entity::weeks::Weeks;

// 1日分の行。同じ行の中の授業は互いに重ならない。最低1行はある
pub type TimetableDayArrangement<T> = Vec<Vec<T>>;

// 曜日は入力に最初に現れた順
pub type TimetableArrangement<T> = LinkedHashMap<Weekday, TimetableDayArrangement<T>>;

// 半開区間。1200に終わる授業と1200に始まる授業は重ならない
pub fn do_lessons_overlap<A, B>(lesson1: &A, lesson2: &B) -> bool
where
    A: LessonSlot + ?Sized,
    B: LessonSlot + ?Sized,
{
    lesson1.get_day() == lesson2.get_day()
        && lesson1.get_start_time() < lesson2.get_end_time()
        && lesson2.get_start_time() < lesson1.get_end_time()
}

pub fn lessons_for_lesson_type<'a, T: LessonSlot>(lessons: &'a [T], lesson_type: &str) -> Vec<&'a T> {
    lessons
        .iter()
        .filter(|lesson| lesson.get_lesson_type() == lesson_type)
        .collect()
}

pub fn group_lessons_by_day<T: LessonSlot + Clone>(lessons: &[T]) -> LinkedHashMap<Weekday, Vec<T>> {
    let mut day_lessons: LinkedHashMap<Weekday, Vec<T>> = LinkedHashMap::new();

    for lesson in lessons.iter() {
        day_lessons
            .entry(lesson.get_day())
            .or_insert_with(Vec::new)
            .push(lesson.clone());
    }

    day_lessons
}

// 同じ曜日の授業だけを渡すこと。空なら空の行を1つ返す
// 各行は開始時刻順なので、行の最後の授業とだけ比べればよい
pub fn arrange_lessons_within_day<T: LessonSlot + Clone>(lessons: &[T]) -> TimetableDayArrangement<T> {
    let mut rows: TimetableDayArrangement<T> = vec![vec![]];

    let first = match lessons.first() {
        Some(first) => first,
        None => return rows,
    };
    if lessons.iter().any(|lesson| lesson.get_day() != first.get_day()) {
        panic!("arrange_lessons_within_day expects lessons of a single day");
    }

    // 呼び出し元の配列は変更しない
    let mut sorted_lessons: Vec<T> = lessons.to_vec();
    sorted_lessons.sort_by(|a, b| {
        a.get_start_time()
            .cmp(b.get_start_time())
            .then_with(|| a.get_class_no().cmp(b.get_class_no()))
    });

    for lesson in sorted_lessons.into_iter() {
        // ソート済みなので各行の最後の授業とだけ比べればよい
        let row_index = rows.iter().position(|row| match row.last() {
            Some(previous) => !do_lessons_overlap(previous, &lesson),
            None => true,
        });

        match row_index {
            Some(i) => rows[i].push(lesson),
            None => rows.push(vec![lesson]),
        }
    }

    rows
}

pub fn arrange_lessons_for_week<T: LessonSlot + Clone>(lessons: &[T]) -> TimetableArrangement<T> {
    group_lessons_by_day(lessons)
        .into_iter()
        .map(|(day, day_lessons)| (day, arrange_lessons_within_day(&day_lessons)))
        .collect()
}

// 種別の中にクラス番号が2種類以上あれば、別のクラスに移せる
pub fn are_other_classes_available<T: LessonSlot>(lessons: &[T], lesson_type: &str) -> bool {
    let mut class_nos: Vec<&str> = lessons_for_lesson_type(lessons, lesson_type)
        .into_iter()
        .map(|lesson| lesson.get_class_no())
        .collect();
    class_nos.sort_unstable();
    class_nos.dedup();

    class_nos.len() > 1
}

#[cfg(test)]
fn lesson_at(class_no: &str, day: Weekday, start_time: &str, end_time: &str) -> RawLesson {
    RawLesson::new(
        class_no,
        "Tutorial",
        day,
        start_time,
        end_time,
        Weeks::Numeric(vec![1, 2, 3, 4, 5]),
        "COM1-0210",
    )
}

#[cfg(test)]
fn assert_rows_do_not_overlap(rows: &TimetableDayArrangement<RawLesson>) {
    for row in rows.iter() {
        for (i, lesson1) in row.iter().enumerate() {
            for lesson2 in row.iter().skip(i + 1) {
                assert!(
                    !do_lessons_overlap(lesson1, lesson2),
                    "{:?} overlaps {:?}",
                    lesson1,
                    lesson2
                );
            }
        }
    }
}

#[test]
fn test_do_lessons_overlap_重なる場合() {
    let lesson1 = lesson_at("1", Weekday::Mon, "1000", "1200");
    let lesson2 = lesson_at("2", Weekday::Mon, "1100", "1300");
    assert!(do_lessons_overlap(&lesson1, &lesson2));
    assert!(do_lessons_overlap(&lesson2, &lesson1));
}

#[test]
fn test_do_lessons_overlap_包含する場合() {
    let lesson1 = lesson_at("1", Weekday::Mon, "0800", "1800");
    let lesson2 = lesson_at("2", Weekday::Mon, "1100", "1200");
    assert!(do_lessons_overlap(&lesson1, &lesson2));
    assert!(do_lessons_overlap(&lesson2, &lesson1));
}

#[test]
fn test_do_lessons_overlap_接しているだけなら重ならない() {
    let lesson1 = lesson_at("1", Weekday::Mon, "1000", "1200");
    let lesson2 = lesson_at("2", Weekday::Mon, "1200", "1400");
    assert!(!do_lessons_overlap(&lesson1, &lesson2));
    assert!(!do_lessons_overlap(&lesson2, &lesson1));
}

#[test]
fn test_do_lessons_overlap_曜日が違えば重ならない() {
    let lesson1 = lesson_at("1", Weekday::Mon, "1000", "1200");
    let lesson2 = lesson_at("2", Weekday::Tue, "1000", "1200");
    assert!(!do_lessons_overlap(&lesson1, &lesson2));
}

#[test]
fn test_arrange_lessons_within_day_空の場合は空の行が1つ() {
    let lessons: Vec<RawLesson> = vec![];
    let actual = arrange_lessons_within_day(&lessons);
    assert_eq!(actual.len(), 1);
    assert!(actual[0].is_empty());
}

#[test]
fn test_arrange_lessons_within_day_全て重なる場合は3行() {
    let lessons = vec![
        lesson_at("1", Weekday::Mon, "1000", "1200"),
        lesson_at("2", Weekday::Mon, "1000", "1200"),
        lesson_at("3", Weekday::Mon, "1100", "1300"),
    ];
    let actual = arrange_lessons_within_day(&lessons);

    assert_eq!(actual.len(), 3);
    assert!(actual.iter().all(|row| row.len() == 1));
    assert_eq!(actual[0][0].get_class_no(), "1");
    assert_eq!(actual[1][0].get_class_no(), "2");
    assert_eq!(actual[2][0].get_class_no(), "3");
}

#[test]
fn test_arrange_lessons_within_day_最初に入る行に詰める() {
    let lessons = vec![
        lesson_at("C", Weekday::Wed, "1400", "1500"),
        lesson_at("A", Weekday::Wed, "0800", "1000"),
        lesson_at("B", Weekday::Wed, "0900", "1100"),
        lesson_at("D", Weekday::Wed, "1000", "1200"),
    ];
    let actual = arrange_lessons_within_day(&lessons);

    let class_nos: Vec<Vec<&str>> = actual
        .iter()
        .map(|row| row.iter().map(|l| l.get_class_no()).collect())
        .collect();
    assert_eq!(class_nos, vec![vec!["A", "D", "C"], vec!["B"]]);
    assert_rows_do_not_overlap(&actual);

    // 元の配列は並び替えない
    assert_eq!(lessons[0].get_class_no(), "C");
}

#[test]
fn test_arrange_lessons_within_day_多数の授業でも行内で重ならない() {
    let times = [
        ("0800", "1000"),
        ("0900", "1100"),
        ("0930", "1030"),
        ("1000", "1200"),
        ("1030", "1130"),
        ("1100", "1400"),
        ("1200", "1300"),
        ("1200", "1400"),
        ("1300", "1500"),
        ("1600", "1800"),
        ("0800", "1800"),
    ];
    let lessons: Vec<RawLesson> = times
        .iter()
        .enumerate()
        .map(|(i, (start, end))| lesson_at(&format!("{:02}", i), Weekday::Thu, start, end))
        .collect();

    let actual = arrange_lessons_within_day(&lessons);
    assert_rows_do_not_overlap(&actual);
    assert_eq!(actual.iter().map(|row| row.len()).sum::<usize>(), lessons.len());
}

#[test]
#[should_panic]
fn test_arrange_lessons_within_day_曜日が混ざっているとpanicする() {
    let lessons = vec![
        lesson_at("1", Weekday::Mon, "1000", "1200"),
        lesson_at("2", Weekday::Tue, "1300", "1400"),
    ];
    arrange_lessons_within_day(&lessons);
}

#[test]
fn test_arrange_lessons_for_week_曜日ごとに詰める() {
    let lessons = vec![
        lesson_at("1", Weekday::Tue, "1000", "1200"),
        lesson_at("2", Weekday::Mon, "1000", "1200"),
        lesson_at("3", Weekday::Tue, "1100", "1300"),
    ];
    let actual = arrange_lessons_for_week(&lessons);

    let days: Vec<Weekday> = actual.keys().copied().collect();
    assert_eq!(days, vec![Weekday::Tue, Weekday::Mon]);
    assert_eq!(actual[&Weekday::Tue].len(), 2);
    assert_eq!(actual[&Weekday::Mon].len(), 1);
    assert!(actual.get(&Weekday::Fri).is_none());
}

#[test]
fn test_are_other_classes_available_正常系() {
    let mut lessons = vec![
        lesson_at("1", Weekday::Mon, "1000", "1200"),
        lesson_at("1", Weekday::Thu, "1000", "1200"),
    ];
    assert!(!are_other_classes_available(&lessons, "Tutorial"));
    assert!(!are_other_classes_available(&lessons, "Lecture"));

    lessons.push(lesson_at("2", Weekday::Fri, "1000", "1200"));
    assert!(are_other_classes_available(&lessons, "Tutorial"));
}

#[test]
fn test_lessons_for_lesson_type_正常系() {
    let tutorial = lesson_at("1", Weekday::Mon, "1000", "1200");
    let lecture = RawLesson::new(
        "1",
        "Lecture",
        Weekday::Mon,
        "1400",
        "1600",
        Weeks::Numeric(vec![1]),
        "LT19",
    );
    let lessons = vec![tutorial.clone(), lecture];
    assert_eq!(lessons_for_lesson_type(&lessons, "Tutorial"), vec![&tutorial]);
}
