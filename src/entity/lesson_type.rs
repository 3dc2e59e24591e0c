use std::collections::HashMap;
use std::sync::OnceLock;

// 共有リンクの互換性のため、コードは変更しないこと
const LESSON_TYPE_ABBREVIATIONS: [(&str, &str); 12] = [
    ("Design Lecture", "DLEC"),
    ("Laboratory", "LAB"),
    ("Lecture", "LEC"),
    ("Packaged Lecture", "PLEC"),
    ("Packaged Tutorial", "PTUT"),
    ("Recitation", "REC"),
    ("Sectional Teaching", "SEC"),
    ("Seminar-Style Module Class", "SEM"),
    ("Tutorial", "TUT"),
    ("Tutorial Type 2", "TUT2"),
    ("Tutorial Type 3", "TUT3"),
    ("Workshop", "WS"),
];

// クエリ文字列で安全な文字であること
pub const LESSON_TYPE_SEP: &str = ":";
pub const LESSON_SEP: &str = ",";

struct AbbreviationTable {
    abbrev_by_type: HashMap<&'static str, &'static str>,
    type_by_abbrev: HashMap<&'static str, &'static str>,
}

static ABBREVIATION_TABLE: OnceLock<AbbreviationTable> = OnceLock::new();

fn abbreviation_table() -> &'static AbbreviationTable {
    ABBREVIATION_TABLE.get_or_init(|| {
        let abbrev_by_type: HashMap<&'static str, &'static str> =
            LESSON_TYPE_ABBREVIATIONS.iter().copied().collect();

        // 逆引きは正引きから作る
        let type_by_abbrev: HashMap<&'static str, &'static str> = abbrev_by_type
            .iter()
            .map(|(lesson_type, abbrev)| (*abbrev, *lesson_type))
            .collect();

        if abbrev_by_type.len() != LESSON_TYPE_ABBREVIATIONS.len()
            || type_by_abbrev.len() != abbrev_by_type.len()
        {
            panic!("lesson type abbreviations must be one-to-one");
        }

        AbbreviationTable {
            abbrev_by_type,
            type_by_abbrev,
        }
    })
}

pub fn lesson_type_to_abbrev(lesson_type: &str) -> Option<&'static str> {
    abbreviation_table()
        .abbrev_by_type
        .get(lesson_type)
        .copied()
}

pub fn abbrev_to_lesson_type(abbrev: &str) -> Option<&'static str> {
    abbreviation_table()
        .type_by_abbrev
        .get(abbrev)
        .copied()
}

pub fn known_lesson_types() -> impl Iterator<Item = &'static str> {
    LESSON_TYPE_ABBREVIATIONS
        .iter()
        .map(|(lesson_type, _)| *lesson_type)
}

#[test]
fn test_lesson_type_to_abbrev_正常系() {
    assert_eq!(lesson_type_to_abbrev("Lecture"), Some("LEC"));
    assert_eq!(lesson_type_to_abbrev("Tutorial Type 2"), Some("TUT2"));
    assert_eq!(lesson_type_to_abbrev("Seminar-Style Module Class"), Some("SEM"));
}

#[test]
#[allow(non_snake_case)]
fn test_lesson_type_to_abbrev_未知の種別はNone() {
    assert_eq!(lesson_type_to_abbrev("Mini-Project"), None);
    assert_eq!(lesson_type_to_abbrev("lecture"), None);
}

#[test]
fn test_abbrev_to_lesson_type_正引きの逆になっていること() {
    for lesson_type in known_lesson_types() {
        let abbrev = lesson_type_to_abbrev(lesson_type).unwrap();
        assert_eq!(abbrev_to_lesson_type(abbrev), Some(lesson_type));
    }
    assert_eq!(abbrev_to_lesson_type("XYZ"), None);
    assert_eq!(known_lesson_types().count(), 12);
}
