use crate::entity::lesson_type::{
    abbrev_to_lesson_type, lesson_type_to_abbrev, LESSON_SEP, LESSON_TYPE_SEP,
};
use crate::entity::timetable_config::{ModuleLessonConfig, SemTimetableConfig};
use log::{debug, warn};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::{form_urlencoded, Url};

#[cfg(test)]
use crate::entity::timetable_config::is_same_timetable_config;

// encodeURIComponent と同じ文字を残す
const CLASS_NO_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

// eg. { Lecture: 1, Laboratory: 2 } => LEC:1,LAB:2
pub fn encode_module_config(config: &ModuleLessonConfig) -> String {
    let lessons: Vec<String> = config
        .iter()
        .filter_map(|(lesson_type, class_no)| match lesson_type_to_abbrev(lesson_type) {
            Some(abbrev) => Some(format!(
                "{}{}{}",
                abbrev,
                LESSON_TYPE_SEP,
                utf8_percent_encode(class_no, CLASS_NO_ENCODE_SET)
            )),
            None => {
                warn!("lesson type {:?} has no abbreviation, skipped", lesson_type);
                None
            }
        })
        .collect();

    lessons.join(LESSON_SEP)
}

// 例: CS2104=LEC%3A1%2CTUT%3A2&CS2107=LEC%3A1
pub fn encode_timetable(timetable: &SemTimetableConfig) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());

    for (module_code, config) in timetable.iter() {
        serializer.append_pair(module_code, &encode_module_config(config));
    }

    serializer.finish()
}

// 不明な略称の要素は黙って捨てる (古いリンクや外部のリンクを開けるようにするため)
pub fn decode_module_config(raw: Option<&str>) -> ModuleLessonConfig {
    let mut config = ModuleLessonConfig::new();

    let serialized = match raw {
        Some(s) if !s.is_empty() => s,
        _ => return config,
    };

    for lesson in serialized.split(LESSON_SEP) {
        let mut cols = lesson.split(LESSON_TYPE_SEP);
        let abbrev = cols.next().unwrap_or("");

        let class_no = match cols.next() {
            Some(class_no) => percent_decode_str(class_no).decode_utf8_lossy().to_string(),
            None => {
                debug!("ignoring lesson without class number: {:?}", lesson);
                continue;
            }
        };

        let lesson_type = match abbrev_to_lesson_type(abbrev) {
            Some(lesson_type) => lesson_type,
            None => {
                debug!("ignoring unknown lesson type abbreviation: {:?}", abbrev);
                continue;
            }
        };

        // 同じ種別が2回現れたら後勝ち。位置は最初のまま
        match config.get_mut(lesson_type) {
            Some(existing) => *existing = class_no,
            None => {
                config.insert(lesson_type.to_string(), class_no);
            }
        }
    }

    config
}

// モジュールコードはカタログと照合しない
pub fn decode_timetable(raw: &str) -> SemTimetableConfig {
    decode_query_pairs(form_urlencoded::parse(raw.as_bytes()))
}

fn decode_query_pairs<'a, I>(pairs: I) -> SemTimetableConfig
where
    I: Iterator<Item = (std::borrow::Cow<'a, str>, std::borrow::Cow<'a, str>)>,
{
    let mut timetable = SemTimetableConfig::new();

    for (module_code, value) in pairs {
        if module_code.is_empty() {
            continue;
        }

        let config = decode_module_config(Some(&*value));

        // 同じモジュールが複数回現れたらまとめる
        match timetable.get_mut(&*module_code) {
            Some(existing) => {
                for (lesson_type, class_no) in config.into_iter() {
                    match existing.get_mut(&lesson_type) {
                        Some(existing_class_no) => *existing_class_no = class_no,
                        None => {
                            existing.insert(lesson_type, class_no);
                        }
                    }
                }
            }
            None => {
                timetable.insert(module_code.into_owned(), config);
            }
        }
    }

    timetable
}

// 共有用のURLを作る。baseの既存のクエリは置き換える
pub fn encode_timetable_to_url(base: &Url, timetable: &SemTimetableConfig) -> Url {
    let mut url = base.clone();
    let query = encode_timetable(timetable);

    if query.is_empty() {
        url.set_query(None);
    } else {
        url.set_query(Some(&query));
    }

    url
}

pub fn decode_timetable_from_url(raw_url: &str) -> Result<SemTimetableConfig, url::ParseError> {
    let url = Url::parse(raw_url)?;
    Ok(decode_query_pairs(url.query_pairs()))
}

#[cfg(test)]
fn module_config(pairs: &[(&str, &str)]) -> ModuleLessonConfig {
    pairs
        .iter()
        .map(|(lesson_type, class_no)| (lesson_type.to_string(), class_no.to_string()))
        .collect()
}

#[cfg(test)]
fn sample_timetable() -> SemTimetableConfig {
    let mut timetable = SemTimetableConfig::new();
    timetable.insert(
        "CS2104".to_string(),
        module_config(&[("Lecture", "1"), ("Tutorial", "2")]),
    );
    timetable.insert(
        "CS2107".to_string(),
        module_config(&[("Lecture", "1"), ("Tutorial", "8")]),
    );
    timetable
}

#[test]
fn test_encode_module_config_正常系() {
    let config = module_config(&[("Lecture", "1"), ("Laboratory", "2")]);
    assert_eq!(encode_module_config(&config), "LEC:1,LAB:2");
}

#[test]
fn test_encode_module_config_挿入順を保つ() {
    let config = module_config(&[("Workshop", "W1"), ("Design Lecture", "D1")]);
    assert_eq!(encode_module_config(&config), "WS:W1,DLEC:D1");
}

#[test]
fn test_encode_module_config_略称のない種別は出力しない() {
    let config = module_config(&[("Mini-Project", "1"), ("Lecture", "1")]);
    assert_eq!(encode_module_config(&config), "LEC:1");
}

#[test]
fn test_encode_timetable_正常系() {
    assert_eq!(
        encode_timetable(&sample_timetable()),
        "CS2104=LEC%3A1%2CTUT%3A2&CS2107=LEC%3A1%2CTUT%3A8"
    );
}

#[test]
fn test_encode_timetable_空の場合() {
    assert_eq!(encode_timetable(&SemTimetableConfig::new()), "");
}

#[test]
fn test_decode_module_config_正常系() {
    let actual = decode_module_config(Some("LEC:1,TUT2:05,SEM:A"));
    let expected = module_config(&[
        ("Lecture", "1"),
        ("Tutorial Type 2", "05"),
        ("Seminar-Style Module Class", "A"),
    ]);
    assert_eq!(actual, expected);
}

#[test]
#[allow(non_snake_case)]
fn test_decode_module_config_空やNoneは空の設定() {
    assert!(decode_module_config(None).is_empty());
    assert!(decode_module_config(Some("")).is_empty());
}

#[test]
fn test_decode_module_config_不明な略称は無視する() {
    let actual = decode_module_config(Some("LEC:1,XYZ:2,TUT:3"));
    let expected = module_config(&[("Lecture", "1"), ("Tutorial", "3")]);
    assert_eq!(actual, expected);
}

#[test]
fn test_decode_module_config_クラス番号がない要素は無視する() {
    let actual = decode_module_config(Some("LEC,TUT:3,"));
    assert_eq!(actual, module_config(&[("Tutorial", "3")]));
}

#[test]
fn test_decode_timetable_正常系() {
    let actual = decode_timetable("CS2104=LEC%3A1%2CTUT%3A2&CS2107=LEC%3A1%2CTUT%3A8");
    assert_eq!(actual, sample_timetable());
}

#[test]
fn test_decode_timetable_エンコードされていない区切り文字も読める() {
    let actual = decode_timetable("CS2104=LEC:1,TUT:2&CS2107=LEC:1,TUT:8");
    assert_eq!(actual, sample_timetable());
}

#[test]
fn test_decode_timetable_値のないモジュールは空の設定() {
    let actual = decode_timetable("CS1010&CS1231=");
    assert_eq!(actual.len(), 2);
    assert!(actual["CS1010"].is_empty());
    assert!(actual["CS1231"].is_empty());
    assert!(decode_timetable("").is_empty());
}

#[test]
fn test_decode_timetable_未知のモジュールも残す() {
    let actual = decode_timetable("XX9999=LEC%3A1");
    assert_eq!(actual["XX9999"], module_config(&[("Lecture", "1")]));
}

#[test]
fn test_decode_timetable_同じモジュールが複数回あればまとめる() {
    let actual = decode_timetable("CS2104=LEC%3A1&CS2104=TUT%3A2");
    assert_eq!(
        actual["CS2104"],
        module_config(&[("Lecture", "1"), ("Tutorial", "2")])
    );
}

#[test]
fn test_decode_timetable_不明な略称を含んでもエラーにならない() {
    let actual = decode_timetable("CS2104=LEC%3A1%2CFOO%3A9%2CTUT%3A2");
    assert_eq!(
        actual["CS2104"],
        module_config(&[("Lecture", "1"), ("Tutorial", "2")])
    );
}

#[test]
fn test_decode_timetable_往復で元に戻る() {
    let mut timetable = sample_timetable();
    timetable.insert(
        "GEA1000".to_string(),
        module_config(&[
            ("Tutorial Type 3", "E 12"),
            ("Packaged Lecture", "P/1"),
            ("Recitation", "R&1"),
            ("Sectional Teaching", "s=1+2"),
        ]),
    );
    timetable.insert("CS1231".to_string(), ModuleLessonConfig::new());

    let actual = decode_timetable(&encode_timetable(&timetable));
    assert_eq!(actual, timetable);
    assert!(is_same_timetable_config(&actual, &timetable));
}

#[test]
fn test_decode_timetable_全ての種別で往復できる() {
    let config: ModuleLessonConfig = crate::entity::lesson_type::known_lesson_types()
        .enumerate()
        .map(|(i, lesson_type)| (lesson_type.to_string(), format!("{:02}", i)))
        .collect();
    let mut timetable = SemTimetableConfig::new();
    timetable.insert("CS3230".to_string(), config);

    assert_eq!(decode_timetable(&encode_timetable(&timetable)), timetable);
}

#[test]
fn test_encode_timetable_to_url_正常系() {
    let base = Url::parse("https://example.com/timetable/sem-1/share?old=1").unwrap();
    let actual = encode_timetable_to_url(&base, &sample_timetable());
    assert_eq!(
        actual.as_str(),
        "https://example.com/timetable/sem-1/share?CS2104=LEC%3A1%2CTUT%3A2&CS2107=LEC%3A1%2CTUT%3A8"
    );

    let empty = encode_timetable_to_url(&base, &SemTimetableConfig::new());
    assert_eq!(empty.as_str(), "https://example.com/timetable/sem-1/share");
}

#[test]
fn test_decode_timetable_from_url_正常系() {
    let actual = decode_timetable_from_url(
        "https://example.com/timetable/sem-1/share?CS2104=LEC%3A1%2CTUT%3A2&CS2107=LEC%3A1%2CTUT%3A8",
    )
    .unwrap();
    assert_eq!(actual, sample_timetable());
}

#[test]
#[allow(non_snake_case)]
fn test_decode_timetable_from_url_不正なURL() {
    assert!(decode_timetable_from_url("not a url").is_err());
}
