use crate::entity::term::TermConfig;
use chrono::{Duration, NaiveDate};

#[cfg(test)]
use chrono::Datelike;

// 1..=13 の範囲で単調増加、重複なし
pub type NumericWeeks = Vec<u32>;

// 週番号ではなく日付で指定される不定期な授業
#[derive(Clone, Debug, PartialEq)]
pub struct WeekRange {
    start: NaiveDate,
    end: NaiveDate,
    week_interval: Option<u32>,
    weeks: Option<Vec<u32>>,
}

impl WeekRange {
    pub fn new(
        start: NaiveDate,
        end: NaiveDate,
        week_interval: Option<u32>,
        weeks: Option<Vec<u32>>,
    ) -> Self {
        Self {
            start,
            end,
            week_interval,
            weeks,
        }
    }

    pub fn get_start(&self) -> NaiveDate {
        self.start
    }

    pub fn get_end(&self) -> NaiveDate {
        self.end
    }

    pub fn get_week_interval(&self) -> Option<u32> {
        self.week_interval
    }

    pub fn get_weeks(&self) -> Option<&Vec<u32>> {
        self.weeks.as_ref()
    }

    // 授業が行われる日付の一覧 (end以前のもののみ)
    pub fn dates(&self) -> Vec<NaiveDate> {
        let candidates: Vec<NaiveDate> = match &self.weeks {
            // weeksは開始日を第1週とした週番号
            // 日付の範囲を超える週番号は捨てる
            Some(weeks) => weeks
                .iter()
                .filter(|w| **w >= 1)
                .filter_map(|w| {
                    self.start
                        .checked_add_signed(Duration::weeks(i64::from(*w) - 1))
                })
                .collect(),
            None => {
                let step = Duration::weeks(i64::from(self.week_interval.unwrap_or(1).max(1)));
                let mut dates = vec![];
                let mut current = self.start;
                while current <= self.end {
                    dates.push(current);
                    current = match current.checked_add_signed(step) {
                        Some(next) => next,
                        None => break,
                    };
                }
                dates
            }
        };

        candidates
            .into_iter()
            .filter(|date| *date <= self.end)
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Weeks {
    Numeric(NumericWeeks),
    Range(WeekRange),
}

impl Weeks {
    // week_numは学期の何週目か。dateはその週の中で判定したい日付
    pub fn is_active(&self, date: NaiveDate, week_num: u32) -> bool {
        match self {
            Weeks::Numeric(weeks) => weeks.contains(&week_num),
            Weeks::Range(week_range) => {
                if date < week_range.get_start() {
                    return false;
                }
                week_range.dates().iter().any(|d| *d == date)
            }
        }
    }
}

#[test]
fn test_is_active_週番号で指定された場合() {
    let weeks = Weeks::Numeric(vec![1, 3, 5]);
    let date = NaiveDate::from_ymd_opt(2023, 1, 9).unwrap();

    assert!(weeks.is_active(date, 3));
    assert!(!weeks.is_active(date, 2));
}

#[test]
fn test_is_active_日付範囲で指定された場合は毎週同じ曜日のみ() {
    let start = NaiveDate::from_ymd_opt(2023, 1, 9).unwrap();
    let end = NaiveDate::from_ymd_opt(2023, 2, 6).unwrap();
    let weeks = Weeks::Range(WeekRange::new(start, end, None, None));

    assert!(weeks.is_active(NaiveDate::from_ymd_opt(2023, 1, 16).unwrap(), 0));
    assert!(weeks.is_active(end, 0));
    assert!(!weeks.is_active(NaiveDate::from_ymd_opt(2023, 1, 17).unwrap(), 0));
    assert!(!weeks.is_active(NaiveDate::from_ymd_opt(2023, 2, 13).unwrap(), 0));
    assert!(!weeks.is_active(NaiveDate::from_ymd_opt(2023, 1, 2).unwrap(), 0));
}

#[test]
fn test_is_active_隔週の日付範囲() {
    let start = NaiveDate::from_ymd_opt(2023, 1, 9).unwrap();
    let end = NaiveDate::from_ymd_opt(2023, 2, 6).unwrap();
    let weeks = Weeks::Range(WeekRange::new(start, end, Some(2), None));

    assert!(weeks.is_active(NaiveDate::from_ymd_opt(2023, 1, 23).unwrap(), 0));
    assert!(!weeks.is_active(NaiveDate::from_ymd_opt(2023, 1, 16).unwrap(), 0));
}

#[test]
fn test_dates_週番号付きの日付範囲() {
    let start = NaiveDate::from_ymd_opt(2023, 1, 9).unwrap();
    let end = NaiveDate::from_ymd_opt(2023, 1, 30).unwrap();
    let week_range = WeekRange::new(start, end, None, Some(vec![1, 3, 5]));

    let actual = week_range.dates();
    // 第5週はendを過ぎるので含まれない
    assert_eq!(
        actual,
        vec![start, NaiveDate::from_ymd_opt(2023, 1, 23).unwrap()]
    );
    assert!(actual.iter().all(|d| d.weekday() == start.weekday()));
}

#[test]
fn test_dates_日付の上限を超える週番号は無視する() {
    let start = NaiveDate::from_ymd_opt(2023, 1, 9).unwrap();
    let end = NaiveDate::from_ymd_opt(2023, 4, 10).unwrap();
    let week_range = WeekRange::new(start, end, None, Some(vec![1, 100_000_000]));

    assert_eq!(week_range.dates(), vec![start]);

    let weeks = Weeks::Range(week_range);
    assert!(weeks.is_active(start, 1));
}

#[test]
fn test_dates_巨大な間隔でも止まる() {
    let start = NaiveDate::from_ymd_opt(2023, 1, 9).unwrap();
    let week_range = WeekRange::new(start, NaiveDate::MAX, Some(4_000_000_000), None);

    assert_eq!(week_range.dates(), vec![start]);
}

fn deltas(numbers: &[u32]) -> Vec<i64> {
    numbers
        .windows(2)
        .map(|pair| i64::from(pair[1]) - i64::from(pair[0]))
        .collect()
}

#[test]
fn test_deltas_正常系() {
    assert_eq!(deltas(&[1, 2, 4, 7]), vec![1, 2, 3]);
    assert_eq!(deltas(&[5]), Vec::<i64>::new());
    assert_eq!(deltas(&[]), Vec::<i64>::new());
}

// 全週または空なら None
pub fn format_numeric_weeks(weeks: &[u32]) -> Option<String> {
    format_numeric_weeks_with_config(weeks, &TermConfig::default())
}

pub fn format_numeric_weeks_with_config(weeks: &[u32], term: &TermConfig) -> Option<String> {
    let first = *weeks.first()?;

    if weeks.len() == term.get_num_weeks() {
        return None;
    }
    if weeks.len() == 1 {
        return Some(format!("Week {}", first));
    }

    // 奇数週の方が偶数週より多いので、長さの閾値を分ける
    if deltas(weeks).iter().all(|d| *d == 2) {
        if first % 2 == 0 && weeks.len() >= term.get_min_even_weeks() {
            return Some(String::from("Even Weeks"));
        }
        if first % 2 == 1 && weeks.len() >= term.get_min_odd_weeks() {
            return Some(String::from("Odd Weeks"));
        }
    }

    let mut processed: Vec<String> = vec![];
    let mut start = first;
    let mut end = first;

    for next in weeks.iter().skip(1) {
        if *next == end + 1 {
            end = *next;
        } else {
            merge_consecutive(&mut processed, start, end);
            start = *next;
            end = start;
        }
    }
    merge_consecutive(&mut processed, start, end);

    Some(format!("Weeks {}", processed.join(", ")))
}

fn merge_consecutive(processed: &mut Vec<String>, start: u32, end: u32) {
    if end - start > 2 {
        processed.push(format!("{}-{}", start, end));
    } else {
        processed.extend((start..=end).map(|w| w.to_string()));
    }
}

#[test]
#[allow(non_snake_case)]
fn test_format_numeric_weeks_全週の場合はNoneを返す() {
    let weeks: Vec<u32> = (1..=13).collect();
    assert_eq!(format_numeric_weeks(&weeks), None);
}

#[test]
#[allow(non_snake_case)]
fn test_format_numeric_weeks_空の場合はNoneを返す() {
    assert_eq!(format_numeric_weeks(&[]), None);
}

#[test]
fn test_format_numeric_weeks_1週のみ() {
    assert_eq!(format_numeric_weeks(&[3]), Some(String::from("Week 3")));
}

#[test]
fn test_format_numeric_weeks_偶数週() {
    assert_eq!(
        format_numeric_weeks(&[2, 4, 6, 8, 10, 12]),
        Some(String::from("Even Weeks"))
    );
}

#[test]
fn test_format_numeric_weeks_奇数週() {
    assert_eq!(
        format_numeric_weeks(&[1, 3, 5, 7, 9, 11, 13]),
        Some(String::from("Odd Weeks"))
    );
}

#[test]
fn test_format_numeric_weeks_短い隔週は奇数週とみなさない() {
    assert_eq!(
        format_numeric_weeks(&[3, 5, 7, 9, 11, 13]),
        Some(String::from("Weeks 3, 5, 7, 9, 11, 13"))
    );
    assert_eq!(
        format_numeric_weeks(&[4, 6, 8, 10, 12]),
        Some(String::from("Weeks 4, 6, 8, 10, 12"))
    );
}

#[test]
fn test_format_numeric_weeks_2週連続は範囲にしない() {
    assert_eq!(format_numeric_weeks(&[1, 2]), Some(String::from("Weeks 1, 2")));
}

#[test]
fn test_format_numeric_weeks_3週連続は範囲にしない() {
    assert_eq!(
        format_numeric_weeks(&[1, 2, 3, 5, 6, 7]),
        Some(String::from("Weeks 1, 2, 3, 5, 6, 7"))
    );
}

#[test]
fn test_format_numeric_weeks_4週以上連続は範囲にする() {
    assert_eq!(
        format_numeric_weeks(&[1, 2, 3, 4, 6, 7, 8, 9]),
        Some(String::from("Weeks 1-4, 6-9"))
    );
    assert_eq!(
        format_numeric_weeks(&[2, 6, 7, 8, 9, 10, 11, 12, 13]),
        Some(String::from("Weeks 2, 6-13"))
    );
}

#[test]
fn test_format_numeric_weeks_with_config_学期の長さを変える() {
    let term = TermConfig::new(10, 5, 5);
    let weeks: Vec<u32> = (1..=10).collect();
    assert_eq!(format_numeric_weeks_with_config(&weeks, &term), None);
    assert_eq!(
        format_numeric_weeks_with_config(&[2, 4, 6, 8, 10], &term),
        Some(String::from("Even Weeks"))
    );
    // 13週の学期なら全週扱いにはならない
    assert_eq!(
        format_numeric_weeks(&weeks),
        Some(String::from("Weeks 1-10"))
    );
}
