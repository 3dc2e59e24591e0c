// 学期の週数と、奇数週/偶数週とみなすための最低週数
// 13週の学期を前提にした経験的な値なので、学期の長さが変わったら設定し直すこと
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TermConfig {
    num_weeks: usize,
    min_odd_weeks: usize,
    min_even_weeks: usize,
}

impl TermConfig {
    pub fn new(num_weeks: usize, min_odd_weeks: usize, min_even_weeks: usize) -> Self {
        Self {
            num_weeks,
            min_odd_weeks,
            min_even_weeks,
        }
    }

    pub fn get_num_weeks(&self) -> usize {
        self.num_weeks
    }

    pub fn get_min_odd_weeks(&self) -> usize {
        self.min_odd_weeks
    }

    pub fn get_min_even_weeks(&self) -> usize {
        self.min_even_weeks
    }
}

impl Default for TermConfig {
    fn default() -> Self {
        Self::new(13, 7, 6)
    }
}

#[test]
fn test_default_13週の学期であること() {
    let actual = TermConfig::default();
    assert_eq!(actual.get_num_weeks(), 13);
    assert_eq!(actual.get_min_odd_weeks(), 7);
    assert_eq!(actual.get_min_even_weeks(), 6);
}
