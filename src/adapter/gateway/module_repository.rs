use crate::adapter::gateway::error::CatalogError;
use crate::adapter::gateway::yaml::{yaml_to_module, yaml_to_term_config};
use crate::application::interface::ModuleCatalogTrait;
use crate::entity::module::{Module, ModulesMap};
use crate::entity::term::TermConfig;
use log::{info, warn};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;
use yaml_rust::YamlLoader;

// ディレクトリ以下の *.yaml / *.yml を1ファイル1モジュールとして読む
// 1ファイルに "---" で区切って複数のモジュールを書いてもよい
// 週番号は term の週数で検証する
pub struct ModuleRepository {
    modules: ModulesMap,
    module_storage_dir_name: String,
    term: TermConfig,
}

impl ModuleRepository {
    pub fn new(module_storage_dir_name: &str) -> Self {
        Self::new_with_term_config(module_storage_dir_name, TermConfig::default())
    }

    pub fn new_with_term_config(module_storage_dir_name: &str, term: TermConfig) -> Self {
        Self {
            modules: ModulesMap::new(),
            module_storage_dir_name: module_storage_dir_name.to_string(),
            term,
        }
    }

    // 読み込んだモジュールの数を返す
    pub fn load(&mut self) -> Result<usize, CatalogError> {
        if !Path::new(&self.module_storage_dir_name).is_dir() {
            return Err(CatalogError::NotADirectory(
                self.module_storage_dir_name.clone(),
            ));
        }

        let mut count = 0;

        for entry in WalkDir::new(self.module_storage_dir_name.as_str())
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| match e {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!("skipped: {}", err);
                    None
                }
            })
        {
            let is_yaml = entry
                .path()
                .extension()
                .map(|ext| ext == "yaml" || ext == "yml")
                .unwrap_or(false);
            if !entry.file_type().is_file() || !is_yaml {
                continue;
            }

            let path = entry.path().display().to_string();
            let text = fs::read_to_string(entry.path()).map_err(|source| CatalogError::Io {
                path: path.clone(),
                source,
            })?;

            count += self.load_from_str(&text, &path)?;
        }

        info!(
            "loaded {} modules from {}",
            count, self.module_storage_dir_name
        );
        Ok(count)
    }

    pub fn load_from_str(&mut self, text: &str, origin: &str) -> Result<usize, CatalogError> {
        let docs = YamlLoader::load_from_str(text).map_err(|source| CatalogError::Yaml {
            path: origin.to_string(),
            source,
        })?;

        let mut count = 0;
        for doc in docs.iter() {
            match yaml_to_module(doc, &self.term) {
                Some(module) => {
                    let module_code = module.get_module_code().to_string();
                    if self.modules.insert(module_code.clone(), module).is_some() {
                        warn!("{}: module {} defined twice, later one wins", origin, module_code);
                    }
                    count += 1;
                }
                None => warn!("{}: document without moduleCode, skipped", origin),
            }
        }

        Ok(count)
    }

    // モジュールコード順
    pub fn get_all_modules(&self) -> Vec<&Module> {
        let mut modules: Vec<&Module> = self.modules.values().collect();
        modules.sort_by(|a, b| a.get_module_code().cmp(b.get_module_code()));
        modules
    }
}

impl ModuleCatalogTrait for ModuleRepository {
    fn get_module(&self, module_code: &str) -> Option<&Module> {
        self.modules.get(module_code)
    }
}

pub fn load_term_config(term_config_file_path: &str) -> Result<TermConfig, CatalogError> {
    let text = fs::read_to_string(term_config_file_path).map_err(|source| CatalogError::Io {
        path: term_config_file_path.to_string(),
        source,
    })?;

    load_term_config_from_str(&text, term_config_file_path)
}

pub fn load_term_config_from_str(text: &str, origin: &str) -> Result<TermConfig, CatalogError> {
    let docs = YamlLoader::load_from_str(text).map_err(|source| CatalogError::Yaml {
        path: origin.to_string(),
        source,
    })?;

    Ok(docs
        .first()
        .map(yaml_to_term_config)
        .unwrap_or_default())
}

#[cfg(test)]
const CS1010_YAML: &str = "
moduleCode: 'CS1010'
title: 'Programming Methodology'
semesterData:
  - semester: 1
    timetable:
      - classNo: '1'
        lessonType: 'Lecture'
        day: 'Monday'
        startTime: '1000'
        endTime: '1200'
        weeks: [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13]
      - classNo: 'T01'
        lessonType: 'Tutorial'
        day: 'Tuesday'
        startTime: '0900'
        endTime: '1000'
        weeks: [3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13]
";

#[cfg(test)]
const MA1521_YAML: &str = "
moduleCode: 'MA1521'
title: 'Calculus for Computing'
semesterData:
  - semester: 1
    timetable:
      - classNo: '1'
        lessonType: 'Lecture'
        day: 'Wednesday'
        startTime: '0800'
        endTime: '1000'
        weeks: [1, 3, 5, 7, 9, 11, 13]
";

#[test]
fn test_load_from_str_正常系() {
    let mut repository = ModuleRepository::new("unused");
    let actual = repository.load_from_str(CS1010_YAML, "CS1010.yaml").unwrap();

    assert_eq!(actual, 1);
    assert!(repository.has_module("CS1010"));
    assert!(!repository.has_module("MA1521"));
    assert_eq!(
        repository.get_module("CS1010").unwrap().get_title(),
        "Programming Methodology"
    );
}

#[test]
fn test_load_from_str_複数ドキュメント() {
    let mut repository = ModuleRepository::new("unused");
    let text = format!("{}\n---\n{}", CS1010_YAML, MA1521_YAML);
    let actual = repository.load_from_str(&text, "modules.yaml").unwrap();

    assert_eq!(actual, 2);
    let codes: Vec<&str> = repository
        .get_all_modules()
        .iter()
        .map(|m| m.get_module_code())
        .collect();
    assert_eq!(codes, vec!["CS1010", "MA1521"]);
}

#[test]
fn test_load_from_str_学期の週数を超える授業は読み飛ばす() {
    let text = "
moduleCode: 'CS2030'
title: 'Programming Methodology II'
semesterData:
  - semester: 1
    timetable:
      - classNo: '1'
        lessonType: 'Lecture'
        day: 'Monday'
        startTime: '1000'
        endTime: '1200'
        weeks: [1, 14]
";

    let mut repository = ModuleRepository::new("unused");
    repository.load_from_str(text, "CS2030.yaml").unwrap();
    let module = repository.get_module("CS2030").unwrap();
    assert!(module.get_semester_data()[0].get_timetable().is_empty());

    let mut repository =
        ModuleRepository::new_with_term_config("unused", TermConfig::new(14, 7, 6));
    repository.load_from_str(text, "CS2030.yaml").unwrap();
    let module = repository.get_module("CS2030").unwrap();
    assert_eq!(module.get_semester_data()[0].get_timetable().len(), 1);
}

#[test]
#[allow(non_snake_case)]
fn test_load_from_str_不正なYAMLはエラー() {
    let mut repository = ModuleRepository::new("unused");
    let actual = repository.load_from_str("moduleCode: [unclosed", "broken.yaml");

    assert!(matches!(actual, Err(CatalogError::Yaml { .. })));
}

#[test]
fn test_load_ディレクトリ以下のyamlを読む() {
    let dir = std::env::temp_dir().join(format!("jikanwari-catalog-{}", std::process::id()));
    let nested = dir.join("sem1");
    fs::create_dir_all(&nested).unwrap();
    fs::write(dir.join("CS1010.yaml"), CS1010_YAML).unwrap();
    fs::write(nested.join("MA1521.yml"), MA1521_YAML).unwrap();
    fs::write(dir.join("README.md"), "not a module").unwrap();

    let mut repository = ModuleRepository::new(dir.to_str().unwrap());
    let actual = repository.load();
    fs::remove_dir_all(&dir).unwrap();

    assert_eq!(actual.unwrap(), 2);
    assert!(repository.has_module("CS1010"));
    assert!(repository.has_module("MA1521"));
}

#[test]
fn test_load_ディレクトリがなければエラー() {
    let mut repository = ModuleRepository::new("/nonexistent/jikanwari/modules");
    assert!(matches!(
        repository.load(),
        Err(CatalogError::NotADirectory(_))
    ));
}

#[test]
fn test_load_term_config_from_str_正常系() {
    let text = "
term:
  num_weeks: 10
  min_odd_weeks: 5
  min_even_weeks: 5
";
    let actual = load_term_config_from_str(text, "term.yaml").unwrap();
    assert_eq!(actual, TermConfig::new(10, 5, 5));
}

#[test]
fn test_load_term_config_from_str_空の場合は既定値() {
    let actual = load_term_config_from_str("", "term.yaml").unwrap();
    assert_eq!(actual, TermConfig::default());
}
