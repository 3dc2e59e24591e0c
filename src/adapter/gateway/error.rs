use thiserror::Error;

// モジュールカタログと学期設定の読み込みで起きるエラー
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("not a directory: {0}")]
    NotADirectory(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: yaml_rust::ScanError,
    },
}
