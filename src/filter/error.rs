use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("Unknown sort field: '{0}'")]
    UnknownSortField(String),
}
