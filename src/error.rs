use thiserror::Error;

/// Failure categories a stats fetch can end in.
///
/// The viewer treats all of them the same way (log, keep the previous table),
/// the kind only decides the wording of the diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The source answered but had no rows for the selection
    Empty,
    /// The source answered with something that is not the expected table
    Malformed,
    /// The team display name has no abbreviation
    UnresolvedTeam,
}

/// Errors produced by the data layer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    #[error("no rows for {team} in {season}")]
    EmptyResult { team: String, season: u16 },

    #[error("no weekly data published for {0}")]
    NoSeasonData(u16),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("unresolved team: {0}")]
    UnresolvedTeam(String),

    #[error("season {0} is outside the available range")]
    SeasonOutOfRange(u16),

    #[error("request failed: {0}")]
    Http(String),
}

impl DataError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::EmptyResult { .. } | Self::NoSeasonData(_) | Self::SeasonOutOfRange(_) => {
                FailureKind::Empty
            }
            Self::Malformed(_) | Self::Http(_) => FailureKind::Malformed,
            Self::UnresolvedTeam(_) => FailureKind::UnresolvedTeam,
        }
    }
}

impl From<reqwest::Error> for DataError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e.to_string())
    }
}

impl From<csv::Error> for DataError {
    fn from(e: csv::Error) -> Self {
        Self::Malformed(e.to_string())
    }
}

pub type DataResult<T> = Result<T, DataError>;
