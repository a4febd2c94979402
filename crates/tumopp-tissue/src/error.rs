//! Error types for tumopp-tissue.

use thiserror::Error;
use tumopp_core::{CoreError, DisplacementPath, LocalDensity};

#[derive(Debug, Error)]
pub enum TissueError {
    #[error(
        "unsupported displacement combination: -L {density} -P {path}; \
         see the placement table for valid pairs"
    )]
    UnsupportedPlacement {
        density: LocalDensity,
        path: DisplacementPath,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type TissueResult<T> = Result<T, TissueError>;
