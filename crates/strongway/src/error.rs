use crate::graphlib::GraphError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("Invalid road network JSON: {message}")]
    InvalidNetwork { message: String },

    #[error("Invalid orientation options: {message}")]
    InvalidOptions { message: String },
}
