use thiserror::Error;


/// Errors of the demo driver. The reactive substrates themselves never fail.
#[derive(Error, Debug)]
pub enum Error {
  #[error("unknown demo: {0}")]
  UnknownDemo(String),

  #[error("cannot write output: {0}")]
  Io(#[from] std::io::Error)
}


pub type Result<T> = std::result::Result<T, Error>;
