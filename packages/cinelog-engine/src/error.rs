pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Http(#[from] reqwest::Error),
	#[error("Invalid engine header: {message}")]
	InvalidHeader { message: String },
	#[error("Unexpected engine response: {message}")]
	UnexpectedResponse { message: String },
}
