use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("message is required")]
    EmptyMessage,
}
