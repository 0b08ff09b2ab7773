// src/utils/error.rs
#![allow(dead_code)]
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum PdfError {
    #[error("I/O error reading source document: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not a well-formed PDF: {0}")]
    Invalid(String),

    #[error("Text extraction failed: {0}")]
    Extract(String),
}

#[derive(Error, Debug)]
pub enum OracleError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Automatically convert reqwest errors

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode), // e.g., 401 Unauthorized, 529 Overloaded

    #[error("API rate limit likely exceeded")]
    RateLimited,

    #[error("Response contained no usable text content")]
    EmptyResponse,

    #[error("Failed to parse API response: {0}")]
    Parse(String),
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Generation oracle failed: {0}")]
    Oracle(#[from] OracleError),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode),

    #[error("Missing credential: {0}")]
    MissingCredential(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Source document processing failed: {0}")]
    Pdf(#[from] PdfError),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Publishing failed: {0}")]
    Publish(#[from] PublishError),

    #[error("Data processing failed: {0}")]
    Processing(String),
}
