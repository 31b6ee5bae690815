//! Types shared between the document backend client and the interactive front end.

pub mod domain;
pub mod error;
pub mod protocol;
