//! HTTP request handlers.

pub(crate) mod health;
pub(crate) mod llms;
pub(crate) mod pages;
