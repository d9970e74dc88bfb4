//! Core trait abstractions for the remote collaborators.

pub mod backend;
