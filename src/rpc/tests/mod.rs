//! Unit tests for the remote procedure layer.
