//! Unit tests for the client board engine.
