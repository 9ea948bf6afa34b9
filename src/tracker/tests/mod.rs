//! Unit tests for tracker domain, services and the in-memory adapter.
