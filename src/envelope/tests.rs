//! Unit tests for the multipart envelope codec.
