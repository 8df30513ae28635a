//! Integration tests for the inotree hierarchy, index and shell

mod index_properties;
mod mirroring;
mod shell_contracts;
