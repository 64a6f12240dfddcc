use std::path::PathBuf;

/// Where a model's bytes come from.
#[derive(Debug, Clone)]
pub enum ModelSource {
    File(PathBuf),
    Memory(Vec<u8>),
}
