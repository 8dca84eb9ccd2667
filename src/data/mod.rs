/// Data layer: selecting sample files and loading their values.
///
/// ```text
///  working directory
///        │
///        ▼
///   ┌──────────┐
///   │  select   │  entries ending in .<ext> → Vec<PathBuf>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  one parsed f64 per file → sample set
///   └──────────┘
/// ```
pub mod loader;
pub mod select;

pub use loader::load_samples;
pub use select::select_files;
