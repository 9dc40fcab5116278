pub mod settings;

pub use settings::{expand_home, home_dir, Settings};
