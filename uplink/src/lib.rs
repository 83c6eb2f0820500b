// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

use colored::Colorize;

// Re-export commonly used handler functions for convenience
pub use handlers::{DEFAULT_CONFIG_PATH, format_label_map, load_config, parse_protocol};

pub fn print_banner() {
    println!(
        "{}",
        r#"
              _ _       _
  _   _ _ __ | (_)_ __ | | __
 | | | | '_ \| | | '_ \| |/ /
 | |_| | |_) | | | | | |   <
  \__,_| .__/|_|_|_| |_|_|\_\
       |_|  topology parent resolution
"#
        .bright_cyan()
    );
}
