use std::path::Path;

use console::Style;
use reaper_core::metadata::ImageMetadata;

pub struct Styles {
    pub title: Style,
    pub label: Style,
    pub value: Style,
    pub path: Style,
    pub error: Style,
}

impl Styles {
    pub fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            path: Style::new().underlined(),
            error: Style::new().red().bold(),
        }
    }
}

pub fn print_metadata(title: &str, meta: &ImageMetadata) {
    let s = Styles::new();
    println!("  {}", s.title.apply_to(title));
    for (label, value) in meta.rows() {
        println!("  {:<14}{}", s.label.apply_to(label), s.value.apply_to(value));
    }
}

pub fn print_saved(path: &Path) {
    let s = Styles::new();
    println!("  {:<14}{}", s.label.apply_to("Saved"), s.path.apply_to(path.display()));
}
