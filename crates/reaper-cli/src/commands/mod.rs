pub mod config;
pub mod convert;
pub mod crop;
pub mod info;
pub mod resize;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use reaper_core::config::EditorConfig;
use reaper_core::persist::write_artifact;
use reaper_core::source::EncodedImage;
use tracing::debug;

pub fn load_config(path: Option<&Path>) -> Result<EditorConfig> {
    match path {
        Some(p) => {
            let config = EditorConfig::load(p)
                .with_context(|| format!("Failed to load config from {}", p.display()))?;
            debug!(path = %p.display(), ?config, "loaded editor config");
            Ok(config)
        }
        None => Ok(EditorConfig::default()),
    }
}

/// Explicit output, or `name` next to the input (or inside `dir`).
pub fn output_path(input: &Path, explicit: Option<&Path>, dir: Option<&Path>, name: &str) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }
    let parent = dir
        .or_else(|| input.parent())
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    parent.join(name)
}

pub fn write_output(path: &Path, image: &EncodedImage) -> Result<()> {
    write_artifact(path, image).with_context(|| format!("Failed to write {}", path.display()))
}

/// Parse `WxH`.
pub fn parse_dimensions(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got '{s}'"))?;
    let w = w.trim().parse::<u32>().map_err(|e| format!("bad width: {e}"))?;
    let h = h.trim().parse::<u32>().map_err(|e| format!("bad height: {e}"))?;
    Ok((w, h))
}

/// Parse `x,y,w,h` as four floats.
pub fn parse_rect(s: &str) -> Result<[f64; 4], String> {
    let parts: Vec<f64> = s
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("bad rectangle '{s}': {e}"))?;
    parts
        .try_into()
        .map_err(|_| format!("expected x,y,width,height, got '{s}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dimensions() {
        assert_eq!(parse_dimensions("400x300"), Ok((400, 300)));
        assert_eq!(parse_dimensions("16X9"), Ok((16, 9)));
        assert!(parse_dimensions("400").is_err());
        assert!(parse_dimensions("ax3").is_err());
    }

    #[test]
    fn test_parse_rect() {
        assert_eq!(parse_rect("100, 50,200,100.5"), Ok([100.0, 50.0, 200.0, 100.5]));
        assert!(parse_rect("1,2,3").is_err());
        assert!(parse_rect("1,2,3,x").is_err());
    }

    #[test]
    fn test_output_path_defaults_next_to_input() {
        let out = output_path(Path::new("shots/moon.png"), None, None, "moon-cropped.png");
        assert_eq!(out, PathBuf::from("shots/moon-cropped.png"));

        let out = output_path(Path::new("moon.png"), None, None, "moon.webp");
        assert_eq!(out, PathBuf::from("./moon.webp"));

        let out = output_path(
            Path::new("moon.png"),
            None,
            Some(Path::new("out")),
            "moon.webp",
        );
        assert_eq!(out, PathBuf::from("out/moon.webp"));

        let out = output_path(Path::new("moon.png"), Some(Path::new("x.png")), None, "ignored");
        assert_eq!(out, PathBuf::from("x.png"));
    }
}
