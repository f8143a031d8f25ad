//! PNG rendering of iteration distributions.

pub mod canvas;
pub mod font;
pub mod palette;
pub mod png;

use crate::log::ConfigurationKey;
use crate::model::Distribution;
use anyhow::Context;
use std::path::{Path, PathBuf};

pub use png::render_png;

/// `<output_dir>/distr_<name>_chunk=<chunk>.png`
pub fn output_path(output_dir: &Path, key: &ConfigurationKey) -> PathBuf {
    output_dir.join(key.file_name())
}

/// Render `d` and write it under `output_dir`, which must already exist.
pub fn render_distribution(d: &Distribution, output_dir: &Path) -> crate::Result<PathBuf> {
    let canvas = render_png(d)?;
    let path = output_path(output_dir, d.key());
    image::save_buffer(
        &path,
        canvas.pixels(),
        canvas.width(),
        canvas.height(),
        image::ColorType::Rgb8,
    )
    .with_context(|| format!("write distribution image {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_uses_key_file_name() {
        let key = ConfigurationKey::new("foo", Some(4));
        assert_eq!(
            output_path(Path::new("out"), &key),
            PathBuf::from("out/distr_foo_chunk=4.png")
        );
    }

    #[test]
    fn writes_png_file() {
        let dir = tempfile::tempdir().unwrap();
        let d = Distribution::from_events(ConfigurationKey::new("Guided", None), "0<->1, 1<->0")
            .unwrap();
        let path = render_distribution(&d, dir.path()).unwrap();
        assert_eq!(path, dir.path().join("distr_Guided_chunk=None.png"));

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
