//! Renderers for the bucketed sentiment distribution.

use crate::error::{PulseError, Result};
use image::{ImageBuffer, Rgb};
use std::io::Write;
use std::path::PathBuf;

/// Consumes the per-document bucket values (`-1`, `0`, `1`).
pub trait Renderer {
    /// Renders the distribution.
    fn render(&mut self, values: &[i8]) -> Result<()>;
}

/// Counts of `-1`, `0` and `1`, in that order. Other values are ignored.
pub fn bucket_counts(values: &[i8]) -> [usize; 3] {
    let mut counts = [0usize; 3];
    for &v in values {
        match v {
            -1 => counts[0] += 1,
            0 => counts[1] += 1,
            1 => counts[2] += 1,
            _ => {}
        }
    }
    counts
}

const LABELS: [&str; 3] = ["negative", "neutral", "positive"];

/// Writes a horizontal text histogram, one bar per bucket.
pub struct TextHistogramRenderer<W: Write> {
    out: W,
    width: usize,
}

impl<W: Write> TextHistogramRenderer<W> {
    /// Creates a renderer whose longest bar is `width` characters.
    pub fn new(out: W, width: usize) -> Self {
        Self { out, width }
    }

    /// Consumes the renderer, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TextHistogramRenderer<W> {
    fn render(&mut self, values: &[i8]) -> Result<()> {
        let counts = bucket_counts(values);
        let max = counts.iter().copied().max().unwrap_or(0);

        for (label, &count) in LABELS.iter().zip(counts.iter()) {
            let bar = if max == 0 {
                0
            } else {
                (count * self.width + max - 1) / max
            };
            writeln!(self.out, "{:>8} {:>5} {}", label, count, "█".repeat(bar))
                .map_err(|e| PulseError::Render(e.to_string()))?;
        }
        Ok(())
    }
}

/// Writes the values as a JSON array.
pub struct JsonRenderer<W: Write> {
    out: W,
}

impl<W: Write> JsonRenderer<W> {
    /// Creates a renderer writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consumes the renderer, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for JsonRenderer<W> {
    fn render(&mut self, values: &[i8]) -> Result<()> {
        serde_json::to_writer(&mut self.out, values)
            .map_err(|e| PulseError::Render(e.to_string()))?;
        writeln!(self.out).map_err(|e| PulseError::Render(e.to_string()))
    }
}

/// Saves a three-bar chart of the distribution as an image.
///
/// Bars are red (negative), grey (neutral) and green (positive) on white,
/// scaled so the tallest bar fills the plot height.
#[derive(Debug, Clone)]
pub struct PngHistogramRenderer {
    path: PathBuf,
    width: u32,
    height: u32,
}

impl PngHistogramRenderer {
    /// Default image size in pixels.
    pub const DEFAULT_SIZE: (u32, u32) = (480, 320);

    /// Creates a renderer writing to `path`.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        let (width, height) = Self::DEFAULT_SIZE;
        Self {
            path: path.into(),
            width,
            height,
        }
    }

    /// Overrides the image size.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width.max(3);
        self.height = height.max(1);
        self
    }

    /// Draws the chart without saving it.
    pub fn draw(&self, values: &[i8]) -> ImageBuffer<Rgb<u8>, Vec<u8>> {
        const COLORS: [[u8; 3]; 3] = [[214, 69, 65], [150, 150, 150], [46, 160, 67]];

        let counts = bucket_counts(values);
        let max = counts.iter().copied().max().unwrap_or(0).max(1) as u64;
        let slot = self.width / 3;
        let margin = slot / 8;
        let height = self.height as u64;

        ImageBuffer::from_fn(self.width, self.height, |x, y| {
            let bucket = ((x / slot.max(1)) as usize).min(2);
            let in_bar = x % slot.max(1) >= margin && x % slot.max(1) < slot.saturating_sub(margin);
            let bar_height = counts[bucket] as u64 * height / max;
            // y grows downward; bars rise from the bottom edge
            if in_bar && (height - y as u64) <= bar_height {
                Rgb(COLORS[bucket])
            } else {
                Rgb([255u8, 255u8, 255u8])
            }
        })
    }
}

impl Renderer for PngHistogramRenderer {
    fn render(&mut self, values: &[i8]) -> Result<()> {
        let img = self.draw(values);
        img.save(&self.path)
            .map_err(|e| PulseError::Render(format!("{}: {}", self.path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_counts() {
        assert_eq!(bucket_counts(&[1, 0, -1, 1, 1, 7]), [1, 1, 3]);
        assert_eq!(bucket_counts(&[]), [0, 0, 0]);
    }

    #[test]
    fn test_text_histogram() {
        let mut renderer = TextHistogramRenderer::new(Vec::new(), 10);
        renderer.render(&[1, 1, 0, -1]).unwrap();
        let out = String::from_utf8(renderer.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].trim_start().starts_with("negative"));
        assert_eq!(lines[2].matches('█').count(), 10);
        assert_eq!(lines[1].matches('█').count(), 5);
    }

    #[test]
    fn test_text_histogram_empty() {
        let mut renderer = TextHistogramRenderer::new(Vec::new(), 10);
        renderer.render(&[]).unwrap();
        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(out.matches('█').count(), 0);
    }

    #[test]
    fn test_json_renderer() {
        let mut renderer = JsonRenderer::new(Vec::new());
        renderer.render(&[1, 0, -1]).unwrap();
        assert_eq!(String::from_utf8(renderer.into_inner()).unwrap(), "[1,0,-1]\n");
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_json_renderer_write_failure_is_render_error() {
        let mut renderer = JsonRenderer::new(BrokenPipe);
        assert!(matches!(renderer.render(&[1, -1]), Err(PulseError::Render(_))));
        assert!(matches!(renderer.render(&[]), Err(PulseError::Render(_))));
    }

    #[test]
    fn test_png_draw() {
        let renderer = PngHistogramRenderer::new("unused.png").with_size(90, 30);
        let img = renderer.draw(&[1, 1, -1]);
        assert_eq!(img.dimensions(), (90, 30));

        // bottom row: negative and positive bars present, neutral absent
        assert_eq!(img.get_pixel(15, 29), &Rgb([214, 69, 65]));
        assert_eq!(img.get_pixel(45, 29), &Rgb([255, 255, 255]));
        assert_eq!(img.get_pixel(75, 29), &Rgb([46, 160, 67]));
        // the positive bar reaches the top, the negative bar only half way
        assert_eq!(img.get_pixel(75, 0), &Rgb([46, 160, 67]));
        assert_eq!(img.get_pixel(15, 0), &Rgb([255, 255, 255]));
    }

    #[test]
    fn test_png_render_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dist.png");
        let mut renderer = PngHistogramRenderer::new(&path).with_size(60, 40);
        renderer.render(&[0, 1]).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_png_render_bad_path() {
        let mut renderer = PngHistogramRenderer::new("/no/such/dir/dist.png");
        assert!(matches!(renderer.render(&[1]), Err(PulseError::Render(_))));
    }
}
