//! YOLO-style bounding-box labels: one `class x y w h` line per placed sprite.

use std::fmt;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Error, Result};

/// Placement rectangle as fractions of the image size.
///
/// `x` and `y` are the top-left corner, not the center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub class_id: u32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub const DEFECT_CLASS: u32 = 0;

    /// Normalizes a pixel rectangle by the image size. A negative origin is kept.
    pub fn from_pixels(
        x: i64,
        y: i64,
        width: usize,
        height: usize,
        image_width: usize,
        image_height: usize,
    ) -> Self {
        Self {
            class_id: Self::DEFECT_CLASS,
            x: x as f64 / image_width as f64,
            y: y as f64 / image_height as f64,
            width: width as f64 / image_width as f64,
            height: height as f64 / image_height as f64,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Shortest round-trip form; whole numbers keep one decimal (`0.0`, `1.0`).
struct Fraction(f64);

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_finite() && self.0.fract() == 0.0 {
            write!(f, "{:.1}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.class_id,
            Fraction(self.x),
            Fraction(self.y),
            Fraction(self.width),
            Fraction(self.height)
        )
    }
}

impl FromStr for BoundingBox {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let malformed = || Error::MalformedLabel(line.to_string());
        let fields: Vec<&str> = line.split_whitespace().collect();
        let [class_id, x, y, width, height] = fields.as_slice() else {
            return Err(malformed());
        };

        let number = |s: &str| s.parse::<f64>().map_err(|_| malformed());
        Ok(Self {
            class_id: class_id.parse().map_err(|_| malformed())?,
            x: number(*x)?,
            y: number(*y)?,
            width: number(*width)?,
            height: number(*height)?,
        })
    }
}

/// Boxes of one output index, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelSet {
    boxes: Vec<BoundingBox>,
}

impl LabelSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, bbox: BoundingBox) {
        self.boxes.push(bbox);
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BoundingBox> {
        self.boxes.iter()
    }

    pub fn as_slice(&self) -> &[BoundingBox] {
        &self.boxes
    }
}

impl<'a> IntoIterator for &'a LabelSet {
    type Item = &'a BoundingBox;
    type IntoIter = std::slice::Iter<'a, BoundingBox>;

    fn into_iter(self) -> Self::IntoIter {
        self.boxes.iter()
    }
}

/// Appends label sets to `<dir>/label_{index}.txt`.
#[derive(Debug, Clone)]
pub struct LabelWriter {
    dir: PathBuf,
}

impl LabelWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, index: usize) -> PathBuf {
        self.dir.join(format!("label_{index}.txt"))
    }

    /// Appends one line per box; an empty set creates no file.
    /// Existing content is never truncated.
    pub fn append(&self, index: usize, labels: &LabelSet) -> Result<()> {
        if labels.is_empty() {
            return Ok(());
        }

        let path = self.path_for(index);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| Error::io(&path, e))?;

        let mut writer = BufWriter::new(file);
        for bbox in labels {
            writeln!(writer, "{bbox}").map_err(|e| Error::io(&path, e))?;
        }
        writer.flush().map_err(|e| Error::io(&path, e))
    }

    pub fn read(path: &Path) -> Result<LabelSet> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let mut labels = LabelSet::new();
        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            labels.push(line.parse()?);
        }
        Ok(labels)
    }
}
