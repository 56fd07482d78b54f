use crate::error::ColorKeyError;
use quad_paint::ColorIndex;
use std::path::Path;
use std::str::FromStr;

/// An sRGB triple
pub type Rgb = (u8, u8, u8);

/// One color key line: the RGB value and the block painted for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEntry {
    pub rgb: Rgb,
    pub name: String,
}

/// The palette: maps color indices to RGB values and block names.
///
/// The index of an entry is its position in the file, so the key file
/// defines the palette order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorKey {
    entries: Vec<KeyEntry>,
}

impl ColorKey {
    /// Largest number of entries a `ColorIndex` can address
    pub const MAX_ENTRIES: usize = ColorIndex::MAX as usize + 1;

    pub fn new(entries: Vec<KeyEntry>) -> Result<Self, ColorKeyError> {
        if entries.is_empty() {
            return Err(ColorKeyError::Empty);
        }
        if entries.len() > Self::MAX_ENTRIES {
            return Err(ColorKeyError::TooManyEntries {
                max: Self::MAX_ENTRIES,
            });
        }
        Ok(Self { entries })
    }

    /// Read a color key file
    pub fn load(path: &Path) -> Result<Self, ColorKeyError> {
        let content = std::fs::read_to_string(path)?;
        let key: Self = content.parse()?;
        tracing::debug!(path = %path.display(), entries = key.len(), "Loaded color key");
        Ok(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[KeyEntry] {
        &self.entries
    }

    pub fn get(&self, color: ColorIndex) -> Option<&KeyEntry> {
        self.entries.get(color as usize)
    }

    /// Index of the entry closest to `rgb` by Manhattan distance.
    ///
    /// The earlier entry wins ties.
    pub fn nearest(&self, rgb: Rgb) -> ColorIndex {
        let mut best = 0;
        let mut best_distance = u32::MAX;
        for (i, entry) in self.entries.iter().enumerate() {
            let distance = manhattan(rgb, entry.rgb);
            if distance < best_distance {
                best = i;
                best_distance = distance;
            }
        }
        best as ColorIndex
    }
}

fn manhattan(a: Rgb, b: Rgb) -> u32 {
    a.0.abs_diff(b.0) as u32 + a.1.abs_diff(b.1) as u32 + a.2.abs_diff(b.2) as u32
}

impl FromStr for ColorKey {
    type Err = ColorKeyError;

    /// Parse `r,g,b,name` lines; blank lines and `#` comments are skipped
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut entries = Vec::new();
        for (i, raw) in s.lines().enumerate() {
            let line = i + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            entries.push(parse_entry(line, trimmed)?);
        }
        Self::new(entries)
    }
}

fn parse_entry(line: usize, text: &str) -> Result<KeyEntry, ColorKeyError> {
    let fields: Vec<&str> = text.splitn(4, ',').map(str::trim).collect();
    let [r, g, b, name] = fields.as_slice() else {
        return Err(ColorKeyError::Malformed {
            line,
            found: text.to_string(),
        });
    };

    let channel = |channel: &'static str, value: &str| {
        value
            .parse::<u8>()
            .map_err(|_| ColorKeyError::InvalidChannel {
                line,
                channel,
                value: value.to_string(),
            })
    };
    let rgb = (
        channel("red", *r)?,
        channel("green", *g)?,
        channel("blue", *b)?,
    );

    if name.is_empty() {
        return Err(ColorKeyError::EmptyName { line });
    }
    Ok(KeyEntry {
        rgb,
        name: name.to_string(),
    })
}
