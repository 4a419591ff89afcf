//! Level and object descriptors
//!
//! A level is described by two JSON documents:
//! - the level file: world size, offscreen buffer, start cell and one lane per row
//! - the object table: sprite size and hitbox for every object type
//!
//! Both are parsed with serde and validated once into a [`LevelConfig`].
//! Any problem here is fatal; the simulation never sees a half-valid level.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::LevelError;
use crate::sim::geom::Rect;

/// Object table entry used for the frog's own hitbox
pub const FROG_OBJECT: &str = "frog";

/// Lane kind as written in the level file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LaneType {
    Grass,
    Road,
    Water,
    Hedge,
}

/// One object placed in a lane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectPlacement {
    /// Object type name (key into the object table)
    #[serde(rename = "type")]
    pub kind: String,
    /// Horizontal position in cells
    pub position: f32,
}

/// One row of the level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneDescriptor {
    #[serde(rename = "type")]
    pub kind: LaneType,
    /// Drift speed in pixels per second (negative drifts left)
    #[serde(default)]
    pub speed: Option<f32>,
    #[serde(default)]
    pub objects: Vec<ObjectPlacement>,
}

/// The level file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDescriptor {
    /// World size in cells (width, height)
    pub size: [u32; 2],
    /// Cells beyond each side edge that moving objects travel before wrapping
    pub offscreen: u32,
    /// Frog start cell (column, row)
    pub start: [u32; 2],
    /// Lanes from the bottom row up
    pub lanes: Vec<LaneDescriptor>,
}

fn one_cell() -> [f32; 2] {
    [1.0, 1.0]
}

/// Sprite metadata for one object type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageInfo {
    /// Collision box [x, y, w, h] in pixels from the sprite's bottom-left corner
    pub hitbox: [f32; 4],
    /// Sprite size in cells
    #[serde(default = "one_cell")]
    pub size: [f32; 2],
}

impl ImageInfo {
    pub fn local_hitbox(&self) -> Rect {
        let [x, y, w, h] = self.hitbox;
        Rect::new(x, y, w, h)
    }

    pub fn size_px(&self, cell_size: f32) -> Vec2 {
        Vec2::new(self.size[0], self.size[1]) * cell_size
    }
}

/// The object table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectTable {
    pub images: BTreeMap<String, ImageInfo>,
}

/// A validated level, ready to build lanes from
#[derive(Debug, Clone, PartialEq)]
pub struct LevelConfig {
    cell_size: f32,
    level: LevelDescriptor,
    objects: ObjectTable,
}

impl LevelConfig {
    /// Validate a parsed level against its object table
    pub fn new(level: LevelDescriptor, objects: ObjectTable, cell_size: f32) -> Result<Self, LevelError> {
        let [width, height] = level.size;
        if width == 0 || height == 0 {
            return Err(LevelError::EmptyWorld { width, height });
        }
        if level.lanes.len() != height as usize {
            return Err(LevelError::LaneCount {
                expected: height as usize,
                found: level.lanes.len(),
            });
        }
        let [x, y] = level.start;
        if x >= width || y >= height {
            return Err(LevelError::StartOutOfBounds { x, y });
        }

        for (name, info) in &objects.images {
            let [_, _, w, h] = info.hitbox;
            let finite = info.hitbox.iter().chain(info.size.iter()).all(|v| v.is_finite());
            if !finite || w < 0.0 || h < 0.0 || info.size[0] <= 0.0 || info.size[1] <= 0.0 {
                return Err(LevelError::InvalidHitbox(name.clone()));
            }
        }

        for (index, lane) in level.lanes.iter().enumerate() {
            if lane.speed.is_some_and(|s| !s.is_finite()) {
                return Err(LevelError::InvalidSpeed { lane: index });
            }
            if let Some(missing) = lane.objects.iter().find(|o| !objects.images.contains_key(&o.kind)) {
                return Err(LevelError::UnknownObject(missing.kind.clone()));
            }
        }

        log::info!(
            "Level validated: {}x{} cells, {} object types",
            width,
            height,
            objects.images.len()
        );

        Ok(Self {
            cell_size,
            level,
            objects,
        })
    }

    /// Parse and validate both JSON documents
    pub fn from_json(level_json: &str, objects_json: &str, cell_size: f32) -> Result<Self, LevelError> {
        let level: LevelDescriptor = serde_json::from_str(level_json)?;
        let objects: ObjectTable = serde_json::from_str(objects_json)?;
        Self::new(level, objects, cell_size)
    }

    pub fn lanes(&self) -> &[LaneDescriptor] {
        &self.level.lanes
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn width_cells(&self) -> u32 {
        self.level.size[0]
    }

    pub fn height_cells(&self) -> u32 {
        self.level.size[1]
    }

    /// World width in pixels
    pub fn world_width(&self) -> f32 {
        self.level.size[0] as f32 * self.cell_size
    }

    /// World height in pixels (lanes only, no lives meter)
    pub fn world_height(&self) -> f32 {
        self.level.size[1] as f32 * self.cell_size
    }

    /// Offscreen buffer in pixels
    pub fn offscreen(&self) -> f32 {
        self.level.offscreen as f32 * self.cell_size
    }

    /// Centre of the frog's start cell in pixels
    pub fn start_position(&self) -> Vec2 {
        let [x, y] = self.level.start;
        Vec2::new(x as f32 + 0.5, y as f32 + 0.5) * self.cell_size
    }

    pub fn image(&self, name: &str) -> Option<&ImageInfo> {
        self.objects.images.get(name)
    }

    /// Frog hitbox relative to its sprite; the whole cell unless the table says otherwise
    pub fn frog_hitbox(&self) -> Rect {
        self.image(FROG_OBJECT)
            .map(ImageInfo::local_hitbox)
            .unwrap_or_else(|| Rect::new(0.0, 0.0, self.cell_size, self.cell_size))
    }
}

/// Where the session gets its level from when it enters Loading
pub trait LevelSource {
    fn load(&self, cell_size: f32) -> Result<LevelConfig, LevelError>;
}

/// Level documents already held in memory
#[derive(Debug, Clone)]
pub struct JsonLevelSource {
    level: String,
    objects: String,
}

impl JsonLevelSource {
    pub fn new(level: impl Into<String>, objects: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            objects: objects.into(),
        }
    }
}

impl LevelSource for JsonLevelSource {
    fn load(&self, cell_size: f32) -> Result<LevelConfig, LevelError> {
        LevelConfig::from_json(&self.level, &self.objects, cell_size)
    }
}

/// Level documents read from disk on every load
#[derive(Debug, Clone)]
pub struct FileLevelSource {
    level_path: PathBuf,
    objects_path: PathBuf,
}

impl FileLevelSource {
    pub fn new(level_path: impl Into<PathBuf>, objects_path: impl Into<PathBuf>) -> Self {
        Self {
            level_path: level_path.into(),
            objects_path: objects_path.into(),
        }
    }
}

fn read(path: &Path) -> Result<String, LevelError> {
    fs::read_to_string(path).map_err(|source| LevelError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl LevelSource for FileLevelSource {
    fn load(&self, cell_size: f32) -> Result<LevelConfig, LevelError> {
        log::info!("Loading level from {}", self.level_path.display());
        let level = read(&self.level_path)?;
        let objects = read(&self.objects_path)?;
        LevelConfig::from_json(&level, &objects, cell_size)
    }
}
