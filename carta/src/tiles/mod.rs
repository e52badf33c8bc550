//! Tile matrix sets and tile data access.
//!
//! A [`TileMatrixSet`] describes a tile pyramid the way the Tile Map Service
//! family of protocols does: an origin, a bounding rectangle, a tile size and
//! an ordered list of [`TileMatrix`] levels. It is used to calculate
//! [tile indices](TileIndex) covering a bounding box at a given resolution.

mod cache;
mod provider;

pub use cache::{FileCacheController, PersistentCacheController};
pub use provider::{RestTileProvider, TileProvider, UrlSource, UrlTemplate};

use std::collections::BTreeSet;

use carta_types::cartesian::{Point2d, Rect};
use carta_types::geodetic::Crs;
use serde::{Deserialize, Serialize};

const RESOLUTION_TOLERANCE: f64 = 0.01;

/// Tile index.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash, Serialize, Deserialize)]
pub struct TileIndex {
    /// X index.
    pub x: i32,
    /// Y index.
    pub y: i32,
    /// Z index.
    pub z: u32,
}

impl TileIndex {
    /// Create a new index instance.
    pub fn new(x: i32, y: i32, z: u32) -> Self {
        Self { x, y, z }
    }
}

/// A single level of a tile pyramid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TileMatrix {
    resolution: f64,
    z_index: u32,
}

impl TileMatrix {
    /// Creates a new tile matrix. Returns `None` if the resolution is not a
    /// finite non-zero number.
    pub fn new(resolution: f64, z_index: u32) -> Option<TileMatrix> {
        if resolution.is_finite() && resolution != 0.0 {
            Some(Self {
                resolution,
                z_index,
            })
        } else {
            None
        }
    }

    /// Z-index associated with this matrix.
    pub fn z_index(&self) -> u32 {
        self.z_index
    }

    /// Resolution of the matrix.
    pub fn resolution(&self) -> f64 {
        self.resolution
    }
}

impl PartialEq for TileMatrix {
    fn eq(&self, other: &Self) -> bool {
        self.resolution == other.resolution
    }
}

impl Eq for TileMatrix {}

impl PartialOrd for TileMatrix {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TileMatrix {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.resolution
            .partial_cmp(&other.resolution)
            .unwrap_or_else(|| self.z_index.cmp(&other.z_index))
    }
}

/// Direction of the Y index of tiles.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum VerticalDirection {
    /// Tiles with `Y == 0` are at the top of the map.
    TopToBottom,
    /// Tiles with `Y == 0` are at the bottom of the map.
    BottomToTop,
}

/// Tile matrix set specifies how tile indices are calculated for a given
/// position and resolution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TileMatrixSet {
    /// Position where all tiles have `X == 0, Y == 0` indices.
    pub origin: Point2d,
    /// Rectangle that contains all tiles of the set.
    pub bounds: Rect,
    /// Sorted set of pyramid levels.
    pub matrices: BTreeSet<TileMatrix>,
    /// Width of a single tile in pixels.
    pub tile_width: u32,
    /// Height of a single tile in pixels.
    pub tile_height: u32,
    /// Direction of the Y-axis.
    pub y_direction: VerticalDirection,
    /// Crs of the set.
    pub crs: Crs,
}

impl TileMatrixSet {
    /// Resolution of the given z-level, if it exists.
    pub fn matrix_resolution(&self, z: u32) -> Option<f64> {
        self.matrices
            .iter()
            .find(|matrix| matrix.z_index() == z)
            .map(|matrix| matrix.resolution())
    }

    /// Selects the pyramid level for the given resolution.
    ///
    /// The level with the closest resolution not larger than the requested
    /// one (up to a small tolerance) is selected; requests coarser than the
    /// coarsest level fall back to it.
    pub fn select_matrix(&self, resolution: f64) -> Option<TileMatrix> {
        if !resolution.is_finite() {
            return None;
        }

        let mut prev = self.matrices.iter().next()?;

        for matrix in self.matrices.iter().skip(1) {
            if matrix.resolution() * (1.0 - RESOLUTION_TOLERANCE) > resolution {
                break;
            }

            prev = matrix;
        }

        Some(*prev)
    }

    /// Iterates over indices of the tiles that cover the given bounding box
    /// at the given resolution.
    ///
    /// Indices outside of the set bounds are not returned. Returns `None` if
    /// the resolution is not valid for this set.
    pub fn iter_tiles(
        &self,
        resolution: f64,
        bounding_box: Rect,
    ) -> Option<impl Iterator<Item = TileIndex>> {
        let matrix = self.select_matrix(resolution)?;

        let tile_w = matrix.resolution() * self.tile_width as f64;
        let tile_h = matrix.resolution() * self.tile_height as f64;

        let x_min = (self.x_adj(bounding_box.x_min) / tile_w).floor() as i32;
        let x_min = x_min.max(self.min_x_index(matrix.resolution()));

        let x_max_adj = self.x_adj(bounding_box.x_max);
        let x_add_one = if (x_max_adj % tile_w) < 0.001 { -1 } else { 0 };

        let x_max = (x_max_adj / tile_w) as i32 + x_add_one;
        let x_max = x_max.min(self.max_x_index(matrix.resolution()));

        let (top, bottom) = if self.y_direction == VerticalDirection::TopToBottom {
            (bounding_box.y_min, bounding_box.y_max)
        } else {
            (bounding_box.y_max, bounding_box.y_min)
        };

        let y_min = (self.y_adj(bottom) / tile_h) as i32;
        let y_min = y_min.max(self.min_y_index(matrix.resolution()));

        let y_max_adj = self.y_adj(top);
        let y_add_one = if (y_max_adj % tile_h) < 0.001 { -1 } else { 0 };

        let y_max = (y_max_adj / tile_h) as i32 + y_add_one;
        let y_max = y_max.min(self.max_y_index(matrix.resolution()));

        let z = matrix.z_index();
        Some(
            (x_min..=x_max)
                .flat_map(move |x| (y_min..=y_max).map(move |y| TileIndex::new(x, y, z))),
        )
    }

    /// Bounding rectangle of the tile with the given index. Returns `None` if
    /// the set has no level with the index z-value.
    pub fn tile_bbox(&self, index: TileIndex) -> Option<Rect> {
        let resolution = self.matrix_resolution(index.z)?;
        let x_min = self.origin.x + (index.x as f64) * self.tile_width as f64 * resolution;
        let y_min = match self.y_direction {
            VerticalDirection::TopToBottom => {
                self.origin.y - (index.y + 1) as f64 * self.tile_height as f64 * resolution
            }
            VerticalDirection::BottomToTop => {
                self.origin.y + (index.y as f64) * self.tile_height as f64 * resolution
            }
        };

        Some(Rect::new(
            x_min,
            y_min,
            x_min + self.tile_width as f64 * resolution,
            y_min + self.tile_height as f64 * resolution,
        ))
    }

    fn x_adj(&self, x: f64) -> f64 {
        x - self.origin.x
    }

    fn y_adj(&self, y: f64) -> f64 {
        match self.y_direction {
            VerticalDirection::TopToBottom => self.origin.y - y,
            VerticalDirection::BottomToTop => y - self.origin.y,
        }
    }

    fn min_x_index(&self, resolution: f64) -> i32 {
        ((self.bounds.x_min - self.origin.x) / resolution / self.tile_width as f64).floor() as i32
    }

    fn max_x_index(&self, resolution: f64) -> i32 {
        let pix_bound = (self.bounds.x_max - self.origin.x) / resolution;
        let floored = pix_bound.floor();
        if (pix_bound - floored).abs() < 0.1 {
            (floored / self.tile_width as f64) as i32 - 1
        } else {
            (floored / self.tile_width as f64) as i32
        }
    }

    fn min_y_index(&self, resolution: f64) -> i32 {
        match self.y_direction {
            VerticalDirection::TopToBottom => {
                ((self.bounds.y_min + self.origin.y) / resolution / self.tile_height as f64)
                    .floor() as i32
            }
            VerticalDirection::BottomToTop => {
                ((self.bounds.y_min - self.origin.y) / resolution / self.tile_height as f64)
                    .floor() as i32
            }
        }
    }

    fn max_y_index(&self, resolution: f64) -> i32 {
        let pix_bound = match self.y_direction {
            VerticalDirection::TopToBottom => (self.bounds.y_max + self.origin.y) / resolution,
            VerticalDirection::BottomToTop => (self.bounds.y_max - self.origin.y) / resolution,
        };
        let floored = pix_bound.floor();
        if (pix_bound - floored).abs() < 0.1 {
            (floored / self.tile_height as f64) as i32 - 1
        } else {
            (floored / self.tile_height as f64) as i32
        }
    }

    /// Standard Web Mercator based tile matrix set (used, for example, by OSM
    /// and Google maps).
    pub fn web(level_count: u32) -> Self {
        const TOP_RESOLUTION: f64 = 156543.03392800014;

        let origin = Point2d::new(-20037508.342787, 20037508.342787);

        let mut matrices = vec![TileMatrix::new(TOP_RESOLUTION, 0).expect("invalid const parameters")];
        for i in 1..level_count {
            matrices.push(
                TileMatrix::new(matrices[(i - 1) as usize].resolution() / 2.0, i)
                    .expect("invalid const parameters"),
            );
        }

        TileMatrixSet {
            origin,
            bounds: Rect::new(
                -20037508.342787,
                -20037508.342787,
                20037508.342787,
                20037508.342787,
            ),
            matrices: matrices.into_iter().collect(),
            tile_width: 256,
            tile_height: 256,
            y_direction: VerticalDirection::TopToBottom,
            crs: Crs::EPSG3857,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple_set() -> TileMatrixSet {
        TileMatrixSet {
            origin: Point2d::new(0.0, 0.0),
            bounds: Rect::new(0.0, 0.0, 2048.0, 2048.0),
            matrices: [
                TileMatrix::new(8.0, 0).unwrap(),
                TileMatrix::new(4.0, 1).unwrap(),
                TileMatrix::new(2.0, 2).unwrap(),
            ]
            .into(),
            tile_width: 256,
            tile_height: 256,
            y_direction: VerticalDirection::BottomToTop,
            crs: Crs::EPSG3857,
        }
    }

    #[test]
    fn select_matrix() {
        let set = simple_set();
        assert_eq!(set.select_matrix(8.0).unwrap().z_index(), 0);
        assert_eq!(set.select_matrix(9.0).unwrap().z_index(), 0);
        assert_eq!(set.select_matrix(16.0).unwrap().z_index(), 0);
        assert_eq!(set.select_matrix(7.99).unwrap().z_index(), 0);
        assert_eq!(set.select_matrix(7.5).unwrap().z_index(), 1);
        assert_eq!(set.select_matrix(4.1).unwrap().z_index(), 1);
        assert_eq!(set.select_matrix(4.0).unwrap().z_index(), 1);
        assert_eq!(set.select_matrix(1.5).unwrap().z_index(), 2);
        assert_eq!(set.select_matrix(1.0).unwrap().z_index(), 2);
        assert!(set.select_matrix(f64::NAN).is_none());
    }

    #[test]
    fn matrix_comparison() {
        assert_eq!(TileMatrix::new(1.0, 1), TileMatrix::new(1.0, 1));
        assert_eq!(TileMatrix::new(1.0, 1), TileMatrix::new(1.0, 2));
        assert!(TileMatrix::new(2.0, 1) > TileMatrix::new(1.0, 1));
        assert!(TileMatrix::new(2.0, 1) < TileMatrix::new(4.0, 1));
    }

    #[test]
    fn invalid_matrix_creation() {
        assert!(TileMatrix::new(1.0, 1).is_some());
        assert!(TileMatrix::new(0.0, 1).is_none());
        assert!(TileMatrix::new(f64::NAN, 1).is_none());
        assert!(TileMatrix::new(f64::INFINITY, 1).is_none());
    }

    #[test]
    fn iter_tiles_full_bbox() {
        let set = simple_set();
        let bbox = Rect::new(0.0, 0.0, 2048.0, 2048.0);

        assert_eq!(set.iter_tiles(8.0, bbox).unwrap().count(), 1);
        for tile in set.iter_tiles(8.0, bbox).unwrap() {
            assert_eq!(tile.x, 0);
            assert_eq!(tile.y, 0);
            assert_eq!(tile.z, 0);
        }

        let tiles: Vec<TileIndex> = set.iter_tiles(4.0, bbox).unwrap().collect();
        assert_eq!(tiles.len(), 4);
        for tile in tiles {
            assert!(tile.x >= 0 && tile.x <= 1);
            assert!(tile.y >= 0 && tile.y <= 1);
            assert_eq!(tile.z, 1);
        }

        let tiles: Vec<TileIndex> = set.iter_tiles(2.0, bbox).unwrap().collect();
        assert_eq!(tiles.len(), 16);
        for tile in tiles {
            assert!(tile.x >= 0 && tile.x <= 3);
            assert!(tile.y >= 0 && tile.y <= 3);
            assert_eq!(tile.z, 2);
        }
    }

    #[test]
    fn iter_tiles_part_bbox() {
        let set = simple_set();
        let bbox = Rect::new(200.0, 700.0, 1200.0, 1100.0);

        assert_eq!(set.iter_tiles(8.0, bbox).unwrap().count(), 1);

        let tiles: Vec<TileIndex> = set.iter_tiles(4.0, bbox).unwrap().collect();
        assert_eq!(tiles.len(), 4);
        for tile in tiles {
            assert!(tile.x >= 0 && tile.x <= 1);
            assert!(tile.y >= 0 && tile.y <= 1);
            assert_eq!(tile.z, 1);
        }

        let tiles: Vec<TileIndex> = set.iter_tiles(2.0, bbox).unwrap().collect();
        assert_eq!(tiles.len(), 6);
        for tile in tiles {
            assert!(tile.x >= 0 && tile.x <= 2);
            assert!(tile.y >= 1 && tile.y <= 2);
            assert_eq!(tile.z, 2);
        }
    }

    #[test]
    fn iter_tiles_outside_of_bounds() {
        let set = simple_set();

        let bbox = Rect::new(-100.0, -100.0, -50.0, -50.0);
        assert_eq!(set.iter_tiles(8.0, bbox).unwrap().count(), 0);
        assert_eq!(set.iter_tiles(2.0, bbox).unwrap().count(), 0);

        let bbox = Rect::new(2100.0, 0.0, 2500.0, 2048.0);
        assert_eq!(set.iter_tiles(8.0, bbox).unwrap().count(), 0);
    }

    #[test]
    fn tile_bbox_covers_requested_area() {
        let set = simple_set();
        let bbox = Rect::new(200.0, 700.0, 1200.0, 1100.0);

        for tile in set.iter_tiles(2.0, bbox).unwrap() {
            let tile_bbox = set.tile_bbox(tile).expect("missing level");
            assert!(tile_bbox.intersects(&bbox));
        }

        assert!(set.tile_bbox(TileIndex::new(0, 0, 5)).is_none());
    }

    #[test]
    fn web_preset() {
        let set = TileMatrixSet::web(18);
        assert_eq!(set.matrices.len(), 18);
        assert_eq!(set.matrix_resolution(0), Some(156543.03392800014));
        assert_eq!(set.matrix_resolution(1), Some(156543.03392800014 / 2.0));

        // whole world at the top level is a single tile
        let tiles: Vec<TileIndex> = set
            .iter_tiles(156543.03392800014, set.bounds)
            .unwrap()
            .collect();
        assert_eq!(tiles, vec![TileIndex::new(0, 0, 0)]);
    }

    #[test]
    fn serialization_roundtrip() {
        let set = simple_set();
        let serialized = serde_json::to_string(&set).expect("serialization failed");
        let deserialized: TileMatrixSet = serde_json::from_str(&serialized).expect("parsing failed");
        assert_eq!(deserialized, set);
    }
}
