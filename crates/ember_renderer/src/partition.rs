//! Static division of pixels across workers.
//!
//! The pixels of a region are enumerated in row-major order and cut into
//! contiguous runs, one per worker, whose lengths differ by at most one.

use crate::error::{RenderError, RenderResult};

/// A rectangular part of an image, half-open on both axes.
///
/// Rows are counted from the top of the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRegion {
    pub row_min: u32,
    pub row_max: u32,
    pub col_min: u32,
    pub col_max: u32,
    width: u32,
    height: u32,
}

impl PixelRegion {
    /// The whole image.
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            row_min: 0,
            row_max: height,
            col_min: 0,
            col_max: width,
            width,
            height,
        }
    }

    /// A patch of a `width` x `height` image from `[row_min, row_max, col_min, col_max]`.
    pub fn patch(width: u32, height: u32, patch: [u32; 4]) -> RenderResult<Self> {
        let [row_min, row_max, col_min, col_max] = patch;
        let region = Self {
            row_min,
            row_max,
            col_min,
            col_max,
            width,
            height,
        };
        region.validate()?;
        Ok(region)
    }

    /// The region from an optional patch; `None` is the whole image.
    pub fn from_patch(width: u32, height: u32, patch: Option<[u32; 4]>) -> RenderResult<Self> {
        match patch {
            Some(patch) => Self::patch(width, height, patch),
            None => Ok(Self::full(width, height)),
        }
    }

    /// Width of the image this region belongs to.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the image this region belongs to.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn validate(&self) -> RenderResult<()> {
        if self.row_min >= self.row_max || self.col_min >= self.col_max {
            return Err(RenderError::EmptyRegion {
                row_min: self.row_min,
                row_max: self.row_max,
                col_min: self.col_min,
                col_max: self.col_max,
            });
        }
        if self.row_max > self.height || self.col_max > self.width {
            return Err(RenderError::RegionOutOfBounds {
                row_min: self.row_min,
                row_max: self.row_max,
                col_min: self.col_min,
                col_max: self.col_max,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Number of pixels covered.
    pub fn pixel_count(&self) -> usize {
        let rows = self.row_max.saturating_sub(self.row_min) as usize;
        let cols = self.col_max.saturating_sub(self.col_min) as usize;
        rows * cols
    }

    /// `(row, col)` of every covered pixel in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (self.row_min..self.row_max)
            .flat_map(move |row| (self.col_min..self.col_max).map(move |col| (row, col)))
    }
}

/// The pixels assigned to one worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkList {
    /// Index of the worker, also used to derive its random seed
    pub worker: usize,
    /// `(row, col)` coordinates, rendered in order
    pub pixels: Vec<(u32, u32)>,
}

/// Split a region into `workers` contiguous work lists.
///
/// Always returns exactly `workers` lists (at least one); with more workers
/// than pixels the trailing lists are empty.
pub fn partition(region: &PixelRegion, workers: usize) -> Vec<WorkList> {
    let workers = workers.max(1);
    let total = region.pixel_count();
    let base = total / workers;
    let extra = total % workers;

    let mut pixels = region.pixels();
    (0..workers)
        .map(|worker| {
            let len = base + usize::from(worker < extra);
            WorkList {
                worker,
                pixels: pixels.by_ref().take(len).collect(),
            }
        })
        .collect()
}
