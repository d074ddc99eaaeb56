use crate::error::BoxMergeError;

/// An axis-aligned rectangle in pixel coordinates.
///
/// The rectangle is defined by its top-left corner `(x, y)` and its extents
/// `(width, height)`. The right and bottom edges are exclusive, i.e. a
/// rectangle at `x = 10` with `width = 5` covers the columns `10..15`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// x coordinate of the top-left corner.
    pub x: i32,
    /// y coordinate of the top-left corner.
    pub y: i32,
    /// width of the rectangle in pixels.
    pub width: u32,
    /// height of the rectangle in pixels.
    pub height: u32,
}

impl Rect {
    /// Create a new rectangle from its top-left corner and extents.
    ///
    /// No validation is performed; degenerate rectangles with a zero extent are
    /// allowed. Use [`Rect::try_new`] to reject them.
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a new rectangle, rejecting zero width or height.
    ///
    /// # Errors
    ///
    /// Returns [`BoxMergeError::EmptyRect`] if any extent is zero.
    pub fn try_new(x: i32, y: i32, width: u32, height: u32) -> Result<Self, BoxMergeError> {
        if width == 0 || height == 0 {
            return Err(BoxMergeError::EmptyRect { width, height });
        }
        Ok(Self::new(x, y, width, height))
    }

    /// Create the rectangle spanning `left..right` and `top..bottom`.
    ///
    /// Inverted edges collapse to a zero extent and extents saturate at
    /// `u32::MAX`. Use [`Rect::checked_from_corners`] to detect saturation.
    pub fn from_corners(left: i64, top: i64, right: i64, bottom: i64) -> Self {
        Self {
            x: clamp_i32(left),
            y: clamp_i32(top),
            width: clamp_extent(right - left),
            height: clamp_extent(bottom - top),
        }
    }

    /// Create the rectangle spanning `left..right` and `top..bottom`.
    ///
    /// Returns `None` if the corner does not fit in `i32`, the extent in
    /// `u32`, or the edges are inverted.
    pub fn checked_from_corners(left: i64, top: i64, right: i64, bottom: i64) -> Option<Self> {
        Some(Self {
            x: i32::try_from(left).ok()?,
            y: i32::try_from(top).ok()?,
            width: u32::try_from(right - left).ok()?,
            height: u32::try_from(bottom - top).ok()?,
        })
    }

    /// The left edge.
    #[inline]
    pub fn left(&self) -> i64 {
        self.x as i64
    }

    /// The top edge.
    #[inline]
    pub fn top(&self) -> i64 {
        self.y as i64
    }

    /// The right edge (exclusive).
    #[inline]
    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// The bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    /// The area of the rectangle in pixels.
    #[inline]
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Whether the rectangle has a zero width or height.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The center of the rectangle.
    pub fn center(&self) -> (f64, f64) {
        (
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.height as f64 / 2.0,
        )
    }

    /// The characteristic size of the rectangle, `sqrt(width * height)`.
    ///
    /// This is the side of the square with the same area.
    pub fn characteristic_size(&self) -> f64 {
        (self.width as f64 * self.height as f64).sqrt()
    }

    /// The width and height of the intersection with `other`, clamped at zero.
    pub fn intersection_extent(&self, other: &Rect) -> (i64, i64) {
        let overlap_x = self.right().min(other.right()) - self.left().max(other.left());
        let overlap_y = self.bottom().min(other.bottom()) - self.top().max(other.top());
        (overlap_x.max(0), overlap_y.max(0))
    }

    /// Whether the two rectangles share a region of positive area.
    ///
    /// Rectangles that only touch along an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (overlap_x, overlap_y) = self.intersection_extent(other);
        overlap_x > 0 && overlap_y > 0
    }

    /// The Euclidean distance between the centers of the two rectangles.
    pub fn center_distance(&self, other: &Rect) -> f64 {
        let (cx1, cy1) = self.center();
        let (cx2, cy2) = other.center();
        (cx1 - cx2).hypot(cy1 - cy2)
    }

    /// The minimal rectangle enclosing both `self` and `other`.
    ///
    /// The operation is commutative and associative. When the enclosing extent
    /// exceeds `u32::MAX` it saturates and the result no longer contains both
    /// inputs; [`Rect::checked_union`] reports that case instead.
    pub fn union(&self, other: &Rect) -> Rect {
        let (left, top, right, bottom) = self.union_edges(other);
        Rect::from_corners(left, top, right, bottom)
    }

    /// The minimal rectangle enclosing both `self` and `other`, or `None` if
    /// its extent does not fit in `u32`.
    ///
    /// Never `None` when both rectangles end within the `i32` range.
    pub fn checked_union(&self, other: &Rect) -> Option<Rect> {
        let (left, top, right, bottom) = self.union_edges(other);
        Rect::checked_from_corners(left, top, right, bottom)
    }

    fn union_edges(&self, other: &Rect) -> (i64, i64, i64, i64) {
        (
            self.left().min(other.left()),
            self.top().min(other.top()),
            self.right().max(other.right()),
            self.bottom().max(other.bottom()),
        )
    }

    /// Whether `other` lies entirely within `self`, edges included.
    pub fn contains(&self, other: &Rect) -> bool {
        self.left() <= other.left()
            && self.top() <= other.top()
            && self.right() >= other.right()
            && self.bottom() >= other.bottom()
    }
}

impl From<(i32, i32, u32, u32)> for Rect {
    fn from((x, y, width, height): (i32, i32, u32, u32)) -> Self {
        Rect::new(x, y, width, height)
    }
}

impl From<Rect> for (i32, i32, u32, u32) {
    fn from(rect: Rect) -> Self {
        (rect.x, rect.y, rect.width, rect.height)
    }
}

/// Fuse all the rectangles into their minimal enclosing rectangle.
///
/// Returns `None` for an empty slice or when the enclosing extent does not fit
/// in `u32`.
pub fn fuse_all(rects: &[Rect]) -> Option<Rect> {
    let (first, rest) = rects.split_first()?;
    rest.iter().try_fold(*first, |acc, rect| acc.checked_union(rect))
}

fn clamp_i32(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

fn clamp_extent(value: i64) -> u32 {
    value.clamp(0, u32::MAX as i64) as u32
}
