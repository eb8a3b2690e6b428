//! Rectangles with pluggable storage.
//!
//! A rectangle is an origin corner plus an extent. [`PointPoint`] stores the
//! opposite corner, [`PointSize`] stores a size; both expose identical edge
//! accessors through [`Rect`], so code can switch representation without
//! changing observable behavior.

/// 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a point.
    pub fn new(
        x: f32,
        y: f32,
    ) -> Self {
        Self { x, y }
    }
}

/// 2D extent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a size.
    pub fn new(
        width: f32,
        height: f32,
    ) -> Self {
        Self { width, height }
    }
}

/// Storage strategy for [`Rect`].
///
/// Edge setters move one edge and keep the opposite edge fixed, whatever the
/// underlying fields are. `width`/`height` report the stored extent where one
/// exists and the corner difference otherwise.
pub trait RectStorage {
    /// The extent companion to the origin corner.
    type Extent;

    /// Build the storage from an origin corner and an extent.
    fn from_parts(
        origin: Point,
        extent: Self::Extent,
    ) -> Self;

    /// Left edge.
    fn x0(&self) -> f32;
    /// Bottom edge.
    fn y0(&self) -> f32;
    /// Right edge.
    fn x1(&self) -> f32;
    /// Top edge.
    fn y1(&self) -> f32;
    /// Horizontal span.
    fn width(&self) -> f32;
    /// Vertical span.
    fn height(&self) -> f32;

    /// Move the left edge, keeping the right edge fixed.
    fn set_x0(
        &mut self,
        val: f32,
    );
    /// Move the bottom edge, keeping the top edge fixed.
    fn set_y0(
        &mut self,
        val: f32,
    );
    /// Move the right edge, keeping the left edge fixed.
    fn set_x1(
        &mut self,
        val: f32,
    );
    /// Move the top edge, keeping the bottom edge fixed.
    fn set_y1(
        &mut self,
        val: f32,
    );
}

/// Corner-corner storage: origin corner plus opposite corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointPoint {
    /// Origin corner.
    pub p0: Point,
    /// Opposite corner.
    pub p1: Point,
}

impl RectStorage for PointPoint {
    type Extent = Point;

    fn from_parts(
        origin: Point,
        extent: Point,
    ) -> Self {
        Self {
            p0: origin,
            p1: extent,
        }
    }

    fn x0(&self) -> f32 {
        self.p0.x
    }

    fn y0(&self) -> f32 {
        self.p0.y
    }

    fn x1(&self) -> f32 {
        self.p1.x
    }

    fn y1(&self) -> f32 {
        self.p1.y
    }

    fn width(&self) -> f32 {
        self.p1.x - self.p0.x
    }

    fn height(&self) -> f32 {
        self.p1.y - self.p0.y
    }

    fn set_x0(
        &mut self,
        val: f32,
    ) {
        self.p0.x = val;
    }

    fn set_y0(
        &mut self,
        val: f32,
    ) {
        self.p0.y = val;
    }

    fn set_x1(
        &mut self,
        val: f32,
    ) {
        self.p1.x = val;
    }

    fn set_y1(
        &mut self,
        val: f32,
    ) {
        self.p1.y = val;
    }
}

/// Origin-size storage: origin corner plus extent size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointSize {
    /// Origin corner.
    pub origin: Point,
    /// Extent.
    pub size: Size,
}

impl RectStorage for PointSize {
    type Extent = Size;

    fn from_parts(
        origin: Point,
        extent: Size,
    ) -> Self {
        Self {
            origin,
            size: extent,
        }
    }

    fn x0(&self) -> f32 {
        self.origin.x
    }

    fn y0(&self) -> f32 {
        self.origin.y
    }

    fn x1(&self) -> f32 {
        self.origin.x + self.size.width
    }

    fn y1(&self) -> f32 {
        self.origin.y + self.size.height
    }

    fn width(&self) -> f32 {
        self.size.width
    }

    fn height(&self) -> f32 {
        self.size.height
    }

    fn set_x0(
        &mut self,
        val: f32,
    ) {
        let x1 = self.x1();
        self.origin.x = val;
        self.size.width = x1 - val;
    }

    fn set_y0(
        &mut self,
        val: f32,
    ) {
        let y1 = self.y1();
        self.origin.y = val;
        self.size.height = y1 - val;
    }

    fn set_x1(
        &mut self,
        val: f32,
    ) {
        self.size.width = val - self.origin.x;
    }

    fn set_y1(
        &mut self,
        val: f32,
    ) {
        self.size.height = val - self.origin.y;
    }
}

/// 2D rectangle generic over its storage representation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect<S: RectStorage = PointPoint> {
    storage: S,
}

impl<S: RectStorage> Rect<S> {
    /// Build a rectangle from an origin corner and the storage's extent.
    pub fn new(
        origin: Point,
        extent: S::Extent,
    ) -> Self {
        Self {
            storage: S::from_parts(origin, extent),
        }
    }

    /// Left edge.
    #[inline]
    pub fn x0(&self) -> f32 {
        self.storage.x0()
    }

    /// Bottom edge.
    #[inline]
    pub fn y0(&self) -> f32 {
        self.storage.y0()
    }

    /// Right edge.
    #[inline]
    pub fn x1(&self) -> f32 {
        self.storage.x1()
    }

    /// Top edge.
    #[inline]
    pub fn y1(&self) -> f32 {
        self.storage.y1()
    }

    /// Horizontal span.
    #[inline]
    pub fn width(&self) -> f32 {
        self.storage.width()
    }

    /// Vertical span.
    #[inline]
    pub fn height(&self) -> f32 {
        self.storage.height()
    }

    /// Move the left edge, keeping the right edge fixed.
    #[inline]
    pub fn set_x0(
        &mut self,
        val: f32,
    ) {
        self.storage.set_x0(val);
    }

    /// Move the bottom edge, keeping the top edge fixed.
    #[inline]
    pub fn set_y0(
        &mut self,
        val: f32,
    ) {
        self.storage.set_y0(val);
    }

    /// Move the right edge, keeping the left edge fixed.
    #[inline]
    pub fn set_x1(
        &mut self,
        val: f32,
    ) {
        self.storage.set_x1(val);
    }

    /// Move the top edge, keeping the bottom edge fixed.
    #[inline]
    pub fn set_y1(
        &mut self,
        val: f32,
    ) {
        self.storage.set_y1(val);
    }

    /// Origin corner.
    pub fn origin(&self) -> Point {
        Point::new(self.x0(), self.y0())
    }

    /// Extent as a size.
    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }
}
