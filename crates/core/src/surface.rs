//! Origin-tracking drawing surface.
//!
//! The surface owns a cursor and an append-only list of elements. Every
//! placement opens a scope with [`DrawingSurface::set_origin`], appends one
//! element at the cursor, then closes the scope with
//! [`DrawingSurface::end_origin`]. The cursor persists between placements,
//! so an axis left unset reuses the previous value.

use tracing::trace;

use crate::element::{Element, ElementKind};
use crate::error::{Axis, LabelError};

/// A position on the label in millimetres, measured from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal offset.
    pub x: f64,
    /// Vertical offset.
    pub y: f64,
}

impl Point {
    /// Construct a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Cursor plus ordered element list for one label.
#[derive(Debug, Default)]
pub struct DrawingSurface {
    cursor: Point,
    elements: Vec<Element>,
    scope_open: bool,
}

impl DrawingSurface {
    /// An empty surface with the cursor at the top-left corner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the cursor and open a placement scope.
    ///
    /// Only the given axes change. With both omitted the cursor stays put,
    /// so the next element stacks on the previous origin.
    ///
    /// Coordinates must be finite and non-negative; on error neither the
    /// cursor nor the scope changes.
    pub fn set_origin(&mut self, x: Option<f64>, y: Option<f64>) -> Result<Point, LabelError> {
        if let Some(value) = x {
            check_coordinate(Axis::X, value)?;
        }
        if let Some(value) = y {
            check_coordinate(Axis::Y, value)?;
        }
        if let Some(value) = x {
            self.cursor.x = value;
        }
        if let Some(value) = y {
            self.cursor.y = value;
        }
        self.scope_open = true;
        trace!(x = self.cursor.x, y = self.cursor.y, "origin set");
        Ok(self.cursor)
    }

    /// Close the current placement scope. The cursor keeps its value.
    pub fn end_origin(&mut self) {
        self.scope_open = false;
    }

    /// Push an element at the current cursor.
    ///
    /// The surface does not validate `kind`; [`LabelDocument`] checks
    /// styles and capacity before it appends.
    ///
    /// [`LabelDocument`]: crate::LabelDocument
    pub fn append(&mut self, kind: ElementKind) -> &Element {
        let index = self.elements.len();
        self.elements.push(Element::new(self.cursor, kind));
        &self.elements[index]
    }

    /// Current cursor.
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// `true` between `set_origin` and `end_origin`.
    pub fn scope_open(&self) -> bool {
        self.scope_open
    }

    /// Placed elements in insertion (paint) order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Number of placed elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// `true` when nothing has been placed.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

fn check_coordinate(axis: Axis, value: f64) -> Result<(), LabelError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(LabelError::InvalidOrigin { axis, value })
    }
}
