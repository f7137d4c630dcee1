//! Grid layout fitting: card count + viewport bounds in, columns/rows out.
//!
//! Pure arithmetic, no state. The renderer calls [`fit`] at draw time,
//! so a resize or a changed card count is always laid out against the
//! snapshot currently on screen.

/// Viewport bounds and card minima for a layout computation.
///
/// Units are whatever the renderer measures in -- terminal cells here,
/// pixels in a browser. Degenerate values (zero-sized viewport, zero
/// minima) clamp to a 1x1 grid rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutConstraints {
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub min_card_width: u32,
    pub min_card_height: u32,
    /// Vertical space reserved for headers and other fixed chrome.
    pub reserved_chrome: u32,
}

/// Computed grid geometry. Both dimensions are always >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    pub columns: u32,
    pub rows: u32,
}

/// Fit `card_count` cards into the viewport.
///
/// Starts from the widest grid the viewport allows, then greedily adds
/// columns while the row count would overflow the usable height. The
/// loop trades width for reduced rows and never exceeds `card_count`
/// columns, so it terminates even when the height can never be
/// satisfied -- overflow is accepted over an unbounded loop.
pub fn fit(card_count: usize, constraints: &LayoutConstraints) -> GridGeometry {
    let count = u32::try_from(card_count.max(1)).unwrap_or(u32::MAX);

    let usable_height = constraints
        .viewport_height
        .saturating_sub(constraints.reserved_chrome);
    let max_cols = (constraints.viewport_width / constraints.min_card_width.max(1)).max(1);
    let max_rows = (usable_height / constraints.min_card_height.max(1)).max(1);

    let mut columns = count.min(max_cols);
    let mut rows = count.div_ceil(columns);

    while rows > max_rows && columns < count {
        columns += 1;
        rows = count.div_ceil(columns);
    }

    GridGeometry { columns, rows }
}
