use crate::core::error::{IndexAxis, InteropError, InteropResult};
use serde::Serialize;

/// Lifecycle of a grid within one plotting call.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum GridState {
    #[default]
    Empty,
    Sized,
    Populated,
    Ranged,
    Labeled,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct AxisRange {
    pub min: f32,
    pub max: f32,
}

#[derive(Debug)]
enum Buffer<'a> {
    Owned(Vec<f32>),
    Borrowed(&'a mut [f32]),
}

impl Buffer<'_> {
    fn as_slice(&self) -> &[f32] {
        match self {
            Buffer::Owned(v) => v,
            Buffer::Borrowed(s) => s,
        }
    }

    fn as_mut_slice(&mut self) -> &mut [f32] {
        match self {
            Buffer::Owned(v) => v,
            Buffer::Borrowed(s) => s,
        }
    }
}

/// Row-major 2-D float grid with axis range and plot text.
///
/// The grid either owns its buffer or writes into one supplied by the caller.
/// Resizing to new dimensions always switches to an owned, zero-filled buffer;
/// clearing drops an owned buffer and only forgets a borrowed one.
#[derive(Debug)]
pub struct HeatmapGrid<'a> {
    data: Buffer<'a>,
    rows: usize,
    cols: usize,
    range: AxisRange,
    title: String,
    subtitle: String,
    label: String,
    state: GridState,
}

impl HeatmapGrid<'static> {
    pub fn new() -> Self {
        Self {
            data: Buffer::Owned(Vec::new()),
            rows: 0,
            cols: 0,
            range: AxisRange::default(),
            title: String::new(),
            subtitle: String::new(),
            label: String::new(),
            state: GridState::Empty,
        }
    }
}

impl Default for HeatmapGrid<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> HeatmapGrid<'a> {
    /// Back the grid with a caller-owned buffer holding at least `rows * cols` values.
    pub fn with_buffer(data: &'a mut [f32], rows: usize, cols: usize) -> InteropResult<Self> {
        check_buffer(data, rows, cols)?;
        Ok(Self {
            data: Buffer::Borrowed(data),
            rows,
            cols,
            range: AxisRange::default(),
            title: String::new(),
            subtitle: String::new(),
            label: String::new(),
            state: GridState::Sized,
        })
    }

    pub fn set_buffer(&mut self, data: &'a mut [f32], rows: usize, cols: usize) -> InteropResult<()> {
        check_buffer(data, rows, cols)?;
        self.data = Buffer::Borrowed(data);
        self.rows = rows;
        self.cols = cols;
        self.state = GridState::Sized;
        Ok(())
    }

    pub fn owns_buffer(&self) -> bool {
        matches!(self.data, Buffer::Owned(_))
    }

    /// Reallocate zero-filled storage when either dimension changes; same size is a no-op.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        if rows == self.rows && cols == self.cols {
            return;
        }
        self.data = Buffer::Owned(vec![0.0; rows * cols]);
        self.rows = rows;
        self.cols = cols;
        self.state = GridState::Sized;
    }

    pub fn at(&self, row: usize, col: usize) -> InteropResult<f32> {
        let idx = self.index_of(row, col)?;
        Ok(self.data.as_slice()[idx])
    }

    pub fn at_mut(&mut self, row: usize, col: usize) -> InteropResult<&mut f32> {
        let idx = self.index_of(row, col)?;
        self.state = GridState::Populated;
        Ok(&mut self.data.as_mut_slice()[idx])
    }

    pub fn set(&mut self, row: usize, col: usize, value: f32) -> InteropResult<()> {
        *self.at_mut(row, col)? = value;
        Ok(())
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.cols
    }

    pub fn length(&self) -> usize {
        self.rows * self.cols
    }

    /// Cells in row-major order.
    pub fn values(&self) -> &[f32] {
        &self.data.as_slice()[..self.length()]
    }

    /// Drop an owned buffer (a borrowed one is left to its owner) and reset to empty.
    pub fn clear(&mut self) {
        self.data = Buffer::Owned(Vec::new());
        self.rows = 0;
        self.cols = 0;
        self.range = AxisRange::default();
        self.title.clear();
        self.subtitle.clear();
        self.label.clear();
        self.state = GridState::Empty;
    }

    pub fn range(&self) -> AxisRange {
        self.range
    }

    pub fn set_range(&mut self, min: f32, max: f32) {
        self.range = AxisRange { min, max };
        self.state = GridState::Ranged;
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.state = GridState::Labeled;
    }

    pub fn set_subtitle(&mut self, subtitle: impl Into<String>) {
        self.subtitle = subtitle.into();
        self.state = GridState::Labeled;
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
        self.state = GridState::Labeled;
    }

    pub fn state(&self) -> GridState {
        self.state
    }

    fn index_of(&self, row: usize, col: usize) -> InteropResult<usize> {
        if row >= self.rows {
            return Err(InteropError::out_of_range(IndexAxis::Row, row, self.rows));
        }
        if col >= self.cols {
            return Err(InteropError::out_of_range(IndexAxis::Column, col, self.cols));
        }
        Ok(row * self.cols + col)
    }
}

fn check_buffer(data: &[f32], rows: usize, cols: usize) -> InteropResult<()> {
    let needed = rows * cols;
    if data.len() < needed {
        return Err(InteropError::out_of_range(
            IndexAxis::Buffer,
            needed,
            data.len(),
        ));
    }
    Ok(())
}
