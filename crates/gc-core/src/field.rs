use crate::Error;

/// One gradient-field cell: magnitude and direction of the image gradient.
///
/// Direction is in radians, East-counterclockwise (0 = East, `PI/2` =
/// North), domain `[-PI, PI]` as produced by `atan2`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Gradient {
    pub magnitude: f32,
    pub direction: f32,
}

impl Gradient {
    pub fn new(magnitude: f32, direction: f32) -> Self {
        Self {
            magnitude,
            direction,
        }
    }
}

/// Owned, dense, row-major gradient raster.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientField {
    width: usize,
    height: usize,
    data: Vec<Gradient>,
}

impl GradientField {
    pub fn from_vec(width: usize, height: usize, data: Vec<Gradient>) -> Result<Self, Error> {
        let expected = width.checked_mul(height).ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: data.len(),
        })?;

        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn new_fill(width: usize, height: usize, value: Gradient) -> Self {
        let len = width.checked_mul(height).expect("field size overflow");
        Self {
            width,
            height,
            data: vec![value; len],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[Gradient] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [Gradient] {
        &mut self.data
    }

    pub fn as_view(&self) -> FieldView<'_> {
        FieldView {
            width: self.width,
            height: self.height,
            stride: self.width,
            data: &self.data,
        }
    }

    pub fn as_view_mut(&mut self) -> FieldViewMut<'_> {
        FieldViewMut {
            width: self.width,
            height: self.height,
            stride: self.width,
            data: &mut self.data,
        }
    }
}

/// Borrowed read-only view over a gradient raster.
///
/// `stride` is in cells, not bytes, and may exceed `width` for views over
/// padded buffers.
#[derive(Debug, Clone, Copy)]
pub struct FieldView<'a> {
    width: usize,
    height: usize,
    stride: usize,
    data: &'a [Gradient],
}

impl<'a> FieldView<'a> {
    pub fn from_slice(
        width: usize,
        height: usize,
        stride: usize,
        data: &'a [Gradient],
    ) -> Result<Self, Error> {
        if stride < width {
            return Err(Error::InvalidStride);
        }

        let min_len = stride.checked_mul(height).ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: data.len(),
        })?;

        if data.len() < min_len {
            return Err(Error::SizeMismatch {
                expected: min_len,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn row(&self, y: usize) -> &'a [Gradient] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.stride;
        &self.data[start..start + self.width]
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&'a Gradient> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y * self.stride + x;
        self.data.get(idx)
    }

    pub fn is_contiguous(&self) -> bool {
        self.stride == self.width
    }

    pub fn as_contiguous_slice(&self) -> Option<&'a [Gradient]> {
        if !self.is_contiguous() {
            return None;
        }
        let len = self.width * self.height;
        self.data.get(0..len)
    }
}

/// Borrowed mutable view over a gradient raster.
#[derive(Debug)]
pub struct FieldViewMut<'a> {
    width: usize,
    height: usize,
    stride: usize,
    data: &'a mut [Gradient],
}

impl<'a> FieldViewMut<'a> {
    pub fn from_slice_mut(
        width: usize,
        height: usize,
        stride: usize,
        data: &'a mut [Gradient],
    ) -> Result<Self, Error> {
        if stride < width {
            return Err(Error::InvalidStride);
        }

        let min_len = stride.checked_mul(height).ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: data.len(),
        })?;

        if data.len() < min_len {
            return Err(Error::SizeMismatch {
                expected: min_len,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn row(&self, y: usize) -> &[Gradient] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.stride;
        &self.data[start..start + self.width]
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [Gradient] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.stride;
        &mut self.data[start..start + self.width]
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&Gradient> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y * self.stride + x;
        self.data.get(idx)
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut Gradient> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y * self.stride + x;
        self.data.get_mut(idx)
    }

    pub fn as_view(&self) -> FieldView<'_> {
        FieldView {
            width: self.width,
            height: self.height,
            stride: self.stride,
            data: self.data,
        }
    }
}
