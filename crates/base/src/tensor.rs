use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum TensorError {
    ShapeOverflow,
    ShapeMismatch { expected: usize, got: usize },
    Empty,
    ScalarConcat,
    ConcatMismatch { expected: Vec<usize>, got: Vec<usize> },
}

impl fmt::Display for TensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TensorError::ShapeOverflow => write!(f, "shape dimensions overflow when multiplied"),
            TensorError::ShapeMismatch { expected, got } => {
                write!(f, "shape mismatch: expected {expected} elements, got {got}")
            }
            TensorError::Empty => write!(f, "cannot concatenate zero tensors"),
            TensorError::ScalarConcat => write!(f, "cannot concatenate rank-0 tensors"),
            TensorError::ConcatMismatch { expected, got } => {
                write!(f, "concat shape mismatch: expected {expected:?}, got {got:?}")
            }
        }
    }
}

impl std::error::Error for TensorError {}

/// Dense row-major tensor.
#[derive(Clone, PartialEq)]
pub struct Tensor<T> {
    pub shape: Vec<usize>,
    pub data: Vec<T>,
}

impl<T: fmt::Debug> fmt::Debug for Tensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor")
            .field("shape", &self.shape)
            .field("data", &self.data)
            .finish()
    }
}

fn element_count(shape: &[usize]) -> Result<usize, TensorError> {
    shape.iter().try_fold(1usize, |product, &dim| {
        product.checked_mul(dim).ok_or(TensorError::ShapeOverflow)
    })
}

impl<T> Tensor<T> {
    pub fn new(shape: Vec<usize>, data: Vec<T>) -> Result<Self, TensorError> {
        let expected = element_count(&shape)?;
        if expected != data.len() {
            return Err(TensorError::ShapeMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T: Default + Clone> Tensor<T> {
    pub fn zeros(shape: Vec<usize>) -> Result<Self, TensorError> {
        let count = element_count(&shape)?;
        Ok(Self {
            shape,
            data: vec![T::default(); count],
        })
    }
}

impl<T: Clone> Tensor<T> {
    /// Concatenate along the leading axis.
    ///
    /// Every tensor must have the same rank and the same trailing dimensions
    /// as the first one. Order of `tensors` is preserved in the output.
    pub fn concat(tensors: &[Tensor<T>]) -> Result<Self, TensorError> {
        let first = tensors.first().ok_or(TensorError::Empty)?;
        if first.shape.is_empty() {
            return Err(TensorError::ScalarConcat);
        }
        let trailing = &first.shape[1..];

        let mut rows = 0usize;
        let mut data = Vec::with_capacity(tensors.iter().map(|t| t.data.len()).sum());
        for tensor in tensors {
            if tensor.shape.len() != first.shape.len() || &tensor.shape[1..] != trailing {
                return Err(TensorError::ConcatMismatch {
                    expected: first.shape.clone(),
                    got: tensor.shape.clone(),
                });
            }
            rows = rows
                .checked_add(tensor.shape[0])
                .ok_or(TensorError::ShapeOverflow)?;
            data.extend_from_slice(&tensor.data);
        }

        let mut shape = first.shape.clone();
        shape[0] = rows;
        Ok(Self { shape, data })
    }
}
