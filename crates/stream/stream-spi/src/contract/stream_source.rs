//! Stream source trait definition.

/// A lazy, infinite producer of stream values.
///
/// Each call advances internal state, so a source cannot be rewound.
pub trait StreamSource {
    /// Produce the next value of the stream.
    fn next_value(&mut self) -> f64;
}

impl<S: StreamSource + ?Sized> StreamSource for Box<S> {
    fn next_value(&mut self) -> f64 {
        (**self).next_value()
    }
}
