// ABOUTME: Source of message reference numbers for PDUs built without an explicit reference
// ABOUTME: Random by default, replaceable with a fixed value so encoding is reproducible

/// Supplies the reference number used when a caller does not provide one
pub trait ReferenceSource {
    fn next_reference(&self) -> u8;
}

/// Draws each reference uniformly from 0..=255
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomReference;

impl ReferenceSource for RandomReference {
    fn next_reference(&self) -> u8 {
        rand::random::<u8>()
    }
}

/// Always returns the same reference
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedReference(pub u8);

impl ReferenceSource for FixedReference {
    fn next_reference(&self) -> u8 {
        self.0
    }
}

impl<T: ReferenceSource + ?Sized> ReferenceSource for &T {
    fn next_reference(&self) -> u8 {
        (**self).next_reference()
    }
}
