//! Various utility types and functions.

pub use dims::Dims;

pub mod buf;
#[cfg(feature = "std")]
pub mod pnm;

pub mod dims {
    /// Width and height of a rectangular area, in pixels by default.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
    pub struct Dims<T = u32>(pub T, pub T);

    impl<T: Copy> Dims<T> {
        pub fn width(&self) -> T {
            self.0
        }
        pub fn height(&self) -> T {
            self.1
        }
    }
    impl Dims<u32> {
        /// Returns whether either dimension is zero.
        pub fn is_empty(&self) -> bool {
            self.0 == 0 || self.1 == 0
        }
        /// Returns the number of pixels in an area of this size.
        pub fn area(&self) -> usize {
            self.0 as usize * self.1 as usize
        }
    }
}
