//! Two-dimensional buffers, used for color and depth storage and textures.

use alloc::vec::Vec;
use core::fmt::{self, Debug, Formatter};
use core::iter::repeat_n;
use core::ops::{Deref, DerefMut};

use inner::Inner;

/// A rectangular 2D buffer that owns its elements, backed by a `Vec`.
///
/// Element (x, y) is stored at index
/// ```text
/// buf.stride() * y + x
/// ```
/// of the backing vector. For an owned buffer the stride equals the width.
///
/// # Examples
/// ```
/// use softfb_core::util::buf::Buf2;
///
/// let mut buf = Buf2::new_filled(4, 3, 0u8);
/// // Indexing with a pair (x, y) yields the element at row y, column x:
/// buf[(2, 1)] = 123;
/// // Indexing with a single usize y yields row y as a slice:
/// assert_eq!(&buf[1], &[0, 0, 123, 0]);
/// ```
#[derive(Clone)]
#[repr(transparent)]
pub struct Buf2<T>(Inner<T, Vec<T>>);

/// An immutable rectangular view to a region of memory with a given
/// width, height and stride.
///
/// The rows of a `Slice2` need not be adjacent in memory:
/// ```text
/// +------stride-----+
/// |r0_______|       |
/// |r1_______|  ...  |
/// |r2_______|       |
/// +---w-----+-------+
/// ```
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct Slice2<'a, T>(Inner<T, &'a [T]>);

/// A mutable rectangular view to a region of memory.
#[repr(transparent)]
pub struct MutSlice2<'a, T>(Inner<T, &'a mut [T]>);

impl<T> Buf2<T> {
    /// Returns a buffer with size `w` × `h`, with elements initialized
    /// with values from `init` in row-major order.
    ///
    /// # Panics
    /// If there are fewer than `w * h` elements in `init`.
    pub fn new<I>(w: usize, h: usize, init: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let data: Vec<_> = init.into_iter().take(w * h).collect();
        assert_eq!(data.len(), w * h, "too few elements");
        Self(Inner::new(w, h, w, data))
    }

    /// Returns a buffer with size `w` × `h`, with every element a clone
    /// of `val`.
    pub fn new_filled(w: usize, h: usize, val: T) -> Self
    where
        T: Clone,
    {
        Self::new(w, h, repeat_n(val, w * h))
    }

    /// Returns a buffer with size `w` × `h`, with every element
    /// initialized by calling `init_fn(x, y)`.
    pub fn new_with<F>(w: usize, h: usize, mut init_fn: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        let mut data = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                data.push(init_fn(x, y));
            }
        }
        Self::new(w, h, data)
    }

    /// Returns a view of the backing data of `self`.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.0.data
    }
}

impl<'a, T> Slice2<'a, T> {
    /// Returns a new `Slice2` view to `data` with size `w` × `h`
    /// and stride `stride`.
    ///
    /// # Examples
    /// ```
    /// use softfb_core::util::buf::Slice2;
    ///
    /// let data = [0, 1, 2, 3, 4, 5, 6];
    /// let slice = Slice2::new(2, 2, 3, &data);
    /// assert_eq!(&slice[0], &[0, 1]);
    /// assert_eq!(&slice[1], &[3, 4]);
    /// ```
    ///
    /// # Panics
    /// If `stride < w` or if the view would overflow `data`.
    pub fn new(w: usize, h: usize, stride: usize, data: &'a [T]) -> Self {
        Self(Inner::new(w, h, stride, data))
    }

    /// Returns the underlying memory of `self`, from the start of the
    /// first row to the end of the last.
    #[inline]
    pub fn data(&self) -> &'a [T] {
        self.0.data
    }
}

impl<'a, T> MutSlice2<'a, T> {
    /// Returns a new `MutSlice2` view to `data` with size `w` × `h`
    /// and stride `stride`.
    ///
    /// # Panics
    /// If `stride < w` or if the view would overflow `data`.
    pub fn new(w: usize, h: usize, stride: usize, data: &'a mut [T]) -> Self {
        Self(Inner::new(w, h, stride, data))
    }
}

//
// Foreign trait impls
//

impl<T> Debug for Buf2<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.debug_fmt(f, "Buf2")
    }
}
impl<T> Debug for Slice2<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.debug_fmt(f, "Slice2")
    }
}
impl<T> Debug for MutSlice2<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.debug_fmt(f, "MutSlice2")
    }
}

impl<T> Deref for Buf2<T> {
    type Target = Inner<T, Vec<T>>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl<'a, T> Deref for Slice2<'a, T> {
    type Target = Inner<T, &'a [T]>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl<'a, T> Deref for MutSlice2<'a, T> {
    type Target = Inner<T, &'a mut [T]>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for Buf2<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
impl<T> DerefMut for MutSlice2<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

pub mod inner {
    use core::fmt::{self, Formatter};
    use core::marker::PhantomData;
    use core::ops::{Deref, DerefMut, Index, IndexMut, Range};

    use super::{MutSlice2, Slice2};

    /// A helper type that abstracts over owned and borrowed buffers.
    /// The types `Buf2`, `Slice2`, and `MutSlice2` deref to `Inner`.
    #[derive(Copy, Clone)]
    pub struct Inner<T, D> {
        w: usize,
        h: usize,
        stride: usize,
        pub(super) data: D,
        _pd: PhantomData<T>,
    }

    impl<T, D> Inner<T, D> {
        /// Returns the width of `self`.
        #[inline]
        pub fn width(&self) -> usize {
            self.w
        }
        /// Returns the height of `self`.
        #[inline]
        pub fn height(&self) -> usize {
            self.h
        }
        /// Returns the stride of `self`: the distance in elements between
        /// the starts of two consecutive rows.
        #[inline]
        pub fn stride(&self) -> usize {
            self.stride
        }
        /// Returns whether `self` has no elements.
        #[inline]
        pub fn is_empty(&self) -> bool {
            self.w == 0 || self.h == 0
        }

        #[inline]
        fn to_index(&self, x: usize, y: usize) -> usize {
            y * self.stride + x
        }

        /// Returns the linear index of (x, y), or `None` if out of bounds.
        /// Negative coordinates are out of bounds.
        #[inline]
        fn to_index_checked(&self, x: i32, y: i32) -> Option<usize> {
            let (x, y) = (usize::try_from(x).ok()?, usize::try_from(y).ok()?);
            (x < self.w && y < self.h).then(|| self.to_index(x, y))
        }

        /// Returns the range of linear indices spanned by rows `rows`.
        fn band_range(&self, rows: &Range<usize>) -> Range<usize> {
            assert!(
                rows.start <= rows.end && rows.end <= self.h,
                "rows {rows:?} out of bounds (0..{})",
                self.h
            );
            if rows.is_empty() {
                return 0..0;
            }
            let start = self.to_index(0, rows.start);
            start..self.to_index(self.w, rows.end - 1)
        }

        #[cold]
        #[inline(never)]
        #[track_caller]
        fn position_out_of_bounds(&self, x: usize, y: usize) -> ! {
            panic!(
                "position (x={x}, y={y}) out of bounds (0..{}, 0..{})",
                self.w, self.h
            )
        }

        /// A helper for implementing `Debug`.
        pub(super) fn debug_fmt(
            &self,
            f: &mut Formatter,
            name: &str,
        ) -> fmt::Result {
            f.debug_struct(name)
                .field("w", &self.w)
                .field("h", &self.h)
                .field("stride", &self.stride)
                .finish()
        }
    }

    impl<T, D: Deref<Target = [T]>> Inner<T, D> {
        /// # Panics
        /// If `stride < w` or if the view would overflow `data`.
        #[rustfmt::skip]
        pub(super) fn new(w: usize, h: usize, stride: usize, data: D)
            -> Self
        {
            assert!(stride >= w, "stride {stride} less than width {w}");
            assert!(h == 0 || (h - 1) * stride + w <= data.len());
            Self { w, h, stride, data, _pd: PhantomData }
        }

        /// Returns a reference to the element at (x, y),
        /// or `None` if (x, y) is out of bounds.
        #[inline]
        pub fn get(&self, x: i32, y: i32) -> Option<&T> {
            self.to_index_checked(x, y).map(|i| &self.data[i])
        }

        /// Returns row `y` of `self` as a slice of length `self.width()`.
        ///
        /// # Panics
        /// If `y >= self.height()`.
        #[inline]
        pub fn row(&self, y: usize) -> &[T] {
            if y >= self.h {
                self.position_out_of_bounds(0, y);
            }
            let start = self.to_index(0, y);
            &self.data[start..start + self.w]
        }

        /// Returns an iterator over the rows of `self` as `&[T]` slices.
        pub fn rows(&self) -> impl Iterator<Item = &[T]> {
            (0..self.h).map(|y| self.row(y))
        }

        /// Returns a borrowed view of the rows `rows` of `self`.
        ///
        /// # Panics
        /// If `rows` is out of bounds.
        pub fn band(&self, rows: Range<usize>) -> Slice2<'_, T> {
            let range = self.band_range(&rows);
            let data = &self.data[range];
            Slice2::new(self.w, rows.len(), self.stride, data)
        }
    }

    impl<T, D: DerefMut<Target = [T]>> Inner<T, D> {
        /// Returns a mutable reference to the element at (x, y),
        /// or `None` if (x, y) is out of bounds.
        #[inline]
        pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut T> {
            self.to_index_checked(x, y).map(|i| &mut self.data[i])
        }

        /// Returns row `y` of `self` as a mutable slice.
        ///
        /// # Panics
        /// If `y >= self.height()`.
        #[inline]
        pub fn row_mut(&mut self, y: usize) -> &mut [T] {
            if y >= self.h {
                self.position_out_of_bounds(0, y);
            }
            let start = self.to_index(0, y);
            &mut self.data[start..start + self.w]
        }

        /// Returns a mutably borrowed view of the rows `rows` of `self`.
        ///
        /// # Panics
        /// If `rows` is out of bounds.
        pub fn band_mut(&mut self, rows: Range<usize>) -> MutSlice2<'_, T> {
            let range = self.band_range(&rows);
            let (w, stride) = (self.w, self.stride);
            MutSlice2::new(w, rows.len(), stride, &mut self.data[range])
        }

        /// Sets every element of `self` to a clone of `val`.
        pub fn fill(&mut self, val: T)
        where
            T: Clone,
        {
            if self.w == self.stride {
                let len = self.w * self.h;
                self.data[..len].fill(val);
            } else {
                for y in 0..self.h {
                    self.row_mut(y).fill(val.clone());
                }
            }
        }
    }

    impl<T, D: Deref<Target = [T]>> Index<usize> for Inner<T, D> {
        type Output = [T];

        /// Returns a reference to the row at index `y`.
        ///
        /// # Panics
        /// If `y >= self.height()`.
        #[inline]
        fn index(&self, y: usize) -> &[T] {
            self.row(y)
        }
    }

    impl<T, D: DerefMut<Target = [T]>> IndexMut<usize> for Inner<T, D> {
        #[inline]
        fn index_mut(&mut self, y: usize) -> &mut [T] {
            self.row_mut(y)
        }
    }

    impl<T, D: Deref<Target = [T]>> Index<(usize, usize)> for Inner<T, D> {
        type Output = T;

        /// Returns a reference to the element at column `x`, row `y`.
        ///
        /// # Panics
        /// If (x, y) is out of bounds.
        #[inline]
        fn index(&self, (x, y): (usize, usize)) -> &T {
            if x >= self.w || y >= self.h {
                self.position_out_of_bounds(x, y);
            }
            &self.data[self.to_index(x, y)]
        }
    }

    impl<T, D: DerefMut<Target = [T]>> IndexMut<(usize, usize)>
        for Inner<T, D>
    {
        #[inline]
        fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut T {
            if x >= self.w || y >= self.h {
                self.position_out_of_bounds(x, y);
            }
            let i = self.to_index(x, y);
            &mut self.data[i]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buf_new_with() {
        let buf = Buf2::new_with(3, 2, |x, y| x + 10 * y);
        assert_eq!(buf.data(), &[0, 1, 2, 10, 11, 12]);
        assert_eq!(buf.width(), 3);
        assert_eq!(buf.height(), 2);
        assert_eq!(buf.stride(), 3);
    }

    #[test]
    #[should_panic]
    fn buf_new_too_few_elements() {
        let _ = Buf2::new(3, 3, [1, 2, 3]);
    }

    #[test]
    fn buf_indexing() {
        let mut buf = Buf2::new_filled(4, 3, 0);
        buf[(3, 2)] = 7;
        buf[1][0] = 5;
        assert_eq!(buf[(0, 1)], 5);
        assert_eq!(buf.data()[2 * 4 + 3], 7);
        assert_eq!(&buf[2], &[0, 0, 0, 7]);
    }

    #[test]
    #[should_panic]
    fn buf_index_out_of_bounds() {
        let buf = Buf2::new_filled(4, 3, 0);
        let _ = buf[(4, 0)];
    }

    #[test]
    fn buf_get_checked() {
        let mut buf = Buf2::new_with(2, 2, |x, y| (x, y));
        assert_eq!(buf.get(1, 0), Some(&(1, 0)));
        assert_eq!(buf.get(2, 0), None);
        assert_eq!(buf.get(0, -1), None);
        assert_eq!(buf.get_mut(-1, 1), None);
        if let Some(v) = buf.get_mut(0, 1) {
            *v = (9, 9);
        }
        assert_eq!(buf[(0, 1)], (9, 9));
    }

    #[test]
    fn buf_rows() {
        let buf = Buf2::new_with(2, 3, |x, y| x + 2 * y);
        let mut rows = buf.rows();
        assert_eq!(rows.next(), Some(&[0, 1][..]));
        assert_eq!(rows.next(), Some(&[2, 3][..]));
        assert_eq!(rows.next(), Some(&[4, 5][..]));
        assert_eq!(rows.next(), None);
    }

    #[test]
    fn buf_band() {
        let buf = Buf2::new_with(2, 4, |x, y| x + 2 * y);
        let band = buf.band(2..4);
        assert_eq!(band.height(), 2);
        assert_eq!(&band[0], &[4, 5]);
        assert_eq!(band.data(), &[4, 5, 6, 7]);
        assert_eq!(buf.band(1..2).data(), &[2, 3]);
        assert!(buf.band(1..1).is_empty());
    }

    #[test]
    fn buf_band_mut_fill() {
        let mut buf = Buf2::new_filled(3, 4, 0);
        buf.band_mut(1..3).fill(1);
        assert_eq!(buf.data(), &[0, 0, 0, 1, 1, 1, 1, 1, 1, 0, 0, 0]);
    }

    #[test]
    fn slice_with_stride() {
        let data = [0, 1, 2, 3, 4, 5, 6];
        let slice = Slice2::new(2, 2, 3, &data);
        assert_eq!(slice[(1, 1)], 4);
        assert_eq!(slice.get(2, 0), None);
    }

    #[test]
    fn mut_slice_fill_with_stride() {
        let mut data = [0; 7];
        let mut slice = MutSlice2::new(2, 2, 3, &mut data);
        slice.fill(1);
        assert_eq!(data, [1, 1, 0, 1, 1, 0, 0]);
    }

    #[test]
    #[should_panic]
    fn slice_overflowing_data() {
        let data = [0; 5];
        let _ = Slice2::new(2, 2, 4, &data);
    }

    #[test]
    fn debug() {
        let buf = Buf2::new_filled(2, 3, 0u8);
        assert_eq!(
            alloc::format!("{buf:?}"),
            "Buf2 { w: 2, h: 3, stride: 2 }"
        );
    }
}
