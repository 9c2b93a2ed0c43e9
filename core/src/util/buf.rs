//! Owned and borrowed rectangular buffers.
//!
//! [`Buf2`] is a heap-allocated 2D array; [`Slice2`] and [`MutSlice2`]
//! are borrowed rectangular windows into one, analogous to `&[T]` and
//! `&mut [T]`. All three can be indexed by position and iterated row
//! by row. Framebuffers and other render targets build on these types.

use alloc::{vec, vec::Vec};
use core::fmt::{self, Debug, Formatter};
use core::ops::{Deref, DerefMut};

use grid::Grid;

use crate::util::Dims;

//
// Traits
//

/// Types that can be borrowed as an immutable 2D view.
pub trait AsSlice2<T> {
    /// Borrows `self` as a `Slice2`.
    fn as_slice2(&self) -> Slice2<T>;
}

/// Types that can be borrowed as a mutable 2D view.
pub trait AsMutSlice2<T> {
    /// Borrows `self` as a `MutSlice2`.
    fn as_mut_slice2(&mut self) -> MutSlice2<T>;
}

//
// Types
//

/// An owned rectangular buffer, stored in row-major order.
///
/// The backing `Vec` holds exactly `width * height` elements with no
/// padding between rows, so element (x, y) lives at linear index
/// `y * width + x`.
///
/// # Examples
/// ```
/// # use redfin_core::util::buf::Buf2;
/// let mut buf: Buf2<i32> = Buf2::new((3, 2));
///
/// // An (x, y) pair addresses a single element...
/// buf[[0u32, 1]] = 7;
/// // ...and a usize a whole row:
/// assert_eq!(&buf[1usize], &[7, 0, 0]);
/// ```
#[derive(Clone)]
#[repr(transparent)]
pub struct Buf2<T>(Grid<T, Vec<T>>);

/// A borrowed rectangular view into a slice, the two-dimensional
/// analog of `&[T]`.
///
/// A view is described by its width, height, and *stride*: the step
/// from the start of one row to the start of the next. A stride larger
/// than the width leaves a gap between consecutive rows:
///
/// ```text
///  <------- stride ------->
///  <-- width -->
///  +------------+---------+
///  | row 0      |         |
///  | row 1      | skipped |
///  | row 2      |         |
///  +------------+---------+
/// ```
///
/// This makes it possible to view any axis-aligned rectangle of a
/// larger buffer, such as one quadrant of a framebuffer.
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct Slice2<'a, T>(Grid<T, &'a [T]>);

/// The mutable counterpart of [`Slice2`]: a borrowed rectangular view
/// whose elements can be written through.
#[repr(transparent)]
pub struct MutSlice2<'a, T>(Grid<T, &'a mut [T]>);

//
// Inherent impls
//

impl<T> Buf2<T> {
    /// Returns a new buffer of dimensions `dims`, with every element
    /// initialized to `T::default()`.
    pub fn new(dims: Dims) -> Self
    where
        T: Clone + Default,
    {
        let (w, h) = dims;
        let data = vec![T::default(); w as usize * h as usize];
        Self(Grid::new(dims, w, data))
    }

    /// Returns a new buffer of dimensions `dims`, with the element at
    /// (x, y) initialized to `init(x, y)`.
    ///
    /// # Examples
    /// ```
    /// # use redfin_core::util::buf::Buf2;
    /// let buf = Buf2::new_with((4, 2), |x, y| 10 * y + x);
    /// assert_eq!(buf.data(), &[0, 1, 2, 3, 10, 11, 12, 13]);
    /// ```
    pub fn new_with<F>(dims: Dims, mut init: F) -> Self
    where
        F: FnMut(u32, u32) -> T,
    {
        let (w, h) = dims;
        let data: Vec<T> = (0..h)
            .flat_map(|y| (0..w).map(move |x| (x, y)))
            .map(|(x, y)| init(x, y))
            .collect();
        Self(Grid::new(dims, w, data))
    }

    /// Returns the elements of `self` as a flat slice in row-major order.
    pub fn data(&self) -> &[T] {
        self.0.data()
    }
    /// Returns the elements of `self` as a flat mutable slice.
    pub fn data_mut(&mut self) -> &mut [T] {
        self.0.data_mut()
    }
}

impl<'a, T> Slice2<'a, T> {
    /// Returns a view of `data` shaped as `dims.0` columns and `dims.1`
    /// rows, with consecutive rows starting `stride` elements apart.
    ///
    /// The backing slice must reach at least to the last element of the
    /// last row. Data past that point, like the gap between rows when
    /// `stride` exceeds the width, is not part of the view.
    ///
    /// # Examples
    /// ```
    /// # use redfin_core::util::buf::Slice2;
    /// let digits = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9];
    /// // Two rows of three, starting at indices 0 and 4:
    /// let grid = Slice2::new((3, 2), 4, &digits);
    ///
    /// assert_eq!(&grid[0usize], &[0, 1, 2]);
    /// assert_eq!(&grid[1usize], &[4, 5, 6]);
    /// // digits[3] and digits[7..] are invisible to `grid`.
    /// ```
    ///
    /// # Panics
    /// If `stride < dims.0` or if `data` is too short.
    pub fn new(dims: Dims, stride: u32, data: &'a [T]) -> Self {
        Self(Grid::new(dims, stride, data))
    }
}

impl<'a, T> MutSlice2<'a, T> {
    /// Returns a mutable view of `data` with dimensions `dims` and
    /// stride `stride`.
    ///
    /// # Panics
    /// If `stride < dims.0` or if `data` is too short.
    pub fn new(dims: Dims, stride: u32, data: &'a mut [T]) -> Self {
        Self(Grid::new(dims, stride, data))
    }
}

//
// Local trait impls
//

impl<T> AsSlice2<T> for Buf2<T> {
    #[inline]
    fn as_slice2(&self) -> Slice2<T> {
        self.0.as_view()
    }
}
impl<T> AsSlice2<T> for Slice2<'_, T> {
    #[inline]
    fn as_slice2(&self) -> Slice2<T> {
        self.0.as_view()
    }
}
impl<T> AsSlice2<T> for MutSlice2<'_, T> {
    #[inline]
    fn as_slice2(&self) -> Slice2<T> {
        self.0.as_view()
    }
}

impl<T> AsMutSlice2<T> for Buf2<T> {
    #[inline]
    fn as_mut_slice2(&mut self) -> MutSlice2<T> {
        self.0.as_view_mut()
    }
}
impl<T> AsMutSlice2<T> for MutSlice2<'_, T> {
    #[inline]
    fn as_mut_slice2(&mut self) -> MutSlice2<T> {
        self.0.as_view_mut()
    }
}

//
// Foreign trait impls
//

impl<T> Debug for Buf2<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt_named(f, "Buf2")
    }
}
impl<T> Debug for Slice2<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt_named(f, "Slice2")
    }
}
impl<T> Debug for MutSlice2<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt_named(f, "MutSlice2")
    }
}

impl<T> Deref for Buf2<T> {
    type Target = Grid<T, Vec<T>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl<T> DerefMut for Buf2<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<'a, T> Deref for Slice2<'a, T> {
    type Target = Grid<T, &'a [T]>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a, T> Deref for MutSlice2<'a, T> {
    type Target = Grid<T, &'a mut [T]>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl<'a, T> DerefMut for MutSlice2<'a, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

mod grid {
    use core::fmt::{self, Formatter};
    use core::marker::PhantomData;
    use core::ops::{Deref, DerefMut, Index, IndexMut};

    use super::{MutSlice2, Slice2};
    use crate::math::{Vec2i, Vec2u};
    use crate::util::Dims;

    /// The common representation behind `Buf2`, `Slice2`, and
    /// `MutSlice2`, generic over whether the storage `S` is owned or
    /// borrowed. The wrapper types all deref to `Grid`, making the
    /// methods below available on each of them.
    #[derive(Copy, Clone)]
    pub struct Grid<T, S> {
        dims: Dims,
        stride: u32,
        data: S,
        _pd: PhantomData<T>,
    }

    impl<T, S> Grid<T, S> {
        /// Returns the width of `self` in elements.
        #[inline]
        pub fn width(&self) -> u32 {
            self.dims.0
        }
        /// Returns the number of rows in `self`.
        #[inline]
        pub fn height(&self) -> u32 {
            self.dims.1
        }
        /// Returns the width and height of `self`.
        #[inline]
        pub fn dims(&self) -> Dims {
            self.dims
        }
        /// Returns the distance, in elements, between the starts of
        /// consecutive rows of `self`.
        #[inline]
        pub fn stride(&self) -> u32 {
            self.stride
        }
        /// Returns whether the rows of `self` sit back to back in
        /// memory. Owned buffers always do; views do if their stride
        /// equals their width or they have at most one nonempty row.
        pub fn is_contiguous(&self) -> bool {
            let (w, h) = self.dims;
            self.stride == w || h <= 1 || w == 0
        }
        /// Returns whether `self` contains no elements.
        pub fn is_empty(&self) -> bool {
            let (w, h) = self.dims;
            w == 0 || h == 0
        }

        // Linear index of (x, y), or None if outside the dimensions.
        #[inline]
        fn offset(&self, x: u32, y: u32) -> Option<usize> {
            let (w, h) = self.dims;
            (x < w && y < h)
                .then(|| y as usize * self.stride as usize + x as usize)
        }

        #[cold]
        #[inline(never)]
        #[track_caller]
        fn bad_pos(&self, x: u32, y: u32) -> ! {
            let (w, h) = self.dims;
            panic!("position ({x}, {y}) outside of {w}x{h} buffer")
        }

        pub(super) fn fmt_named(
            &self,
            f: &mut Formatter<'_>,
            name: &str,
        ) -> fmt::Result {
            let (w, h) = self.dims;
            write!(f, "{name}[{w}x{h}, stride {}]", self.stride)
        }
    }

    impl<T, S: Deref<Target = [T]>> Grid<T, S> {
        /// # Panics
        /// If `stride` is less than the width, or if `data` cannot hold
        /// `dims` elements at that stride.
        pub(super) fn new(dims: Dims, stride: u32, data: S) -> Self {
            let (w, h) = (dims.0 as usize, dims.1 as usize);
            assert!(w <= stride as usize, "stride less than width");
            if h > 0 {
                let len = (h - 1) * stride as usize + w;
                assert!(len <= data.len(), "backing data too short");
            }
            Self { dims, stride, data, _pd: PhantomData }
        }

        pub(super) fn data(&self) -> &[T] {
            &self.data
        }

        /// Borrows `self` as an immutable view.
        pub fn as_view(&self) -> Slice2<T> {
            Slice2(Grid::new(self.dims, self.stride, self.data()))
        }

        /// Returns a reference to the element at `pos`, or `None` if
        /// `pos` is outside the buffer.
        pub fn get(&self, pos: impl Into<Vec2i>) -> Option<&T> {
            let [x, y] = pos.into().0;
            let (x, y) = (u32::try_from(x).ok()?, u32::try_from(y).ok()?);
            let i = self.offset(x, y)?;
            Some(&self.data[i])
        }

        /// Returns an iterator over the rows of `self`, each a slice
        /// of length [`width()`](Self::width).
        pub fn rows(&self) -> impl Iterator<Item = &[T]> {
            let (w, h) = (self.dims.0 as usize, self.dims.1 as usize);
            self.data
                .chunks(self.stride.max(1) as usize)
                .take(h)
                .map(move |row| &row[..w])
        }

        /// Returns an iterator over every element of `self`, row by
        /// row from the top, left to right within each row.
        pub fn iter(&self) -> impl Iterator<Item = &T> {
            self.rows().flatten()
        }
    }

    impl<T, S: DerefMut<Target = [T]>> Grid<T, S> {
        /// Borrows `self` as a mutable view.
        pub fn as_view_mut(&mut self) -> MutSlice2<T> {
            MutSlice2(Grid::new(self.dims, self.stride, self.data_mut()))
        }

        pub(super) fn data_mut(&mut self) -> &mut [T] {
            &mut self.data
        }

        /// Returns an iterator over the rows of `self`, each a mutable
        /// slice of length [`width()`](Self::width).
        pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [T]> {
            let (w, h) = (self.dims.0 as usize, self.dims.1 as usize);
            self.data
                .chunks_mut(self.stride.max(1) as usize)
                .take(h)
                .map(move |row| &mut row[..w])
        }

        /// Returns a mutable iterator over every element of `self`,
        /// row by row from the top, left to right within each row.
        pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
            self.rows_mut().flatten()
        }

        /// Sets every element of `self` to a clone of `val`.
        pub fn fill(&mut self, val: T)
        where
            T: Clone,
        {
            if self.is_contiguous() {
                self.data.fill(val);
            } else {
                for row in self.rows_mut() {
                    row.fill(val.clone());
                }
            }
        }

        /// Returns a mutable reference to the element at `pos`, or
        /// `None` if `pos` is outside the buffer.
        pub fn get_mut(&mut self, pos: impl Into<Vec2i>) -> Option<&mut T> {
            let [x, y] = pos.into().0;
            let (x, y) = (u32::try_from(x).ok()?, u32::try_from(y).ok()?);
            let i = self.offset(x, y)?;
            Some(&mut self.data[i])
        }
    }

    impl<T, S: Deref<Target = [T]>> Index<usize> for Grid<T, S> {
        type Output = [T];

        /// Returns row `i` of `self` as a slice of length
        /// [`width()`](Self::width).
        #[inline]
        fn index(&self, i: usize) -> &[T] {
            let start = i * self.stride as usize;
            &self.data[start..start + self.dims.0 as usize]
        }
    }

    impl<T, S: DerefMut<Target = [T]>> IndexMut<usize> for Grid<T, S> {
        /// Returns row `i` of `self` as a mutable slice of length
        /// [`width()`](Self::width).
        #[inline]
        fn index_mut(&mut self, i: usize) -> &mut [T] {
            let start = i * self.stride as usize;
            let end = start + self.dims.0 as usize;
            &mut self.data[start..end]
        }
    }

    impl<T, S, P> Index<P> for Grid<T, S>
    where
        S: Deref<Target = [T]>,
        P: Into<Vec2u>,
    {
        type Output = T;

        /// Returns the element of `self` at `pos`.
        ///
        /// # Panics
        /// If `pos` is outside the buffer.
        #[inline]
        fn index(&self, pos: P) -> &T {
            let [x, y] = pos.into().0;
            match self.offset(x, y) {
                Some(i) => &self.data[i],
                None => self.bad_pos(x, y),
            }
        }
    }

    impl<T, S, P> IndexMut<P> for Grid<T, S>
    where
        S: DerefMut<Target = [T]>,
        P: Into<Vec2u>,
    {
        /// Returns the element of `self` at `pos` mutably.
        ///
        /// # Panics
        /// If `pos` is outside the buffer.
        #[inline]
        fn index_mut(&mut self, pos: P) -> &mut T {
            let [x, y] = pos.into().0;
            match self.offset(x, y) {
                Some(i) => &mut self.data[i],
                None => self.bad_pos(x, y),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use crate::math::vec2;

    use super::*;

    fn sum_via_trait(buf: &impl AsSlice2<u32>) -> u32 {
        buf.as_slice2().iter().sum()
    }

    #[test]
    fn default_init() {
        let buf: Buf2<i32> = Buf2::new((4, 3));
        assert_eq!(buf.data(), &[0; 12]);
    }

    #[test]
    fn init_fn_called_in_row_major_order() {
        let buf = Buf2::new_with((3, 2), |x, y| 10 * y + x);
        assert_eq!(buf.data(), &[0, 1, 2, 10, 11, 12]);
    }

    #[test]
    fn dims_and_stride() {
        let buf: Buf2<()> = Buf2::new((6, 4));
        assert_eq!(buf.dims(), (6, 4));
        assert_eq!(buf.width(), 6);
        assert_eq!(buf.height(), 4);
        assert_eq!(buf.stride(), 6);
        assert!(buf.is_contiguous());
        assert!(!buf.is_empty());
    }

    #[test]
    fn position_indexing() {
        let mut buf = Buf2::new_with((4, 3), |x, y| 10 * y + x);

        assert_eq!(buf[[0u32, 0]], 0);
        assert_eq!(buf[[3u32, 1]], 13);
        assert_eq!(buf[vec2::<u32, ()>(2, 2)], 22);

        buf[[1u32, 2]] = 99;
        assert_eq!(buf[[1u32, 2]], 99);
    }

    #[test]
    fn row_indexing() {
        let mut buf = Buf2::new_with((3, 3), |x, y| 10 * y + x);

        assert_eq!(&buf[0usize], &[0, 1, 2]);
        assert_eq!(&buf[2usize], &[20, 21, 22]);

        buf[1usize][0] = 5;
        assert_eq!(buf.data()[3], 5);
    }

    #[test]
    fn get_rejects_out_of_bounds_positions() {
        let buf = Buf2::new_with((4, 3), |x, y| 10 * y + x);

        assert_eq!(buf.get(vec2(1, 2)), Some(&21));
        assert_eq!(buf.get(vec2(4, 0)), None);
        assert_eq!(buf.get(vec2(0, 3)), None);
        assert_eq!(buf.get(vec2(-1, 1)), None);
    }

    #[test]
    fn get_mut_writes_through() {
        let mut buf = Buf2::new_with((4, 3), |x, y| 10 * y + x);

        if let Some(v) = buf.get_mut(vec2(3, 2)) {
            *v = 7;
        }
        assert_eq!(buf[[3u32, 2]], 7);
        assert_eq!(buf.get_mut(vec2(3, 3)), None);
    }

    #[test]
    #[should_panic]
    fn indexing_past_width_panics() {
        let buf: Buf2<()> = Buf2::new((5, 5));
        let () = buf[[5u32, 0]];
    }

    #[test]
    fn fill_overwrites_all_elements() {
        let mut buf: Buf2<u32> = Buf2::new((3, 4));
        buf.fill(9);
        assert_eq!(buf.data(), &[9; 12]);
    }

    #[test]
    fn iter_mut_then_iter() {
        let mut buf: Buf2<u32> = Buf2::new((2, 2));
        for (i, v) in buf.iter_mut().enumerate() {
            *v = i as u32;
        }
        assert!(buf.iter().eq(&[0, 1, 2, 3]));
    }

    #[test]
    fn view_skips_stride_padding() {
        let data: Vec<u32> = (0..14).collect();
        let view = Slice2::new((3, 2), 4, &data);

        assert_eq!(view.dims(), (3, 2));
        assert_eq!(view.stride(), 4);
        assert!(!view.is_contiguous());

        let mut rows = view.rows();
        assert_eq!(rows.next(), Some(&[0, 1, 2][..]));
        assert_eq!(rows.next(), Some(&[4, 5, 6][..]));
        assert_eq!(rows.next(), None);
    }

    #[test]
    fn view_of_exact_length_data() {
        // Backing data ends right at the last element of the last row.
        let data = [1; 7];
        let view = Slice2::new((3, 2), 4, &data);
        assert_eq!(view.rows().count(), 2);
        assert_eq!(view.iter().count(), 6);
    }

    #[test]
    fn view_position_indexing() {
        let data: Vec<u32> = (0..12).collect();
        let view = Slice2::new((3, 2), 5, &data);

        assert_eq!(view[[0u32, 0]], 0);
        assert_eq!(view[[2u32, 1]], 7);
        assert_eq!(view.get(vec2(1, 1)), Some(&6));
        assert_eq!(view.get(vec2(0, 2)), None);
    }

    #[test]
    fn mut_view_fill_respects_bounds() {
        let mut data = [0; 11];
        let mut view = MutSlice2::new((2, 3), 4, &mut data);
        view.fill(8);

        #[rustfmt::skip]
        assert_eq!(
            data,
            [8, 8, 0, 0,
             8, 8, 0, 0,
             8, 8, 0]
        );
    }

    #[test]
    fn mut_view_of_exact_length_data() {
        let mut data = [0; 10];
        let mut view = MutSlice2::new((2, 3), 4, &mut data);

        assert_eq!(view.rows_mut().count(), 3);
        for row in view.rows_mut() {
            row[0] = 1;
        }
        assert_eq!(data, [1, 0, 0, 0, 1, 0, 0, 0, 1, 0]);
    }

    #[test]
    fn views_share_the_backing_elements() {
        let buf = Buf2::new_with((3, 2), |x, _| x);
        assert_eq!(sum_via_trait(&buf), 6);
        assert_eq!(sum_via_trait(&buf.as_slice2()), 6);
    }

    #[test]
    fn mut_view_writes_to_backing_buf() {
        let mut buf: Buf2<u32> = Buf2::new((2, 2));
        buf.as_mut_slice2().fill(3);
        assert_eq!(buf.data(), &[3; 4]);
    }

    #[test]
    fn zero_width_buf_is_empty() {
        let buf: Buf2<u32> = Buf2::new((0, 5));
        assert!(buf.is_empty());
        assert!(buf.is_contiguous());
        assert_eq!(buf.iter().count(), 0);
    }

    #[test]
    fn debug_shows_extents() {
        let buf: Buf2<u32> = Buf2::new((3, 2));
        assert_eq!(format!("{buf:?}"), "Buf2[3x2, stride 3]");
    }

    #[test]
    #[should_panic]
    fn stride_less_than_width_panics() {
        let _ = Slice2::new((5, 2), 4, &[0; 10]);
    }

    #[test]
    #[should_panic]
    fn too_short_backing_data_panics() {
        let _ = Slice2::new((3, 4), 4, &[0; 10]);
    }
}
