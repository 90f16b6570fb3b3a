/// Build a [`DynVec`](crate::DynVec) from a list of elements.
///
/// ```
/// use keel_vec::{dynvec, DynVec};
///
/// let v = dynvec![1, 2, 3];
/// assert_eq!(v, [1, 2, 3]);
///
/// let zeros = dynvec![0u8; 4];
/// assert_eq!(zeros.len(), 4);
///
/// let empty: DynVec<i32> = dynvec![];
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! dynvec {
    () => {
        $crate::DynVec::new()
    };
    ($elem:expr; $n:expr) => {
        $crate::DynVec::from_elem($n, $elem)
    };
    ($($x:expr),+ $(,)?) => {
        $crate::DynVec::from([$($x),+])
    };
}
