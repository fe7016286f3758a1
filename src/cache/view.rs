use bytes::Bytes;

/// An immutable, length-tagged byte value.
///
/// `ByteView` is the single value type exchanged between the cache layers.
/// Cloning is cheap (reference-counted buffer) and the underlying bytes can
/// never be mutated, so a view stored in the LRU and a view handed to a
/// caller may safely alias the same memory. Callers that need a buffer they
/// can write to must go through [`ByteView::to_vec`], which always allocates
/// a fresh copy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ByteView {
    data: Bytes,
}

impl ByteView {
    /// Number of bytes in the view.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns a fresh copy of the underlying bytes.
    ///
    /// Mutating the returned buffer has no effect on the cached value or on
    /// any other copy of this view.
    pub fn to_vec(&self) -> Vec<u8> {
        self.data.to_vec()
    }

    /// Borrows the underlying bytes without copying.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Renders the view as UTF-8 text, replacing invalid sequences.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }
}

impl From<Vec<u8>> for ByteView {
    fn from(data: Vec<u8>) -> Self {
        Self { data: Bytes::from(data) }
    }
}

impl From<&[u8]> for ByteView {
    fn from(data: &[u8]) -> Self {
        Self { data: Bytes::copy_from_slice(data) }
    }
}

impl From<&str> for ByteView {
    fn from(data: &str) -> Self {
        Self { data: Bytes::copy_from_slice(data.as_bytes()) }
    }
}
