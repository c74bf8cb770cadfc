/// Opaque identifier for a text control within an [`InputValueStore`](crate::InputValueStore).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InputId(u64);

impl InputId {
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

impl From<u32> for InputId {
    #[inline]
    fn from(raw: u32) -> Self {
        Self::from_raw(u64::from(raw))
    }
}
