use bitflags::bitflags;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct PropFlags(u32);

bitflags! {
    impl PropFlags: u32 {
        const DONT_ENUM = 0x0001;   //	Hidden from for..in enumeration.
        const DONT_DELETE = 0x0002; //	Cannot be removed with delete.
        const READ_ONLY = 0x0004;   //	Assignments are ignored.
    }
}

impl PropFlags {
    /// Decode the integer flags argument of `ASSetPropFlags`.
    ///
    /// Unknown bits make the value unrecognisable rather than being dropped.
    pub fn from_literal(value: i64) -> Option<Self> {
        u32::try_from(value).ok().and_then(Self::from_bits)
    }
}
