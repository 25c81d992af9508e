//! Cell attribute flags.

use bitflags::bitflags;

bitflags! {
    /// Attribute bits attached to a cell at construction.
    ///
    /// The bit layout is part of the public input format: hosts that
    /// build geometry from integer records pass the flag word through
    /// unchanged.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct CellFlags: u32 {
        /// Particles entering this cell are terminated. Used for the
        /// "outside world" region of a bounded problem.
        const DEAD = 1;
        /// Membership is inverted: the cell is everything *except* the
        /// intersection of its bounding senses. Useful for defining a
        /// single outside cell around a complex interior.
        const NEGATED = 2;
    }
}
