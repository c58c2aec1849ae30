//! Effects - side effects declared by the reducer
//!
//! Returned from the reducer and executed by the runtime's effect handler,
//! which keeps the reducer free of I/O.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Look up `city`; the completion carries `generation` back
    Search { city: String, generation: u64 },

    /// Abort any in-flight lookup
    CancelSearch,
}
