/// Numeric conversion helpers.
///
/// This module provides safe functions for converting between integer and
/// floating-point types without risking silent data loss. Operators use them
/// whenever a number has to act as a count, such as repetition counts or
/// string lengths.
pub mod num;
