// Line-delimited file I/O and one-time input acquisition.

pub mod acquire;
pub mod jsonl;
