pub mod criteria;
pub mod export;
pub mod prospect;
