pub mod fence;
pub mod stored;
