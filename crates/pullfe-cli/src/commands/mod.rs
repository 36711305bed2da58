pub mod collect;
pub mod compare;
