pub mod impl_noop;
pub mod interface;
