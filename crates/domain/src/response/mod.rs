//! Response snapshot types

mod spec;

pub use spec::ResponseSpec;
