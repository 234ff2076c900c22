pub mod impl_fake;
pub mod impl_stdin;
pub mod interface;
