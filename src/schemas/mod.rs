pub mod common;
pub mod qr;
