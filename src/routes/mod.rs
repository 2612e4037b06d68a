pub mod page;
pub mod qr;
