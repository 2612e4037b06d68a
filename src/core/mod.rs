pub mod backend;
pub mod client;
pub mod gateway;
pub mod image_ref;
pub mod targets;
pub mod template;
pub mod view;
