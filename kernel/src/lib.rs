// Console Kernel
//
// Entity collection controllers for the admin console: stores,
// view projection, draft editing, validation and guarded removal.

pub mod config;
pub mod console;
pub mod controller;
pub mod draft;
pub mod entity;
pub mod gate;
pub mod store;
pub mod validate;
pub mod view;
