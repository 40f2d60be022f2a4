pub mod confirm;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod events;
pub mod pagination;
pub mod services;
