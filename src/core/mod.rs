pub mod contact;
pub mod content;
pub mod data;
pub mod gallery;
pub mod media;
pub mod nav;
pub mod profile;
pub mod settings;
