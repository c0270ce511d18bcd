mod controls;
mod details;
mod timeline;
