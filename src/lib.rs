pub mod cli;
pub mod commands;
pub mod composer;
pub mod config;
pub mod manifest;
pub mod naming;
pub mod raster;
pub mod render;
