/*
Skytread
*/
pub mod audio;
pub mod combat;
pub mod level;
pub mod player;
pub mod restart;
pub mod scoring;
pub mod session;
pub mod touch;
pub mod ui;
pub mod world;
