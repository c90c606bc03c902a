extern crate clap;
extern crate fstime;

pub mod avg;
pub mod cli;
pub mod config;
pub mod error;
pub mod iter;
pub mod report;
pub mod stat;
pub mod utils;
