#![forbid(unsafe_code)]

#[macro_use]
extern crate log;

//Application Imports/Exports
pub mod engine;
