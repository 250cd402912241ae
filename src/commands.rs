//! Implementation of json2yaml CLI commands.

pub mod convert;
