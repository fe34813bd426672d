pub mod assembler;
pub mod config;
pub mod formatter;
pub mod header;
pub mod narrator;
pub mod pipeline;
pub mod table;
pub mod text;
pub mod writer;
