pub mod codegen;
pub mod error;
pub mod fetch;
pub mod ir;
pub mod parse;
