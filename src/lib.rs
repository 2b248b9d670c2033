pub mod expr;
pub mod parser;
pub mod report;
pub mod scanner;
pub mod token;
