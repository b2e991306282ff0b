pub mod content;
pub mod grade;
pub mod parse;
pub mod sheet;
pub mod state;
