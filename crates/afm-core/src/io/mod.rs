pub mod convert;
pub mod discover;
pub mod table_io;
