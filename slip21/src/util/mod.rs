pub mod hex;
pub mod securemem;
